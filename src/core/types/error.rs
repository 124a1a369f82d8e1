//! Error types for event resolution and signaling

use super::{HandleValue, ProcessId, SignalStep};
use crate::windows::utils::ErrorCode;
use thiserror::Error;

/// Every way an invocation can fail
///
/// All variants are terminal. Each one maps to a non-zero Win32 error code
/// through [`EventError::os_code`], which becomes the process exit status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Unable to parse PID value '{0}'")]
    InvalidPid(String),

    #[error("Unable to parse handle value '{0}'")]
    InvalidHandle(String),

    #[error("Handle was not specified")]
    MissingHandle,

    #[error("Unable to find process '{0}'")]
    ProcessNotFound(String),

    #[error("Unable to open an event '{name}'")]
    OpenEventFailed { name: String, code: ErrorCode },

    #[error("Unable to open process {pid}")]
    ProcessOpenFailed { pid: ProcessId, code: ErrorCode },

    #[error("Unable to open event (handle duplication of {handle} from process {pid} failed)")]
    DuplicateFailed {
        pid: ProcessId,
        handle: HandleValue,
        code: ErrorCode,
    },

    #[error("Unable to modify event state ({step} failed)")]
    SignalFailed { step: SignalStep, code: ErrorCode },

    #[error("Unsupported mode")]
    UnsupportedMode,

    #[error("Unable to create process snapshot")]
    SnapshotError { code: ErrorCode },
}

/// Result type alias for event operations
pub type EventResult<T> = Result<T, EventError>;

impl EventError {
    /// Win32 error code describing this failure, never zero
    pub fn error_code(&self) -> ErrorCode {
        let code = match self {
            EventError::InvalidPid(_) | EventError::InvalidHandle(_) | EventError::MissingHandle => {
                ErrorCode::InvalidParameter
            }
            EventError::ProcessNotFound(_) => ErrorCode::NotFound,
            EventError::UnsupportedMode => ErrorCode::CallNotImplemented,
            EventError::OpenEventFailed { code, .. }
            | EventError::ProcessOpenFailed { code, .. }
            | EventError::DuplicateFailed { code, .. }
            | EventError::SignalFailed { code, .. }
            | EventError::SnapshotError { code } => *code,
        };
        code.or_failure()
    }

    /// Raw Win32 error value, used as the process exit status
    pub fn os_code(&self) -> u32 {
        self.error_code().code()
    }

    /// One-line description of the failing stage
    pub fn stage(&self) -> String {
        self.to_string()
    }

    /// Full diagnostic line: stage, code and system description
    pub fn report(&self) -> String {
        let code = self.error_code();
        format!("{}. Error: {} {}", self.stage(), code.code(), code.description())
    }
}
