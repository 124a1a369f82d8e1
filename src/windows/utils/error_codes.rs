//! Windows error code handling utilities

use std::fmt;

/// Common Windows error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success,
    FileNotFound,
    AccessDenied,
    InvalidHandle,
    GenFailure,
    InvalidParameter,
    CallNotImplemented,
    NotFound,
    NotAllAssigned,
    Unknown(u32),
}

impl From<u32> for ErrorCode {
    fn from(code: u32) -> Self {
        match code {
            0 => ErrorCode::Success,
            2 => ErrorCode::FileNotFound,
            5 => ErrorCode::AccessDenied,
            6 => ErrorCode::InvalidHandle,
            31 => ErrorCode::GenFailure,
            87 => ErrorCode::InvalidParameter,
            120 => ErrorCode::CallNotImplemented,
            1168 => ErrorCode::NotFound,
            1300 => ErrorCode::NotAllAssigned,
            _ => ErrorCode::Unknown(code),
        }
    }
}

impl From<ErrorCode> for u32 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl ErrorCode {
    /// Get the last Windows error of the calling thread
    #[cfg(windows)]
    pub fn last_error() -> Self {
        unsafe { ErrorCode::from(winapi::um::errhandlingapi::GetLastError()) }
    }

    /// Get the last Windows error, never reporting success
    ///
    /// Used right after a call that signalled failure; a zero last-error
    /// would leave the caller without an exit status.
    #[cfg(windows)]
    pub fn last_failure() -> Self {
        Self::last_error().or_failure()
    }

    /// Map `Success` to `GenFailure`, keep everything else
    pub fn or_failure(self) -> Self {
        match self {
            ErrorCode::Success => ErrorCode::GenFailure,
            other => other,
        }
    }

    /// Raw Win32 error value
    pub fn code(&self) -> u32 {
        match self {
            ErrorCode::Success => 0,
            ErrorCode::FileNotFound => 2,
            ErrorCode::AccessDenied => 5,
            ErrorCode::InvalidHandle => 6,
            ErrorCode::GenFailure => 31,
            ErrorCode::InvalidParameter => 87,
            ErrorCode::CallNotImplemented => 120,
            ErrorCode::NotFound => 1168,
            ErrorCode::NotAllAssigned => 1300,
            ErrorCode::Unknown(code) => *code,
        }
    }

    /// Human readable description from the system message table
    #[cfg(windows)]
    pub fn description(&self) -> String {
        let message = ::windows::core::HRESULT::from_win32(self.code())
            .message()
            .to_string();
        let message = message.trim_end();
        if message.is_empty() {
            self.to_string()
        } else {
            message.to_string()
        }
    }

    /// Human readable description from the built-in table
    #[cfg(not(windows))]
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Success => write!(f, "Success"),
            ErrorCode::FileNotFound => write!(f, "File not found"),
            ErrorCode::AccessDenied => write!(f, "Access denied"),
            ErrorCode::InvalidHandle => write!(f, "Invalid handle"),
            ErrorCode::GenFailure => write!(f, "General failure"),
            ErrorCode::InvalidParameter => write!(f, "Invalid parameter"),
            ErrorCode::CallNotImplemented => write!(f, "Call not implemented"),
            ErrorCode::NotFound => write!(f, "Element not found"),
            ErrorCode::NotAllAssigned => write!(f, "Not all privileges assigned"),
            ErrorCode::Unknown(code) => write!(f, "Unknown error: {}", code),
        }
    }
}
