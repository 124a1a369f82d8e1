//! SignalAnyEvent library: set, pulse or reset a Windows event object
//!
//! An event is addressed by name, or by a raw handle value inside another
//! process (given by id or located by executable name). Foreign handles are
//! duplicated into this process before they are signaled.

pub mod cli;
pub mod config;
pub mod core;
pub mod event;
pub mod process;
#[doc(hidden)]
pub mod testing;
pub mod windows;

pub use crate::core::types::{
    AddressingMode, EventError, EventResult, EventTarget, HandleValue, Namespace, ProcessId,
    SignalOperation, SignalStep,
};
pub use crate::event::{signal_event, SignalRequest};
pub use crate::windows::utils::ErrorCode;

#[cfg(windows)]
pub use crate::windows::NativePlatform;

// Re-export core directly for full access
pub use crate::core::{EventObject, Platform, AUTHORS, VERSION};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_constants() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
        assert_eq!(AUTHORS, env!("CARGO_PKG_AUTHORS"));
    }

    #[test]
    fn test_error_reexport() {
        let error = EventError::ProcessNotFound("notepad.exe".to_string());
        assert_eq!(error.os_code(), ErrorCode::NotFound.code());
        assert!(error.report().starts_with("Unable to find process 'notepad.exe'. Error: 1168"));
    }

    #[test]
    fn test_request_reexport() {
        let request = SignalRequest::new(
            AddressingMode::ByName {
                name: "Evt".to_string(),
                namespace: Namespace::Local,
            },
            SignalOperation::from_flags(true, true),
        );
        assert_eq!(request.operation, SignalOperation::ResetThenSet);
        assert_eq!(
            request.operation.steps(),
            &[SignalStep::Reset, SignalStep::Set]
        );
    }
}
