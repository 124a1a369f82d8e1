//! Windows API bindings
//!
//! Low-level FFI wrappers around the system libraries. Every function
//! reports failure as the thread's last-error code.

pub mod advapi32;
pub mod kernel32;
