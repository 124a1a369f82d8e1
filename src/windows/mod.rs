//! Windows API layer
//!
//! Provides safe wrappers around the Windows API functions used to open,
//! duplicate and signal event objects. All unsafe FFI calls are contained
//! within this module and `crate::process`. The error-code and string
//! utilities are portable so the rest of the crate compiles on any host.

#[cfg(windows)]
pub mod bindings;
#[cfg(windows)]
mod platform;
#[cfg(windows)]
pub mod types;
pub mod utils;

#[cfg(windows)]
pub use platform::{NativeEvent, NativePlatform};
#[cfg(windows)]
pub use types::Handle;
pub use utils::ErrorCode;
