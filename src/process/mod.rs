//! Process lookup and privilege handling
//!
//! The locator and the privilege elevator work through the
//! [`Platform`](crate::core::Platform) seam; the ToolHelp enumerators and the
//! process handle wrapper are the Windows implementation behind it.

pub mod locator;
pub mod privileges;

#[cfg(windows)]
pub mod enumerator;
#[cfg(windows)]
pub mod handle;

pub use locator::{find_process, ProcessLocator, ProcessQuery};
pub use privileges::{try_enable_debug_privilege, SE_DEBUG_NAME};

#[cfg(windows)]
pub use enumerator::{enumerate_modules, enumerate_processes, ModuleEnumerator, ProcessEnumerator};
#[cfg(windows)]
pub use handle::ProcessHandle;
