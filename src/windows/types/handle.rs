//! Safe HANDLE wrapper with automatic cleanup

use crate::windows::bindings::kernel32;
use std::fmt;
use winapi::um::handleapi::INVALID_HANDLE_VALUE;
use winapi::um::winnt::HANDLE;

/// Safe wrapper around Windows HANDLE with RAII semantics
pub struct Handle {
    handle: HANDLE,
}

impl Handle {
    /// Create a new Handle wrapper
    pub fn new(handle: HANDLE) -> Self {
        Handle { handle }
    }

    /// Wrap a ToolHelp snapshot, `None` for `INVALID_HANDLE_VALUE`
    pub fn from_snapshot(handle: HANDLE) -> Option<Self> {
        if handle == INVALID_HANDLE_VALUE || handle.is_null() {
            None
        } else {
            Some(Handle { handle })
        }
    }

    /// Get the raw handle
    pub fn raw(&self) -> HANDLE {
        self.handle
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            // Ignore errors on cleanup
            unsafe {
                let _ = kernel32::close_handle(self.handle);
            }
        }
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({:p})", self.handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn test_from_snapshot_rejects_invalid() {
        assert!(Handle::from_snapshot(INVALID_HANDLE_VALUE).is_none());
        assert!(Handle::from_snapshot(ptr::null_mut()).is_none());
    }

    #[test]
    fn test_null_handle_drops_quietly() {
        let handle = Handle::new(ptr::null_mut());
        assert_eq!(handle.raw(), ptr::null_mut());
        drop(handle);
    }
}
