//! Foreign process handle opened for handle duplication

use crate::core::types::{HandleValue, ProcessId};
use crate::windows::bindings::kernel32;
use crate::windows::types::Handle;
use crate::windows::utils::ErrorCode;
use std::fmt;
use winapi::um::winnt::{HANDLE, PROCESS_DUP_HANDLE};

/// Process handle with `PROCESS_DUP_HANDLE` access, closed on drop
pub struct ProcessHandle {
    handle: Handle,
    pid: ProcessId,
}

impl ProcessHandle {
    /// Open a process so handles can be duplicated out of it
    pub fn open_for_duplication(pid: ProcessId) -> Result<Self, ErrorCode> {
        let raw_handle = kernel32::open_process(pid, PROCESS_DUP_HANDLE)?;
        Ok(ProcessHandle {
            handle: Handle::new(raw_handle),
            pid,
        })
    }

    /// Get the process ID
    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    /// Duplicate `value` from this process's handle table into ours
    pub fn duplicate_handle(&self, value: HandleValue, access: u32) -> Result<Handle, ErrorCode> {
        let source = value.as_usize() as HANDLE;
        let duplicated = unsafe { kernel32::duplicate_handle(self.handle.raw(), source, access)? };
        Ok(Handle::new(duplicated))
    }
}

impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("pid", &self.pid)
            .field("handle", &self.handle)
            .finish()
    }
}
