//! [`Platform`] implementation over the Win32 API

use crate::core::platform::{EventObject, Platform};
use crate::core::types::{HandleValue, ModuleEntry, ProcessEntry, ProcessId};
use crate::process::privileges::SE_DEBUG_NAME;
use crate::process::{enumerate_modules, enumerate_processes, ProcessHandle};
use crate::windows::bindings::{advapi32, kernel32};
use crate::windows::types::Handle;
use crate::windows::utils::ErrorCode;
use std::fmt;
use winapi::um::winnt::EVENT_MODIFY_STATE;

/// Event handle opened with `EVENT_MODIFY_STATE`, closed on drop
pub struct NativeEvent {
    handle: Handle,
}

impl NativeEvent {
    pub fn new(handle: Handle) -> Self {
        NativeEvent { handle }
    }
}

impl EventObject for NativeEvent {
    fn set(&self) -> Result<(), ErrorCode> {
        unsafe { kernel32::set_event(self.handle.raw()) }
    }

    fn reset(&self) -> Result<(), ErrorCode> {
        unsafe { kernel32::reset_event(self.handle.raw()) }
    }

    fn pulse(&self) -> Result<(), ErrorCode> {
        unsafe { kernel32::pulse_event(self.handle.raw()) }
    }
}

impl fmt::Debug for NativeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeEvent")
            .field("handle", &self.handle)
            .finish()
    }
}

/// The real Windows API
#[derive(Debug, Default, Clone, Copy)]
pub struct NativePlatform;

impl Platform for NativePlatform {
    type Event = NativeEvent;
    type Process = ProcessHandle;

    fn open_event(&self, name: &str) -> Result<Self::Event, ErrorCode> {
        let raw = kernel32::open_event(name, EVENT_MODIFY_STATE)?;
        Ok(NativeEvent::new(Handle::new(raw)))
    }

    fn processes(&self) -> Result<Vec<ProcessEntry>, ErrorCode> {
        enumerate_processes()
    }

    fn modules(&self, pid: ProcessId) -> Result<Vec<ModuleEntry>, ErrorCode> {
        enumerate_modules(pid)
    }

    fn enable_debug_privilege(&self) -> Result<(), ErrorCode> {
        advapi32::enable_privilege(SE_DEBUG_NAME)
    }

    fn open_process(&self, pid: ProcessId) -> Result<Self::Process, ErrorCode> {
        ProcessHandle::open_for_duplication(pid)
    }

    fn duplicate_event(
        &self,
        process: &Self::Process,
        handle: HandleValue,
    ) -> Result<Self::Event, ErrorCode> {
        let duplicated = process.duplicate_handle(handle, EVENT_MODIFY_STATE)?;
        Ok(NativeEvent::new(duplicated))
    }
}
