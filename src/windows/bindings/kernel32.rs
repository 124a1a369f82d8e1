//! Kernel32.dll bindings for process, handle and event operations

use crate::windows::utils::{string_to_wide, ErrorCode};
use std::ptr;
use winapi::shared::minwindef::{DWORD, FALSE};
use winapi::um::handleapi::{CloseHandle, DuplicateHandle};
use winapi::um::processthreadsapi::{GetCurrentProcess, OpenProcess};
use winapi::um::synchapi::{OpenEventW, ResetEvent, SetEvent};
use winapi::um::winbase::PulseEvent;
use winapi::um::winnt::HANDLE;

/// Safe wrapper for OpenProcess, non-inheritable
pub fn open_process(pid: u32, desired_access: DWORD) -> Result<HANDLE, ErrorCode> {
    unsafe {
        let handle = OpenProcess(desired_access, FALSE, pid);
        if handle.is_null() {
            Err(ErrorCode::last_failure())
        } else {
            Ok(handle)
        }
    }
}

/// Safe wrapper for OpenEventW, non-inheritable
pub fn open_event(name: &str, desired_access: DWORD) -> Result<HANDLE, ErrorCode> {
    let wide_name = string_to_wide(name);
    unsafe {
        let handle = OpenEventW(desired_access, FALSE, wide_name.as_ptr());
        if handle.is_null() {
            Err(ErrorCode::last_failure())
        } else {
            Ok(handle)
        }
    }
}

/// Copy `source` from `source_process` into the current process
///
/// # Safety
/// `source_process` must be a valid process handle opened with
/// `PROCESS_DUP_HANDLE`
pub unsafe fn duplicate_handle(
    source_process: HANDLE,
    source: HANDLE,
    desired_access: DWORD,
) -> Result<HANDLE, ErrorCode> {
    let mut target: HANDLE = ptr::null_mut();
    if DuplicateHandle(
        source_process,
        source,
        GetCurrentProcess(),
        &mut target,
        desired_access,
        FALSE,
        0,
    ) == FALSE
    {
        Err(ErrorCode::last_failure())
    } else {
        Ok(target)
    }
}

/// Safe wrapper for SetEvent
///
/// # Safety
/// The handle must be a valid event handle with modify-state access
pub unsafe fn set_event(handle: HANDLE) -> Result<(), ErrorCode> {
    if SetEvent(handle) == FALSE {
        Err(ErrorCode::last_failure())
    } else {
        Ok(())
    }
}

/// Safe wrapper for ResetEvent
///
/// # Safety
/// The handle must be a valid event handle with modify-state access
pub unsafe fn reset_event(handle: HANDLE) -> Result<(), ErrorCode> {
    if ResetEvent(handle) == FALSE {
        Err(ErrorCode::last_failure())
    } else {
        Ok(())
    }
}

/// Safe wrapper for PulseEvent
///
/// # Safety
/// The handle must be a valid event handle with modify-state access
pub unsafe fn pulse_event(handle: HANDLE) -> Result<(), ErrorCode> {
    if PulseEvent(handle) == FALSE {
        Err(ErrorCode::last_failure())
    } else {
        Ok(())
    }
}

/// Safe wrapper for CloseHandle
///
/// # Safety
/// The handle must be a valid Windows handle
pub unsafe fn close_handle(handle: HANDLE) -> Result<(), ErrorCode> {
    if handle.is_null() {
        return Ok(());
    }

    if CloseHandle(handle) == FALSE {
        Err(ErrorCode::last_failure())
    } else {
        Ok(())
    }
}
