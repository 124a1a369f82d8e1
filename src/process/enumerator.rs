//! Process and module enumeration using Windows ToolHelp32 API

use crate::core::types::{ModuleEntry, ProcessEntry, ProcessId};
use crate::windows::types::Handle;
use crate::windows::utils::{wide_to_string, ErrorCode};
use std::mem;
use winapi::shared::minwindef::FALSE;
use winapi::um::tlhelp32::{
    CreateToolhelp32Snapshot, Module32FirstW, Module32NextW, Process32FirstW, Process32NextW,
    MODULEENTRY32W, PROCESSENTRY32W, TH32CS_SNAPMODULE, TH32CS_SNAPPROCESS,
};

fn create_snapshot(flags: u32, pid: ProcessId) -> Result<Handle, ErrorCode> {
    let raw = unsafe { CreateToolhelp32Snapshot(flags, pid) };
    Handle::from_snapshot(raw).ok_or_else(ErrorCode::last_failure)
}

/// Process enumerator using ToolHelp32 API
pub struct ProcessEnumerator {
    snapshot: Handle,
    first_called: bool,
}

impl ProcessEnumerator {
    /// Snapshot all running processes
    pub fn new() -> Result<Self, ErrorCode> {
        Ok(ProcessEnumerator {
            snapshot: create_snapshot(TH32CS_SNAPPROCESS, 0)?,
            first_called: false,
        })
    }

    fn next_process(&mut self) -> Option<ProcessEntry> {
        unsafe {
            let mut entry: PROCESSENTRY32W = mem::zeroed();
            entry.dwSize = mem::size_of::<PROCESSENTRY32W>() as u32;

            let success = if !self.first_called {
                self.first_called = true;
                Process32FirstW(self.snapshot.raw(), &mut entry)
            } else {
                Process32NextW(self.snapshot.raw(), &mut entry)
            };

            if success == FALSE {
                return None;
            }

            Some(ProcessEntry::new(
                entry.th32ProcessID,
                wide_to_string(&entry.szExeFile),
            ))
        }
    }
}

impl Iterator for ProcessEnumerator {
    type Item = ProcessEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_process()
    }
}

/// Module enumerator for a single process
pub struct ModuleEnumerator {
    snapshot: Handle,
    first_called: bool,
}

impl ModuleEnumerator {
    /// Snapshot the modules loaded in `pid`
    pub fn new(pid: ProcessId) -> Result<Self, ErrorCode> {
        Ok(ModuleEnumerator {
            snapshot: create_snapshot(TH32CS_SNAPMODULE, pid)?,
            first_called: false,
        })
    }

    fn next_module(&mut self) -> Option<ModuleEntry> {
        unsafe {
            let mut entry: MODULEENTRY32W = mem::zeroed();
            entry.dwSize = mem::size_of::<MODULEENTRY32W>() as u32;

            let success = if !self.first_called {
                self.first_called = true;
                Module32FirstW(self.snapshot.raw(), &mut entry)
            } else {
                Module32NextW(self.snapshot.raw(), &mut entry)
            };

            if success == FALSE {
                return None;
            }

            Some(ModuleEntry::new(
                wide_to_string(&entry.szModule),
                wide_to_string(&entry.szExePath),
            ))
        }
    }
}

impl Iterator for ModuleEnumerator {
    type Item = ModuleEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_module()
    }
}

/// Enumerate all running processes
pub fn enumerate_processes() -> Result<Vec<ProcessEntry>, ErrorCode> {
    Ok(ProcessEnumerator::new()?.collect())
}

/// Enumerate modules loaded in `pid`
pub fn enumerate_modules(pid: ProcessId) -> Result<Vec<ModuleEntry>, ErrorCode> {
    Ok(ModuleEnumerator::new(pid)?.collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_enumerate_processes() {
        let processes = enumerate_processes().unwrap();

        // Should have at least System and System Idle Process
        assert!(processes.len() >= 2);
        assert!(processes.iter().any(|p| p.pid == 4));
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_current_process_in_enumeration() {
        let current_pid = std::process::id();
        let processes = enumerate_processes().unwrap();
        let current = processes.iter().find(|p| p.pid == current_pid);
        assert!(current.is_some());
        assert!(current.unwrap().file_name().to_lowercase().ends_with(".exe"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_process_enumerator_iterator() {
        let count = ProcessEnumerator::new().unwrap().take(5).count();
        assert!(count > 0);
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_own_modules_include_executable() {
        let exe = std::env::current_exe().unwrap();
        let exe_name = exe.file_name().unwrap().to_string_lossy().to_string();
        let modules = enumerate_modules(std::process::id()).unwrap();

        assert!(modules
            .iter()
            .any(|m| m.name.eq_ignore_ascii_case(&exe_name) && m.path.contains('\\')));
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_modules_of_missing_process() {
        assert!(enumerate_modules(999999).is_err());
    }
}
