//! Process and module enumeration records

use super::ProcessId;
use crate::windows::utils::extract_filename;

/// One entry of a process snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    pub pid: ProcessId,
    /// Executable as reported by the snapshot, usually a bare file name
    pub exe_file: String,
}

impl ProcessEntry {
    pub fn new(pid: ProcessId, exe_file: impl Into<String>) -> Self {
        ProcessEntry {
            pid,
            exe_file: exe_file.into(),
        }
    }

    /// Last path component of the executable
    pub fn file_name(&self) -> &str {
        extract_filename(&self.exe_file)
    }
}

/// One module loaded in a process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEntry {
    pub name: String,
    pub path: String,
}

impl ModuleEntry {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        ModuleEntry {
            name: name.into(),
            path: path.into(),
        }
    }
}
