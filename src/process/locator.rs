//! Map a process name or executable path to a process id

use crate::core::platform::Platform;
use crate::core::types::{EventError, EventResult, ModuleEntry, ProcessEntry, ProcessId};
use crate::windows::utils::{eq_ignore_case, extract_filename, normalize_path};
use tracing::{debug, warn};

/// A parsed process lookup request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessQuery {
    full: String,
    file_name: String,
    qualified: bool,
}

impl ProcessQuery {
    /// A query is qualified when it contains a path separator
    pub fn new(name_or_path: &str) -> Self {
        let full = normalize_path(name_or_path);
        let qualified = full.contains('\\');
        let file_name = extract_filename(&full).to_string();
        ProcessQuery {
            full,
            file_name,
            qualified,
        }
    }

    /// Match against the snapshot entry alone
    pub fn matches_entry(&self, entry: &ProcessEntry) -> bool {
        if self.qualified {
            eq_ignore_case(&self.full, &entry.exe_file)
        } else {
            eq_ignore_case(&self.full, entry.file_name())
        }
    }

    /// Whether the module table of `entry` is worth consulting
    pub fn needs_module_check(&self, entry: &ProcessEntry) -> bool {
        self.qualified && entry.pid != 0 && eq_ignore_case(&self.file_name, entry.file_name())
    }

    /// Match against one module of a process whose file name already matched
    pub fn matches_module(&self, entry: &ProcessEntry, module: &ModuleEntry) -> bool {
        eq_ignore_case(entry.file_name(), &module.name) && eq_ignore_case(&self.full, &module.path)
    }
}

/// Finds processes through a [`Platform`]
pub struct ProcessLocator<'a, P: Platform> {
    platform: &'a P,
}

impl<'a, P: Platform> ProcessLocator<'a, P> {
    pub fn new(platform: &'a P) -> Self {
        ProcessLocator { platform }
    }

    /// First process matching `name_or_path`, in enumeration order
    ///
    /// Snapshot failures are reported as `ProcessNotFound`.
    pub fn find_process(&self, name_or_path: &str) -> EventResult<ProcessId> {
        match self.locate(&ProcessQuery::new(name_or_path)) {
            Ok(Some(pid)) => {
                debug!("Process '{}' resolved to pid {}", name_or_path, pid);
                Ok(pid)
            }
            Ok(None) => Err(EventError::ProcessNotFound(name_or_path.to_string())),
            Err(err) => {
                warn!("{}. Error: {}", err, err.error_code());
                Err(EventError::ProcessNotFound(name_or_path.to_string()))
            }
        }
    }

    /// Scan the snapshot; `Ok(None)` when nothing matched
    pub fn locate(&self, query: &ProcessQuery) -> EventResult<Option<ProcessId>> {
        let processes = self
            .platform
            .processes()
            .map_err(|code| EventError::SnapshotError { code })?;

        for entry in &processes {
            if query.matches_entry(entry) {
                return Ok(Some(entry.pid));
            }

            // Snapshot entries usually carry only the file name; the module
            // table has the full path of the main executable.
            if query.needs_module_check(entry) && self.module_matches(query, entry) {
                return Ok(Some(entry.pid));
            }
        }

        Ok(None)
    }

    fn module_matches(&self, query: &ProcessQuery, entry: &ProcessEntry) -> bool {
        match self.platform.modules(entry.pid) {
            Ok(modules) => modules.iter().any(|m| query.matches_module(entry, m)),
            Err(code) => {
                debug!(
                    "Skipping module table of pid {}: {} {}",
                    entry.pid,
                    code.code(),
                    code
                );
                false
            }
        }
    }
}

/// Convenience wrapper around [`ProcessLocator::find_process`]
pub fn find_process<P: Platform>(platform: &P, name_or_path: &str) -> EventResult<ProcessId> {
    ProcessLocator::new(platform).find_process(name_or_path)
}
