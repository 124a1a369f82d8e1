//! Operating system seam used by the resolver, locator and signaler
//!
//! Every OS call the core makes goes through [`Platform`] and
//! [`EventObject`]. The Windows implementation lives in
//! `crate::windows::NativePlatform`; `crate::testing::MockPlatform` scripts
//! the same calls for tests on any host.
//!
//! Handles returned from these methods own the underlying OS object and
//! release it when dropped.

use super::types::{HandleValue, ModuleEntry, ProcessEntry, ProcessId, SignalStep};
use crate::windows::utils::ErrorCode;

/// An opened event object with modify-state access
pub trait EventObject {
    /// Put the event into the signaled state
    fn set(&self) -> Result<(), ErrorCode>;

    /// Put the event into the not-signaled state
    fn reset(&self) -> Result<(), ErrorCode>;

    /// Signal and immediately reset, releasing waiting threads
    fn pulse(&self) -> Result<(), ErrorCode>;

    /// Dispatch one primitive step
    fn apply(&self, step: SignalStep) -> Result<(), ErrorCode> {
        match step {
            SignalStep::Set => self.set(),
            SignalStep::Pulse => self.pulse(),
            SignalStep::Reset => self.reset(),
        }
    }
}

/// The OS calls needed to resolve and signal an event
pub trait Platform {
    /// Owned event handle
    type Event: EventObject;
    /// Owned handle to a foreign process opened for handle duplication
    type Process;

    /// Open an existing named event, non-inheritable
    fn open_event(&self, name: &str) -> Result<Self::Event, ErrorCode>;

    /// Snapshot of running processes in enumeration order
    fn processes(&self) -> Result<Vec<ProcessEntry>, ErrorCode>;

    /// Modules currently loaded in `pid`
    fn modules(&self, pid: ProcessId) -> Result<Vec<ModuleEntry>, ErrorCode>;

    /// Enable `SeDebugPrivilege` on the current process token
    fn enable_debug_privilege(&self) -> Result<(), ErrorCode>;

    /// Open `pid` with duplicate-handle access
    fn open_process(&self, pid: ProcessId) -> Result<Self::Process, ErrorCode>;

    /// Copy `handle` from `process` into the current process with
    /// modify-state access, non-inheritable
    fn duplicate_event(
        &self,
        process: &Self::Process,
        handle: HandleValue,
    ) -> Result<Self::Event, ErrorCode>;
}
