//! Scriptable [`Platform`] for tests
//!
//! `MockPlatform` stands in for the Windows API: named events, processes,
//! module tables and foreign handle tables are registered up front, failures
//! can be injected per call, and every call is recorded so tests can assert
//! ordering (privilege before process open, reset before set, and so on).
//!
//! ```
//! use signal_any_event::testing::MockPlatform;
//! use signal_any_event::{signal_event, AddressingMode, Namespace, SignalOperation, SignalRequest};
//!
//! let mut platform = MockPlatform::new();
//! let event = platform.add_named_event("MyEvent");
//!
//! let request = SignalRequest::new(
//!     AddressingMode::ByName { name: "MyEvent".into(), namespace: Namespace::Default },
//!     SignalOperation::Set,
//! );
//! signal_event(&platform, &request).unwrap();
//! assert!(event.is_signaled());
//! assert_eq!(platform.live_handles(), 0);
//! ```

use crate::core::platform::{EventObject, Platform};
use crate::core::types::{HandleValue, ModuleEntry, ProcessEntry, ProcessId, SignalStep};
use crate::windows::utils::ErrorCode;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// A recorded platform call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    OpenEvent(String),
    Processes,
    Modules(ProcessId),
    EnableDebugPrivilege,
    OpenProcess(ProcessId),
    DuplicateEvent(ProcessId, HandleValue),
}

/// Event object shared between the platform and the test
#[derive(Debug, Default)]
pub struct MockEvent {
    signaled: Cell<bool>,
    pulses: Cell<usize>,
    steps: RefCell<Vec<SignalStep>>,
    failures: RefCell<HashMap<SignalStep, ErrorCode>>,
}

impl MockEvent {
    /// Create an event in the given initial state
    pub fn new(signaled: bool) -> Self {
        let event = MockEvent::default();
        event.signaled.set(signaled);
        event
    }

    /// Current signaled state
    pub fn is_signaled(&self) -> bool {
        self.signaled.get()
    }

    /// Number of successful pulses
    pub fn pulses(&self) -> usize {
        self.pulses.get()
    }

    /// Steps attempted on this event, failed ones included
    pub fn steps(&self) -> Vec<SignalStep> {
        self.steps.borrow().clone()
    }

    /// Make every future `step` fail with `code`
    pub fn fail_step(&self, step: SignalStep, code: ErrorCode) {
        self.failures.borrow_mut().insert(step, code);
    }

    fn run(&self, step: SignalStep) -> Result<(), ErrorCode> {
        self.steps.borrow_mut().push(step);
        if let Some(code) = self.failures.borrow().get(&step) {
            return Err(*code);
        }
        match step {
            SignalStep::Set => self.signaled.set(true),
            SignalStep::Reset => self.signaled.set(false),
            SignalStep::Pulse => {
                // Manual-reset semantics: waiters are released, state ends not signaled
                self.signaled.set(false);
                self.pulses.set(self.pulses.get() + 1);
            }
        }
        Ok(())
    }
}

/// Owned handle to a [`MockEvent`]
#[derive(Debug)]
pub struct MockEventHandle {
    event: Rc<MockEvent>,
    live: Rc<Cell<usize>>,
}

impl MockEventHandle {
    fn open(event: Rc<MockEvent>, live: &Rc<Cell<usize>>) -> Self {
        live.set(live.get() + 1);
        MockEventHandle {
            event,
            live: Rc::clone(live),
        }
    }
}

impl Drop for MockEventHandle {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

impl EventObject for MockEventHandle {
    fn set(&self) -> Result<(), ErrorCode> {
        self.event.run(SignalStep::Set)
    }

    fn reset(&self) -> Result<(), ErrorCode> {
        self.event.run(SignalStep::Reset)
    }

    fn pulse(&self) -> Result<(), ErrorCode> {
        self.event.run(SignalStep::Pulse)
    }
}

/// Owned handle to a mock foreign process
#[derive(Debug)]
pub struct MockProcessHandle {
    pid: ProcessId,
    live: Rc<Cell<usize>>,
}

impl MockProcessHandle {
    pub fn pid(&self) -> ProcessId {
        self.pid
    }
}

impl Drop for MockProcessHandle {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

/// In-memory platform with scripted processes, modules and events
#[derive(Debug, Default)]
pub struct MockPlatform {
    named_events: HashMap<String, Rc<MockEvent>>,
    processes: Vec<ProcessEntry>,
    modules: HashMap<ProcessId, Vec<ModuleEntry>>,
    foreign_handles: HashMap<(ProcessId, u32), Rc<MockEvent>>,
    snapshot_failure: Option<ErrorCode>,
    module_failures: HashMap<ProcessId, ErrorCode>,
    privilege_failure: Option<ErrorCode>,
    open_failures: HashMap<ProcessId, ErrorCode>,
    calls: RefCell<Vec<Call>>,
    live: Rc<Cell<usize>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a not-signaled named event under its full object name
    pub fn add_named_event(&mut self, name: &str) -> Rc<MockEvent> {
        let event = Rc::new(MockEvent::new(false));
        self.named_events.insert(name.to_string(), Rc::clone(&event));
        event
    }

    /// Append a process to the snapshot
    pub fn add_process(&mut self, pid: ProcessId, exe_file: &str) -> &mut Self {
        self.processes.push(ProcessEntry::new(pid, exe_file));
        self
    }

    /// Append a module to the module table of `pid`
    pub fn add_module(&mut self, pid: ProcessId, name: &str, path: &str) -> &mut Self {
        self.modules
            .entry(pid)
            .or_default()
            .push(ModuleEntry::new(name, path));
        self
    }

    /// Register a not-signaled event reachable as `handle` inside `pid`
    pub fn add_foreign_event(&mut self, pid: ProcessId, handle: u32) -> Rc<MockEvent> {
        let event = Rc::new(MockEvent::new(false));
        self.foreign_handles
            .insert((pid, handle), Rc::clone(&event));
        event
    }

    pub fn fail_snapshot(&mut self, code: ErrorCode) -> &mut Self {
        self.snapshot_failure = Some(code);
        self
    }

    pub fn fail_modules(&mut self, pid: ProcessId, code: ErrorCode) -> &mut Self {
        self.module_failures.insert(pid, code);
        self
    }

    pub fn fail_privilege(&mut self, code: ErrorCode) -> &mut Self {
        self.privilege_failure = Some(code);
        self
    }

    pub fn fail_open_process(&mut self, pid: ProcessId, code: ErrorCode) -> &mut Self {
        self.open_failures.insert(pid, code);
        self
    }

    /// Calls made so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Handles currently open (events and processes)
    pub fn live_handles(&self) -> usize {
        self.live.get()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl Platform for MockPlatform {
    type Event = MockEventHandle;
    type Process = MockProcessHandle;

    fn open_event(&self, name: &str) -> Result<Self::Event, ErrorCode> {
        self.record(Call::OpenEvent(name.to_string()));
        self.named_events
            .get(name)
            .map(|event| MockEventHandle::open(Rc::clone(event), &self.live))
            .ok_or(ErrorCode::FileNotFound)
    }

    fn processes(&self) -> Result<Vec<ProcessEntry>, ErrorCode> {
        self.record(Call::Processes);
        match self.snapshot_failure {
            Some(code) => Err(code),
            None => Ok(self.processes.clone()),
        }
    }

    fn modules(&self, pid: ProcessId) -> Result<Vec<ModuleEntry>, ErrorCode> {
        self.record(Call::Modules(pid));
        if let Some(code) = self.module_failures.get(&pid) {
            return Err(*code);
        }
        Ok(self.modules.get(&pid).cloned().unwrap_or_default())
    }

    fn enable_debug_privilege(&self) -> Result<(), ErrorCode> {
        self.record(Call::EnableDebugPrivilege);
        match self.privilege_failure {
            Some(code) => Err(code),
            None => Ok(()),
        }
    }

    fn open_process(&self, pid: ProcessId) -> Result<Self::Process, ErrorCode> {
        self.record(Call::OpenProcess(pid));
        if let Some(code) = self.open_failures.get(&pid) {
            return Err(*code);
        }
        if !self.processes.iter().any(|p| p.pid == pid) {
            return Err(ErrorCode::InvalidParameter);
        }
        self.live.set(self.live.get() + 1);
        Ok(MockProcessHandle {
            pid,
            live: Rc::clone(&self.live),
        })
    }

    fn duplicate_event(
        &self,
        process: &Self::Process,
        handle: HandleValue,
    ) -> Result<Self::Event, ErrorCode> {
        self.record(Call::DuplicateEvent(process.pid, handle));
        self.foreign_handles
            .get(&(process.pid, handle.get()))
            .map(|event| MockEventHandle::open(Rc::clone(event), &self.live))
            .ok_or(ErrorCode::InvalidHandle)
    }
}
