//! Turn an addressing mode into an owned, process-local event handle
//!
//! Resolution runs in two phases. [`HandleResolver::target`] validates the
//! arguments and, for process-name addressing, runs the process locator.
//! [`HandleResolver::open`] then touches the OS: a named event is opened
//! directly, while a foreign handle is reached by enabling the debug
//! privilege, opening the owning process for duplication and duplicating the
//! raw value into this process. The foreign process handle is closed as soon
//! as the duplication returns.

use super::parse::{parse_handle, parse_pid};
use crate::core::platform::{EventObject, Platform};
use crate::core::types::{
    AddressingMode, EventError, EventResult, EventTarget, HandleValue, ProcessId,
};
use crate::process::{find_process, try_enable_debug_privilege};
use tracing::debug;

/// An event handle owned by this process together with where it came from
///
/// Dropping it closes the handle.
#[derive(Debug)]
pub struct ResolvedHandle<E> {
    event: E,
    target: EventTarget,
}

impl<E: EventObject> ResolvedHandle<E> {
    /// Where the handle was resolved from
    pub fn target(&self) -> &EventTarget {
        &self.target
    }

    /// The opened event
    pub fn event(&self) -> &E {
        &self.event
    }
}

/// Resolves addressing modes through a [`Platform`]
pub struct HandleResolver<'a, P: Platform> {
    platform: &'a P,
}

impl<'a, P: Platform> HandleResolver<'a, P> {
    pub fn new(platform: &'a P) -> Self {
        HandleResolver { platform }
    }

    /// Validate `mode` and produce an open handle to the event it names
    pub fn resolve(&self, mode: &AddressingMode) -> EventResult<ResolvedHandle<P::Event>> {
        let target = self.target(mode)?;
        self.open(target)
    }

    /// Validate the arguments of `mode` without opening anything
    pub fn target(&self, mode: &AddressingMode) -> EventResult<EventTarget> {
        match mode {
            AddressingMode::ByName { name, namespace } => {
                Ok(EventTarget::Named(namespace.qualify(name)))
            }
            AddressingMode::ByProcessIdAndHandle { pid, handle } => {
                let handle = handle.as_deref().ok_or(EventError::MissingHandle)?;
                let pid = parse_pid(pid)?;
                let handle = parse_handle(handle)?;
                Ok(EventTarget::Foreign { pid, handle })
            }
            AddressingMode::ByProcessNameAndHandle { process, handle } => {
                let handle = handle.as_deref().ok_or(EventError::MissingHandle)?;
                let handle = parse_handle(handle)?;
                let pid = find_process(self.platform, process)?;
                Ok(EventTarget::Foreign { pid, handle })
            }
            AddressingMode::Unselected => Err(EventError::UnsupportedMode),
        }
    }

    /// Open the event described by an already validated target
    pub fn open(&self, target: EventTarget) -> EventResult<ResolvedHandle<P::Event>> {
        let event = match &target {
            EventTarget::Named(name) => {
                debug!("Opening named event '{}'", name);
                self.platform
                    .open_event(name)
                    .map_err(|code| EventError::OpenEventFailed {
                        name: name.clone(),
                        code,
                    })?
            }
            EventTarget::Foreign { pid, handle } => self.duplicate_from(*pid, *handle)?,
        };
        debug!("Resolved {}", target);
        Ok(ResolvedHandle { event, target })
    }

    fn duplicate_from(&self, pid: ProcessId, handle: HandleValue) -> EventResult<P::Event> {
        let elevated = try_enable_debug_privilege(self.platform);
        debug!(
            "Opening process {} for handle duplication (debug privilege: {})",
            pid, elevated
        );

        let process = self
            .platform
            .open_process(pid)
            .map_err(|code| EventError::ProcessOpenFailed { pid, code })?;

        self.platform
            .duplicate_event(&process, handle)
            .map_err(|code| EventError::DuplicateFailed { pid, handle, code })
    }
}

/// Convenience wrapper around [`HandleResolver::resolve`]
pub fn resolve<P: Platform>(
    platform: &P,
    mode: &AddressingMode,
) -> EventResult<ResolvedHandle<P::Event>> {
    HandleResolver::new(platform).resolve(mode)
}
