//! Addressing and operation types

use super::ProcessId;
use serde::Deserialize;
use std::fmt;
use std::num::NonZeroU32;

/// Kernel object namespace an event name is looked up in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    Global,
    Local,
    /// No prefix, the session namespace the OS picks by default
    #[default]
    Default,
}

impl Namespace {
    /// Prefix prepended to the event name
    pub fn prefix(&self) -> &'static str {
        match self {
            Namespace::Global => "Global\\",
            Namespace::Local => "Local\\",
            Namespace::Default => "",
        }
    }

    /// Build the full object name for `name` in this namespace
    pub fn qualify(&self, name: &str) -> String {
        format!("{}{}", self.prefix(), name)
    }
}

/// A non-zero raw handle value as it appears in another process's handle table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleValue(NonZeroU32);

impl HandleValue {
    /// Wrap a raw value; zero is never a usable handle
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(HandleValue)
    }

    /// Raw 32-bit value
    pub fn get(&self) -> u32 {
        self.0.get()
    }

    /// Value widened to pointer size for the OS call
    pub fn as_usize(&self) -> usize {
        self.0.get() as usize
    }
}

impl fmt::Display for HandleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0.get())
    }
}

/// How the target event is addressed, chosen once by the command line layer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AddressingMode {
    /// Open a named event directly
    ByName { name: String, namespace: Namespace },
    /// Duplicate `handle` out of the process with id `pid`
    ByProcessIdAndHandle {
        pid: String,
        handle: Option<String>,
    },
    /// Locate the process by executable name or path, then duplicate `handle`
    ByProcessNameAndHandle {
        process: String,
        handle: Option<String>,
    },
    /// No addressing argument was supplied
    #[default]
    Unselected,
}

impl AddressingMode {
    /// Short mode name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            AddressingMode::ByName { .. } => "name",
            AddressingMode::ByProcessIdAndHandle { .. } => "pid+handle",
            AddressingMode::ByProcessNameAndHandle { .. } => "process-name+handle",
            AddressingMode::Unselected => "unselected",
        }
    }
}

/// Fully validated location of the target event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTarget {
    /// Namespace-qualified object name
    Named(String),
    /// A handle living in another process
    Foreign { pid: ProcessId, handle: HandleValue },
}

impl fmt::Display for EventTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTarget::Named(name) => write!(f, "event '{}'", name),
            EventTarget::Foreign { pid, handle } => {
                write!(f, "handle {} in process {}", handle, pid)
            }
        }
    }
}

/// State transition applied to the resolved event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignalOperation {
    #[default]
    Set,
    Pulse,
    Reset,
    /// Reset followed by set, only if the reset succeeded
    ResetThenSet,
}

impl SignalOperation {
    /// Pick the operation from the two independent command line flags
    pub fn from_flags(pulse: bool, reset: bool) -> Self {
        match (pulse, reset) {
            (false, false) => SignalOperation::Set,
            (true, false) => SignalOperation::Pulse,
            (false, true) => SignalOperation::Reset,
            (true, true) => SignalOperation::ResetThenSet,
        }
    }

    /// Primitive steps in execution order
    pub fn steps(&self) -> &'static [SignalStep] {
        match self {
            SignalOperation::Set => &[SignalStep::Set],
            SignalOperation::Pulse => &[SignalStep::Pulse],
            SignalOperation::Reset => &[SignalStep::Reset],
            SignalOperation::ResetThenSet => &[SignalStep::Reset, SignalStep::Set],
        }
    }
}

impl fmt::Display for SignalOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalOperation::Set => write!(f, "set"),
            SignalOperation::Pulse => write!(f, "pulse"),
            SignalOperation::Reset => write!(f, "reset"),
            SignalOperation::ResetThenSet => write!(f, "reset-then-set"),
        }
    }
}

/// A single primitive event call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalStep {
    Set,
    Pulse,
    Reset,
}

impl fmt::Display for SignalStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalStep::Set => write!(f, "set"),
            SignalStep::Pulse => write!(f, "pulse"),
            SignalStep::Reset => write!(f, "reset"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_qualify() {
        assert_eq!(Namespace::Global.qualify("MyEvent"), "Global\\MyEvent");
        assert_eq!(Namespace::Local.qualify("MyEvent"), "Local\\MyEvent");
        assert_eq!(Namespace::Default.qualify("MyEvent"), "MyEvent");
        assert_eq!(Namespace::default(), Namespace::Default);
    }

    #[test]
    fn test_handle_value_rejects_zero() {
        assert!(HandleValue::new(0).is_none());
        let handle = HandleValue::new(0x124).unwrap();
        assert_eq!(handle.get(), 292);
        assert_eq!(handle.as_usize(), 292);
        assert_eq!(handle.to_string(), "0x124");
    }

    #[test]
    fn test_operation_from_flags() {
        assert_eq!(SignalOperation::from_flags(false, false), SignalOperation::Set);
        assert_eq!(SignalOperation::from_flags(true, false), SignalOperation::Pulse);
        assert_eq!(SignalOperation::from_flags(false, true), SignalOperation::Reset);
        assert_eq!(
            SignalOperation::from_flags(true, true),
            SignalOperation::ResetThenSet
        );
    }

    #[test]
    fn test_operation_steps() {
        assert_eq!(SignalOperation::Set.steps(), &[SignalStep::Set]);
        assert_eq!(
            SignalOperation::ResetThenSet.steps(),
            &[SignalStep::Reset, SignalStep::Set]
        );
    }

    #[test]
    fn test_target_display() {
        let named = EventTarget::Named("Local\\evt".to_string());
        assert_eq!(named.to_string(), "event 'Local\\evt'");

        let foreign = EventTarget::Foreign {
            pid: 234,
            handle: HandleValue::new(0x290).unwrap(),
        };
        assert_eq!(foreign.to_string(), "handle 0x290 in process 234");
    }

    #[test]
    fn test_mode_default_is_unselected() {
        assert_eq!(AddressingMode::default(), AddressingMode::Unselected);
        assert_eq!(AddressingMode::default().kind(), "unselected");
    }
}
