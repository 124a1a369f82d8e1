//! Core type definitions for SignalAnyEvent
//!
//! Addressing modes, resolved targets, signal operations, enumeration
//! records and the error taxonomy shared by every component.

mod error;
mod process_info;
mod target;

// Re-export all public types
pub use error::{EventError, EventResult};
pub use process_info::{ModuleEntry, ProcessEntry};
pub use target::{
    AddressingMode, EventTarget, HandleValue, Namespace, SignalOperation, SignalStep,
};

// Common type aliases
pub type ProcessId = u32;
