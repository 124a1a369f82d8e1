//! Core module containing fundamental types and traits for SignalAnyEvent
//!
//! This module provides the building blocks used throughout the crate:
//! addressing modes, operation selection, the error taxonomy and the
//! platform seam every OS call goes through.

pub mod platform;
pub mod types;

// Re-export commonly used types for convenience
pub use platform::{EventObject, Platform};
pub use types::{
    AddressingMode, EventError, EventResult, EventTarget, HandleValue, Namespace, ProcessId,
    SignalOperation,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
