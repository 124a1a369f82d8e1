//! Event resolution and signaling
//!
//! [`signal_event`] is the whole invocation: resolve the addressed event to
//! a local handle, apply the requested operation, release the handle.

pub mod parse;
pub mod resolver;
pub mod signaler;

pub use parse::{parse_handle, parse_pid, parse_unsigned};
pub use resolver::{resolve, HandleResolver, ResolvedHandle};
pub use signaler::signal;

use crate::core::platform::Platform;
use crate::core::types::{AddressingMode, EventResult, SignalOperation};
use tracing::debug;

/// One invocation's worth of input
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignalRequest {
    pub mode: AddressingMode,
    pub operation: SignalOperation,
}

impl SignalRequest {
    pub fn new(mode: AddressingMode, operation: SignalOperation) -> Self {
        SignalRequest { mode, operation }
    }
}

/// Resolve the target of `request` and apply its operation
pub fn signal_event<P: Platform>(platform: &P, request: &SignalRequest) -> EventResult<()> {
    debug!(
        "Resolving event by {} for {}",
        request.mode.kind(),
        request.operation
    );
    let handle = resolve(platform, &request.mode)?;
    signal(handle, request.operation)
}
