//! Apply a signal operation to a resolved event

use super::resolver::ResolvedHandle;
use crate::core::platform::EventObject;
use crate::core::types::{EventError, EventResult, SignalOperation};
use tracing::debug;

/// Run `operation` on `handle`, then close it
///
/// Steps run in order and stop at the first failure, so for
/// `ResetThenSet` a failed reset is never followed by a set.
pub fn signal<E: EventObject>(handle: ResolvedHandle<E>, operation: SignalOperation) -> EventResult<()> {
    for &step in operation.steps() {
        handle
            .event()
            .apply(step)
            .map_err(|code| EventError::SignalFailed { step, code })?;
        debug!("{} applied to {}", step, handle.target());
    }
    Ok(())
}
