//! Best-effort SeDebugPrivilege elevation

use crate::core::platform::Platform;
use tracing::{debug, warn};

/// Name of the privilege enabled before opening foreign processes
pub const SE_DEBUG_NAME: &str = "SeDebugPrivilege";

/// Try to enable `SeDebugPrivilege` for the current process
///
/// Never fails: a refusal is logged as a warning and reported as `false`.
/// Opening a process at the same integrity level usually works without it.
pub fn try_enable_debug_privilege<P: Platform>(platform: &P) -> bool {
    match platform.enable_debug_privilege() {
        Ok(()) => {
            debug!("{} enabled", SE_DEBUG_NAME);
            true
        }
        Err(code) => {
            warn!(
                "Unable to enable debug privilege: {} {}",
                code.code(),
                code.description()
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, MockPlatform};
    use crate::windows::utils::ErrorCode;

    #[test]
    fn test_elevation_success() {
        let platform = MockPlatform::new();
        assert!(try_enable_debug_privilege(&platform));
        assert_eq!(platform.calls(), vec![Call::EnableDebugPrivilege]);
    }

    #[test]
    fn test_elevation_failure_is_not_fatal() {
        let mut platform = MockPlatform::new();
        platform.fail_privilege(ErrorCode::NotAllAssigned);
        assert!(!try_enable_debug_privilege(&platform));
    }
}
