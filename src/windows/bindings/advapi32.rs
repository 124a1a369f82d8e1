//! Advapi32.dll bindings for token privilege adjustment

use crate::windows::types::Handle;
use crate::windows::utils::{string_to_wide, ErrorCode};
use std::ptr;
use winapi::shared::minwindef::FALSE;
use winapi::um::processthreadsapi::{GetCurrentProcess, OpenProcessToken};
use winapi::um::securitybaseapi::AdjustTokenPrivileges;
use winapi::um::winbase::LookupPrivilegeValueW;
use winapi::um::winnt::{
    HANDLE, LUID, LUID_AND_ATTRIBUTES, SE_PRIVILEGE_ENABLED, TOKEN_ADJUST_PRIVILEGES,
    TOKEN_PRIVILEGES, TOKEN_QUERY,
};

/// Enable `privilege_name` on the current process token
///
/// The token is opened for this call only and closed on every path.
pub fn enable_privilege(privilege_name: &str) -> Result<(), ErrorCode> {
    unsafe {
        let mut raw_token: HANDLE = ptr::null_mut();
        if OpenProcessToken(
            GetCurrentProcess(),
            TOKEN_ADJUST_PRIVILEGES | TOKEN_QUERY,
            &mut raw_token,
        ) == FALSE
        {
            return Err(ErrorCode::last_failure());
        }
        let token = Handle::new(raw_token);

        let mut luid = LUID {
            LowPart: 0,
            HighPart: 0,
        };
        let wide_name = string_to_wide(privilege_name);
        if LookupPrivilegeValueW(ptr::null(), wide_name.as_ptr(), &mut luid) == FALSE {
            return Err(ErrorCode::last_failure());
        }

        let mut privileges = TOKEN_PRIVILEGES {
            PrivilegeCount: 1,
            Privileges: [LUID_AND_ATTRIBUTES {
                Luid: luid,
                Attributes: SE_PRIVILEGE_ENABLED,
            }],
        };

        if AdjustTokenPrivileges(
            token.raw(),
            FALSE,
            &mut privileges,
            0,
            ptr::null_mut(),
            ptr::null_mut(),
        ) == FALSE
        {
            return Err(ErrorCode::last_failure());
        }

        // AdjustTokenPrivileges succeeds even when the token lacks the privilege
        match ErrorCode::last_error() {
            ErrorCode::NotAllAssigned => Err(ErrorCode::NotAllAssigned),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_unknown_privilege_fails() {
        let result = enable_privilege("SeNonexistentPrivilege");
        assert!(result.is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_debug_privilege_does_not_panic() {
        // Succeeds only from an elevated shell
        let _ = enable_privilege("SeDebugPrivilege");
    }
}
