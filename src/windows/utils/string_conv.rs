//! String conversion utilities for Windows API

/// Convert a Rust string to Windows wide string (UTF-16, null terminated)
pub fn string_to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Convert Windows wide string (UTF-16) to Rust string
///
/// Stops at the first null, so fixed-size buffers from the ToolHelp
/// structures can be passed directly.
pub fn wide_to_string(wide: &[u16]) -> String {
    let len = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    String::from_utf16_lossy(&wide[..len])
}

/// Extract filename from full path
pub fn extract_filename(path: &str) -> &str {
    path.rsplit('\\').next().unwrap_or(path)
}

/// Normalize Windows path
pub fn normalize_path(path: &str) -> String {
    path.replace('/', "\\")
}

/// Case-insensitive comparison the way Win32 compares file names
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_to_wide() {
        let wide = string_to_wide("Hello");
        assert_eq!(wide, vec![72, 101, 108, 108, 111, 0]);

        let empty = string_to_wide("");
        assert_eq!(empty, vec![0]);
    }

    #[test]
    fn test_wide_to_string() {
        let wide = vec![72, 101, 108, 108, 111, 0];
        assert_eq!(wide_to_string(&wide), "Hello");

        let no_null = vec![72, 101, 108, 108, 111];
        assert_eq!(wide_to_string(&no_null), "Hello");

        let padded = [72u16, 105, 0, 0, 0, 0, 0, 0];
        assert_eq!(wide_to_string(&padded), "Hi");
    }

    #[test]
    fn test_extract_filename() {
        assert_eq!(
            extract_filename("C:\\Windows\\System32\\svchost.exe"),
            "svchost.exe"
        );
        assert_eq!(extract_filename("svchost.exe"), "svchost.exe");
        assert_eq!(extract_filename(""), "");
        assert_eq!(extract_filename("C:\\"), "");
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path("C:/Windows/System32"),
            "C:\\Windows\\System32"
        );
        assert_eq!(
            normalize_path("C:\\Windows\\System32"),
            "C:\\Windows\\System32"
        );
    }

    #[test]
    fn test_eq_ignore_case() {
        assert!(eq_ignore_case("SVCHOST.EXE", "svchost.exe"));
        assert!(eq_ignore_case("Привет.exe", "ПРИВЕТ.EXE"));
        assert!(!eq_ignore_case("svchost.exe", "svchost.ex"));
        assert!(eq_ignore_case("", ""));
    }

    #[test]
    fn test_unicode_strings() {
        let unicode_str = "Event 世界 🌍";
        let wide = string_to_wide(unicode_str);
        assert_eq!(wide_to_string(&wide), unicode_str);
    }
}
