//! Number syntax for process ids and handle values
//!
//! Accepts what `strtoul(text, &end, 0)` accepts when the whole string must
//! be consumed: optional leading C-locale whitespace (space, `\t`, `\n`,
//! `\v`, `\f`, `\r`), an optional `+`, then `0x`/`0X` followed by hex
//! digits, a leading `0` followed by octal digits, or plain decimal digits.
//! Values must fit in 32 bits.

use crate::core::types::{EventError, EventResult, HandleValue, ProcessId};

/// Parse an unsigned 32-bit number, `None` if any character is left over
pub fn parse_unsigned(text: &str) -> Option<u32> {
    let s = text.trim_start_matches(is_c_space);
    let s = s.strip_prefix('+').unwrap_or(s);

    let (digits, radix) = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (hex, 16)
    } else if s.len() > 1 && s.starts_with('0') {
        (&s[1..], 8)
    } else {
        (s, 10)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u32::from_str_radix(digits, radix).ok()
}

/// `isspace` in the C locale; `char::is_ascii_whitespace` omits `\v`
fn is_c_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}

/// Parse a process id argument
pub fn parse_pid(text: &str) -> EventResult<ProcessId> {
    parse_unsigned(text).ok_or_else(|| EventError::InvalidPid(text.to_string()))
}

/// Parse a handle value argument; zero is rejected
pub fn parse_handle(text: &str) -> EventResult<HandleValue> {
    parse_unsigned(text)
        .and_then(HandleValue::new)
        .ok_or_else(|| EventError::InvalidHandle(text.to_string()))
}
