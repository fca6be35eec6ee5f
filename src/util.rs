//! Utility functions with platform-specific implementations.

use std::borrow::Cow;

/// Get a wall-clock seed value for pseudo-random number generation.
///
/// On native platforms, uses `SystemTime::now()`.
/// On WASM, uses `js_sys::Date::now()`.
#[cfg(not(target_arch = "wasm32"))]
pub fn time_seed_nanos() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(12345)
}

#[cfg(target_arch = "wasm32")]
pub fn time_seed_nanos() -> u64 {
    // js_sys::Date::now() returns milliseconds as f64
    (js_sys::Date::now() * 1_000_000.0) as u64
}

/// Get a monotonic seed value, independent of the wall clock.
///
/// Counts nanoseconds since the first call in this process.
#[cfg(not(target_arch = "wasm32"))]
pub fn monotonic_seed_nanos() -> u64 {
    use std::sync::LazyLock;
    use std::time::Instant;

    static START: LazyLock<Instant> = LazyLock::new(Instant::now);
    START.elapsed().as_nanos() as u64
}

#[cfg(target_arch = "wasm32")]
pub fn monotonic_seed_nanos() -> u64 {
    // Sub-millisecond jitter of the JS clock; Instant is unavailable here
    ((js_sys::Date::now() * 1000.0) % 1_000_000.0) as u64
}

/// Decode bytes to a string, handling various encodings.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the hint encoding (e.g. from a `--encoding` flag)
/// 3. Falls back to Windows-1252 (common in old plain-text books)
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    // Windows-1252 is a superset of ISO-8859-1
    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Escape the five XML special characters and drop characters XML 1.0
/// cannot represent (C0 controls other than tab, LF and CR; U+FFFE, U+FFFF).
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.chars().any(|c| matches!(c, '&' | '<' | '>' | '"' | '\'') || !is_xml_char(c)) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            c if !is_xml_char(c) => {}
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

fn is_xml_char(c: char) -> bool {
    !matches!(c, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}')
}
