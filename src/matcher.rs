//! バイト列検索

/// `start` 以降で `pattern` が最初に現れる位置を返す
///
/// `start` が `haystack` の長さを超える場合や、
/// 残りの長さが `pattern` より短い場合は `None` を返す。
/// 空の `pattern` は `start` に一致する。
///
/// # 例
///
/// ```rust
/// use shiguredo_form_data::find_bytes;
///
/// assert_eq!(find_bytes(b"--a\r\n--a--", 0, b"--a"), Some(0));
/// assert_eq!(find_bytes(b"--a\r\n--a--", 1, b"--a"), Some(5));
/// assert_eq!(find_bytes(b"--a", 1, b"--a"), None);
/// ```
pub fn find_bytes(haystack: &[u8], start: usize, pattern: &[u8]) -> Option<usize> {
    if start > haystack.len() {
        return None;
    }
    if pattern.is_empty() {
        return Some(start);
    }

    let rest = &haystack[start..];
    if pattern.len() > rest.len() {
        return None;
    }

    rest.windows(pattern.len())
        .position(|window| window == pattern)
        .map(|pos| start + pos)
}
