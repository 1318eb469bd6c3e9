//! multipart ボディの分割
//!
//! ## 概要
//!
//! ボディ全体を境界で区切り、パートごとのヘッダーブロックとボディを取り出します。
//! 戻り値はボディへの参照を持つので、コピーは行いません。
//!
//! 不正なデータや途中で切れたデータはエラーにしません。
//! 取り出せたパートまでを返します。
//!
//! ```text
//! --B\r\n
//! <header block>\r\n\r\n
//! <body>\r\n
//! --B\r\n
//! ...
//! --B--\r\n
//! ```

use std::borrow::Cow;

use crate::matcher::find_bytes;

const CRLF: &[u8] = b"\r\n";
const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";
const CLOSE_MARKER: &[u8] = b"--";

/// 分割されたパート (パース前)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPart<'a> {
    /// ヘッダーブロック (UTF-8 として不正なバイトは U+FFFD に置換)
    pub header_block: Cow<'a, str>,
    /// ボディ (境界直前の CRLF は含まない)
    pub body: &'a [u8],
}

/// ボディを境界で分割する
///
/// `boundary` は Content-Type の boundary パラメータの値 (先頭の `--` を含まない)。
///
/// - 最初の境界より前 (プリアンブル) は無視する
/// - ヘッダーの終端 (CRLFCRLF) や次の境界が見つからなければそこで終了する
/// - ボディ長が 0 のセグメントは返さない
/// - 境界の直後が `--` なら終了境界として終了する
///
/// 境界の比較はバイト単位の完全一致で行う。
pub fn split_parts<'a>(body: &'a [u8], boundary: &str) -> Vec<RawPart<'a>> {
    let delimiter = format!("--{}", boundary);
    let delimiter = delimiter.as_bytes();

    let mut parts = Vec::new();

    let Some(first) = find_bytes(body, 0, delimiter) else {
        return parts;
    };
    let mut cursor = first + delimiter.len();

    loop {
        if body[cursor..].starts_with(CLOSE_MARKER) {
            break;
        }
        if body[cursor..].starts_with(CRLF) {
            cursor += CRLF.len();
        }

        let Some(header_end) = find_bytes(body, cursor, HEADER_TERMINATOR) else {
            break;
        };
        let Some(next) = find_bytes(body, cursor, delimiter) else {
            break;
        };

        if next < header_end {
            // ヘッダーが終わる前に次の境界が来たセグメントは捨てる
            cursor = next + delimiter.len();
            continue;
        }

        let header_block = String::from_utf8_lossy(&body[cursor..header_end]);
        let body_start = header_end + HEADER_TERMINATOR.len();

        let Some(next) = find_bytes(body, body_start, delimiter) else {
            break;
        };

        if next > body_start + CRLF.len() {
            parts.push(RawPart {
                header_block,
                body: &body[body_start..next - CRLF.len()],
            });
        }

        cursor = next + delimiter.len();
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_single() {
        let body = b"--B\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\nvalue\r\n--B--\r\n";
        let parts = split_parts(body, "B");
        assert_eq!(parts.len(), 1);
        assert_eq!(
            parts[0].header_block,
            "Content-Disposition: form-data; name=\"a\""
        );
        assert_eq!(parts[0].body, b"value");
    }

    #[test]
    fn test_split_multiple_with_preamble() {
        let body = b"preamble\r\n--B\r\nH: 1\r\n\r\none\r\n--B\r\nH: 2\r\n\r\ntwo\r\n--B--";
        let parts = split_parts(body, "B");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].header_block, "H: 1");
        assert_eq!(parts[0].body, b"one");
        assert_eq!(parts[1].header_block, "H: 2");
        assert_eq!(parts[1].body, b"two");
    }

    #[test]
    fn test_split_no_boundary() {
        assert!(split_parts(b"", "B").is_empty());
        assert!(split_parts(b"no delimiter here", "B").is_empty());
    }

    #[test]
    fn test_split_boundary_is_case_sensitive() {
        let body = b"--b\r\nH: 1\r\n\r\none\r\n--b--";
        assert!(split_parts(body, "B").is_empty());
    }

    #[test]
    fn test_split_empty_body_skipped() {
        let body = b"--B\r\nH: 1\r\n\r\n\r\n--B\r\nH: 2\r\n\r\nx\r\n--B--";
        let parts = split_parts(body, "B");
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].header_block, "H: 2");
        assert_eq!(parts[0].body, b"x");
    }

    #[test]
    fn test_split_body_keeps_inner_crlf() {
        let body = b"--B\r\nH: 1\r\n\r\nline1\r\n\r\nline2\r\n--B--";
        let parts = split_parts(body, "B");
        assert_eq!(parts[0].body, b"line1\r\n\r\nline2");
    }

    #[test]
    fn test_split_truncated_after_headers() {
        let body = b"--B\r\nH: 1\r\n\r\none\r\n--B\r\nH: 2\r\n\r\ntwo, cut";
        let parts = split_parts(body, "B");
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].body, b"one");
    }

    #[test]
    fn test_split_truncated_in_headers() {
        let body = b"--B\r\nH: 1\r\n\r\none\r\n--B\r\nH: 2";
        let parts = split_parts(body, "B");
        assert_eq!(parts.len(), 1);
    }

    #[test]
    fn test_split_segment_without_header_terminator() {
        let body = b"--B\r\nH: broken\r\n--B\r\nH: 2\r\n\r\ntwo\r\n--B--";
        let parts = split_parts(body, "B");
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].header_block, "H: 2");
        assert_eq!(parts[0].body, b"two");
    }

    #[test]
    fn test_split_next_part_headers_not_borrowed() {
        let body = b"--B\r\nContent-Disposition: form-data; name=\"a\"\r\n--B\r\n\
            Content-Type: text/plain\r\n\r\nv\r\n--B--";
        let parts = split_parts(body, "B");
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].header_block, "Content-Type: text/plain");
        assert_eq!(parts[0].body, b"v");
    }

    #[test]
    fn test_split_closing_boundary_first() {
        assert!(split_parts(b"--B--\r\n\r\n", "B").is_empty());
    }

    #[test]
    fn test_split_stops_at_closing_boundary() {
        let body = b"--B\r\nH: 1\r\n\r\none\r\n--B--\r\nH: 2\r\n\r\nepilogue\r\n--B--";
        let parts = split_parts(body, "B");
        assert_eq!(parts.len(), 1);
    }

    #[test]
    fn test_split_without_crlf_after_delimiter() {
        let body = b"--BH: 1\r\n\r\none\r\n--B--";
        let parts = split_parts(body, "B");
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].header_block, "H: 1");
    }

    #[test]
    fn test_split_binary_body() {
        let mut body = b"--B\r\nContent-Type: image/png\r\n\r\n".to_vec();
        body.extend_from_slice(&[0x89, b'\r', b'\n', b'\r', b'\n', b'-', b'-', 0x00]);
        body.extend_from_slice(b"\r\n--B--\r\n");
        let parts = split_parts(&body, "B");
        assert_eq!(parts.len(), 1);
        assert_eq!(
            parts[0].body,
            &[0x89, b'\r', b'\n', b'\r', b'\n', b'-', b'-', 0x00]
        );
    }
}
