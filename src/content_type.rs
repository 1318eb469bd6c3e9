//! Content-Type ヘッダーパース (RFC 9110 Section 8.3)
//!
//! ## 概要
//!
//! multipart/form-data のデコードに必要な Content-Type の扱いを提供します。
//!
//! - リクエストの Content-Type から boundary を取り出す
//! - パートの Content-Type がテキストとして扱えるかどうかを判定する
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_form_data::content_type::{ContentType, boundary_from_content_type, is_text_like};
//!
//! let ct = ContentType::parse("multipart/form-data; boundary=----WebKitFormBoundary").unwrap();
//! assert!(ct.is_form_data());
//! assert_eq!(ct.boundary(), Some("----WebKitFormBoundary"));
//!
//! let boundary = boundary_from_content_type("multipart/form-data; boundary=\"abc\"").unwrap();
//! assert_eq!(boundary, "abc");
//!
//! assert!(is_text_like(Some("text/plain; charset=utf-8")));
//! assert!(!is_text_like(Some("image/png")));
//! ```

use core::fmt;

use crate::error::Error;

/// RFC 2046 Section 5.1.1 の boundary 最大長
const MAX_BOUNDARY_LEN: usize = 70;

/// Content-Type パースエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentTypeError {
    /// 空の Content-Type
    Empty,
    /// 不正なメディアタイプ形式
    InvalidMediaType,
    /// 不正なパラメータ形式
    InvalidParameter,
    /// 引用符が閉じていない
    UnterminatedQuote,
}

impl fmt::Display for ContentTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentTypeError::Empty => write!(f, "empty Content-Type"),
            ContentTypeError::InvalidMediaType => write!(f, "invalid media type"),
            ContentTypeError::InvalidParameter => write!(f, "invalid parameter"),
            ContentTypeError::UnterminatedQuote => write!(f, "unterminated quote"),
        }
    }
}

impl std::error::Error for ContentTypeError {}

/// パース済み Content-Type
///
/// ```text
/// Content-Type = media-type
/// media-type = type "/" subtype parameters
/// parameters = *( OWS ";" OWS [ parameter ] )
/// parameter = parameter-name "=" parameter-value
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    /// メディアタイプ (例: "multipart")
    media_type: String,
    /// サブタイプ (例: "form-data")
    subtype: String,
    /// パラメータ (name, value) のペア
    parameters: Vec<(String, String)>,
}

impl ContentType {
    /// Content-Type 文字列をパース
    ///
    /// メディアタイプ、サブタイプ、パラメータ名は小文字に正規化する。
    /// パラメータ値は引用符とエスケープを取り除いた値を保持する。
    pub fn parse(input: &str) -> Result<Self, ContentTypeError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ContentTypeError::Empty);
        }

        let (media_type_part, rest) = split_at_semicolon(input);
        let (media_type, subtype) = parse_media_type(media_type_part)?;
        let parameters = parse_parameters(rest)?;

        Ok(ContentType {
            media_type: media_type.to_ascii_lowercase(),
            subtype: subtype.to_ascii_lowercase(),
            parameters,
        })
    }

    /// メディアタイプを取得 (例: "multipart")
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// サブタイプを取得 (例: "form-data")
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// 完全なメディアタイプを取得 (例: "multipart/form-data")
    pub fn mime_type(&self) -> String {
        format!("{}/{}", self.media_type, self.subtype)
    }

    /// パラメータを取得
    pub fn parameter(&self, name: &str) -> Option<&str> {
        let name_lower = name.to_ascii_lowercase();
        self.parameters
            .iter()
            .find(|(n, _)| n == &name_lower)
            .map(|(_, v)| v.as_str())
    }

    /// boundary パラメータを取得
    pub fn boundary(&self) -> Option<&str> {
        self.parameter("boundary")
    }

    /// multipart/form-data かどうか
    pub fn is_form_data(&self) -> bool {
        self.media_type == "multipart" && self.subtype == "form-data"
    }
}

/// リクエストの Content-Type ヘッダー値から boundary を取り出す
///
/// 引用符付きの boundary は引用符を外した値を返す。
pub fn boundary_from_content_type(value: &str) -> Result<String, Error> {
    let ct = ContentType::parse(value)?;
    if !ct.is_form_data() {
        return Err(Error::NotFormData);
    }

    let boundary = ct.boundary().ok_or(Error::MissingBoundary)?;
    if boundary.is_empty() {
        return Err(Error::MissingBoundary);
    }
    if boundary.len() > MAX_BOUNDARY_LEN {
        return Err(Error::InvalidBoundary);
    }

    Ok(boundary.to_string())
}

/// パートの Content-Type がテキストとして扱えるかどうか
///
/// Content-Type がない場合、text/*、application/x-www-form-urlencoded、
/// application/json の場合に true を返す。パラメータは無視し、大文字小文字は区別しない。
/// 空の値は Content-Type がないものとして扱う。
pub fn is_text_like(content_type: Option<&str>) -> bool {
    let Some(value) = content_type.map(str::trim).filter(|value| !value.is_empty()) else {
        return true;
    };

    let (mime, _) = split_at_semicolon(value);
    let mime = mime.to_ascii_lowercase();

    mime.starts_with("text/")
        || mime == "application/x-www-form-urlencoded"
        || mime == "application/json"
}

/// セミコロンで分割 (最初のセミコロンのみ)
fn split_at_semicolon(input: &str) -> (&str, &str) {
    if let Some(pos) = input.find(';') {
        (input[..pos].trim(), input[pos + 1..].trim())
    } else {
        (input.trim(), "")
    }
}

/// メディアタイプをパース
fn parse_media_type(input: &str) -> Result<(&str, &str), ContentTypeError> {
    let slash_pos = input.find('/').ok_or(ContentTypeError::InvalidMediaType)?;

    let media_type = input[..slash_pos].trim();
    let subtype = input[slash_pos + 1..].trim();

    if !is_valid_token(media_type) || !is_valid_token(subtype) {
        return Err(ContentTypeError::InvalidMediaType);
    }

    Ok((media_type, subtype))
}

/// パラメータをパース
fn parse_parameters(input: &str) -> Result<Vec<(String, String)>, ContentTypeError> {
    let mut parameters = Vec::new();
    let mut rest = input.trim();

    while !rest.is_empty() {
        rest = rest.trim_start_matches(';').trim();
        if rest.is_empty() {
            break;
        }

        let eq_pos = rest.find('=').ok_or(ContentTypeError::InvalidParameter)?;
        let name = rest[..eq_pos].trim();
        if !is_valid_token(name) {
            return Err(ContentTypeError::InvalidParameter);
        }

        rest = rest[eq_pos + 1..].trim();

        let (value, remaining) = if let Some(after_quote) = rest.strip_prefix('"') {
            parse_quoted_string(after_quote)?
        } else {
            parse_token_value(rest)
        };

        parameters.push((name.to_ascii_lowercase(), value));
        rest = remaining.trim_start_matches(';').trim();
    }

    Ok(parameters)
}

/// 引用符付き文字列をパース (開始の引用符は除去済み)
fn parse_quoted_string(input: &str) -> Result<(String, &str), ContentTypeError> {
    let mut result = String::new();
    let mut escaped = false;

    for (i, c) in input.char_indices() {
        if escaped {
            result.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            return Ok((result, &input[i + 1..]));
        } else {
            result.push(c);
        }
    }

    Err(ContentTypeError::UnterminatedQuote)
}

/// トークン値をパース
fn parse_token_value(input: &str) -> (String, &str) {
    let end = input
        .find(|c: char| c == ';' || c.is_whitespace())
        .unwrap_or(input.len());
    (input[..end].to_string(), &input[end..])
}

fn is_valid_token(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_token_char)
}

/// RFC 9110 のトークン文字
fn is_token_char(b: u8) -> bool {
    matches!(b,
        b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' |
        b'0'..=b'9' | b'A'..=b'Z' | b'^' | b'_' | b'`' | b'a'..=b'z' | b'|' | b'~'
    )
}
