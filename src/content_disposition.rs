//! パートの Content-Disposition パラメータ (RFC 7578 Section 4.2, RFC 6266)
//!
//! ## 概要
//!
//! multipart/form-data の各パートに付く Content-Disposition ヘッダー値から
//! `name` / `filename` / `filename*` を取り出します。
//!
//! パースはエラーを返しません。不正なパラメータは無視され、該当する値が `None` になるだけです。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_form_data::content_disposition::DispositionParams;
//!
//! let params = DispositionParams::parse("form-data; name=\"photo\"; filename=\"a.png\"");
//! assert!(params.is_form_data());
//! assert_eq!(params.name(), Some("photo"));
//! assert_eq!(params.filename(), Some("a.png"));
//!
//! // 生成
//! let params = DispositionParams::form_data("caption");
//! assert_eq!(params.to_string(), "form-data; name=\"caption\"");
//! ```

use core::fmt;

/// Content-Disposition のパラメータ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispositionParams {
    /// disposition-type (小文字、なければ空文字)
    disposition_type: String,
    /// name パラメータ
    name: Option<String>,
    /// filename パラメータ
    filename: Option<String>,
    /// filename* パラメータ (RFC 5987 デコード後の値)
    filename_ext: Option<String>,
}

impl DispositionParams {
    /// Content-Disposition ヘッダー値をパース
    ///
    /// 値は引用符付き文字列とトークンの両方を受け付ける。
    /// パラメータ名は大文字小文字を区別しない。同じパラメータが複数ある場合は最後の値を使う。
    pub fn parse(input: &str) -> Self {
        let mut params = DispositionParams::default();

        for (index, segment) in split_params(input.trim()).iter().enumerate() {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }

            let Some(eq_pos) = segment.find('=') else {
                if index == 0 {
                    params.disposition_type = segment.to_ascii_lowercase();
                }
                continue;
            };

            let param_name = segment[..eq_pos].trim().to_ascii_lowercase();
            let param_value = &segment[eq_pos + 1..];

            match param_name.as_str() {
                "name" => {
                    if let Some(value) = parse_param_value(param_value) {
                        params.name = Some(value);
                    }
                }
                "filename" => {
                    if let Some(value) = parse_param_value(param_value) {
                        params.filename = Some(value);
                    }
                }
                "filename*" => {
                    if let Some(value) = parse_ext_value(param_value) {
                        params.filename_ext = Some(value);
                    }
                }
                _ => {}
            }
        }

        params
    }

    /// form-data パラメータを作成
    pub fn form_data(name: &str) -> Self {
        DispositionParams {
            disposition_type: "form-data".to_string(),
            name: Some(name.to_string()),
            filename: None,
            filename_ext: None,
        }
    }

    /// filename を設定
    ///
    /// ASCII 以外を含む場合は filename* も設定する。
    pub fn with_filename(mut self, filename: &str) -> Self {
        self.filename = Some(filename.to_string());
        if !filename.is_ascii() {
            self.filename_ext = Some(filename.to_string());
        }
        self
    }

    /// disposition-type を取得 (例: "form-data")
    pub fn disposition_type(&self) -> &str {
        &self.disposition_type
    }

    /// form-data かどうか
    pub fn is_form_data(&self) -> bool {
        self.disposition_type == "form-data"
    }

    /// name を取得
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// filename を取得 (filename* があればそちらを優先)
    pub fn filename(&self) -> Option<&str> {
        self.filename_ext.as_deref().or(self.filename.as_deref())
    }

    /// filename パラメータを取得
    pub fn filename_ascii(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// filename* パラメータを取得 (デコード済み)
    pub fn filename_ext(&self) -> Option<&str> {
        self.filename_ext.as_deref()
    }

    /// name / filename / filename* を取り出す
    pub(crate) fn into_fields(self) -> (Option<String>, Option<String>) {
        (self.name, self.filename_ext.or(self.filename))
    }
}

impl fmt::Display for DispositionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.disposition_type)?;

        if let Some(name) = &self.name {
            write!(f, "; name=\"{}\"", encode_quoted_value(name))?;
        }

        if let Some(filename) = &self.filename {
            write!(f, "; filename=\"{}\"", encode_quoted_value(filename))?;
        }

        if let Some(filename_ext) = &self.filename_ext {
            write!(f, "; filename*=UTF-8''{}", encode_ext_value(filename_ext))?;
        }

        Ok(())
    }
}

/// 引用符を考慮してセミコロンで分割
///
/// バックスラッシュはエスケープとして扱わない。
fn split_params(input: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in input.chars() {
        match c {
            '"' => {
                current.push(c);
                in_quotes = !in_quotes;
            }
            ';' if !in_quotes => {
                parts.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        parts.push(current);
    }

    parts
}

/// パラメータ値をパース (引用符付きまたはトークン)
///
/// 引用符付きの値は引用符の間をそのまま返す。
/// ブラウザは `"` を `%22` として送り、`\` はそのまま送るため、エスケープは外さない。
/// 閉じ引用符がない値は `None`。
fn parse_param_value(value: &str) -> Option<String> {
    let value = value.trim();

    match value.strip_prefix('"') {
        Some(quoted) => quoted.strip_suffix('"').map(str::to_string),
        None => Some(value.to_string()),
    }
}

/// RFC 5987 ext-value をパース
///
/// 形式: charset'language'value
/// 例: UTF-8''%E6%97%A5%E6%9C%AC%E8%AA%9E.png
fn parse_ext_value(value: &str) -> Option<String> {
    let mut sections = value.trim().splitn(3, '\'');
    let charset = sections.next()?;
    // language は無視
    let _language = sections.next()?;
    let encoded_value = sections.next()?;

    // UTF-8 のみサポート (RFC 6266 推奨)
    if !charset.eq_ignore_ascii_case("UTF-8") {
        return None;
    }

    percent_decode(encoded_value)
}

/// パーセントデコード
fn percent_decode(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3)?;
            if !hex.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            let hex = std::str::from_utf8(hex).ok()?;
            decoded.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(decoded).ok()
}

/// RFC 5987 ext-value 用にエンコード
fn encode_ext_value(s: &str) -> String {
    let mut result = String::new();
    for byte in s.bytes() {
        if is_attr_char(byte) {
            result.push(byte as char);
        } else {
            result.push_str(&format!("%{:02X}", byte));
        }
    }
    result
}

/// RFC 5987 attr-char
fn is_attr_char(b: u8) -> bool {
    matches!(b,
        b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' |
        b'!' | b'#' | b'$' | b'&' | b'+' | b'-' | b'.' |
        b'^' | b'_' | b'`' | b'|' | b'~'
    )
}

/// 引用符付きの値として書き出せるようにエンコード
///
/// `"`、CR、LF をパーセントエンコードする (WHATWG のフォームエンコードと同じ)。
fn encode_quoted_value(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("%22"),
            '\r' => result.push_str("%0D"),
            '\n' => result.push_str("%0A"),
            _ => result.push(c),
        }
    }
    result
}
