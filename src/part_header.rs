//! パートヘッダーブロックのパース
//!
//! ## 概要
//!
//! 1 つのパートのヘッダーブロック (境界の直後から空行までのテキスト) を行単位で読み、
//! `Content-Disposition` と `Content-Type` を取り出します。
//!
//! - ヘッダー名は大文字小文字を区別しない
//! - 行区切りは CRLF と LF の両方を受け付ける
//! - `Content-Disposition` が複数ある場合は最後の行が name と filename を丸ごと上書きする
//! - パースはエラーを返さない
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_form_data::part_header::PartHeaders;
//!
//! let headers = PartHeaders::parse(
//!     "Content-Disposition: form-data; name=\"photo\"; filename=\"a.png\"\r\n\
//!      Content-Type: image/png",
//! );
//! assert_eq!(headers.name(), Some("photo"));
//! assert_eq!(headers.filename(), Some("a.png"));
//! assert_eq!(headers.content_type(), Some("image/png"));
//! ```

use crate::content_disposition::DispositionParams;

/// パートヘッダーのパース結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartHeaders {
    /// フィールド名
    name: Option<String>,
    /// ファイル名
    filename: Option<String>,
    /// Content-Type (前後の空白は除去済み)
    content_type: Option<String>,
    /// その他のヘッダー
    other: Vec<(String, String)>,
}

impl PartHeaders {
    /// ヘッダーブロックをパース
    pub fn parse(block: &str) -> Self {
        let mut headers = PartHeaders::default();

        for line in block.lines() {
            let Some((name, value)) = line.split_once(':') else {
                continue;
            };
            let name = name.trim();
            let value = value.trim();

            if name.eq_ignore_ascii_case("Content-Disposition") {
                let (field_name, filename) = DispositionParams::parse(value).into_fields();
                headers.name = field_name;
                headers.filename = filename;
            } else if name.eq_ignore_ascii_case("Content-Type") {
                // 値が空なら Content-Type なしと同じ
                headers.content_type = (!value.is_empty()).then(|| value.to_string());
            } else if !name.is_empty() {
                headers.other.push((name.to_string(), value.to_string()));
            }
        }

        headers
    }

    /// フィールド名を取得
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// ファイル名を取得
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Content-Type を取得
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Content-Disposition / Content-Type 以外のヘッダーを取得
    pub fn other(&self) -> &[(String, String)] {
        &self.other
    }

    pub(crate) fn into_parts(self) -> (Option<String>, Option<String>, Option<String>) {
        (self.name, self.filename, self.content_type)
    }
}
