//! multipart/form-data ボディの生成
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_form_data::FormDataBuilder;
//!
//! let builder = FormDataBuilder::with_boundary("XYZ")
//!     .text_field("caption", "Hello")
//!     .file_field("photo", "a.png", "image/png", &[0x89, 0x50, 0x4E]);
//!
//! assert_eq!(builder.content_type(), "multipart/form-data; boundary=XYZ");
//! let body = builder.build();
//! assert!(body.starts_with(b"--XYZ\r\n"));
//! assert!(body.ends_with(b"--XYZ--\r\n"));
//! ```

use crate::content_disposition::DispositionParams;

#[derive(Debug, Clone)]
struct BuilderPart {
    disposition: DispositionParams,
    content_type: Option<String>,
    data: Vec<u8>,
}

/// multipart/form-data ボディビルダー
#[derive(Debug, Clone)]
pub struct FormDataBuilder {
    /// 境界文字列
    boundary: String,
    /// パート
    parts: Vec<BuilderPart>,
}

impl FormDataBuilder {
    /// 乱数値を受け取って境界を生成する
    ///
    /// Sans I/O の原則に従い、乱数生成は呼び出し側の責任となる。
    pub fn new(random_value: u64) -> Self {
        Self::with_boundary(&format!("----FormBoundary{}", random_value))
    }

    /// 境界を指定して作成
    pub fn with_boundary(boundary: &str) -> Self {
        FormDataBuilder {
            boundary: boundary.to_string(),
            parts: Vec::new(),
        }
    }

    /// 境界文字列を取得
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Content-Type ヘッダー値を取得
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// テキストフィールドを追加
    pub fn text_field(self, name: &str, value: &str) -> Self {
        self.part(name, None, None, value.as_bytes())
    }

    /// ファイルフィールドを追加
    pub fn file_field(self, name: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.part(name, Some(filename), Some(content_type), data)
    }

    /// 任意のパートを追加
    pub fn part(
        mut self,
        name: &str,
        filename: Option<&str>,
        content_type: Option<&str>,
        data: &[u8],
    ) -> Self {
        let mut disposition = DispositionParams::form_data(name);
        if let Some(filename) = filename {
            disposition = disposition.with_filename(filename);
        }
        self.parts.push(BuilderPart {
            disposition,
            content_type: content_type.map(str::to_string),
            data: data.to_vec(),
        });
        self
    }

    /// ボディをビルド
    pub fn build(&self) -> Vec<u8> {
        let mut result = Vec::new();

        for part in &self.parts {
            result.extend_from_slice(b"--");
            result.extend_from_slice(self.boundary.as_bytes());
            result.extend_from_slice(b"\r\n");

            result.extend_from_slice(b"Content-Disposition: ");
            result.extend_from_slice(part.disposition.to_string().as_bytes());
            result.extend_from_slice(b"\r\n");

            if let Some(content_type) = &part.content_type {
                result.extend_from_slice(b"Content-Type: ");
                result.extend_from_slice(content_type.as_bytes());
                result.extend_from_slice(b"\r\n");
            }

            // ヘッダーとボディの区切り
            result.extend_from_slice(b"\r\n");

            result.extend_from_slice(&part.data);
            result.extend_from_slice(b"\r\n");
        }

        // 終了境界
        result.extend_from_slice(b"--");
        result.extend_from_slice(self.boundary.as_bytes());
        result.extend_from_slice(b"--\r\n");

        result
    }
}
