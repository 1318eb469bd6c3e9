//! multipart/form-data デコード (RFC 7578)
//!
//! ## 概要
//!
//! メモリ上に読み込まれたリクエストボディ全体を、境界文字列を使って
//! [`FormPart`] の列にデコードします。
//!
//! - 不正なパートや途中で切れたボディはエラーにせず、取り出せたパートだけを返す
//! - name のないパートは捨てる
//! - パートの順序は入力の順序を保つ
//! - 状態を持たないので、複数スレッドから同時に呼び出してよい
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_form_data::multipart::{decode, FormDataDecoder};
//! use shiguredo_form_data::FormDataLimits;
//!
//! let body = b"--XYZ\r\n\
//!     Content-Disposition: form-data; name=\"caption\"\r\n\r\n\
//!     Hello\r\n\
//!     --XYZ--\r\n";
//!
//! let parts = decode(body, "XYZ").unwrap();
//! assert_eq!(parts[0].name(), "caption");
//! assert_eq!(parts[0].text_value(), Some("Hello"));
//!
//! // Content-Type ヘッダーと制限を使う場合
//! let form = FormDataDecoder::from_content_type("multipart/form-data; boundary=XYZ")
//!     .unwrap()
//!     .limits(FormDataLimits::default().with_max_body_size(1024))
//!     .decode(body)
//!     .unwrap();
//! assert_eq!(form.field("caption"), Some("Hello"));
//! ```

use crate::content_type::boundary_from_content_type;
use crate::error::Error;
use crate::form_data::FormData;
use crate::form_part::{FormPart, assemble};
use crate::limits::FormDataLimits;
use crate::splitter::split_parts;

/// ボディをデコードしてパートの列を返す
///
/// 制限はかけない。境界文字列が空の場合のみエラーになる。
pub fn decode(body: &[u8], boundary: &str) -> Result<Vec<FormPart>, Error> {
    if boundary.is_empty() {
        return Err(Error::EmptyBoundary);
    }

    Ok(split_parts(body, boundary)
        .into_iter()
        .filter_map(assemble)
        .collect())
}

/// 制限付きの multipart/form-data デコーダー
#[derive(Debug, Clone)]
pub struct FormDataDecoder {
    boundary: String,
    limits: FormDataLimits,
}

impl FormDataDecoder {
    /// 境界文字列を指定して作成
    pub fn new(boundary: &str) -> Self {
        Self {
            boundary: boundary.to_string(),
            limits: FormDataLimits::default(),
        }
    }

    /// リクエストの Content-Type ヘッダー値から作成
    pub fn from_content_type(content_type: &str) -> Result<Self, Error> {
        let boundary = boundary_from_content_type(content_type)?;
        Ok(Self::new(&boundary))
    }

    /// 制限を設定
    pub fn limits(mut self, limits: FormDataLimits) -> Self {
        self.limits = limits;
        self
    }

    /// 境界文字列を取得
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// 制限を取得
    pub fn get_limits(&self) -> &FormDataLimits {
        &self.limits
    }

    /// ボディをデコードして [`FormData`] を返す
    pub fn decode(&self, body: &[u8]) -> Result<FormData, Error> {
        self.decode_parts(body).map(FormData::from_parts)
    }

    /// ボディをデコードしてパートの列を返す
    ///
    /// ボディサイズはパース前に、パート数はパース後に検査する。
    pub fn decode_parts(&self, body: &[u8]) -> Result<Vec<FormPart>, Error> {
        if body.len() > self.limits.max_body_size {
            return Err(Error::BodyTooLarge {
                size: body.len(),
                limit: self.limits.max_body_size,
            });
        }

        let parts = decode(body, &self.boundary)?;
        if parts.len() > self.limits.max_parts {
            return Err(Error::TooManyParts {
                count: parts.len(),
                limit: self.limits.max_parts,
            });
        }

        Ok(parts)
    }
}
