//! shiguredo_http11 の Request からフォームを取り出す
//!
//! ## 使い方
//!
//! ```ignore
//! use tokio_form_data::{FormDataLimits, RequestExt};
//!
//! if request.is_form_data() {
//!     let form = request.form_data(&FormDataLimits::default())?;
//! }
//! ```

use shiguredo_form_data::content_type::ContentType;
use shiguredo_form_data::{FormData, FormDataDecoder, FormDataLimits};
use shiguredo_http11::Request;

use crate::error::{Error, Result};

/// デコード済みの Request のボディをフォームとしてデコードする
///
/// Content-Type ヘッダーから境界を取り出す。
/// ヘッダーがない場合は `Error::MissingContentType` を返す。
pub fn form_data_from_request(request: &Request, limits: &FormDataLimits) -> Result<FormData> {
    let content_type = request
        .get_header("Content-Type")
        .ok_or(Error::MissingContentType)?;
    let decoder = FormDataDecoder::from_content_type(content_type)?.limits(limits.clone());
    Ok(decoder.decode(&request.body)?)
}

/// Request 拡張トレイト
pub trait RequestExt {
    /// Content-Type が multipart/form-data かどうか
    fn is_form_data(&self) -> bool;

    /// ボディをフォームとしてデコード
    fn form_data(&self, limits: &FormDataLimits) -> Result<FormData>;
}

impl RequestExt for Request {
    fn is_form_data(&self) -> bool {
        self.get_header("Content-Type")
            .and_then(|value| ContentType::parse(value).ok())
            .is_some_and(|ct| ct.is_form_data())
    }

    fn form_data(&self, limits: &FormDataLimits) -> Result<FormData> {
        form_data_from_request(self, limits)
    }
}
