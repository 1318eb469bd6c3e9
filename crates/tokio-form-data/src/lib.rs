//! tokio_form_data - Tokio integration for shiguredo_form_data
//!
//! 非同期ストリームからフォームボディを読み込み、multipart/form-data としてデコードする。
//!
//! ## 特徴
//!
//! - **サイズ制限付き読み込み**: `FormDataLimits::max_body_size` を超えた時点で読み込みを打ち切る
//! - **タイムアウト**: ボディ全体の読み込みに期限を設定できる
//! - **shiguredo_http11 連携**: デコード済みの `Request` からフォームを取り出す
//!
//! ## ストリームから読み込む
//!
//! ```ignore
//! use std::time::Duration;
//! use tokio_form_data::{FormDataLimits, read_form_data};
//!
//! let form = read_form_data(
//!     &mut stream,
//!     "multipart/form-data; boundary=XYZ",
//!     &FormDataLimits::default(),
//!     Duration::from_secs(30),
//! )
//! .await?;
//! ```
//!
//! ## Request から取り出す
//!
//! ```ignore
//! use tokio_form_data::{FormDataLimits, RequestExt};
//!
//! let form = request.form_data(&FormDataLimits::default())?;
//! let photo = form.files().next();
//! ```

pub mod error;
pub mod reader;
pub mod request;

pub use error::{Error, Result};
pub use reader::{read_body, read_form_data};
pub use request::{RequestExt, form_data_from_request};

// shiguredo_form_data の型を re-export
pub use shiguredo_form_data::{FormData, FormDataLimits, FormPart};
