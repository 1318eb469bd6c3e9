//! # shiguredo_form_data
//!
//! 依存なしの multipart/form-data デコーダーライブラリ (Sans I/O)
//!
//! ## 特徴
//!
//! - **依存なし**: 標準ライブラリのみ使用
//! - **Sans I/O**: メモリ上のボディを受け取り、I/O は呼び出し側が行う
//! - **寛容なパース**: 不正なパートや途中で切れたボディはエラーにせず、取り出せたパートだけを返す
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_form_data::{FormDataDecoder, FormDataLimits};
//! use shiguredo_form_data::image::{ImagePolicy, validate_image};
//!
//! let content_type = "multipart/form-data; boundary=XYZ";
//! let body = b"--XYZ\r\n\
//!     Content-Disposition: form-data; name=\"caption\"\r\n\r\n\
//!     Hello\r\n\
//!     --XYZ\r\n\
//!     Content-Disposition: form-data; name=\"photo\"; filename=\"a.png\"\r\n\
//!     Content-Type: image/png\r\n\r\n\
//!     \x89PNG\r\n\x1a\n\r\n\
//!     --XYZ--\r\n";
//!
//! let form = FormDataDecoder::from_content_type(content_type)
//!     .unwrap()
//!     .limits(FormDataLimits::default())
//!     .decode(body)
//!     .unwrap();
//!
//! assert_eq!(form.field("caption"), Some("Hello"));
//!
//! let photo = form.files().next().unwrap();
//! assert_eq!(photo.file_name(), Some("a.png"));
//! assert!(validate_image(photo.data(), ImagePolicy::Strict).is_ok());
//! ```

mod builder;
pub mod content_disposition;
pub mod content_type;
mod error;
mod form_data;
mod form_part;
pub mod image;
mod limits;
mod matcher;
pub mod multipart;
pub mod part_header;
pub mod splitter;

pub use builder::FormDataBuilder;
pub use error::Error;
pub use form_data::FormData;
pub use form_part::{FormPart, assemble};
pub use limits::FormDataLimits;
pub use matcher::find_bytes;
pub use multipart::{FormDataDecoder, decode};
