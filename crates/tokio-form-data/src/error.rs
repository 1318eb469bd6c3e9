//! tokio-form-data エラー型

use std::fmt;

/// tokio-form-data エラー
#[derive(Debug)]
pub enum Error {
    /// I/O エラー
    Io(std::io::Error),
    /// フォームデコードエラー
    FormData(shiguredo_form_data::Error),
    /// 読み込みタイムアウト
    Timeout,
    /// Content-Type ヘッダーがない
    MissingContentType,
}

impl Error {
    /// ボディサイズ超過かどうか
    pub fn is_body_too_large(&self) -> bool {
        matches!(
            self,
            Error::FormData(shiguredo_form_data::Error::BodyTooLarge { .. })
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::FormData(e) => write!(f, "form data error: {}", e),
            Error::Timeout => write!(f, "read timeout"),
            Error::MissingContentType => write!(f, "missing Content-Type header"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::FormData(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<shiguredo_form_data::Error> for Error {
    fn from(e: shiguredo_form_data::Error) -> Self {
        Error::FormData(e)
    }
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Error::Timeout
    }
}

/// Result 型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
