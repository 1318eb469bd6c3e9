use std::fmt;

use crate::content_type::ContentTypeError;

/// multipart/form-data デコードエラー
///
/// 不正なパートや途中で切れたボディはエラーにならない。
/// エラーになるのは呼び出し側の前提条件違反と制限超過のみ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// 境界文字列が空
    EmptyBoundary,
    /// Content-Type に boundary パラメータがない
    MissingBoundary,
    /// 境界文字列が不正 (RFC 2046 の 70 文字制限超過など)
    InvalidBoundary,
    /// Content-Type が multipart/form-data ではない
    NotFormData,
    /// Content-Type のパースエラー
    ContentType(ContentTypeError),
    /// ボディサイズ超過
    BodyTooLarge { size: usize, limit: usize },
    /// パート数超過
    TooManyParts { count: usize, limit: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyBoundary => write!(f, "empty boundary"),
            Error::MissingBoundary => write!(f, "missing boundary parameter"),
            Error::InvalidBoundary => write!(f, "invalid boundary"),
            Error::NotFormData => write!(f, "content type is not multipart/form-data"),
            Error::ContentType(e) => write!(f, "content type error: {}", e),
            Error::BodyTooLarge { size, limit } => {
                write!(f, "body too large: {} > {}", size, limit)
            }
            Error::TooManyParts { count, limit } => {
                write!(f, "too many parts: {} > {}", count, limit)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ContentType(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ContentTypeError> for Error {
    fn from(e: ContentTypeError) -> Self {
        Error::ContentType(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Error::EmptyBoundary.to_string(), "empty boundary");
        assert_eq!(
            Error::BodyTooLarge {
                size: 11,
                limit: 10
            }
            .to_string(),
            "body too large: 11 > 10"
        );
        assert_eq!(
            Error::ContentType(ContentTypeError::Empty).to_string(),
            "content type error: empty Content-Type"
        );
    }

    #[test]
    fn test_source() {
        use std::error::Error as _;

        assert!(Error::ContentType(ContentTypeError::Empty).source().is_some());
        assert!(Error::MissingBoundary.source().is_none());
    }
}
