//! アップロード画像のシグネチャ検査
//!
//! ## 概要
//!
//! ファイルパートの先頭バイト (マジックナンバー) から画像フォーマットを判定します。
//! Content-Type やファイル名の拡張子は送信側が自由に決められるため、判定には使いません。
//!
//! 判定できないシグネチャの扱いは [`ImagePolicy`] で選びます。
//! デフォルトは [`ImagePolicy::Strict`] で、既知のフォーマット以外を拒否します。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_form_data::image::{ImageFormat, ImagePolicy, ImageError, validate_image};
//!
//! let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00];
//! assert_eq!(ImageFormat::detect(&png), Some(ImageFormat::Png));
//!
//! assert_eq!(validate_image(&png, ImagePolicy::Strict), Ok(Some(ImageFormat::Png)));
//! assert_eq!(
//!     validate_image(b"not an image", ImagePolicy::Strict),
//!     Err(ImageError::UnrecognizedFormat)
//! );
//! assert_eq!(validate_image(b"not an image", ImagePolicy::Permissive), Ok(None));
//! ```

use core::fmt;

/// 画像検査エラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageError {
    /// データが空
    Empty,
    /// 既知の画像シグネチャではない
    UnrecognizedFormat,
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Empty => write!(f, "empty image data"),
            ImageError::UnrecognizedFormat => write!(f, "unrecognized image format"),
        }
    }
}

impl std::error::Error for ImageError {}

/// 判定できる画像フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    WebP,
    Bmp,
    Tiff,
}

impl ImageFormat {
    /// 先頭バイトからフォーマットを判定
    pub fn detect(data: &[u8]) -> Option<Self> {
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageFormat::Jpeg)
        } else if data.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Some(ImageFormat::Png)
        } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            Some(ImageFormat::Gif)
        } else if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            Some(ImageFormat::WebP)
        } else if data.starts_with(b"BM") {
            Some(ImageFormat::Bmp)
        } else if data.starts_with(b"II*\0") || data.starts_with(b"MM\0*") {
            Some(ImageFormat::Tiff)
        } else {
            None
        }
    }

    /// MIME タイプ
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Gif => "image/gif",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Tiff => "image/tiff",
        }
    }

    /// 代表的な拡張子
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::WebP => "webp",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Tiff => "tiff",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// 判定できないシグネチャの扱い
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImagePolicy {
    /// 既知のフォーマット以外を拒否する
    #[default]
    Strict,
    /// 既知のフォーマット以外も受け付ける
    Permissive,
}

/// 画像データを検査する
///
/// 既知のフォーマットなら `Ok(Some(format))`。
/// `Permissive` では判定できないデータも `Ok(None)` として受け付ける。
/// 空のデータはポリシーに関係なくエラー。
pub fn validate_image(data: &[u8], policy: ImagePolicy) -> Result<Option<ImageFormat>, ImageError> {
    if data.is_empty() {
        return Err(ImageError::Empty);
    }

    match (ImageFormat::detect(data), policy) {
        (Some(format), _) => Ok(Some(format)),
        (None, ImagePolicy::Permissive) => Ok(None),
        (None, ImagePolicy::Strict) => Err(ImageError::UnrecognizedFormat),
    }
}
