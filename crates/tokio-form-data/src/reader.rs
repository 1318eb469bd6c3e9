//! 非同期ストリームからのボディ読み込み
//!
//! ## 概要
//!
//! デコーダーはボディ全体をメモリ上で扱う。
//! ここではストリームを EOF まで読み込み、`max_body_size` を超えた時点で打ち切る。
//!
//! ## 使い方
//!
//! ```ignore
//! use std::time::Duration;
//! use tokio_form_data::{FormDataLimits, read_body};
//!
//! let body = read_body(&mut stream, &FormDataLimits::default(), Duration::from_secs(30)).await?;
//! ```

use std::time::Duration;

use shiguredo_form_data::{FormData, FormDataDecoder, FormDataLimits};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::Result;

const READ_BUFFER_SIZE: usize = 8192;

/// ストリームを EOF まで読み込む
///
/// 読み込んだサイズが `limits.max_body_size` を超えた時点で
/// `shiguredo_form_data::Error::BodyTooLarge` を返す。
/// `timeout` はボディ全体の読み込みにかかる時間の上限。
pub async fn read_body<R>(reader: &mut R, limits: &FormDataLimits, timeout: Duration) -> Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    tokio::time::timeout(timeout, read_to_limit(reader, limits.max_body_size)).await?
}

async fn read_to_limit<R>(reader: &mut R, limit: usize) -> Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut body = Vec::new();
    let mut buf = vec![0u8; READ_BUFFER_SIZE];

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            return Ok(body);
        }

        let size = body.len() + n;
        if size > limit {
            return Err(shiguredo_form_data::Error::BodyTooLarge { size, limit }.into());
        }
        body.extend_from_slice(&buf[..n]);
    }
}

/// ストリームを読み込んで multipart/form-data としてデコードする
///
/// Content-Type は読み込み前に検証するため、
/// multipart/form-data でない場合はストリームに触れずにエラーを返す。
pub async fn read_form_data<R>(
    reader: &mut R,
    content_type: &str,
    limits: &FormDataLimits,
    timeout: Duration,
) -> Result<FormData>
where
    R: AsyncRead + Unpin,
{
    let decoder = FormDataDecoder::from_content_type(content_type)?.limits(limits.clone());
    let body = read_body(reader, limits, timeout).await?;
    Ok(decoder.decode(&body)?)
}
