//! デコード済みのフォームパート

use crate::content_type::is_text_like;
use crate::part_header::PartHeaders;
use crate::splitter::RawPart;

/// multipart/form-data の 1 パート
///
/// デコード時に 1 度だけ作られ、その後は変更されない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    /// フィールド名
    name: String,
    /// ファイル名 (ファイルアップロードの場合のみ)
    file_name: Option<String>,
    /// パートの Content-Type
    content_type: Option<String>,
    /// ボディ
    data: Vec<u8>,
    /// ボディを UTF-8 としてデコードした値 (テキスト系のパートのみ)
    text_value: Option<String>,
}

impl FormPart {
    /// フィールド名を取得
    pub fn name(&self) -> &str {
        &self.name
    }

    /// ファイル名を取得
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Content-Type を取得
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// ボディを取得
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// テキスト値を取得
    ///
    /// Content-Type がバイナリを示すパートでは常に `None`。
    pub fn text_value(&self) -> Option<&str> {
        self.text_value.as_deref()
    }

    /// ファイルパートかどうか
    pub fn is_file(&self) -> bool {
        self.file_name.is_some()
    }

    /// ボディの長さ
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// ボディが空かどうか
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// ボディを取り出す
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// 分割済みのパートから `FormPart` を組み立てる
///
/// name がない (または空の) パートは `None` を返す。呼び出し側はそのパートを捨てる。
pub fn assemble(raw: RawPart<'_>) -> Option<FormPart> {
    let (name, file_name, content_type) = PartHeaders::parse(&raw.header_block).into_parts();
    let name = name.filter(|name| !name.is_empty())?;

    let text_value = if !raw.body.is_empty() && is_text_like(content_type.as_deref()) {
        Some(String::from_utf8_lossy(raw.body).into_owned())
    } else {
        None
    };

    Some(FormPart {
        name,
        file_name,
        content_type,
        data: raw.body.to_vec(),
        text_value,
    })
}
