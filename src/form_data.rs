//! デコード済みフォーム
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_form_data::FormDataDecoder;
//!
//! let body = b"--b\r\n\
//!     Content-Disposition: form-data; name=\"title\"\r\n\r\n\
//!     Kitchen\r\n\
//!     --b\r\n\
//!     Content-Disposition: form-data; name=\"photo\"; filename=\"k.jpg\"\r\n\
//!     Content-Type: image/jpeg\r\n\r\n\
//!     \xFF\xD8\xFF\xE0\r\n\
//!     --b--\r\n";
//!
//! let form = FormDataDecoder::new("b").decode(body).unwrap();
//! assert_eq!(form.field("title"), Some("Kitchen"));
//! assert_eq!(form.file("photo").unwrap().file_name(), Some("k.jpg"));
//! assert_eq!(form.files().count(), 1);
//! ```

use crate::form_part::FormPart;

/// デコード済みフォーム (入力順のパート列)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    parts: Vec<FormPart>,
}

impl FormData {
    /// パート列から作成
    pub fn from_parts(parts: Vec<FormPart>) -> Self {
        Self { parts }
    }

    /// すべてのパートを取得
    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// パート列を取り出す
    pub fn into_parts(self) -> Vec<FormPart> {
        self.parts
    }

    /// パート数
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// パートがないかどうか
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// 指定した名前の最初のパートを取得
    pub fn get(&self, name: &str) -> Option<&FormPart> {
        self.parts.iter().find(|part| part.name() == name)
    }

    /// 指定した名前のパートをすべて取得
    pub fn get_all<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a FormPart> {
        self.parts.iter().filter(move |part| part.name() == name)
    }

    /// 指定した名前の最初のテキスト値を取得
    pub fn field(&self, name: &str) -> Option<&str> {
        self.get_all(name).find_map(FormPart::text_value)
    }

    /// 指定した名前の最初のファイルパートを取得
    pub fn file(&self, name: &str) -> Option<&FormPart> {
        self.get_all(name).find(|part| part.is_file())
    }

    /// ファイルパートをすべて取得
    pub fn files(&self) -> impl Iterator<Item = &FormPart> {
        self.parts.iter().filter(|part| part.is_file())
    }

    /// ファイル以外のテキストフィールドを (name, value) で取得
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.parts
            .iter()
            .filter(|part| !part.is_file())
            .filter_map(|part| part.text_value().map(|value| (part.name(), value)))
    }
}

impl IntoIterator for FormData {
    type Item = FormPart;
    type IntoIter = std::vec::IntoIter<FormPart>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::multipart::decode;

    use super::*;

    fn sample() -> FormData {
        let body = b"--b\r\n\
            Content-Disposition: form-data; name=\"tag\"\r\n\r\n\
            a\r\n\
            --b\r\n\
            Content-Disposition: form-data; name=\"doc\"; filename=\"x.csv\"\r\n\
            Content-Type: text/csv\r\n\r\n\
            h1,h2\r\n\
            --b\r\n\
            Content-Disposition: form-data; name=\"tag\"\r\n\r\n\
            b\r\n\
            --b\r\n\
            Content-Disposition: form-data; name=\"blob\"\r\n\
            Content-Type: application/octet-stream\r\n\r\n\
            \x00\x01\r\n\
            --b--\r\n";
        FormData::from_parts(decode(body, "b").unwrap())
    }

    #[test]
    fn test_lookup() {
        let form = sample();
        assert_eq!(form.len(), 4);
        assert!(!form.is_empty());
        assert_eq!(form.get("tag").unwrap().text_value(), Some("a"));
        assert_eq!(form.get_all("tag").count(), 2);
        assert_eq!(form.field("tag"), Some("a"));
        assert_eq!(form.field("blob"), None);
        assert!(form.get("missing").is_none());
    }

    #[test]
    fn test_files_and_fields() {
        let form = sample();
        let file = form.file("doc").unwrap();
        assert_eq!(file.file_name(), Some("x.csv"));
        assert!(form.file("tag").is_none());
        assert_eq!(form.files().count(), 1);

        let fields: Vec<_> = form.fields().collect();
        assert_eq!(fields, vec![("tag", "a"), ("tag", "b")]);
    }

    #[test]
    fn test_into_iter_keeps_order() {
        let names: Vec<String> = sample()
            .into_iter()
            .map(|part| part.name().to_string())
            .collect();
        assert_eq!(names, vec!["tag", "doc", "tag", "blob"]);
    }

    #[test]
    fn test_empty() {
        let form = FormData::default();
        assert!(form.is_empty());
        assert_eq!(form.files().count(), 0);
    }
}
