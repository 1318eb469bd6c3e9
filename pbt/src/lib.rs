//! PBT テスト共通ユーティリティ

use proptest::prelude::*;

// ========================================
// フォーム生成
// ========================================

/// フィールド名
pub fn field_name() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_]{0,15}".prop_map(|s| s)
}

/// ASCII ファイル名
pub fn ascii_filename() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,16}\\.[a-z]{1,4}".prop_map(|s| s)
}

/// ファイル名 (ASCII 以外を含む)
pub fn filename() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => ascii_filename(),
        1 => Just("写真.png".to_string()),
        1 => Just("請求書 2026.csv".to_string()),
    ]
}

/// 境界文字列 (RFC 2046 の bchars の一部)
pub fn boundary() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9'()+_,.-]{16,40}".prop_map(|s| s)
}

/// パートの Content-Type
pub fn part_content_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("text/plain".to_string()),
        Just("text/csv; charset=utf-8".to_string()),
        Just("application/json".to_string()),
        Just("application/x-www-form-urlencoded".to_string()),
        Just("application/octet-stream".to_string()),
        Just("application/pdf".to_string()),
        Just("image/png".to_string()),
        Just("image/jpeg".to_string()),
    ]
}

/// エンコード前のパート
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartInput {
    pub name: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// 空でないボディを持つパート
pub fn part_input() -> impl Strategy<Value = PartInput> {
    (
        field_name(),
        proptest::option::of(filename()),
        proptest::option::of(part_content_type()),
        proptest::collection::vec(any::<u8>(), 1..256),
    )
        .prop_map(|(name, filename, content_type, data)| PartInput {
            name,
            filename,
            content_type,
            data,
        })
}

/// パート列 (0 から 8 個)
pub fn part_inputs() -> impl Strategy<Value = Vec<PartInput>> {
    proptest::collection::vec(part_input(), 0..8)
}
