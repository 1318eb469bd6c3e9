/// フォームデコードの制限設定
///
/// デコーダーはボディ全体をメモリ上で扱うため、
/// 呼び出し側はデコード前にボディサイズを制限する必要がある。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDataLimits {
    /// 最大ボディサイズ (デフォルト: 10MB)
    pub max_body_size: usize,
    /// 最大パート数 (デフォルト: 100)
    ///
    /// 名前のないパートなど、破棄されたセグメントは数えない。
    pub max_parts: usize,
}

impl Default for FormDataLimits {
    fn default() -> Self {
        Self {
            max_body_size: 10 * 1024 * 1024, // 10MB
            max_parts: 100,
        }
    }
}

impl FormDataLimits {
    /// 制限なしの設定を作成
    pub fn unlimited() -> Self {
        Self {
            max_body_size: usize::MAX,
            max_parts: usize::MAX,
        }
    }

    /// 最大ボディサイズを設定
    pub fn with_max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }

    /// 最大パート数を設定
    pub fn with_max_parts(mut self, count: usize) -> Self {
        self.max_parts = count;
        self
    }
}
