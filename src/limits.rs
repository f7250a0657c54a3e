/// デコーダーの制限設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderLimits {
    /// 最大チャンクサイズ行長 (デフォルト: 64 桁)
    ///
    /// チャンクサイズ行の 16 進数の桁数。先頭の 0 も数える。
    /// usize の最大値でも 16 桁に収まるため、通常は非常に短い。
    pub max_chunk_line_size: usize,
    /// 最大ペイロード合計サイズ (文字数、デフォルト: 制限なし)
    ///
    /// デコーダー自体はペイロードをバッファしないため、既定では制限しない。
    /// 出力をすべて保持する呼び出し側は必要に応じて設定する。
    pub max_body_size: usize,
}

impl Default for DecoderLimits {
    fn default() -> Self {
        Self {
            max_chunk_line_size: 64,
            max_body_size: usize::MAX,
        }
    }
}

impl DecoderLimits {
    /// 制限なしの設定を作成
    pub fn unlimited() -> Self {
        Self {
            max_chunk_line_size: usize::MAX,
            max_body_size: usize::MAX,
        }
    }
}

/// FragmentCollector の結合しきい値
///
/// どちらかのしきい値に達した時点で保留中の断片を 1 つのブロックにまとめる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorLimits {
    /// 保留中の文字数の上限 (デフォルト: 64K 文字)
    pub max_pending_chars: usize,
    /// 保留中の断片数の上限 (デフォルト: 2048)
    pub max_pending_fragments: usize,
}

impl Default for CollectorLimits {
    fn default() -> Self {
        Self {
            max_pending_chars: 64 * 1024,
            max_pending_fragments: 2048,
        }
    }
}

impl CollectorLimits {
    /// 結合しない設定を作成 (result() 呼び出し時にのみ結合する)
    pub fn unlimited() -> Self {
        Self {
            max_pending_chars: usize::MAX,
            max_pending_fragments: usize::MAX,
        }
    }
}
