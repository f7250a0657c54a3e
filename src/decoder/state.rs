//! デコード状態の定義

/// CRLF を読み終えた後の遷移先
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeTarget {
    /// ペイロード後の CRLF: 次のチャンクサイズ行へ
    ReadingSize,
    /// 終端チャンク後の CRLF: 完了
    Done,
}

/// デコード状態
///
/// 状態ごとに必要なデータだけを持つため、
/// CRLF 待ちの間に残りペイロードがあるといった状態は表現できない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecoderState {
    /// チャンクサイズ行を読み取り中
    ReadingSize {
        /// これまでに読んだ 16 進数の値
        value: usize,
        /// 読んだ桁数 (0 なら空のサイズ行)
        digits: usize,
        /// CR を読み、LF を待っている
        saw_cr: bool,
    },
    /// チャンクのペイロードを読み取り中
    ReadingPayload {
        /// 残り文字数 (常に 1 以上)
        remaining: usize,
    },
    /// ペイロード後または終端チャンク後の CRLF 待ち
    ExpectingDelimiter {
        /// CR を読み、LF を待っている
        saw_cr: bool,
        /// CRLF 後の遷移先
        resume: ResumeTarget,
    },
    /// 完了
    Done,
}

impl DecoderState {
    /// 新しいサイズ行の読み取り開始状態
    pub(crate) fn size_line() -> Self {
        DecoderState::ReadingSize {
            value: 0,
            digits: 0,
            saw_cr: false,
        }
    }

    /// CRLF 待ち開始状態
    pub(crate) fn delimiter(resume: ResumeTarget) -> Self {
        DecoderState::ExpectingDelimiter {
            saw_cr: false,
            resume,
        }
    }
}

impl Default for DecoderState {
    fn default() -> Self {
        Self::size_line()
    }
}
