//! デコード結果の蓄積
//!
//! 1 文字ずつのような細かい断片が大量に届く場合でも、
//! 最終結果の組み立てが断片数に比例したコストで済むよう、
//! 保留中の断片をしきい値ごとにブロックへまとめる。

use std::fmt;
use std::mem;

use crate::limits::CollectorLimits;
use crate::sink::FragmentSink;

/// 断片をまとめて保持する出力先
///
/// ブロック (結合済み) と保留中の断片をこの順に連結したものが、
/// これまでに `push` されたすべての断片の連結に常に等しい。
///
/// ```rust
/// use shiguredo_chunked::FragmentCollector;
///
/// let mut collector = FragmentCollector::new();
/// collector.push("hel");
/// collector.push("lo");
/// assert_eq!(collector.result(), "hello");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FragmentCollector {
    /// 結合済みブロック
    blocks: Vec<String>,
    /// 保留中の断片 (連結済み)
    pending: String,
    /// 保留中の文字数
    pending_chars: usize,
    /// 保留中の断片数
    pending_fragments: usize,
    /// 全体の文字数
    total_chars: usize,
    limits: CollectorLimits,
}

impl FragmentCollector {
    /// 新しいコレクターを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// しきい値を指定してコレクターを作成
    pub fn with_limits(limits: CollectorLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// 断片を追加
    ///
    /// 空の断片は無視する。保留中の文字数か断片数がしきい値に達したらブロックにまとめる。
    pub fn push(&mut self, fragment: &str) {
        if fragment.is_empty() {
            return;
        }

        let chars = fragment.chars().count();
        self.pending.push_str(fragment);
        self.pending_chars += chars;
        self.pending_fragments += 1;
        self.total_chars += chars;

        if self.pending_chars >= self.limits.max_pending_chars
            || self.pending_fragments >= self.limits.max_pending_fragments
        {
            self.flush();
        }
    }

    /// 保留中の断片を新しいブロックにまとめる
    pub fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        self.blocks.push(mem::take(&mut self.pending));
        self.pending_chars = 0;
        self.pending_fragments = 0;
    }

    /// これまでの結果全体
    ///
    /// ストリームの途中でも呼べる。ブロックを 1 つにまとめるため、
    /// 新しい断片がなければ 2 回目以降の呼び出しはコピーを伴わない。
    pub fn result(&mut self) -> &str {
        self.flush();
        if self.blocks.len() > 1 {
            let merged = self.blocks.concat();
            self.blocks.clear();
            self.blocks.push(merged);
        }
        self.blocks.first().map(String::as_str).unwrap_or("")
    }

    /// コレクターを消費して結果全体を取り出す
    pub fn into_string(mut self) -> String {
        self.flush();
        if self.blocks.len() == 1 {
            self.blocks.pop().unwrap_or_default()
        } else {
            self.blocks.concat()
        }
    }

    /// 全体の文字数
    pub fn len(&self) -> usize {
        self.total_chars
    }

    pub fn is_empty(&self) -> bool {
        self.total_chars == 0
    }

    /// 結合済みブロック数
    pub fn sealed_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// 保留中の断片数
    pub fn pending_fragments(&self) -> usize {
        self.pending_fragments
    }

    /// しきい値設定
    pub fn limits(&self) -> &CollectorLimits {
        &self.limits
    }
}

impl FragmentSink for FragmentCollector {
    fn push(&mut self, fragment: &str) {
        FragmentCollector::push(self, fragment);
    }
}

impl fmt::Display for FragmentCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in &self.blocks {
            f.write_str(block)?;
        }
        f.write_str(&self.pending)
    }
}
