//! PBT テスト共通ユーティリティ

use proptest::prelude::*;

// ========================================
// ペイロード生成
// ========================================

/// ペイロードに使う文字: ASCII、CR/LF、マルチバイト文字を混ぜる
pub fn payload_char() -> impl Strategy<Value = char> {
    prop_oneof![
        8 => prop::char::range(' ', '~'),
        1 => Just('\r'),
        1 => Just('\n'),
        2 => any::<char>(),
    ]
}

/// 1 チャンク分のペイロード (空になりうる)
pub fn payload(max_len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(payload_char(), 0..=max_len)
        .prop_map(|chars| chars.into_iter().collect())
}

/// チャンク列
pub fn chunk_list() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(payload(64), 0..8)
}

// ========================================
// 断片化
// ========================================

/// 文字列を文字境界で分割する
///
/// `cuts` の各値を文字数で割った余りの位置で分割する。空の断片は作らない。
pub fn split_at_cuts<'a>(s: &'a str, cuts: &[usize]) -> Vec<&'a str> {
    let boundaries: Vec<usize> = s.char_indices().map(|(i, _)| i).skip(1).collect();
    if boundaries.is_empty() {
        return if s.is_empty() { Vec::new() } else { vec![s] };
    }

    let mut positions: Vec<usize> = cuts
        .iter()
        .map(|c| boundaries[c % boundaries.len()])
        .collect();
    positions.sort_unstable();
    positions.dedup();

    let mut fragments = Vec::with_capacity(positions.len() + 1);
    let mut start = 0;
    for pos in positions {
        fragments.push(&s[start..pos]);
        start = pos;
    }
    fragments.push(&s[start..]);
    fragments
}

/// 分割位置の候補
pub fn cuts() -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(any::<usize>(), 0..16)
}
