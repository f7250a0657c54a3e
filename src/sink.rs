//! デコード結果の出力先

/// デコード済みペイロードの受け取り先
///
/// `ChunkDecoder` はペイロードの連続した区間ごとに `push` を呼ぶ。
/// 渡される断片は常に空ではない。
///
/// `FnMut(&str)` を実装するクロージャ、`String`、`FragmentCollector` が実装している。
///
/// ```rust
/// use shiguredo_chunked::ChunkDecoder;
///
/// let mut pieces = Vec::new();
/// let mut decoder = ChunkDecoder::new(|s: &str| pieces.push(s.to_string()));
/// decoder.decode("3\r\nabc\r\n0\r\n\r\n").unwrap();
/// decoder.finalize().unwrap();
/// drop(decoder);
/// assert_eq!(pieces, ["abc"]);
/// ```
pub trait FragmentSink {
    /// ペイロード断片を受け取る
    fn push(&mut self, fragment: &str);
}

impl<F> FragmentSink for F
where
    F: FnMut(&str),
{
    fn push(&mut self, fragment: &str) {
        self(fragment)
    }
}

impl FragmentSink for String {
    fn push(&mut self, fragment: &str) {
        self.push_str(fragment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_all<S: FragmentSink>(sink: &mut S, fragments: &[&str]) {
        for fragment in fragments {
            sink.push(fragment);
        }
    }

    #[test]
    fn closure_sink() {
        let mut count = 0;
        let mut sink = |s: &str| count += s.len();
        push_all(&mut sink, &["ab", "c"]);
        assert_eq!(count, 3);
    }

    #[test]
    fn string_sink() {
        let mut out = String::new();
        push_all(&mut out, &["he", "llo"]);
        assert_eq!(out, "hello");
    }
}
