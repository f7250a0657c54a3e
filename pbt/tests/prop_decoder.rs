//! ChunkDecoder のプロパティテスト (decoder/chunk.rs)

use pbt::{chunk_list, cuts, payload, split_at_cuts};
use proptest::prelude::*;
use shiguredo_chunked::{
    ChunkDecoder, CollectingDecoder, DecoderLimits, Error, decode_str, encode_chunk, encode_chunks,
};

fn decode_fragments(fragments: &[&str]) -> Result<(String, bool), Error> {
    let mut decoder = ChunkDecoder::new(String::new());
    for fragment in fragments {
        decoder.decode(fragment)?;
    }
    let done = decoder.is_done();
    Ok((decoder.into_sink(), done))
}

fn as_refs(chunks: &[String]) -> Vec<&str> {
    chunks.iter().map(String::as_str).collect()
}

// ========================================
// 分割に対する不変性
// ========================================

proptest! {
    #[test]
    fn fragmentation_invariance(chunks in chunk_list(), cuts in cuts()) {
        let encoded = encode_chunks(&as_refs(&chunks));
        let expected: String = chunks.concat();

        let (whole, whole_done) = decode_fragments(&[encoded.as_str()]).unwrap();
        prop_assert_eq!(&whole, &expected);
        prop_assert!(whole_done);

        let fragments = split_at_cuts(&encoded, &cuts);
        let (split, split_done) = decode_fragments(&fragments).unwrap();
        prop_assert_eq!(&split, &expected);
        prop_assert!(split_done);
    }
}

proptest! {
    #[test]
    fn split_at_every_char(chunks in proptest::collection::vec(payload(16), 0..4)) {
        let encoded = encode_chunks(&as_refs(&chunks));
        let fragments: Vec<&str> = encoded
            .char_indices()
            .map(|(i, c)| &encoded[i..i + c.len_utf8()])
            .collect();

        let (out, done) = decode_fragments(&fragments).unwrap();
        prop_assert_eq!(out, chunks.concat());
        prop_assert!(done);
    }
}

// 出力される断片は常に空でなく、連結すると元のペイロードになる
proptest! {
    #[test]
    fn pushed_fragments_non_empty(chunks in chunk_list(), cuts in cuts()) {
        let encoded = encode_chunks(&as_refs(&chunks));
        let mut pieces: Vec<String> = Vec::new();
        let mut decoder = ChunkDecoder::new(|s: &str| pieces.push(s.to_string()));
        for fragment in split_at_cuts(&encoded, &cuts) {
            decoder.decode(fragment).unwrap();
        }
        decoder.finalize().unwrap();
        drop(decoder);

        prop_assert!(pieces.iter().all(|p| !p.is_empty()));
        prop_assert_eq!(pieces.concat(), chunks.concat());
    }
}

proptest! {
    #[test]
    fn decoded_len_counts_chars(chunks in chunk_list()) {
        let encoded = encode_chunks(&as_refs(&chunks));
        let mut decoder = ChunkDecoder::new(String::new());
        decoder.decode(&encoded).unwrap();

        let expected = chunks.concat();
        prop_assert_eq!(decoder.decoded_len(), expected.chars().count());
        prop_assert_eq!(
            decoder.chunks_decoded(),
            chunks.iter().filter(|c| !c.is_empty()).count()
        );
    }
}

// ========================================
// 完了
// ========================================

proptest! {
    #[test]
    fn done_is_idempotent(chunks in chunk_list(), extra in payload(32)) {
        let encoded = encode_chunks(&as_refs(&chunks));
        let mut decoder = ChunkDecoder::new(String::new());
        decoder.decode(&encoded).unwrap();
        prop_assert!(decoder.is_done());

        decoder.decode(&extra).unwrap();
        prop_assert!(decoder.is_done());
        prop_assert!(decoder.finalize().is_ok());
        prop_assert_eq!(decoder.into_sink(), chunks.concat());
    }
}

proptest! {
    #[test]
    fn truncated_stream_is_incomplete(chunks in chunk_list(), cut in any::<usize>()) {
        let encoded = encode_chunks(&as_refs(&chunks));
        let boundaries: Vec<usize> = encoded.char_indices().map(|(i, _)| i).collect();
        let end = boundaries[cut % boundaries.len()];

        let mut decoder = CollectingDecoder::new();
        decoder.decode(&encoded[..end]).unwrap();
        prop_assert!(!decoder.is_done());
        prop_assert_eq!(decoder.finalize(), Err(Error::IncompleteStream));

        // 途中結果は完全な結果の接頭辞
        let expected = chunks.concat();
        prop_assert!(expected.starts_with(decoder.result()));
    }
}

// ========================================
// サイズ行
// ========================================

proptest! {
    #[test]
    fn uppercase_hex_size(data in "[a-z]{1,600}") {
        let encoded = format!("{:X}\r\n{}\r\n0\r\n\r\n", data.len(), data);
        prop_assert_eq!(decode_str(&encoded).unwrap(), data);
    }
}

proptest! {
    #[test]
    fn leading_zeros_accepted(data in "[a-z]{1,64}", zeros in 0usize..8) {
        let encoded = format!("{}{:x}\r\n{}\r\n0\r\n\r\n", "0".repeat(zeros), data.len(), data);
        prop_assert_eq!(decode_str(&encoded).unwrap(), data);
    }
}

proptest! {
    #[test]
    fn non_hex_size_char_rejected(
        size in 1usize..0x1000,
        bad in any::<char>().prop_filter("non-hex and not CR", |c| !c.is_ascii_hexdigit() && *c != '\r'),
        cuts in cuts()
    ) {
        let encoded = format!("{:x}{}\r\n", size, bad);
        let fragments = split_at_cuts(&encoded, &cuts);
        let result = decode_fragments(&fragments);
        prop_assert!(matches!(result, Err(Error::MalformedSizeLine(_))));
    }
}

proptest! {
    #[test]
    fn bad_delimiter_rejected(
        data in "[a-z]{1,32}",
        bad in any::<char>().prop_filter("not CR", |c| *c != '\r')
    ) {
        let encoded = format!("{:x}\r\n{}{}\n", data.len(), data, bad);
        let result = decode_fragments(&[encoded.as_str()]);
        prop_assert_eq!(
            result,
            Err(Error::MalformedDelimiter { expected: '\r', found: bad })
        );
    }
}

// ========================================
// エラー後の状態
// ========================================

proptest! {
    #[test]
    fn error_is_sticky(garbage in "[g-z]{1,8}", chunks in chunk_list()) {
        let mut decoder = ChunkDecoder::new(String::new());
        let err = decoder.decode(&garbage).unwrap_err();

        let encoded = encode_chunks(&as_refs(&chunks));
        prop_assert_eq!(decoder.decode(&encoded), Err(err));
        prop_assert!(!decoder.is_done());
        prop_assert_eq!(decoder.finalize(), Err(Error::IncompleteStream));
    }
}

// ========================================
// 制限
// ========================================

proptest! {
    #[test]
    fn body_limit_enforced(chunks in proptest::collection::vec("[a-z]{1,32}", 1..8), limit in 0usize..128) {
        let encoded = encode_chunks(&as_refs(&chunks));
        let total: usize = chunks.iter().map(String::len).sum();

        let limits = DecoderLimits { max_body_size: limit, ..DecoderLimits::default() };
        let mut decoder = ChunkDecoder::with_limits(String::new(), limits);
        let result = decoder.decode(&encoded);

        if total <= limit {
            prop_assert!(result.is_ok());
            prop_assert!(decoder.is_done());
        } else {
            let is_too_large = matches!(result, Err(Error::BodyTooLarge { .. }));
            prop_assert!(is_too_large);
            // 制限を超えたチャンクのペイロードは出力されない
            prop_assert!(decoder.sink().len() <= limit);
        }
    }
}

// ========================================
// エンコーダー
// ========================================

proptest! {
    #[test]
    fn encode_chunk_valid(data in payload(64)) {
        let chunk = encode_chunk(&data);

        if data.is_empty() {
            prop_assert_eq!(chunk, "0\r\n\r\n");
        } else {
            let expected_size = format!("{:x}\r\n", data.chars().count());
            prop_assert!(chunk.starts_with(&expected_size));
            prop_assert!(chunk.ends_with("\r\n"));
        }
    }
}
