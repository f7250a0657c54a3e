#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shiguredo_chunked::{ChunkDecoder, CollectingDecoder, encode_chunk, encode_chunks};

#[derive(Arbitrary, Debug)]
struct FuzzChunked {
    chunks: Vec<String>,
    split_hint: u8,
}

fn normalize_chunks(mut chunks: Vec<String>) -> Vec<String> {
    chunks.retain(|chunk| !chunk.is_empty());
    if chunks.len() > 64 {
        chunks.truncate(64);
    }
    chunks
}

/// 文字境界で最大 `split_size` 文字ずつに分割
fn split_chars(s: &str, split_size: usize) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (i, _) in s.char_indices() {
        if count == split_size {
            fragments.push(&s[start..i]);
            start = i;
            count = 0;
        }
        count += 1;
    }
    if start < s.len() {
        fragments.push(&s[start..]);
    }
    fragments
}

fn exercise_streaming(encoded: &str, expected: &str, split_size: usize) {
    let mut decoder = ChunkDecoder::new(String::new());
    for fragment in split_chars(encoded, split_size) {
        decoder.decode(fragment).unwrap();
    }
    decoder.finalize().unwrap();
    assert_eq!(decoder.into_sink(), expected);
}

fn exercise_collecting(encoded: &str, expected: &str, split_size: usize) {
    let mut decoder = CollectingDecoder::new();
    for fragment in split_chars(encoded, split_size) {
        decoder.decode(fragment).unwrap();
    }
    decoder.finalize().unwrap();
    assert_eq!(decoder.result(), expected);
}

fuzz_target!(|input: FuzzChunked| {
    let chunks = normalize_chunks(input.chunks);
    let expected = chunks.concat();
    let split_size = (input.split_hint as usize % 32) + 1;

    let chunk_refs: Vec<&str> = chunks.iter().map(String::as_str).collect();
    let body_from_chunks = encode_chunks(&chunk_refs);

    let mut body_from_single = String::new();
    for chunk in &chunks {
        body_from_single.push_str(&encode_chunk(chunk));
    }
    body_from_single.push_str(&encode_chunk(""));

    exercise_streaming(&body_from_chunks, &expected, split_size);
    exercise_streaming(&body_from_single, &expected, split_size);
    exercise_collecting(&body_from_chunks, &expected, split_size);
    exercise_collecting(&body_from_single, &expected, split_size);
});
