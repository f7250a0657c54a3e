#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shiguredo_chunked::{ChunkDecoder, DecoderLimits};

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    max_chunk_line_size: u8,
    max_body_size: u16,
    fragments: Vec<String>,
}

fuzz_target!(|input: FuzzInput| {
    let limits = DecoderLimits {
        max_chunk_line_size: input.max_chunk_line_size as usize,
        max_body_size: input.max_body_size as usize,
    };

    let mut emitted = 0usize;
    let mut decoder = ChunkDecoder::with_limits(
        |s: &str| {
            assert!(!s.is_empty());
            emitted += s.chars().count();
        },
        limits,
    );

    let mut failed = None;
    for fragment in &input.fragments {
        match decoder.decode(fragment) {
            Ok(()) => {}
            Err(e) => {
                // 一度失敗したら以後は同じエラー
                if let Some(prev) = &failed {
                    assert_eq!(prev, &e);
                }
                failed = Some(e);
            }
        }
    }

    if failed.is_some() {
        assert!(decoder.finalize().is_err());
    }
    assert!(decoder.decoded_len() <= input.max_body_size as usize);
    drop(decoder);
    assert!(emitted <= input.max_body_size as usize);
});
