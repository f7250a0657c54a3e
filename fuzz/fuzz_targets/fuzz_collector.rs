#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shiguredo_chunked::{CollectorLimits, FragmentCollector};

#[derive(Arbitrary, Debug)]
enum Op {
    Push(String),
    Flush,
    Result,
}

#[derive(Arbitrary, Debug)]
struct FuzzCollector {
    max_pending_chars: u8,
    max_pending_fragments: u8,
    ops: Vec<Op>,
}

fuzz_target!(|input: FuzzCollector| {
    let mut collector = FragmentCollector::with_limits(CollectorLimits {
        max_pending_chars: input.max_pending_chars as usize,
        max_pending_fragments: input.max_pending_fragments as usize,
    });
    let mut expected = String::new();

    for op in input.ops {
        match op {
            Op::Push(s) => {
                collector.push(&s);
                expected.push_str(&s);
            }
            Op::Flush => collector.flush(),
            Op::Result => assert_eq!(collector.result(), expected),
        }
    }

    assert_eq!(collector.to_string(), expected);
    assert_eq!(collector.len(), expected.chars().count());
    assert_eq!(collector.into_string(), expected);
});
