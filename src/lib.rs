//! # shiguredo_chunked
//!
//! chunked 形式のテキストストリームをデコードするライブラリ (Sans I/O)
//!
//! ## 特徴
//!
//! - **ストリーミング**: 任意の位置で分割された断片をそのまま順にデコードする
//! - **Sans I/O**: I/O を完全に分離した設計
//! - **依存最小**: 診断ログ用の `log` ファサードのみ使用
//!
//! ## 形式
//!
//! ```text
//! <16 進数サイズ>\r\n<ペイロード (サイズ文字分)>\r\n   (繰り返し)
//! 0\r\n\r\n                                          (終端)
//! ```
//!
//! - サイズはペイロードの文字数 (`char` の数)
//! - チャンク拡張とトレーラーは扱わない
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_chunked::{CollectingDecoder, encode_chunks};
//!
//! let encoded = encode_chunks(&["hello, ", "world"]);
//!
//! let mut decoder = CollectingDecoder::new();
//! // 受信した断片を順に decode...
//! for fragment in encoded.as_bytes().chunks(3) {
//!     decoder.decode(std::str::from_utf8(fragment).unwrap()).unwrap();
//! }
//! decoder.finalize().unwrap();
//! assert_eq!(decoder.result(), "hello, world");
//! ```

mod collector;
mod decoder;
mod encoder;
mod error;
mod limits;
mod sink;

pub use collector::FragmentCollector;
pub use decoder::{ChunkDecoder, CollectingDecoder, DecoderState, ResumeTarget, decode_str};
pub use encoder::{encode_chunk, encode_chunked, encode_chunks};
pub use error::Error;
pub use limits::{CollectorLimits, DecoderLimits};
pub use sink::FragmentSink;
