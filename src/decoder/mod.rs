//! chunked デコーダーモジュール
//!
//! Sans I/O 設計に基づくストリーミングデコーダーを提供。
//!
//! ## 使い方
//!
//! ### ストリーミング API
//!
//! ```rust
//! use shiguredo_chunked::ChunkDecoder;
//!
//! let mut body = String::new();
//! let mut decoder = ChunkDecoder::new(|s: &str| body.push_str(s));
//!
//! // 受信した順に断片を投入
//! for fragment in ["5\r\nhe", "llo\r\n0", "\r\n\r\n"] {
//!     decoder.decode(fragment).unwrap();
//! }
//! // 終端チャンクまで届いたことを確認
//! decoder.finalize().unwrap();
//! drop(decoder);
//!
//! assert_eq!(body, "hello");
//! ```
//!
//! ### 一括デコード API
//!
//! ```rust
//! use shiguredo_chunked::decode_str;
//!
//! assert_eq!(decode_str("5\r\nhello\r\n0\r\n\r\n").unwrap(), "hello");
//! ```

mod chunk;
mod collecting;
mod state;

// 公開 API
pub use chunk::ChunkDecoder;
pub use collecting::{CollectingDecoder, decode_str};
pub use state::{DecoderState, ResumeTarget};
