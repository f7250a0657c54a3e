//! 結果を蓄積するデコーダー

use crate::collector::FragmentCollector;
use crate::error::Error;
use crate::limits::{CollectorLimits, DecoderLimits};

use super::chunk::ChunkDecoder;
use super::state::DecoderState;

/// デコード結果を `FragmentCollector` に蓄積するデコーダー
///
/// ```rust
/// use shiguredo_chunked::CollectingDecoder;
///
/// let mut decoder = CollectingDecoder::new();
/// decoder.decode("5\r\nhello\r\n").unwrap();
/// assert_eq!(decoder.result(), "hello");
/// decoder.decode("0\r\n\r\n").unwrap();
/// decoder.finalize().unwrap();
/// ```
#[derive(Debug)]
pub struct CollectingDecoder {
    decoder: ChunkDecoder<FragmentCollector>,
}

impl Default for CollectingDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectingDecoder {
    pub fn new() -> Self {
        Self::with_limits(DecoderLimits::default(), CollectorLimits::default())
    }

    /// 制限としきい値を指定して作成
    pub fn with_limits(decoder_limits: DecoderLimits, collector_limits: CollectorLimits) -> Self {
        Self {
            decoder: ChunkDecoder::with_limits(
                FragmentCollector::with_limits(collector_limits),
                decoder_limits,
            ),
        }
    }

    /// 断片をデコード
    pub fn decode(&mut self, fragment: &str) -> Result<(), Error> {
        self.decoder.decode(fragment)
    }

    /// ストリームが正しく終端したことを確認
    pub fn finalize(&self) -> Result<(), Error> {
        self.decoder.finalize()
    }

    pub fn is_done(&self) -> bool {
        self.decoder.is_done()
    }

    pub fn state(&self) -> &DecoderState {
        self.decoder.state()
    }

    /// これまでにデコードした結果全体
    ///
    /// 終端チャンクの前でも途中結果を返す。
    pub fn result(&mut self) -> &str {
        self.decoder.sink_mut().result()
    }

    /// デコーダーを消費して結果を取り出す
    pub fn into_string(self) -> String {
        self.decoder.into_sink().into_string()
    }

    pub fn collector(&self) -> &FragmentCollector {
        self.decoder.sink()
    }
}

/// ストリーム全体をデコード
///
/// 終端チャンクまで揃っていなければ `Error::IncompleteStream` を返す。
///
/// ```rust
/// use shiguredo_chunked::{Error, decode_str};
///
/// assert_eq!(decode_str("5\r\nhello\r\n0\r\n\r\n").unwrap(), "hello");
/// assert_eq!(decode_str("5\r\nhel"), Err(Error::IncompleteStream));
/// ```
pub fn decode_str(input: &str) -> Result<String, Error> {
    let mut decoder = ChunkDecoder::new(String::new());
    decoder.decode(input)?;
    decoder.finalize()?;
    Ok(decoder.into_sink())
}
