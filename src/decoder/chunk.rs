//! chunked ストリームデコーダー

use log::{debug, trace};

use crate::error::Error;
use crate::limits::DecoderLimits;
use crate::sink::FragmentSink;

use super::state::{DecoderState, ResumeTarget};

/// chunked ストリームデコーダー (Sans I/O)
///
/// `<16 進数サイズ>\r\n<ペイロード>\r\n` の繰り返しと終端の `0\r\n\r\n` からなる
/// テキストストリームを、任意の位置で分割された断片のまま順にデコードする。
/// デコード済みのペイロードは断片ごとに `FragmentSink` へ渡され、デコーダー自身は
/// ストリームをバッファしない。
///
/// サイズはペイロードの文字数 (`char` の数) を表す。サイズ行は 16 進数字のみを受け付け、
/// 符号、`0x` 接頭辞、空白、チャンク拡張はすべてエラーになる。空のサイズ行は 0 として扱う。
///
/// エラーが発生したデコーダーは以後すべての `decode()` で同じエラーを返す。
///
/// # 使い方
///
/// ```rust
/// use shiguredo_chunked::ChunkDecoder;
///
/// let mut decoder = ChunkDecoder::new(String::new());
/// decoder.decode("5\r\nhe").unwrap();
/// decoder.decode("llo\r\n0").unwrap();
/// decoder.decode("\r\n\r\n").unwrap();
/// decoder.finalize().unwrap();
/// assert_eq!(decoder.into_sink(), "hello");
/// ```
#[derive(Debug)]
pub struct ChunkDecoder<S: FragmentSink> {
    state: DecoderState,
    sink: S,
    limits: DecoderLimits,
    /// 宣言されたペイロードの合計文字数
    body_size: usize,
    /// 出力済みのペイロード文字数
    decoded_len: usize,
    /// 読み終えたチャンク数 (終端チャンクを除く)
    chunks_decoded: usize,
    /// 発生したエラー
    failed: Option<Error>,
}

impl<S: FragmentSink> ChunkDecoder<S> {
    /// 新しいデコーダーを作成
    pub fn new(sink: S) -> Self {
        Self::with_limits(sink, DecoderLimits::default())
    }

    /// 制限付きでデコーダーを作成
    pub fn with_limits(sink: S, limits: DecoderLimits) -> Self {
        Self {
            state: DecoderState::default(),
            sink,
            limits,
            body_size: 0,
            decoded_len: 0,
            chunks_decoded: 0,
            failed: None,
        }
    }

    /// 断片をデコード
    ///
    /// 現在の状態で処理できる分をすべて処理し、ペイロードを sink に渡す。
    /// 完了後の呼び出しは何もしない。終端チャンクより後ろのデータは無視する。
    pub fn decode(&mut self, fragment: &str) -> Result<(), Error> {
        if let Some(e) = &self.failed {
            return Err(e.clone());
        }

        let result = self.process(fragment);
        if let Err(e) = &result {
            debug!("chunked decoder failed: {}", e);
            self.failed = Some(e.clone());
        }
        result
    }

    /// 終端チャンクまで読み終えたか
    pub fn is_done(&self) -> bool {
        self.state == DecoderState::Done
    }

    /// ストリームが正しく終端したことを確認
    ///
    /// すべての断片を渡した後に呼ぶ。終端チャンクの CRLF まで読み終えていなければ
    /// `Error::IncompleteStream` を返す。
    pub fn finalize(&self) -> Result<(), Error> {
        if self.is_done() {
            Ok(())
        } else {
            Err(Error::IncompleteStream)
        }
    }

    /// 現在の状態
    pub fn state(&self) -> &DecoderState {
        &self.state
    }

    /// 制限設定
    pub fn limits(&self) -> &DecoderLimits {
        &self.limits
    }

    /// これまでに出力したペイロードの文字数
    pub fn decoded_len(&self) -> usize {
        self.decoded_len
    }

    /// 読み終えたチャンク数 (終端チャンクを除く)
    pub fn chunks_decoded(&self) -> usize {
        self.chunks_decoded
    }

    /// sink への参照
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// sink への可変参照
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// デコーダーを消費して sink を取り出す
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn process(&mut self, fragment: &str) -> Result<(), Error> {
        let mut rest = fragment;
        while !rest.is_empty() {
            rest = match self.state {
                DecoderState::ReadingSize {
                    value,
                    digits,
                    saw_cr,
                } => self.read_size(rest, value, digits, saw_cr)?,
                DecoderState::ReadingPayload { remaining } => self.read_payload(rest, remaining),
                DecoderState::ExpectingDelimiter { saw_cr, resume } => {
                    self.read_delimiter(rest, saw_cr, resume)?
                }
                DecoderState::Done => return Ok(()),
            };
        }
        Ok(())
    }

    /// サイズ行を読む
    ///
    /// 次の CR までの 16 進数字をまとめて処理する。
    fn read_size<'a>(
        &mut self,
        input: &'a str,
        mut value: usize,
        mut digits: usize,
        saw_cr: bool,
    ) -> Result<&'a str, Error> {
        let bytes = input.as_bytes();

        if saw_cr {
            if bytes[0] != b'\n' {
                return Err(Error::MalformedSizeLine(format!(
                    "expected LF after CR, found {:?}",
                    first_char(input)
                )));
            }
            self.finish_size_line(value)?;
            return Ok(&input[1..]);
        }

        let end = bytes
            .iter()
            .position(|&b| b == b'\r')
            .unwrap_or(bytes.len());

        for (i, &b) in bytes[..end].iter().enumerate() {
            // ここまでの文字はすべて ASCII なので i は文字境界
            let Some(nibble) = hex_value(b) else {
                return Err(Error::MalformedSizeLine(format!(
                    "invalid hex digit {:?}",
                    first_char(&input[i..])
                )));
            };

            digits += 1;
            if digits > self.limits.max_chunk_line_size {
                return Err(Error::ChunkLineTooLong {
                    size: digits,
                    limit: self.limits.max_chunk_line_size,
                });
            }

            value = value
                .checked_mul(16)
                .and_then(|v| v.checked_add(usize::from(nibble)))
                .ok_or_else(|| Error::MalformedSizeLine("chunk size overflow".to_string()))?;
        }

        if end == bytes.len() {
            self.state = DecoderState::ReadingSize {
                value,
                digits,
                saw_cr: false,
            };
            return Ok("");
        }

        self.state = DecoderState::ReadingSize {
            value,
            digits,
            saw_cr: true,
        };
        Ok(&input[end + 1..])
    }

    /// サイズ行の LF を読んだ後の遷移
    fn finish_size_line(&mut self, size: usize) -> Result<(), Error> {
        if size == 0 {
            trace!("terminal chunk");
            self.state = DecoderState::delimiter(ResumeTarget::Done);
            return Ok(());
        }

        let new_size = self
            .body_size
            .checked_add(size)
            .ok_or(Error::BodyTooLarge {
                size: usize::MAX,
                limit: self.limits.max_body_size,
            })?;
        if new_size > self.limits.max_body_size {
            return Err(Error::BodyTooLarge {
                size: new_size,
                limit: self.limits.max_body_size,
            });
        }
        self.body_size = new_size;

        trace!("chunk size: {}", size);
        self.state = DecoderState::ReadingPayload { remaining: size };
        Ok(())
    }

    /// ペイロードを読む
    ///
    /// 断片に含まれる分だけを 1 回の push で sink に渡す。
    fn read_payload<'a>(&mut self, input: &'a str, remaining: usize) -> &'a str {
        let (end, taken) = split_chars(input, remaining);
        if taken > 0 {
            self.sink.push(&input[..end]);
            self.decoded_len += taken;
        }

        let remaining = remaining - taken;
        self.state = if remaining == 0 {
            self.chunks_decoded += 1;
            DecoderState::delimiter(ResumeTarget::ReadingSize)
        } else {
            DecoderState::ReadingPayload { remaining }
        };
        &input[end..]
    }

    /// CRLF を読む
    fn read_delimiter<'a>(
        &mut self,
        input: &'a str,
        saw_cr: bool,
        resume: ResumeTarget,
    ) -> Result<&'a str, Error> {
        if !saw_cr && input.starts_with("\r\n") {
            self.resume(resume);
            return Ok(&input[2..]);
        }

        let expected = if saw_cr { '\n' } else { '\r' };
        let found = first_char(input);
        if found != expected {
            return Err(Error::MalformedDelimiter { expected, found });
        }

        if saw_cr {
            self.resume(resume);
        } else {
            self.state = DecoderState::ExpectingDelimiter {
                saw_cr: true,
                resume,
            };
        }
        Ok(&input[1..])
    }

    fn resume(&mut self, resume: ResumeTarget) {
        self.state = match resume {
            ResumeTarget::ReadingSize => DecoderState::size_line(),
            ResumeTarget::Done => {
                debug!(
                    "chunked stream complete: {} chunks, {} chars",
                    self.chunks_decoded, self.decoded_len
                );
                DecoderState::Done
            }
        };
    }
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// 空でない文字列の先頭文字
fn first_char(s: &str) -> char {
    s.chars().next().unwrap_or_default()
}

/// 先頭から最大 `n` 文字を切り出す位置を求める
///
/// (バイト位置, 実際に切り出した文字数) を返す。
fn split_chars(s: &str, n: usize) -> (usize, usize) {
    let bytes = s.as_bytes();
    if n <= bytes.len() && bytes[..n].is_ascii() {
        return (n, n);
    }

    let mut taken = 0;
    for (i, _) in s.char_indices() {
        if taken == n {
            return (i, taken);
        }
        taken += 1;
    }
    (s.len(), taken)
}
