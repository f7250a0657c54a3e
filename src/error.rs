use std::fmt;

/// chunked デコードエラー
///
/// いずれのエラーもデコーダーにとって致命的で、発生後のデコーダーは再利用できない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// チャンクサイズ行が不正 (16 進数以外の文字、CR の後に LF がない、オーバーフロー)
    MalformedSizeLine(String),
    /// ペイロード後または終端チャンク後の CRLF が不正
    MalformedDelimiter { expected: char, found: char },
    /// 終端チャンクを受信する前にストリームが終わった
    IncompleteStream,
    /// チャンクサイズ行が長すぎる
    ChunkLineTooLong { size: usize, limit: usize },
    /// ペイロード合計サイズ超過
    BodyTooLarge { size: usize, limit: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedSizeLine(msg) => write!(f, "malformed chunk size line: {}", msg),
            Error::MalformedDelimiter { expected, found } => {
                write!(
                    f,
                    "malformed chunk delimiter: expected {:?}, found {:?}",
                    expected, found
                )
            }
            Error::IncompleteStream => write!(f, "chunked stream not finished"),
            Error::ChunkLineTooLong { size, limit } => {
                write!(f, "chunk line too long: {} > {}", size, limit)
            }
            Error::BodyTooLarge { size, limit } => {
                write!(f, "body too large: {} > {}", size, limit)
            }
        }
    }
}

impl std::error::Error for Error {}
