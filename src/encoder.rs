/// チャンクをエンコード
///
/// サイズは文字数を 16 進数で表す。
/// 空のデータを渡すと終端チャンク (0\r\n\r\n) を生成します。
pub fn encode_chunk(data: &str) -> String {
    if data.is_empty() {
        // 終端チャンク
        return "0\r\n\r\n".to_string();
    }

    let mut buf = String::with_capacity(data.len() + 20);
    push_chunk(&mut buf, data);
    buf
}

/// 複数のデータをエンコード
///
/// 空のデータは読み飛ばし、最後に終端チャンクを追加します。
pub fn encode_chunks(chunks: &[&str]) -> String {
    let mut buf = String::new();
    for chunk in chunks.iter().filter(|c| !c.is_empty()) {
        push_chunk(&mut buf, chunk);
    }

    // 終端チャンク
    buf.push_str("0\r\n\r\n");
    buf
}

/// データを最大 `chunk_chars` 文字ずつのチャンクに分けてエンコード
///
/// `chunk_chars` が 0 の場合はデータ全体を 1 つのチャンクにします。
pub fn encode_chunked(data: &str, chunk_chars: usize) -> String {
    if chunk_chars == 0 {
        return encode_chunks(&[data]);
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (i, _) in data.char_indices() {
        if count == chunk_chars {
            chunks.push(&data[start..i]);
            start = i;
            count = 0;
        }
        count += 1;
    }
    chunks.push(&data[start..]);

    encode_chunks(&chunks)
}

fn push_chunk(buf: &mut String, data: &str) {
    // チャンクサイズ (16進数)
    buf.push_str(&format!("{:x}\r\n", data.chars().count()));
    // チャンクデータ
    buf.push_str(data);
    // CRLF
    buf.push_str("\r\n");
}
