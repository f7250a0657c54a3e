//! chunked ストリームを標準入力から読んでデコードする例
//!
//! 使い方:
//!   printf '5\r\nhello\r\n0\r\n\r\n' | cargo run -p chunked_decode
//!
//!   # 3 文字ずつの断片に分けてデコード
//!   cargo run -p chunked_decode -- --fragment-size 3 --debug < encoded.txt
//!
//! 終了コード:
//!   0: 成功
//!   1: デコードエラー (不正な形式、終端チャンクなし)
//!   2: 入出力エラー

use std::io::{self, Read, Write};
use std::process::ExitCode;

use log::{debug, error, info};
use shiguredo_chunked::{CollectingDecoder, Error};

struct Options {
    fragment_size: usize,
    debug: bool,
}

fn main() -> ExitCode {
    let options = match parse_args() {
        Ok(Some(options)) => options,
        Ok(None) => return ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    init_logger(options.debug);

    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        error!("failed to read stdin: {}", e);
        return ExitCode::from(2);
    }
    info!("read {} bytes from stdin", input.len());

    let mut decoder = CollectingDecoder::new();
    if let Err(e) = decode(&mut decoder, &input, options.fragment_size) {
        error!("{}", e);
        return ExitCode::from(1);
    }

    if let Err(e) = io::stdout().write_all(decoder.result().as_bytes()) {
        error!("failed to write stdout: {}", e);
        return ExitCode::from(2);
    }
    ExitCode::SUCCESS
}

fn parse_args() -> Result<Option<Options>, Box<dyn std::error::Error>> {
    let mut args = noargs::raw_args();
    args.metadata_mut().app_name = "chunked_decode";

    // --help フラグ
    noargs::HELP_FLAG.take_help(&mut args);

    // --version フラグ
    let version_flag: bool = noargs::flag("version")
        .short('V')
        .doc("Show version")
        .take(&mut args)
        .is_present();
    if version_flag {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(None);
    }

    // --debug フラグ
    let debug: bool = noargs::flag("debug")
        .doc("Enable debug logging")
        .take(&mut args)
        .is_present();

    // --fragment-size オプション
    let fragment_size: usize = noargs::opt("fragment-size")
        .short('f')
        .doc("Characters per decode() call, 0 feeds the whole input at once (default: 0)")
        .default("0")
        .take(&mut args)
        .then(|o| o.value().parse())
        .map_err(|e| format!("{:?}", e))?;

    // 未知の引数があればエラー、ヘルプが返されたら表示
    if let Some(help) = args.finish().map_err(|e| format!("{:?}", e))? {
        print!("{}", help);
        return Ok(None);
    }

    Ok(Some(Options {
        fragment_size,
        debug,
    }))
}

fn init_logger(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

/// 入力を `fragment_size` 文字ずつ decode() に渡す
fn decode(decoder: &mut CollectingDecoder, input: &str, fragment_size: usize) -> Result<(), Error> {
    if fragment_size == 0 {
        decoder.decode(input)?;
    } else {
        let mut start = 0;
        let mut count = 0;
        let mut fragments = 0usize;
        for (i, _) in input.char_indices() {
            if count == fragment_size {
                decoder.decode(&input[start..i])?;
                fragments += 1;
                start = i;
                count = 0;
            }
            count += 1;
        }
        decoder.decode(&input[start..])?;
        debug!("fed {} fragments", fragments + 1);
    }

    decoder.finalize()?;
    debug!("decoded {} chars", decoder.collector().len());
    Ok(())
}
