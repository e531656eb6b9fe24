//! 前処理パイプラインのデモバイナリ
//!
//! 販売データセットのCSVを読み込み、補完とエンコードの各ステージを
//! テキスト表として順に表示する。
//!
//! 使い方: preprs [--strategy mean|median|most_frequent] [--config FILE.json] [PATH]

use std::env;
use std::process;
use std::str::FromStr;

use preprs::error::Result;
use preprs::ml::preprocessing::ImputeStrategy;
use preprs::preprocess::{PreprocessConfig, Preprocessor, TextSink};

/// 引数が指定されない場合の入力ファイル
const DEFAULT_PATH: &str = "data/sales.csv";

fn print_usage() {
    eprintln!("使い方: preprs [--strategy mean|median|most_frequent] [--config FILE.json] [PATH]");
}

/// コマンドライン引数から設定と入力パスを組み立てる
fn parse_args() -> Result<Option<(PreprocessConfig, String)>> {
    let mut config = PreprocessConfig::default();
    let mut path = String::from(DEFAULT_PATH);

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(None),
            "--strategy" => {
                let value = args.next().ok_or_else(|| {
                    preprs::Error::Format("--strategy には値が必要です".to_string())
                })?;
                config.imputation_strategy = ImputeStrategy::from_str(&value)?;
            }
            "--config" => {
                let value = args.next().ok_or_else(|| {
                    preprs::Error::Format("--config には値が必要です".to_string())
                })?;
                let text = std::fs::read_to_string(&value)?;
                config = serde_json::from_str(&text)?;
            }
            other => path = other.to_string(),
        }
    }

    Ok(Some((config, path)))
}

fn main() {
    let (config, path) = match parse_args() {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(e) => {
            eprintln!("エラー: {}", e);
            print_usage();
            process::exit(2);
        }
    };

    let pipeline = Preprocessor::new(config);
    let mut sink = TextSink::new(std::io::stdout());

    match pipeline.run(&path, &mut sink) {
        Ok(output) => {
            println!(
                "完了: {}行 x {}列, 独立変数行列 {} x {}",
                output.frame.row_count(),
                output.frame.column_count(),
                output.features.len(),
                output.features.first().map(|row| row.len()).unwrap_or(0)
            );
        }
        Err(e) => {
            eprintln!("エラー: {}", e);
            process::exit(1);
        }
    }
}
