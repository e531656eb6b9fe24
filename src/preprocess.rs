//! 販売データセットの前処理パイプライン
//!
//! 固定の6ステージ（読み込み → 数値列の補完 → ラベルエンコード →
//! One-Hotエンコード → 目的変数のエンコード → 行列の導出）を順に実行します。
//! 各ステージは`DataFrame`を受け取り新しい`DataFrame`を返す純粋な変換で、
//! 途中経過の表示は注入された`DisplaySink`に委ねられます。いずれかの
//! ステージが失敗した場合、以降のステージは実行されず成果物は生成されません。

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::io::csv::read_csv;
use crate::ml::pipeline::Transformer;
use crate::ml::preprocessing::{ImputeStrategy, Imputer, LabelEncoder, OneHotEncoder};
use crate::na::NA;

/// カテゴリ列（国名）
pub const COUNTRY: &str = "COUNTRY";
/// 数値列（年齢）
pub const AGE: &str = "AGE";
/// 数値列（給与）
pub const SALARY: &str = "SALARY";
/// 目的変数列
pub const PURCHASED: &str = "PURCHASED";
/// ラベルエンコード列
pub const LABEL_ENCODING: &str = "LABEL_ENCODING";

/// 必須列の一覧
const REQUIRED_COLUMNS: [&str; 4] = [COUNTRY, AGE, SALARY, PURCHASED];

/// パイプラインの設定
///
/// 認識されるオプションは補完戦略のみ。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// 数値列の補完戦略
    pub imputation_strategy: ImputeStrategy,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        PreprocessConfig {
            imputation_strategy: ImputeStrategy::Mean,
        }
    }
}

/// 表示用のビュー（表または数値行列）
pub enum DisplayView<'a> {
    /// DataFrame
    Frame(&'a DataFrame),
    /// 数値行列
    Matrix(&'a [Vec<f64>]),
}

/// 途中経過の表示先
///
/// パイプラインは各ステージの完了後に現在の状態を渡す。戻り値は消費
/// されないため、実装は表示を自由に省略してよい。
pub trait DisplaySink {
    /// ステージ名と現在の状態を受け取る
    fn display(&mut self, stage: &str, view: DisplayView<'_>);
}

/// 何も表示しないシンク（ヘッドレス実行用）
pub struct NullSink;

impl DisplaySink for NullSink {
    fn display(&mut self, _stage: &str, _view: DisplayView<'_>) {}
}

/// テキスト表としてレンダリングするシンク
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    /// 出力先を指定して作成
    pub fn new(out: W) -> Self {
        TextSink { out }
    }
}

impl<W: Write> DisplaySink for TextSink<W> {
    fn display(&mut self, stage: &str, view: DisplayView<'_>) {
        // 表示の失敗はパイプラインの失敗にはしない
        let _ = writeln!(self.out, "== {} ==", stage);
        match view {
            DisplayView::Frame(df) => {
                let _ = writeln!(self.out, "{}", df);
            }
            DisplayView::Matrix(rows) => {
                for row in rows {
                    let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
                    let _ = writeln!(self.out, "[{}]", cells.join(", "));
                }
                let _ = writeln!(self.out);
            }
        }
    }
}

/// パイプラインの最終成果物
#[derive(Debug, Clone)]
pub struct PreprocessOutput {
    /// 最終テーブル
    pub frame: DataFrame,
    /// 独立変数行列（One-Hot列 + AGE + SALARY）
    pub features: Vec<Vec<f64>>,
    /// 従属変数ベクトル（エンコード済みPURCHASED）
    pub target: Vec<i64>,
}

/// ステージ1: CSVファイルからデータセットを読み込む
///
/// 必須列の存在を検査し、数値列を浮動小数点列に変換する。
/// 空フィールドおよび "NA" / "NaN" は欠損値として読み込まれる。
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
    let mut df = read_csv(path, true)?;

    for name in REQUIRED_COLUMNS {
        if !df.contains_column(name) {
            return Err(Error::ColumnNotFound(name.to_string()));
        }
    }

    df.cast_float(AGE)?;
    df.cast_float(SALARY)?;

    log::info!("データセットを読み込みました: {}行", df.row_count());
    Ok(df)
}

/// ステージ2: 数値列の欠損値を補完する
///
/// AGEとSALARYそれぞれについて、存在する値から統計量を一度だけ計算し、
/// 欠損セルへ一様に適用する。
pub fn impute_numeric(df: &DataFrame, strategy: ImputeStrategy) -> Result<DataFrame> {
    let mut imputer = Imputer::new(vec![AGE.to_string(), SALARY.to_string()], strategy);
    imputer.fit_transform(df)
}

/// ステージ3: カテゴリ列を整数ラベルにエンコードする
///
/// `LABEL_ENCODING`列を追加し、`COUNTRY`の直後に並べ替える。
pub fn encode_labels(df: &DataFrame) -> Result<DataFrame> {
    let mut encoder = LabelEncoder::new(COUNTRY).with_output(LABEL_ENCODING);
    let mut result = encoder.fit_transform(df)?;

    // LABEL_ENCODINGをCOUNTRYの直後に移動する
    let mut order: Vec<String> = result
        .column_names()
        .iter()
        .filter(|name| name.as_str() != LABEL_ENCODING)
        .cloned()
        .collect();
    let position = order
        .iter()
        .position(|name| name == COUNTRY)
        .ok_or_else(|| Error::ColumnNotFound(COUNTRY.to_string()))?;
    order.insert(position + 1, LABEL_ENCODING.to_string());
    result.reorder_columns(&order)?;

    Ok(result)
}

/// ステージ4: One-Hotエンコードして最終的な列順に並べ替える
///
/// 最終列順は `COUNTRY, LABEL_ENCODING, <One-Hot列（ラベル順）>, AGE,
/// SALARY, PURCHASED` となる。
pub fn encode_one_hot(df: &DataFrame) -> Result<DataFrame> {
    let mut encoder = OneHotEncoder::new(COUNTRY);
    let mut result = encoder.fit_transform(df)?;

    let mut order = vec![COUNTRY.to_string(), LABEL_ENCODING.to_string()];
    order.extend(encoder.output_columns());
    order.push(AGE.to_string());
    order.push(SALARY.to_string());
    order.push(PURCHASED.to_string());
    result.reorder_columns(&order)?;

    Ok(result)
}

/// ステージ5: 目的変数を{0,1}にエンコードする
///
/// ラベルは辞書順に0, 1が割り当てられる（観測データではNo=0, Yes=1）。
/// 相異なるラベルがちょうど2種類でない場合はエラー。
pub fn encode_target(df: &DataFrame) -> Result<DataFrame> {
    let mut encoder = LabelEncoder::new(PURCHASED);
    encoder.fit(df)?;

    if encoder.classes().len() != 2 {
        return Err(Error::Encoding(format!(
            "目的変数 {} は2値である必要があります: {}種類のラベルが見つかりました",
            PURCHASED,
            encoder.classes().len()
        )));
    }

    encoder.transform(df)
}

/// One-Hot列の名前をラベル順に取得する
fn one_hot_column_names(df: &DataFrame) -> Result<Vec<String>> {
    let mut categories: Vec<String> = df.str_column(COUNTRY)?.values().to_vec();
    categories.sort();
    categories.dedup();

    Ok(categories
        .iter()
        .map(|category| format!("{}_{}", COUNTRY, category))
        .collect())
}

/// One-Hotブロックを数値行列として取り出す
pub fn one_hot_matrix(df: &DataFrame) -> Result<Vec<Vec<f64>>> {
    let names = one_hot_column_names(df)?;
    let mut rows: Vec<Vec<f64>> = (0..df.row_count())
        .map(|_| Vec::with_capacity(names.len()))
        .collect();

    for name in &names {
        let series = df.int_column(name)?;
        for (row, value) in rows.iter_mut().zip(series.values()) {
            row.push(*value as f64);
        }
    }

    Ok(rows)
}

/// ステージ6: 独立変数行列を導出する
///
/// 列順はOne-Hot列（ラベル順）、AGE、SALARY。補完済みであることを
/// 前提とし、欠損が残っている場合はエラー。
pub fn feature_matrix(df: &DataFrame) -> Result<Vec<Vec<f64>>> {
    let names = one_hot_column_names(df)?;
    let mut rows: Vec<Vec<f64>> = (0..df.row_count())
        .map(|_| Vec::with_capacity(names.len() + 2))
        .collect();

    for name in &names {
        let series = df.int_column(name)?;
        for (row, value) in rows.iter_mut().zip(series.values()) {
            row.push(*value as f64);
        }
    }

    for name in [AGE, SALARY] {
        let series = df.float_column(name)?;
        for (i, (row, value)) in rows.iter_mut().zip(series.values()).enumerate() {
            match value {
                NA::Value(v) => row.push(*v),
                NA::NA => {
                    return Err(Error::Imputation(format!(
                        "列 {} の行 {} に欠損値が残っています",
                        name, i
                    )));
                }
            }
        }
    }

    Ok(rows)
}

/// ステージ6: 従属変数ベクトルを導出する
pub fn target_vector(df: &DataFrame) -> Result<Vec<i64>> {
    Ok(df.int_column(PURCHASED)?.values().to_vec())
}

/// 6ステージの前処理パイプライン
pub struct Preprocessor {
    config: PreprocessConfig,
}

impl Preprocessor {
    /// 設定を指定して作成
    pub fn new(config: PreprocessConfig) -> Self {
        Preprocessor { config }
    }

    /// 設定を取得
    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    /// パイプラインを実行する
    ///
    /// 各ステージの完了後に`sink`へ現在の状態を渡す。One-Hotステージでは
    /// 統合前のOne-Hotブロック単体も行列として渡される。
    pub fn run<P: AsRef<Path>>(
        &self,
        path: P,
        sink: &mut dyn DisplaySink,
    ) -> Result<PreprocessOutput> {
        let df = load_dataset(path)?;
        sink.display("load", DisplayView::Frame(&df));

        let df = impute_numeric(&df, self.config.imputation_strategy)?;
        sink.display("impute", DisplayView::Frame(&df));

        let df = encode_labels(&df)?;
        sink.display("label_encoding", DisplayView::Frame(&df));

        let df = encode_one_hot(&df)?;
        let onehot = one_hot_matrix(&df)?;
        sink.display("one_hot_matrix", DisplayView::Matrix(&onehot));
        sink.display("one_hot", DisplayView::Frame(&df));

        let df = encode_target(&df)?;
        sink.display("target_encoding", DisplayView::Frame(&df));

        let features = feature_matrix(&df)?;
        sink.display("features", DisplayView::Matrix(&features));

        let target = target_vector(&df)?;
        let target_view: Vec<Vec<f64>> = target.iter().map(|v| vec![*v as f64]).collect();
        sink.display("target", DisplayView::Matrix(&target_view));

        log::info!(
            "前処理パイプラインが完了しました: {}行 x {}特徴量",
            features.len(),
            features.first().map(|row| row.len()).unwrap_or(0)
        );

        Ok(PreprocessOutput {
            frame: df,
            features,
            target,
        })
    }
}
