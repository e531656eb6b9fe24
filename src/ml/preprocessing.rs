//! 前処理モジュール
//!
//! 欠損値の補完とカテゴリ変数のエンコード機能を提供します。

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dataframe::{Column, DataFrame};
use crate::error::{Error, Result};
use crate::ml::pipeline::Transformer;
use crate::na::NA;
use crate::series::Series;

/// 補完戦略
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImputeStrategy {
    /// 平均値で補完
    Mean,
    /// 中央値で補完
    Median,
    /// 最頻値で補完（同数の場合は最小値）
    MostFrequent,
    /// 固定値で補完
    Constant(f64),
}

impl FromStr for ImputeStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mean" => Ok(ImputeStrategy::Mean),
            "median" => Ok(ImputeStrategy::Median),
            "most_frequent" => Ok(ImputeStrategy::MostFrequent),
            other => Err(Error::Imputation(format!(
                "未知の補完戦略です: {}",
                other
            ))),
        }
    }
}

/// 欠損値を補完するための変換器
///
/// 補完値は`fit`で列ごとに一度だけ計算され、`transform`で一様に適用される。
pub struct Imputer {
    /// 補完戦略
    strategy: ImputeStrategy,
    /// 変換対象の列
    columns: Vec<String>,
    /// 各列の補完値（fitで確定する）
    fill_values: HashMap<String, f64>,
}

impl Imputer {
    /// 新しいImputerを作成
    pub fn new(columns: Vec<String>, strategy: ImputeStrategy) -> Self {
        Imputer {
            strategy,
            columns,
            fill_values: HashMap::new(),
        }
    }

    /// 学習済みの補完値を取得
    pub fn fill_value(&self, column: &str) -> Option<f64> {
        self.fill_values.get(column).copied()
    }
}

impl Transformer for Imputer {
    fn fit(&mut self, df: &DataFrame) -> Result<()> {
        for col_name in &self.columns {
            let series = df.float_column(col_name)?;
            let fill = match self.strategy {
                ImputeStrategy::Mean => series.mean(),
                ImputeStrategy::Median => series.median(),
                ImputeStrategy::MostFrequent => series.most_frequent(),
                ImputeStrategy::Constant(value) => NA::Value(value),
            };

            match fill {
                NA::Value(value) => {
                    self.fill_values.insert(col_name.clone(), value);
                }
                NA::NA => {
                    return Err(Error::Imputation(format!(
                        "列 {} は全て欠損しているため補完値を定義できません",
                        col_name
                    )));
                }
            }
        }

        Ok(())
    }

    fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut result = df.clone();

        for col_name in &self.columns {
            let fill = self.fill_values.get(col_name).copied().ok_or_else(|| {
                Error::Imputation(format!("列 {} は未学習です（先にfitが必要です）", col_name))
            })?;
            let filled = df.float_column(col_name)?.fillna(fill);
            result.replace_column(col_name, Column::Float(filled))?;
        }

        Ok(result)
    }
}

/// カテゴリ値を整数ラベルに変換するための変換器
///
/// カテゴリは辞書順にソートされ、0始まりの連番が割り当てられる。
pub struct LabelEncoder {
    /// 変換対象の列
    column: String,
    /// ラベルの出力先列（Noneの場合は対象列自体を置き換える）
    output: Option<String>,
    /// ソート済みカテゴリ一覧（fitで確定する）
    classes: Vec<String>,
}

impl LabelEncoder {
    /// 新しいLabelEncoderを作成（対象列を置き換える）
    pub fn new(column: impl Into<String>) -> Self {
        LabelEncoder {
            column: column.into(),
            output: None,
            classes: Vec::new(),
        }
    }

    /// ラベルを別の列として追加する
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// 学習済みのカテゴリ一覧を取得（ラベル順）
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// 値列を整数ラベルに変換する
    fn encode(&self, series: &Series<String>) -> Result<Vec<i64>> {
        series
            .values()
            .iter()
            .map(|value| {
                self.classes
                    .binary_search(value)
                    .map(|i| i as i64)
                    .map_err(|_| {
                        Error::Encoding(format!(
                            "未知のカテゴリ値です: 列 {}, 値 {}",
                            self.column, value
                        ))
                    })
            })
            .collect()
    }
}

impl Transformer for LabelEncoder {
    fn fit(&mut self, df: &DataFrame) -> Result<()> {
        let series = df.str_column(&self.column)?;
        let mut classes: Vec<String> = series.values().to_vec();
        classes.sort();
        classes.dedup();

        if classes.is_empty() {
            return Err(Error::Empty(format!(
                "列 {} にカテゴリ値がありません",
                self.column
            )));
        }

        self.classes = classes;
        Ok(())
    }

    fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if self.classes.is_empty() {
            return Err(Error::Encoding(format!(
                "列 {} は未学習です（先にfitが必要です）",
                self.column
            )));
        }

        let series = df.str_column(&self.column)?;
        let codes = self.encode(series)?;
        let mut result = df.clone();

        match &self.output {
            Some(output) => {
                let encoded = Series::new(codes, Some(output.clone()));
                result.add_column(output.clone(), Column::Int(encoded))?;
            }
            None => {
                let encoded = Series::new(codes, Some(self.column.clone()));
                result.replace_column(&self.column, Column::Int(encoded))?;
            }
        }

        Ok(result)
    }
}

/// カテゴリ列をダミー変数に変換するための変換器（One-Hot Encoding）
///
/// カテゴリごとに`<列名>_<カテゴリ>`という0/1の整数列をラベル順に追加する。
/// 元の列は残される。
pub struct OneHotEncoder {
    /// 変換対象の列
    column: String,
    /// ソート済みカテゴリ一覧（fitで確定する）
    categories: Vec<String>,
    /// 最初のカテゴリ列を除外するかどうか（ダミー変数トラップ回避）
    drop_first: bool,
}

impl OneHotEncoder {
    /// 新しいOneHotEncoderを作成
    pub fn new(column: impl Into<String>) -> Self {
        OneHotEncoder {
            column: column.into(),
            categories: Vec::new(),
            drop_first: false,
        }
    }

    /// 最初のカテゴリ列を除外するかどうかを設定
    pub fn with_drop_first(mut self, drop_first: bool) -> Self {
        self.drop_first = drop_first;
        self
    }

    /// 学習済みのカテゴリ一覧を取得（ラベル順）
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// 生成される列名の一覧をラベル順に取得
    pub fn output_columns(&self) -> Vec<String> {
        let start = if self.drop_first { 1 } else { 0 };
        self.categories
            .iter()
            .skip(start)
            .map(|category| format!("{}_{}", self.column, category))
            .collect()
    }
}

impl Transformer for OneHotEncoder {
    fn fit(&mut self, df: &DataFrame) -> Result<()> {
        let series = df.str_column(&self.column)?;
        let mut categories: Vec<String> = series.values().to_vec();
        categories.sort();
        categories.dedup();

        if categories.is_empty() {
            return Err(Error::Empty(format!(
                "列 {} にカテゴリ値がありません",
                self.column
            )));
        }

        self.categories = categories;
        Ok(())
    }

    fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if self.categories.is_empty() {
            return Err(Error::Encoding(format!(
                "列 {} は未学習です（先にfitが必要です）",
                self.column
            )));
        }

        let series = df.str_column(&self.column)?;
        for value in series.values() {
            if self.categories.binary_search(value).is_err() {
                return Err(Error::Encoding(format!(
                    "未知のカテゴリ値です: 列 {}, 値 {}",
                    self.column, value
                )));
            }
        }

        let mut result = df.clone();
        let start = if self.drop_first { 1 } else { 0 };
        for category in self.categories.iter().skip(start) {
            let name = format!("{}_{}", self.column, category);
            let dummies: Vec<i64> = series
                .values()
                .iter()
                .map(|value| i64::from(value == category))
                .collect();
            result.add_column(name.clone(), Column::Int(Series::new(dummies, Some(name))))?;
        }

        Ok(result)
    }
}
