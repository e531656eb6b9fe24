use thiserror::Error;

use crate::dataframe::ColumnType;

/// エラー型の定義
#[derive(Error, Debug)]
pub enum Error {
    #[error("入出力エラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSVエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSONエラー: {0}")]
    Json(#[from] serde_json::Error),

    #[error("列が見つかりません: {0}")]
    ColumnNotFound(String),

    #[error("列名が重複しています: {0}")]
    DuplicateColumnName(String),

    #[error("行数が一致しません: 期待値 {expected}, 実際 {found}")]
    InconsistentRowCount { expected: usize, found: usize },

    #[error("列の型が一致しません: 列 {name}, 期待値 {expected:?}, 実際 {found:?}")]
    ColumnTypeMismatch {
        name: String,
        expected: ColumnType,
        found: ColumnType,
    },

    #[error("型変換エラー: {0}")]
    Cast(String),

    #[error("データ形式エラー: {0}")]
    Format(String),

    #[error("補完エラー: {0}")]
    Imputation(String),

    #[error("エンコードエラー: {0}")]
    Encoding(String),

    #[error("空データエラー: {0}")]
    Empty(String),
}

/// Resultの型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
