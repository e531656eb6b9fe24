use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::{Error, Result};
use crate::na::NA;
use crate::series::{NASeries, Series};

/// 列の型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// 文字列
    Str,
    /// 浮動小数点（欠損値を含み得る）
    Float,
    /// 整数
    Int,
}

/// 型付きの列データ
#[derive(Debug, Clone)]
pub enum Column {
    /// 文字列列
    Str(Series<String>),
    /// 浮動小数点列（欠損値を含み得る）
    Float(NASeries<f64>),
    /// 整数列
    Int(Series<i64>),
}

impl Column {
    /// 列の長さを取得
    pub fn len(&self) -> usize {
        match self {
            Column::Str(s) => s.len(),
            Column::Float(s) => s.len(),
            Column::Int(s) => s.len(),
        }
    }

    /// 列が空かどうか
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 列の型を取得
    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Str(_) => ColumnType::Str,
            Column::Float(_) => ColumnType::Float,
            Column::Int(_) => ColumnType::Int,
        }
    }

    /// 文字列列として取得（型が異なる場合はNone）
    pub fn as_str(&self) -> Option<&Series<String>> {
        match self {
            Column::Str(s) => Some(s),
            _ => None,
        }
    }

    /// 浮動小数点列として取得（型が異なる場合はNone）
    pub fn as_float(&self) -> Option<&NASeries<f64>> {
        match self {
            Column::Float(s) => Some(s),
            _ => None,
        }
    }

    /// 整数列として取得（型が異なる場合はNone）
    pub fn as_int(&self) -> Option<&Series<i64>> {
        match self {
            Column::Int(s) => Some(s),
            _ => None,
        }
    }

    /// セルの文字列表現を取得（欠損はna_reprで表す）
    pub fn cell_to_string(&self, row: usize, na_repr: &str) -> String {
        match self {
            Column::Str(s) => s.get(row).cloned().unwrap_or_default(),
            Column::Float(s) => match s.get(row) {
                Some(NA::Value(v)) => v.to_string(),
                _ => na_repr.to_string(),
            },
            Column::Int(s) => s.get(row).map(|v| v.to_string()).unwrap_or_default(),
        }
    }
}

/// DataFrame構造体: 名前付き列の順序付き集合
///
/// すべての列は同じ長さを持ち、行順・列順は常に保持される。
#[derive(Debug, Clone, Default)]
pub struct DataFrame {
    /// 列データ（名前 -> 列）
    data: HashMap<String, Column>,

    /// 列の順序を保持
    order: Vec<String>,
}

impl DataFrame {
    /// 空のDataFrameを作成
    pub fn new() -> Self {
        DataFrame {
            data: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// 列数を取得
    pub fn column_count(&self) -> usize {
        self.order.len()
    }

    /// 行数を取得
    pub fn row_count(&self) -> usize {
        self.order
            .first()
            .map(|name| self.data[name].len())
            .unwrap_or(0)
    }

    /// 列名の一覧を順序どおりに取得
    pub fn column_names(&self) -> &[String] {
        &self.order
    }

    /// 列が存在するかどうか
    pub fn contains_column(&self, name: &str) -> bool {
        self.data.contains_key(name)
    }

    /// 名前から列を取得
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.data.get(name)
    }

    /// 列を末尾に追加する
    ///
    /// 既存の列と長さが一致しない場合、または列名が重複する場合はエラー。
    pub fn add_column(&mut self, name: String, column: Column) -> Result<()> {
        if self.data.contains_key(&name) {
            return Err(Error::DuplicateColumnName(name));
        }
        if !self.order.is_empty() && column.len() != self.row_count() {
            return Err(Error::InconsistentRowCount {
                expected: self.row_count(),
                found: column.len(),
            });
        }

        self.order.push(name.clone());
        self.data.insert(name, column);
        Ok(())
    }

    /// 既存の列を置き換える（列順は変わらない）
    pub fn replace_column(&mut self, name: &str, column: Column) -> Result<()> {
        let slot = self
            .data
            .get_mut(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;
        if column.len() != slot.len() {
            return Err(Error::InconsistentRowCount {
                expected: slot.len(),
                found: column.len(),
            });
        }

        *slot = column;
        Ok(())
    }

    /// 列を指定した順序に並べ替える
    ///
    /// `names`は現在の列名の完全な並べ替えである必要がある。
    pub fn reorder_columns<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        if names.len() != self.order.len() {
            return Err(Error::Format(format!(
                "並べ替えの列数が一致しません: 期待値 {}, 実際 {}",
                self.order.len(),
                names.len()
            )));
        }

        let mut new_order = Vec::with_capacity(names.len());
        let mut seen = HashSet::new();
        for name in names {
            let name = name.as_ref();
            if !self.data.contains_key(name) {
                return Err(Error::ColumnNotFound(name.to_string()));
            }
            if !seen.insert(name.to_string()) {
                return Err(Error::DuplicateColumnName(name.to_string()));
            }
            new_order.push(name.to_string());
        }

        self.order = new_order;
        Ok(())
    }

    /// 文字列列を取得（存在しない・型が異なる場合はエラー）
    pub fn str_column(&self, name: &str) -> Result<&Series<String>> {
        let column = self
            .data
            .get(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;
        column.as_str().ok_or_else(|| Error::ColumnTypeMismatch {
            name: name.to_string(),
            expected: ColumnType::Str,
            found: column.column_type(),
        })
    }

    /// 浮動小数点列を取得（存在しない・型が異なる場合はエラー）
    pub fn float_column(&self, name: &str) -> Result<&NASeries<f64>> {
        let column = self
            .data
            .get(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;
        column.as_float().ok_or_else(|| Error::ColumnTypeMismatch {
            name: name.to_string(),
            expected: ColumnType::Float,
            found: column.column_type(),
        })
    }

    /// 整数列を取得（存在しない・型が異なる場合はエラー）
    pub fn int_column(&self, name: &str) -> Result<&Series<i64>> {
        let column = self
            .data
            .get(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;
        column.as_int().ok_or_else(|| Error::ColumnTypeMismatch {
            name: name.to_string(),
            expected: ColumnType::Int,
            found: column.column_type(),
        })
    }

    /// 文字列列を浮動小数点列に変換する
    ///
    /// 空文字列および "NA" / "NaN" は欠損値として扱う。
    /// それ以外で数値に解釈できない値はエラー。
    pub fn cast_float(&mut self, name: &str) -> Result<()> {
        let values = {
            let series = self.str_column(name)?;
            let mut values = Vec::with_capacity(series.len());
            for raw in series.values() {
                let trimmed = raw.trim();
                if trimmed.is_empty() || trimmed == "NA" || trimmed == "NaN" {
                    values.push(NA::NA);
                } else {
                    let parsed = trimmed.parse::<f64>().map_err(|_| {
                        Error::Cast(format!(
                            "列 {} の値 '{}' を数値に変換できません",
                            name, raw
                        ))
                    })?;
                    values.push(NA::Value(parsed));
                }
            }
            values
        };

        let column = Column::Float(NASeries::new(values, Some(name.to_string())));
        self.replace_column(name, column)
    }
}

// テキスト表としての表示
impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.order.is_empty() {
            return writeln!(f, "Empty DataFrame");
        }

        let rows = self.row_count();
        let index_width = rows.saturating_sub(1).to_string().len();

        // 各列のセルと表示幅を確定する
        let mut widths = Vec::with_capacity(self.order.len());
        let mut cells: Vec<Vec<String>> = Vec::with_capacity(self.order.len());
        for name in &self.order {
            let column = &self.data[name];
            let col_cells: Vec<String> =
                (0..rows).map(|i| column.cell_to_string(i, "NA")).collect();
            let width = col_cells
                .iter()
                .map(|c| c.len())
                .chain([name.len()])
                .max()
                .unwrap_or(0);
            widths.push(width);
            cells.push(col_cells);
        }

        write!(f, "{:index_width$}", "")?;
        for (name, &width) in self.order.iter().zip(&widths) {
            write!(f, "  {:>width$}", name)?;
        }
        writeln!(f)?;

        for i in 0..rows {
            write!(f, "{:>index_width$}", i)?;
            for (col, &width) in cells.iter().zip(&widths) {
                write!(f, "  {:>width$}", col[i])?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
