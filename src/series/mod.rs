mod na_series;

use num_traits::NumCast;
use std::cmp::PartialOrd;
use std::fmt::Debug;
use std::iter::Sum;
use std::ops::Div;

use crate::error::{Error, Result};

pub use self::na_series::NASeries;

/// Series構造体: 一次元の値の配列
///
/// 行ラベルは位置（0始まり）で固定され、行順は常に保持される。
#[derive(Debug, Clone)]
pub struct Series<T>
where
    T: Debug + Clone,
{
    /// Seriesのデータ値
    values: Vec<T>,

    /// 名前（オプション）
    name: Option<String>,
}

// 基本実装
impl<T> Series<T>
where
    T: Debug + Clone,
{
    /// 新しいSeriesをベクトルから作成
    pub fn new(values: Vec<T>, name: Option<String>) -> Self {
        Series { values, name }
    }

    /// Seriesの長さを取得
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Seriesが空かどうか
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 位置から値を取得
    pub fn get(&self, pos: usize) -> Option<&T> {
        self.values.get(pos)
    }

    /// 値の配列を取得
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// 値のイテレータを取得
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    /// 名前を取得
    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// 名前を設定
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }
}

// 数値型のSeriesに対する特化実装
impl<T> Series<T>
where
    T: Debug + Clone + Copy + Sum<T> + PartialOrd + Div<Output = T> + NumCast + Default,
{
    /// 合計を計算
    pub fn sum(&self) -> T {
        if self.values.is_empty() {
            T::default()
        } else {
            self.values.iter().copied().sum()
        }
    }

    /// 平均を計算
    pub fn mean(&self) -> Result<T> {
        if self.values.is_empty() {
            return Err(Error::Empty("空のSeriesの平均は計算できません".to_string()));
        }

        let sum = self.sum();
        let count = match num_traits::cast(self.len()) {
            Some(n) => n,
            None => {
                return Err(Error::Cast("長さを数値型にキャストできません".to_string()))
            }
        };

        Ok(sum / count)
    }

    /// 最小値を計算
    pub fn min(&self) -> Result<T> {
        self.values
            .iter()
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .copied()
            .ok_or_else(|| Error::Empty("空のSeriesの最小値は計算できません".to_string()))
    }

    /// 最大値を計算
    pub fn max(&self) -> Result<T> {
        self.values
            .iter()
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .copied()
            .ok_or_else(|| Error::Empty("空のSeriesの最大値は計算できません".to_string()))
    }
}
