use num_traits::NumCast;
use std::cmp::PartialOrd;
use std::fmt::Debug;
use std::iter::Sum;
use std::ops::Div;

use crate::na::NA;

/// 欠損値をサポートするSeries構造体
///
/// 各要素は`NA<T>`でラップされ、統計量は欠損を無視して計算される。
#[derive(Debug, Clone)]
pub struct NASeries<T>
where
    T: Debug + Clone,
{
    /// Seriesのデータ値（NA型でラップ）
    values: Vec<NA<T>>,

    /// 名前（オプション）
    name: Option<String>,
}

impl<T> NASeries<T>
where
    T: Debug + Clone,
{
    /// 新しいNASeriesをベクトルから作成
    pub fn new(values: Vec<NA<T>>, name: Option<String>) -> Self {
        NASeries { values, name }
    }

    /// 通常のベクトルから作成（NAを含まない）
    pub fn from_vec(values: Vec<T>, name: Option<String>) -> Self {
        let na_values = values.into_iter().map(NA::Value).collect();
        Self::new(na_values, name)
    }

    /// Optionベクトルから作成（Noneを含む可能性あり）
    pub fn from_options(values: Vec<Option<T>>, name: Option<String>) -> Self {
        let na_values = values.into_iter().map(NA::from).collect();
        Self::new(na_values, name)
    }

    /// NASeriesの長さを取得
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// NASeriesが空かどうか
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 位置から値を取得
    pub fn get(&self, pos: usize) -> Option<&NA<T>> {
        self.values.get(pos)
    }

    /// 値の配列を取得
    pub fn values(&self) -> &[NA<T>] {
        &self.values
    }

    /// 値のイテレータを取得
    pub fn iter(&self) -> std::slice::Iter<'_, NA<T>> {
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

    /// NAの個数を取得
    pub fn na_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_na()).count()
    }

    /// 値が存在する個数を取得
    pub fn value_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_value()).count()
    }

    /// NAを含むかどうか
    pub fn has_na(&self) -> bool {
        self.values.iter().any(|v| v.is_na())
    }

    /// NAを除去したSeriesを返す
    pub fn dropna(&self) -> Self {
        let filtered_values: Vec<NA<T>> = self
            .values
            .iter()
            .filter(|v| v.is_value())
            .cloned()
            .collect();

        Self::new(filtered_values, self.name.clone())
    }

    /// NAを指定した値で埋める
    pub fn fillna(&self, fill_value: T) -> Self {
        let filled_values: Vec<NA<T>> = self
            .values
            .iter()
            .map(|v| match v {
                NA::Value(_) => v.clone(),
                NA::NA => NA::Value(fill_value.clone()),
            })
            .collect();

        Self::new(filled_values, self.name.clone())
    }
}

// 数値型のNASeriesに対する特化実装（NAは無視して計算する）
impl<T> NASeries<T>
where
    T: Debug + Clone + Copy + Sum<T> + PartialOrd + Div<Output = T> + NumCast,
{
    /// 欠損を除いた値のベクトルを取得
    fn present(&self) -> Vec<T> {
        self.values
            .iter()
            .filter_map(|v| v.value().copied())
            .collect()
    }

    /// 合計を計算（NAは無視）
    pub fn sum(&self) -> NA<T> {
        let values = self.present();
        if values.is_empty() {
            NA::NA
        } else {
            NA::Value(values.into_iter().sum())
        }
    }

    /// 平均を計算（NAは無視）
    pub fn mean(&self) -> NA<T> {
        let values = self.present();
        if values.is_empty() {
            return NA::NA;
        }

        let count: T = match num_traits::cast(values.len()) {
            Some(n) => n,
            None => return NA::NA,
        };
        let sum: T = values.into_iter().sum();

        NA::Value(sum / count)
    }

    /// 最小値を計算（NAは無視）
    pub fn min(&self) -> NA<T> {
        self.present()
            .into_iter()
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .into()
    }

    /// 最大値を計算（NAは無視）
    pub fn max(&self) -> NA<T> {
        self.present()
            .into_iter()
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .into()
    }
}

// 補完統計量のための浮動小数点特化実装
impl NASeries<f64> {
    /// 中央値を計算（NAは無視）
    ///
    /// 値が偶数個の場合は中央2値の平均を返す。
    pub fn median(&self) -> NA<f64> {
        let mut values = self.present();
        if values.is_empty() {
            return NA::NA;
        }

        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let mid = values.len() / 2;
        if values.len() % 2 == 1 {
            NA::Value(values[mid])
        } else {
            NA::Value((values[mid - 1] + values[mid]) / 2.0)
        }
    }

    /// 最頻値を計算（NAは無視）
    ///
    /// 出現回数が同じ場合は最小の値を返す。
    pub fn most_frequent(&self) -> NA<f64> {
        let mut values = self.present();
        if values.is_empty() {
            return NA::NA;
        }

        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        // ソート済み列の最長の連続区間を探す（同数なら先頭＝最小値）
        let mut best = values[0];
        let mut best_count = 0;
        let mut i = 0;
        while i < values.len() {
            let mut j = i + 1;
            while j < values.len() && values[j] == values[i] {
                j += 1;
            }
            if j - i > best_count {
                best = values[i];
                best_count = j - i;
            }
            i = j;
        }

        NA::Value(best)
    }
}
