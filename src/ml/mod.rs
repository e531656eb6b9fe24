//! 機械学習向けのデータ変換機能を提供するモジュール
//!
//! モデリングの前段となる変換器（欠損値補完・カテゴリ変数のエンコード）と、
//! それらを連鎖させるパイプラインを提供します。

pub mod pipeline;
pub mod preprocessing;
