use std::str::FromStr;

use preprs::ml::pipeline::{Pipeline, Transformer};
use preprs::ml::preprocessing::{ImputeStrategy, Imputer, LabelEncoder, OneHotEncoder};
use preprs::{Column, ColumnType, DataFrame, Error, NASeries, Series};

// テストデータの準備を行うヘルパー関数
fn prepare_test_data() -> DataFrame {
    let mut df = DataFrame::new();
    df.add_column(
        "COUNTRY".to_string(),
        Column::Str(Series::new(
            vec![
                "France".to_string(),
                "Spain".to_string(),
                "Germany".to_string(),
                "Spain".to_string(),
            ],
            None,
        )),
    )
    .unwrap();
    df.add_column(
        "SALARY".to_string(),
        Column::Float(NASeries::from_options(
            vec![Some(72000.0), None, Some(54000.0), Some(54000.0)],
            None,
        )),
    )
    .unwrap();
    df
}

#[test]
fn test_impute_strategy_from_str() {
    // 文字列からの補完戦略の解釈
    assert_eq!(
        ImputeStrategy::from_str("mean").unwrap(),
        ImputeStrategy::Mean
    );
    assert_eq!(
        ImputeStrategy::from_str("median").unwrap(),
        ImputeStrategy::Median
    );
    assert_eq!(
        ImputeStrategy::from_str("most_frequent").unwrap(),
        ImputeStrategy::MostFrequent
    );

    // 未知の戦略名は補完エラー
    assert!(matches!(
        ImputeStrategy::from_str("mode"),
        Err(Error::Imputation(_))
    ));
}

#[test]
fn test_impute_strategy_serde() {
    // 戦略名はsnake_caseでシリアライズされる
    let json = serde_json::to_string(&ImputeStrategy::MostFrequent).unwrap();
    assert_eq!(json, "\"most_frequent\"");

    let parsed: ImputeStrategy = serde_json::from_str("\"median\"").unwrap();
    assert_eq!(parsed, ImputeStrategy::Median);

    let constant: ImputeStrategy = serde_json::from_str("{\"constant\":99.0}").unwrap();
    assert_eq!(constant, ImputeStrategy::Constant(99.0));
}

#[test]
fn test_imputer_mean() {
    let df = prepare_test_data();
    let mut imputer = Imputer::new(vec!["SALARY".to_string()], ImputeStrategy::Mean);
    let result = imputer.fit_transform(&df).unwrap();

    // 平均 (72000 + 54000 + 54000) / 3 = 60000 で補完される
    assert_eq!(imputer.fill_value("SALARY"), Some(60000.0));
    let salary = result.float_column("SALARY").unwrap();
    assert!(!salary.has_na());
    assert_eq!(salary.get(1).unwrap().value(), Some(&60000.0));

    // 元の値は変更されない
    assert_eq!(salary.get(0).unwrap().value(), Some(&72000.0));
}

#[test]
fn test_imputer_median_and_most_frequent() {
    let df = prepare_test_data();

    // 中央値: [54000, 54000, 72000] -> 54000
    let mut imputer = Imputer::new(vec!["SALARY".to_string()], ImputeStrategy::Median);
    imputer.fit(&df).unwrap();
    assert_eq!(imputer.fill_value("SALARY"), Some(54000.0));

    // 最頻値: 54000が2回
    let mut imputer = Imputer::new(vec!["SALARY".to_string()], ImputeStrategy::MostFrequent);
    imputer.fit(&df).unwrap();
    assert_eq!(imputer.fill_value("SALARY"), Some(54000.0));
}

#[test]
fn test_imputer_constant() {
    let df = prepare_test_data();
    let mut imputer = Imputer::new(vec!["SALARY".to_string()], ImputeStrategy::Constant(1.0));
    let result = imputer.fit_transform(&df).unwrap();

    assert_eq!(
        result.float_column("SALARY").unwrap().get(1).unwrap().value(),
        Some(&1.0)
    );
}

#[test]
fn test_imputer_all_missing_column() {
    // 全て欠損した列では補完値が定義できない
    let mut df = DataFrame::new();
    df.add_column(
        "SALARY".to_string(),
        Column::Float(NASeries::from_options(vec![None, None], None)),
    )
    .unwrap();

    let mut imputer = Imputer::new(vec!["SALARY".to_string()], ImputeStrategy::Mean);
    assert!(matches!(imputer.fit(&df), Err(Error::Imputation(_))));
}

#[test]
fn test_imputer_errors() {
    let df = prepare_test_data();

    // 存在しない列はエラー
    let mut imputer = Imputer::new(vec!["MISSING".to_string()], ImputeStrategy::Mean);
    assert!(matches!(imputer.fit(&df), Err(Error::ColumnNotFound(_))));

    // 数値列でない列はエラー
    let mut imputer = Imputer::new(vec!["COUNTRY".to_string()], ImputeStrategy::Mean);
    assert!(matches!(
        imputer.fit(&df),
        Err(Error::ColumnTypeMismatch { .. })
    ));

    // fitの前にtransformを呼ぶとエラー
    let imputer = Imputer::new(vec!["SALARY".to_string()], ImputeStrategy::Mean);
    assert!(matches!(imputer.transform(&df), Err(Error::Imputation(_))));
}

#[test]
fn test_label_encoder_with_output() {
    let df = prepare_test_data();
    let mut encoder = LabelEncoder::new("COUNTRY").with_output("LABEL_ENCODING");
    let result = encoder.fit_transform(&df).unwrap();

    // カテゴリは辞書順: France=0, Germany=1, Spain=2
    assert_eq!(encoder.classes(), &["France", "Germany", "Spain"]);
    let labels = result.int_column("LABEL_ENCODING").unwrap();
    assert_eq!(labels.values(), &[0, 2, 1, 2]);

    // 元の列は残る
    assert!(result.contains_column("COUNTRY"));
}

#[test]
fn test_label_encoder_in_place() {
    let df = prepare_test_data();
    let mut encoder = LabelEncoder::new("COUNTRY");
    let result = encoder.fit_transform(&df).unwrap();

    // 対象列自体が整数列に置き換えられる
    assert_eq!(
        result.column("COUNTRY").map(|c| c.column_type()),
        Some(ColumnType::Int)
    );
    assert_eq!(result.int_column("COUNTRY").unwrap().values(), &[0, 2, 1, 2]);
}

#[test]
fn test_label_encoder_unseen_category() {
    let df = prepare_test_data();
    let mut encoder = LabelEncoder::new("COUNTRY");
    encoder.fit(&df).unwrap();

    // 学習時に存在しなかったカテゴリ値はエンコードエラー
    let mut other = DataFrame::new();
    other
        .add_column(
            "COUNTRY".to_string(),
            Column::Str(Series::new(vec!["Italy".to_string()], None)),
        )
        .unwrap();
    assert!(matches!(
        encoder.transform(&other),
        Err(Error::Encoding(_))
    ));
}

#[test]
fn test_label_encoder_unfitted() {
    let df = prepare_test_data();
    let encoder = LabelEncoder::new("COUNTRY");
    assert!(matches!(encoder.transform(&df), Err(Error::Encoding(_))));
}

#[test]
fn test_one_hot_encoder() {
    let df = prepare_test_data();
    let mut encoder = OneHotEncoder::new("COUNTRY");
    let result = encoder.fit_transform(&df).unwrap();

    assert_eq!(
        encoder.output_columns(),
        &["COUNTRY_France", "COUNTRY_Germany", "COUNTRY_Spain"]
    );

    // 各カテゴリの0/1列が追加される
    assert_eq!(
        result.int_column("COUNTRY_France").unwrap().values(),
        &[1, 0, 0, 0]
    );
    assert_eq!(
        result.int_column("COUNTRY_Germany").unwrap().values(),
        &[0, 0, 1, 0]
    );
    assert_eq!(
        result.int_column("COUNTRY_Spain").unwrap().values(),
        &[0, 1, 0, 1]
    );

    // 各行のOne-Hotブロックの合計はちょうど1
    for i in 0..result.row_count() {
        let sum: i64 = ["COUNTRY_France", "COUNTRY_Germany", "COUNTRY_Spain"]
            .iter()
            .map(|name| *result.int_column(name).unwrap().get(i).unwrap())
            .sum();
        assert_eq!(sum, 1, "行{}のOne-Hotブロックの合計は1のはず", i);
    }

    // 元の列は残る
    assert!(result.contains_column("COUNTRY"));
}

#[test]
fn test_one_hot_encoder_drop_first() {
    let df = prepare_test_data();
    let mut encoder = OneHotEncoder::new("COUNTRY").with_drop_first(true);
    let result = encoder.fit_transform(&df).unwrap();

    // 最初のカテゴリ列（France）は生成されない
    assert_eq!(
        encoder.output_columns(),
        &["COUNTRY_Germany", "COUNTRY_Spain"]
    );
    assert!(!result.contains_column("COUNTRY_France"));
    assert!(result.contains_column("COUNTRY_Germany"));
}

#[test]
fn test_pipeline_chaining() {
    // Imputer -> OneHotEncoderを連鎖させる
    let df = prepare_test_data();

    let mut pipeline = Pipeline::new();
    pipeline
        .add_transformer(Imputer::new(
            vec!["SALARY".to_string()],
            ImputeStrategy::Mean,
        ))
        .add_transformer(OneHotEncoder::new("COUNTRY"));

    let result = pipeline.fit_transform(&df).unwrap();

    assert!(!result.float_column("SALARY").unwrap().has_na());
    assert!(result.contains_column("COUNTRY_Spain"));

    // 学習済みパイプラインは再適用できる
    let again = pipeline.transform(&df).unwrap();
    assert!(!again.float_column("SALARY").unwrap().has_na());
}
