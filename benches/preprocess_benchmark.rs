use criterion::{criterion_group, criterion_main, Criterion};
use std::fmt::Write as _;

use preprs::preprocess::{NullSink, PreprocessConfig, Preprocessor};

/// ベンチマーク用の合成CSVを生成する
fn synthetic_csv(rows: usize) -> String {
    let countries = ["France", "Germany", "Spain"];
    let mut text = String::from("COUNTRY,AGE,SALARY,PURCHASED\n");

    for i in 0..rows {
        let country = countries[i % countries.len()];
        let age = if i % 17 == 0 {
            String::new()
        } else {
            (20 + i % 40).to_string()
        };
        let salary = if i % 23 == 0 {
            String::new()
        } else {
            (40_000 + (i % 50) * 1_000).to_string()
        };
        let purchased = if i % 2 == 0 { "Yes" } else { "No" };
        let _ = writeln!(text, "{},{},{},{}", country, age, salary, purchased);
    }

    text
}

fn bench_preprocess(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sales.csv");
    std::fs::write(&path, synthetic_csv(1000)).unwrap();

    let pipeline = Preprocessor::new(PreprocessConfig::default());

    c.bench_function("preprocess_1000_rows", |b| {
        b.iter(|| {
            let mut sink = NullSink;
            pipeline.run(&path, &mut sink).unwrap()
        })
    });
}

criterion_group!(benches, bench_preprocess);
criterion_main!(benches);
