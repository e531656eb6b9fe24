use csv::{ReaderBuilder, Writer};
use std::fs::File;
use std::path::Path;

use crate::dataframe::{Column, DataFrame};
use crate::error::Result;
use crate::series::Series;

/// CSVファイルからDataFrameを読み込む
///
/// すべての列は文字列列として読み込まれ、列順はファイルの順序を保持する。
/// 数値列は読み込み後に`DataFrame::cast_float`で変換する。
pub fn read_csv<P: AsRef<Path>>(path: P, has_header: bool) -> Result<DataFrame> {
    let file = File::open(path.as_ref())?;

    // CSVリーダーを設定
    let mut rdr = ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    // ヘッダー行を取得
    let headers: Option<Vec<String>> = if has_header {
        Some(rdr.headers()?.iter().map(|h| h.to_string()).collect())
    } else {
        None
    };

    let mut rows = Vec::new();
    for result in rdr.records() {
        rows.push(result?);
    }

    // ヘッダーがない場合は最初の行から"column_0", "column_1"などと推測する
    let headers: Vec<String> = match headers {
        Some(h) => h,
        None => match rows.first() {
            Some(first) => (0..first.len()).map(|i| format!("column_{}", i)).collect(),
            None => return Ok(DataFrame::new()),
        },
    };

    // データを列ごとに収集（行の長さが足りない場合は空文字列を補う）
    let mut columns: Vec<Vec<String>> = vec![Vec::with_capacity(rows.len()); headers.len()];
    for record in &rows {
        for (i, column) in columns.iter_mut().enumerate() {
            column.push(record.get(i).unwrap_or("").to_string());
        }
    }

    let mut df = DataFrame::new();
    for (header, values) in headers.into_iter().zip(columns) {
        let series = Series::new(values, Some(header.clone()));
        df.add_column(header, Column::Str(series))?;
    }

    log::debug!(
        "CSVを読み込みました: {}行 x {}列",
        df.row_count(),
        df.column_count()
    );
    Ok(df)
}

/// DataFrameをCSVファイルに書き込む
///
/// 欠損値は空フィールドとして出力される。
pub fn write_csv<P: AsRef<Path>>(df: &DataFrame, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut wtr = Writer::from_writer(file);

    // ヘッダー行を書き込む
    wtr.write_record(df.column_names())?;

    // 各行のデータを書き込む
    for row in 0..df.row_count() {
        let mut record = Vec::with_capacity(df.column_count());
        for name in df.column_names() {
            let cell = df
                .column(name)
                .map(|column| column.cell_to_string(row, ""))
                .unwrap_or_default();
            record.push(cell);
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
