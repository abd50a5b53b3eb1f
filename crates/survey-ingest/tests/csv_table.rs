use std::io::Write;

use tempfile::NamedTempFile;

use survey_ingest::{
    IngestOptions, build_column_profiles, read_survey_table, read_survey_table_with_options,
    to_data_frame,
};

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    file
}

#[test]
fn reads_table_and_builds_profiles() {
    let file = csv_file("item1,item2,vignette\n1,4,control\n2,,internal\n3,NA,external\n");
    let table = read_survey_table(file.path()).expect("read csv");
    assert_eq!(table.headers, vec!["item1", "item2", "vignette"]);
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.rows[1][1], None);
    assert_eq!(table.rows[2][1], None);

    let profiles = build_column_profiles(&table);
    let item2 = profiles.get("item2").expect("item2 profile");
    assert!(item2.is_numeric);
    assert!((item2.missing_ratio - 2.0 / 3.0).abs() < 1e-6);
    let vignette = profiles.get("vignette").expect("vignette profile");
    assert!(!vignette.is_numeric);
}

#[test]
fn skips_blank_rows_and_pads_short_records() {
    let file = csv_file("a,b\n1,2\n\n3\n");
    let table = read_survey_table(file.path()).expect("read csv");
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.rows[1], vec![Some("3".to_string()), None]);
}

#[test]
fn custom_missing_tokens_apply() {
    let file = csv_file("x\n1\n-99\n3\n");
    let options = IngestOptions {
        missing_tokens: vec!["-99".to_string()],
    };
    let table = read_survey_table_with_options(file.path(), &options).expect("read csv");
    assert_eq!(table.rows[1][0], None);
}

#[test]
fn frame_conversion_preserves_nulls() {
    let file = csv_file("item1\n1\n\n3\n");
    let table = read_survey_table(file.path()).expect("read csv");
    let df = to_data_frame(&table).expect("build frame");
    let col = df.column("item1").expect("column");
    assert_eq!(col.null_count(), 1);
    let ca = col.f64().expect("float column");
    assert_eq!(ca.get(0), Some(1.0));
    assert_eq!(ca.get(1), None);
}

#[test]
fn empty_file_is_an_error() {
    let file = csv_file("");
    assert!(read_survey_table(file.path()).is_err());
}
