//! Integration tests for table ingestion and preview.

use tabular_analytics::error::AnalyticsError;
use tabular_analytics::table::Table;

#[test]
fn empty_text_raises_empty_input() {
    match Table::parse("") {
        Err(AnalyticsError::EmptyInput) => {}
        other => panic!("expected EmptyInput, got {other:?}"),
    }
}

#[test]
fn whitespace_only_text_raises_empty_input() {
    assert!(matches!(
        Table::parse("\n\r\n\n"),
        Err(AnalyticsError::EmptyInput)
    ));
}

#[test]
fn first_line_is_the_header() {
    let table = Table::parse("name,value\nAlice,1.5\nBob,2.3\n").unwrap();
    assert_eq!(
        table.headers(),
        &["name".to_string(), "value".to_string()]
    );
    assert_eq!(table.row_count(), 2);
}

#[test]
fn duplicate_headers_are_allowed() {
    let table = Table::parse("x,x\n1,2\n").unwrap();
    assert_eq!(table.column_count(), 2);
    assert_eq!(table.column(0).unwrap(), vec!["1"]);
    assert_eq!(table.column(1).unwrap(), vec!["2"]);
}

#[test]
fn quoted_commas_are_still_delimiters() {
    // No quoting support: the comma inside the quotes splits the row, and the
    // extra cell is truncated back to the header width.
    let table = Table::parse("a,b\n\"x,y\",z\n").unwrap();
    assert_eq!(table.rows()[0], vec!["\"x".to_string(), "y\"".to_string()]);
}

#[test]
fn trailing_blank_lines_are_absorbed() {
    let table = Table::parse("a\n1\n2\n\n\n").unwrap();
    assert_eq!(table.row_count(), 2);
}

#[test]
fn short_rows_pad_and_long_rows_truncate() {
    let table = Table::parse("a,b,c\nonly\n1,2,3,4,5\n").unwrap();
    assert_eq!(table.rows()[0], vec!["only", "", ""]);
    assert_eq!(table.rows()[1], vec!["1", "2", "3"]);
}

#[test]
fn preview_accepts_any_count() {
    let table = Table::parse("a\n1\n2\n3\n4\n5\n").unwrap();
    assert!(table.preview(0).is_empty());
    assert_eq!(table.preview(3).len(), 3);
    assert_eq!(table.preview(1000).len(), 5);
}

#[test]
fn from_path_reads_and_parses() {
    let path = std::env::temp_dir().join("tabular_analytics_ingestion_test.csv");
    std::fs::write(&path, "a,b\n1,x\n").unwrap();

    let table = Table::from_path(&path).unwrap();
    assert_eq!(table.row_count(), 1);

    std::fs::remove_file(&path).ok();
}

#[test]
fn from_path_surfaces_read_failures() {
    let missing = std::env::temp_dir().join("tabular_analytics_does_not_exist.csv");
    assert!(matches!(
        Table::from_path(&missing),
        Err(AnalyticsError::Io(_))
    ));
}
