use clip_filter::FilterError;
use clip_filter::ingestion::csv::{DEFAULT_DELIMITER, reader_builder};
use clip_filter::ingestion::{read_records_from_path, read_records_from_reader};

#[test]
fn read_records_from_path_happy_path() {
    let records = read_records_from_path("tests/fixtures/clips.csv", DEFAULT_DELIMITER).unwrap();

    assert_eq!(records.len(), 10);
    assert_eq!(records[0].id().unwrap(), "14434012");
    assert_eq!(records[0].get("title"), Some("Morning run along the river"));
    assert_eq!(records[9].get("title"), Some("Quoted, title"));
    assert_eq!(records[9].get("total_likes"), Some("15"));
}

#[test]
fn crlf_fixture_leaves_no_carriage_returns() {
    let records = read_records_from_path("tests/fixtures/clips.csv", DEFAULT_DELIMITER).unwrap();
    for r in &records {
        for cell in r.values() {
            assert!(!cell.contains('\r'), "cell {cell:?} kept a CR");
        }
    }
}

#[test]
fn header_only_file_has_no_records() {
    let records = read_records_from_path("tests/fixtures/clips_header_only.csv", DEFAULT_DELIMITER).unwrap();
    assert!(records.is_empty());
}

#[test]
fn missing_file_is_file_not_found() {
    let err = read_records_from_path("tests/fixtures/does_not_exist.csv", DEFAULT_DELIMITER).unwrap_err();
    assert!(matches!(err, FilterError::FileNotFound { .. }));
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn directory_is_not_a_file() {
    let err = read_records_from_path("tests/fixtures", DEFAULT_DELIMITER).unwrap_err();
    assert!(matches!(err, FilterError::NotAFile { .. }));
    assert!(err.to_string().contains("is not a file"));
}

#[test]
fn columns_can_come_in_any_order() {
    let input = "total_likes,title,id\n99,hello,abc\n";
    let mut rdr = reader_builder(DEFAULT_DELIMITER).from_reader(input.as_bytes());

    let records = read_records_from_reader(&mut rdr).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id().unwrap(), "abc");
    assert_eq!(records[0].get("total_likes"), Some("99"));
}

#[test]
fn errors_on_missing_id_column() {
    let input = "title,privacy\nhello,anybody\n";
    let mut rdr = reader_builder(DEFAULT_DELIMITER).from_reader(input.as_bytes());

    let err = read_records_from_reader(&mut rdr).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("schema mismatch"));
    assert!(msg.contains("missing required column 'id'"));
}
