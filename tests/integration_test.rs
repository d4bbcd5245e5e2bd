//! Integration tests for xsvstream

use std::io::Write;
use tempfile::NamedTempFile;
use xsvstream::{parse_slice, Config, HeaderMode, Record, Strictness, XsvError, XsvParser, XsvReader};

fn fields(values: &[&str]) -> Record {
    Record::Fields(values.iter().map(|v| v.to_string()).collect())
}

fn write_temp(content: &[u8]) -> NamedTempFile {
    let mut temp = NamedTempFile::new().unwrap();
    temp.write_all(content).unwrap();
    temp.flush().unwrap();
    temp
}

#[test]
fn test_read_file_with_header() {
    // Write data
    let temp = write_temp(b"Name,Age,City\r\nAlice,30,NYC\r\nBob,25,SF\r\n");

    // Read data back
    {
        let mut reader = XsvReader::open(temp.path(), Config::csv()).unwrap();
        let records: Vec<_> = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(records.len(), 2); // header consumed
        assert_eq!(records[0].get("Name"), Some("Alice"));
        assert_eq!(records[1].get("City"), Some("SF"));
        assert_eq!(
            reader.headers(),
            Some(&["Name".to_string(), "Age".to_string(), "City".to_string()][..])
        );
    }
}

#[test]
fn test_large_dataset_streaming() {
    let num_rows = 10_000;

    let mut content = String::from("ID,Value\n");
    for i in 0..num_rows {
        content.push_str(&format!("{},\"v,{}\"\n", i, i * 2));
    }
    let temp = write_temp(content.as_bytes());

    // Small chunks force many chunk boundaries
    let mut reader = XsvReader::open(temp.path(), Config::csv())
        .unwrap()
        .chunk_size(7);

    let mut count = 0;
    for record in reader.records() {
        let record = record.unwrap();
        assert_eq!(record.get("ID"), Some(count.to_string().as_str()));
        assert_eq!(
            record.get("Value"),
            Some(format!("v,{}", count * 2).as_str())
        );
        count += 1;
    }

    assert_eq!(count, num_rows);
    assert_eq!(reader.row_count(), num_rows as u64);
}

#[test]
fn test_tsv_file() {
    let temp = write_temp(b"a\tb\n\"q\"\tx\\y\n");
    let config = Config::tsv().header(HeaderMode::None);

    let mut reader = XsvReader::open(temp.path(), config).unwrap();
    let records: Vec<_> = reader.records().collect::<Result<Vec<_>, _>>().unwrap();

    assert_eq!(records, vec![fields(&["a", "b"]), fields(&["\"q\"", "x\\y"])]);
}

#[test]
fn test_comment_skip_interaction() {
    let config = Config::csv().skip_lines(1).comment(Some(b'#'));
    let records = parse_slice(config, b"ignored\n#also ignored\na,b\n1,2\n").unwrap();

    assert_eq!(records.len(), 1);
    let map = records[0].as_map().unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("a"), Some(&Some("1".to_string())));
    assert_eq!(map.get("b"), Some(&Some("2".to_string())));
}

#[test]
fn test_bom_stripping() {
    let temp = write_temp(b"\xEF\xBB\xBFa,b\n1,2\n");
    let mut reader = XsvReader::open(temp.path(), Config::csv()).unwrap().chunk_size(1);

    let record = reader.read_record().unwrap().unwrap();
    assert_eq!(reader.headers().unwrap()[0], "a");
    assert_eq!(record.get("a"), Some("1"));
}

#[test]
fn test_header_absence_and_truncation() {
    let records = parse_slice(Config::csv(), b"a,b,c\nx,y\n").unwrap();
    let map = records[0].as_map().unwrap();
    assert_eq!(map.get("a"), Some(&Some("x".to_string())));
    assert_eq!(map.get("b"), Some(&Some("y".to_string())));
    assert_eq!(map.get("c"), Some(&None));

    let records = parse_slice(Config::csv(), b"a,b\nx,y,z\n").unwrap();
    let map = records[0].as_map().unwrap();
    assert_eq!(map.len(), 2);
    assert!(!map.contains_key("c"));
}

#[test]
fn test_blank_line_suppression() {
    let config = Config::csv().header(HeaderMode::None);
    let records = parse_slice(config, b"\n1\n\n\n2\n").unwrap();
    assert_eq!(records, vec![fields(&["1"]), fields(&["2"])]);
}

#[test]
fn test_no_trailing_terminator_flush() {
    let config = Config::csv().header(HeaderMode::None);
    let mut parser = XsvParser::new(config).unwrap();

    let records = parser.feed(b"a,b\n1,2").unwrap();
    assert_eq!(records, vec![fields(&["a", "b"])]);
    assert_eq!(parser.finish().unwrap(), Some(fields(&["1", "2"])));
}

#[test]
fn test_escape_round_trip() {
    let config = Config::csv().header(HeaderMode::None).unescape_controls(true);
    let records = parse_slice(config, b"\"back\\\\slash\",\"line\\nfeed\"\n").unwrap();
    assert_eq!(records, vec![fields(&["back\\slash", "line\nfeed"])]);
}

#[test]
fn test_rfc4180_dialect() {
    let config = Config::rfc4180().header(HeaderMode::None);
    let records = parse_slice(config, b"\"He said \"\"hi\"\"\",\"a\\b\"\r\n").unwrap();
    assert_eq!(records, vec![fields(&["He said \"hi\"", "a\\b"])]);
}

#[test]
fn test_semicolon_separator_with_fixed_header() {
    let config = Config::csv().separator(b';').fixed_header(["k", "v"]);
    let records = parse_slice(config, b"one;1\ntwo;\"2;2\"\n").unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("k"), Some("one"));
    assert_eq!(records[1].get("v"), Some("2;2"));
}

#[test]
fn test_strict_mode_rejects_unterminated_quote() {
    let temp = write_temp(b"a\n\"never closed\n");
    let config = Config::csv().strictness(Strictness::Strict);

    let mut reader = XsvReader::open(temp.path(), config).unwrap();
    let results: Vec<_> = reader.records().collect();

    assert_eq!(results.len(), 1);
    assert!(matches!(
        results[0],
        Err(XsvError::UnterminatedQuote { line: 2 })
    ));
}

#[test]
fn test_permissive_mode_repairs_unterminated_quote() {
    let config = Config::csv().header(HeaderMode::None);
    let records = parse_slice(config, b"a\n\"never closed\n").unwrap();
    assert_eq!(records, vec![fields(&["a"]), fields(&["never closed\n"])]);
}
