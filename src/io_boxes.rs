//! Plain box-list readers and writers.
//!
//! Two interchange shapes for bare box lists, used by the CLI and tests:
//! CSV with four numeric fields per record (no header), and JSON as an
//! array of 4-element arrays. Neither carries a format tag; the tag travels
//! out of band, the way the widget wrappers pass `bbox_format` alongside
//! the data.

use crate::error::LabelKitError;
use crate::geometry::BBox;

/// Parses a CSV string into a box list.
///
/// Each record must have exactly four numeric fields. The record number in
/// errors is 1-based.
pub fn from_csv_str(content: &str) -> Result<Vec<BBox>, LabelKitError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut boxes = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record_num = index + 1;
        let record = record.map_err(|err| LabelKitError::BoxCsvParse {
            record: record_num,
            message: err.to_string(),
        })?;
        boxes.push(parse_record(&record, record_num)?);
    }
    Ok(boxes)
}

fn parse_record(record: &csv::StringRecord, record_num: usize) -> Result<BBox, LabelKitError> {
    if record.len() != 4 {
        return Err(LabelKitError::BoxCsvParse {
            record: record_num,
            message: format!("expected 4 fields, found {}", record.len()),
        });
    }

    let mut values = [0.0_f64; 4];
    for (i, field) in record.iter().enumerate() {
        values[i] = field.parse::<f64>().map_err(|_| LabelKitError::BoxCsvParse {
            record: record_num,
            message: format!("field {} is not a number: '{}'", i + 1, field),
        })?;
    }
    Ok(BBox::from_array(values))
}

/// Writes a box list as CSV, four fields per record, no header.
pub fn to_csv_string(boxes: &[BBox]) -> Result<String, LabelKitError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    for bbox in boxes {
        let [a, b, c, d] = bbox.values();
        writer
            .write_record([a.to_string(), b.to_string(), c.to_string(), d.to_string()])
            .map_err(io_err)?;
    }

    let bytes = writer.into_inner().map_err(|err| {
        LabelKitError::Io(std::io::Error::other(err.to_string()))
    })?;
    String::from_utf8(bytes)
        .map_err(|err| LabelKitError::Io(std::io::Error::other(err.to_string())))
}

fn io_err(err: csv::Error) -> LabelKitError {
    LabelKitError::Io(std::io::Error::other(err.to_string()))
}

/// Parses a JSON array of 4-element arrays into a box list.
pub fn from_json_str(content: &str) -> Result<Vec<BBox>, LabelKitError> {
    serde_json::from_str(content).map_err(LabelKitError::BoxJsonParse)
}

/// Writes a box list as a JSON array of 4-element arrays.
pub fn to_json_string(boxes: &[BBox]) -> Result<String, LabelKitError> {
    serde_json::to_string_pretty(boxes).map_err(LabelKitError::BoxJsonParse)
}

/// Feeds one CSV record through the parser without tripping on panics.
///
/// This helper is only for the fuzz harness; it exercises the same path as
/// [`from_csv_str`] one record at a time.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_box_record(line: &str) {
    let _ = from_csv_str(line);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_csv_records() {
        let boxes = from_csv_str("0,0,200,100\n10.5, 20.25, 110.5, 170.25\n").unwrap();
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].values(), [0.0, 0.0, 200.0, 100.0]);
        assert_eq!(boxes[1].values(), [10.5, 20.25, 110.5, 170.25]);
    }

    #[test]
    fn rejects_wrong_field_count() {
        let err = from_csv_str("1,2,3\n").unwrap_err();
        assert!(matches!(
            err,
            LabelKitError::BoxCsvParse { record: 1, .. }
        ));
    }

    #[test]
    fn rejects_non_numeric_field() {
        let err = from_csv_str("1,2,3,x\n").unwrap_err();
        match err {
            LabelKitError::BoxCsvParse { record, message } => {
                assert_eq!(record, 1);
                assert!(message.contains("field 4"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn csv_roundtrip() {
        let boxes = vec![BBox::new(1.0, 2.0, 3.0, 4.0), BBox::new(0.5, 0.25, 0.75, 1.0)];
        let csv = to_csv_string(&boxes).unwrap();
        let back = from_csv_str(&csv).unwrap();
        assert_eq!(back, boxes);
    }

    #[test]
    fn json_roundtrip() {
        let boxes = vec![BBox::new(60.0, 60.0, 40.0, 40.0)];
        let json = to_json_string(&boxes).unwrap();
        let back = from_json_str(&json).unwrap();
        assert_eq!(back, boxes);
    }

    #[test]
    fn empty_inputs_yield_empty_lists() {
        assert!(from_csv_str("").unwrap().is_empty());
        assert!(from_json_str("[]").unwrap().is_empty());
    }
}
