//! Ground-truth label loader.
//!
//! The file has no header and exactly two columns: sample identifier and
//! label. The loaded series is always named `labels`.
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{LABELS_NAME, LabelSeries};

pub fn load_labels(path: &Path) -> Result<LabelSeries> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let labels = read_labels(file, path)?;
    debug!(
        "Loaded {} labels ({} classes) from {:?}",
        labels.len(),
        labels.classes().len(),
        path
    );
    Ok(labels)
}

pub fn read_labels<R: Read>(reader: R, path: &Path) -> Result<LabelSeries> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut index = Vec::new();
    let mut values = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| Error::csv(path, e))?;
        if record.len() != 2 {
            return Err(Error::Shape {
                path: path.to_path_buf(),
                line: record.position().map(|p| p.line()).unwrap_or_default(),
                expected: 2,
                found: record.len(),
            });
        }
        index.push(record[0].to_string());
        values.push(record[1].to_string());
    }

    if index.is_empty() {
        return Err(Error::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    Ok(LabelSeries {
        name: LABELS_NAME.to_string(),
        index,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> Result<LabelSeries> {
        read_labels(text.as_bytes(), Path::new("labels.csv"))
    }

    #[test]
    fn reads_headerless_pairs_in_file_order() {
        let s = read("S1,Ph\nS2,High hyperdiploid\nS3,ETV6::RUNX1\n").unwrap();
        assert_eq!(s.name, "labels");
        assert_eq!(s.len(), 3);
        assert_eq!(s.index, vec!["S1", "S2", "S3"]);
        assert_eq!(s.get("S2"), Some("High hyperdiploid"));
    }

    #[test]
    fn first_row_is_data_not_header() {
        let s = read("sample,label\n").unwrap();
        assert_eq!(s.get("sample"), Some("label"));
    }

    #[test]
    fn rejects_extra_columns() {
        let err = read("S1,Ph\nS2,Ph,extra\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Shape {
                line: 2,
                expected: 2,
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn rejects_empty_file() {
        assert!(matches!(read("").unwrap_err(), Error::EmptyFile { .. }));
    }
}
