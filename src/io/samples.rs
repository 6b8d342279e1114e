//! Counts matrix loader.
//!
//! Reads a CSV whose first row holds gene names and whose first column holds
//! sample identifiers; every other cell is a numeric count. A header one
//! cell shorter than the data rows names only the gene columns. Empty and
//! `NA`-style cells load as `NaN`.
use std::fs::File;
use std::io::Read;
use std::path::Path;

use ndarray::Array2;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::SampleMatrix;

/// Cell values read as missing rather than rejected.
const NA_VALUES: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL"];

/// Load a samples (rows) x genes (columns) counts CSV from disk.
pub fn load_samples(path: &Path) -> Result<SampleMatrix> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let matrix = read_samples(file, path)?;
    debug!(
        "Loaded counts matrix {:?}: {} samples x {} genes",
        path,
        matrix.n_samples(),
        matrix.n_features()
    );
    Ok(matrix)
}

/// Parse a counts CSV from any reader. `path` is only used in errors.
pub fn read_samples<R: Read>(reader: R, path: &Path) -> Result<SampleMatrix> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = rdr.records();

    let header = match records.next() {
        Some(r) => r.map_err(|e| Error::csv(path, e))?,
        None => {
            return Err(Error::EmptyFile {
                path: path.to_path_buf(),
            });
        }
    };
    let header: Vec<String> = header.iter().map(str::to_string).collect();

    let mut index_name = None;
    let mut columns: Option<Vec<String>> = None;
    let mut index = Vec::new();
    let mut data = Vec::new();

    for record in records {
        let record = record.map_err(|e| Error::csv(path, e))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        if columns.is_none() {
            // The first data row decides how the header lines up with it
            let (name, cols) =
                align_header(&header, record.len()).ok_or_else(|| Error::Shape {
                    path: path.to_path_buf(),
                    line,
                    expected: header.len(),
                    found: record.len(),
                })?;
            index_name = name;
            columns = Some(cols);
        }
        let cols = columns.as_deref().unwrap_or_default();

        if record.len() != cols.len() + 1 {
            return Err(Error::Shape {
                path: path.to_path_buf(),
                line,
                expected: cols.len() + 1,
                found: record.len(),
            });
        }

        let mut fields = record.iter();
        index.push(fields.next().unwrap_or_default().to_string());
        for (cell, column) in fields.zip(cols.iter()) {
            data.push(parse_count(cell).ok_or_else(|| Error::Parse {
                path: path.to_path_buf(),
                line,
                column: column.clone(),
                value: cell.to_string(),
            })?);
        }
    }

    // Header-only file: keep the gene names, no samples
    let columns = columns.unwrap_or_else(|| header.iter().skip(1).cloned().collect());
    if index.is_empty() {
        index_name = header.first().filter(|h| !h.is_empty()).cloned();
    }
    let values = Array2::from_shape_vec((index.len(), columns.len()), data)?;

    Ok(SampleMatrix {
        index_name,
        index,
        columns,
        values,
    })
}

/// Split the header into (index name, gene columns) for rows `width` wide.
fn align_header(header: &[String], width: usize) -> Option<(Option<String>, Vec<String>)> {
    if width == header.len() {
        let name = header.first().filter(|h| !h.is_empty()).cloned();
        Some((name, header.iter().skip(1).cloned().collect()))
    } else if width == header.len() + 1 {
        Some((None, header.to_vec()))
    } else {
        None
    }
}

fn parse_count(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if NA_VALUES.contains(&cell) {
        return Some(f64::NAN);
    }
    cell.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn read(text: &str) -> Result<SampleMatrix> {
        read_samples(text.as_bytes(), Path::new("samples.csv"))
    }

    #[test]
    fn reads_index_header_and_counts() {
        let m = read(",TP53,PAX5\nS1,10,0\nS2,3.5,7\nS3,1,1\n").unwrap();
        assert_eq!(m.shape(), (3, 2));
        assert_eq!(m.index, vec!["S1", "S2", "S3"]);
        assert_eq!(m.columns, vec!["TP53", "PAX5"]);
        assert_eq!(m.index_name, None);
        assert_eq!(m.get("S2", "TP53"), Some(3.5));
    }

    #[test]
    fn keeps_named_index_column() {
        let m = read("sample,TP53\nS1,4\n").unwrap();
        assert_eq!(m.index_name.as_deref(), Some("sample"));
        assert_eq!(m.columns, vec!["TP53"]);
    }

    #[test]
    fn short_header_names_only_gene_columns() {
        let m = read("TP53,PAX5\nS1,1,2\nS2,3,4\n").unwrap();
        assert_eq!(m.columns, vec!["TP53", "PAX5"]);
        assert_eq!(m.get("S2", "PAX5"), Some(4.0));
    }

    #[rstest]
    #[case("")]
    #[case("NA")]
    #[case(" nan ")]
    fn missing_cells_load_as_nan(#[case] cell: &str) {
        let m = read(&format!(",A,B\nS1,{cell},2\n")).unwrap();
        assert!(m.get("S1", "A").unwrap().is_nan());
        assert_eq!(m.get("S1", "B"), Some(2.0));
    }

    #[test]
    fn header_only_file_has_no_samples() {
        let m = read(",A,B\n").unwrap();
        assert_eq!(m.shape(), (0, 2));
        assert_eq!(m.columns, vec!["A", "B"]);
    }

    #[test]
    fn rejects_non_numeric_count() {
        let err = read(",A,B\nS1,1,high\n").unwrap_err();
        match err {
            Error::Parse {
                line,
                column,
                value,
                ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, "B");
                assert_eq!(value, "high");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = read(",A,B\nS1,1,2\nS2,1\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Shape {
                line: 3,
                expected: 3,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn rejects_empty_file() {
        assert!(matches!(read("").unwrap_err(), Error::EmptyFile { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_samples(Path::new("/nonexistent/allsorts/samples.csv")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
