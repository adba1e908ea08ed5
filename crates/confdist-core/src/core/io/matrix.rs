use nalgebra::{DMatrix, DVector};
use std::path::Path;
use thiserror::Error;

/// Errors produced while reading or writing a CSV matrix file.
#[derive(Debug, Error)]
pub enum MatrixIoError {
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },

    #[error("'{path}' line {line}: cannot parse '{field}' as a number")]
    Parse {
        path: String,
        line: usize,
        field: String,
    },

    #[error("'{path}' line {line}: expected {expected} columns, found {actual}")]
    RaggedRow {
        path: String,
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("'{path}' contains no data")]
    Empty { path: String },

    #[error("'{path}' is {rows}x{cols}, expected a single row or column")]
    NotAVector {
        path: String,
        rows: usize,
        cols: usize,
    },
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// Reads a headerless numeric CSV file into a dense row-major matrix.
///
/// Every record must have the same number of fields as the first one; each
/// field must parse as an `f64`. Empty files are rejected.
pub fn read_matrix(path: &Path) -> Result<DMatrix<f64>, MatrixIoError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| MatrixIoError::Csv {
            path: display_path(path),
            source: e,
        })?;

    let mut data: Vec<f64> = Vec::new();
    let mut cols = 0;
    let mut rows = 0;

    for (index, result) in reader.records().enumerate() {
        let line = index + 1;
        let record = result.map_err(|e| MatrixIoError::Csv {
            path: display_path(path),
            source: e,
        })?;

        if rows == 0 {
            cols = record.len();
        } else if record.len() != cols {
            return Err(MatrixIoError::RaggedRow {
                path: display_path(path),
                line,
                expected: cols,
                actual: record.len(),
            });
        }

        for field in record.iter() {
            let value: f64 = field.trim().parse().map_err(|_| MatrixIoError::Parse {
                path: display_path(path),
                line,
                field: field.to_string(),
            })?;
            data.push(value);
        }
        rows += 1;
    }

    if rows == 0 || cols == 0 {
        return Err(MatrixIoError::Empty {
            path: display_path(path),
        });
    }

    Ok(DMatrix::from_row_slice(rows, cols, &data))
}

/// Reads a weight vector stored as a single CSV row or a single column.
pub fn read_weights(path: &Path) -> Result<DVector<f64>, MatrixIoError> {
    let matrix = read_matrix(path)?;
    if matrix.nrows() == 1 {
        Ok(matrix.row(0).transpose())
    } else if matrix.ncols() == 1 {
        Ok(matrix.column(0).into_owned())
    } else {
        Err(MatrixIoError::NotAVector {
            path: display_path(path),
            rows: matrix.nrows(),
            cols: matrix.ncols(),
        })
    }
}

/// Writes a dense matrix as headerless CSV, one row per record.
pub fn write_matrix(path: &Path, matrix: &DMatrix<f64>) -> Result<(), MatrixIoError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| MatrixIoError::Csv {
        path: display_path(path),
        source: e,
    })?;

    for i in 0..matrix.nrows() {
        let record: Vec<String> = matrix.row(i).iter().map(|v| v.to_string()).collect();
        writer
            .write_record(&record)
            .map_err(|e| MatrixIoError::Csv {
                path: display_path(path),
                source: e,
            })?;
    }
    writer.flush().map_err(|e| MatrixIoError::Csv {
        path: display_path(path),
        source: csv::Error::from(e),
    })?;
    Ok(())
}
