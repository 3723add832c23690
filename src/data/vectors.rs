//! Loader for the precomputed feature-vector matrix.
//!
//! One line per movie, whitespace-separated `f32` components. Line N holds
//! the vector for row N of the movie table; the width of the first line
//! fixes the dimensionality for the whole file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::data::{DataError, Result};

/// Row-aligned feature matrix, immutable after load
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    dim: usize,
    rows: Vec<Vec<f32>>,
}

impl FeatureMatrix {
    /// Parse the matrix from a whitespace-separated text file
    pub fn load(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut rows: Vec<Vec<f32>> = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let mut row = Vec::new();
            for component in trimmed.split_whitespace() {
                let value: f32 = component.parse().map_err(|e| DataError::Parse {
                    file: file_name.clone(),
                    line: line_no,
                    reason: format!("Invalid component {:?}: {}", component, e),
                })?;
                if !value.is_finite() {
                    return Err(DataError::Parse {
                        file: file_name.clone(),
                        line: line_no,
                        reason: format!("Non-finite component {:?}", component),
                    });
                }
                row.push(value);
            }

            rows.push(row);
        }

        if rows.is_empty() {
            return Err(DataError::Empty(file_name));
        }

        Self::from_rows(rows).map_err(|err| match err {
            DataError::WidthMismatch { row, expected, found } => DataError::Parse {
                file: file_name,
                // Rows are 0-based, file lines 1-based
                line: row + 1,
                reason: format!("Expected {} components, found {}", expected, found),
            },
            other => other,
        })
    }

    /// Build a matrix directly from rows (tests and fixtures)
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let dim = rows.first().map(|r| r.len()).unwrap_or(0);
        if dim == 0 {
            return Err(DataError::Empty("feature matrix".to_string()));
        }

        for (row, vector) in rows.iter().enumerate() {
            if vector.len() != dim {
                return Err(DataError::WidthMismatch {
                    row,
                    expected: dim,
                    found: vector.len(),
                });
            }
        }

        Ok(Self { dim, rows })
    }

    /// Vector dimensionality
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// The vector at a row position
    pub fn row(&self, row: usize) -> Option<&[f32]> {
        self.rows.get(row).map(|v| v.as_slice())
    }

    /// Iterate over all rows in order
    pub fn iter(&self) -> impl Iterator<Item = &[f32]> {
        self.rows.iter().map(|v| v.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_matrix(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_matrix() {
        let file = write_matrix("1 0 0.5\n0 1 0\n");
        let matrix = FeatureMatrix::load(file.path()).unwrap();

        assert_eq!(matrix.rows(), 2);
        assert_eq!(matrix.dim(), 3);
        assert_eq!(matrix.row(0).unwrap(), &[1.0, 0.0, 0.5]);
        assert_eq!(matrix.row(2), None);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let file = write_matrix("1 0 0\n0 1\n");
        let err = FeatureMatrix::load(file.path()).unwrap_err();

        match err {
            DataError::Parse { line, reason, .. } => {
                assert_eq!(line, 2);
                assert!(reason.contains("Expected 3 components"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        let file = write_matrix("1 NaN 0\n");
        assert!(matches!(
            FeatureMatrix::load(file.path()),
            Err(DataError::Parse { .. })
        ));
    }

    #[test]
    fn test_invalid_component_rejected() {
        let file = write_matrix("1 two 3\n");
        let err = FeatureMatrix::load(file.path()).unwrap_err();
        match err {
            DataError::Parse { line, .. } => assert_eq!(line, 1),
            other => panic!("unexpected error: {other}"),
        }
    }
}
