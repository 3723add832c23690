use std::path::Path;

use thiserror::Error;

pub mod table;
pub mod vectors;

pub use table::MovieTable;
pub use vectors::FeatureMatrix;

/// Errors that can occur while loading the precomputed artifacts
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line} in {file}: {reason}")]
    Parse {
        file: String,
        line: usize,
        reason: String,
    },

    #[error("Row misalignment: movie table has {table_rows} rows, vector matrix has {matrix_rows}")]
    RowMismatch {
        table_rows: usize,
        matrix_rows: usize,
    },

    #[error("Vector width mismatch at row {row}: expected {expected}, found {found}")]
    WidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Empty artifact: {0}")]
    Empty(String),
}

pub type Result<T> = std::result::Result<T, DataError>;

/// Loads both artifacts from `data_dir` and verifies their row alignment.
///
/// `movies.tsv` and `vectors.txt` are written by the offline vectorization
/// pipeline with one line per movie, in the same order.
pub fn load_dataset(data_dir: &Path) -> Result<(MovieTable, FeatureMatrix)> {
    let table = MovieTable::load(&data_dir.join("movies.tsv"))?;
    let matrix = FeatureMatrix::load(&data_dir.join("vectors.txt"))?;

    if table.len() != matrix.rows() {
        return Err(DataError::RowMismatch {
            table_rows: table.len(),
            matrix_rows: matrix.rows(),
        });
    }

    tracing::info!(
        movies = table.len(),
        dimensions = matrix.dim(),
        "Loaded movie dataset"
    );

    Ok((table, matrix))
}
