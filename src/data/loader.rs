//! CSV Data Loader Module
//! Handles CSV file loading and positional column extraction using Polars.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File not found: {}", .0.display())]
    Missing(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Need at least 2 columns to plot, found {0}")]
    TooFewColumns(usize),
    #[error("Column '{0}' is not numeric (or has empty or non-finite cells)")]
    NonNumeric(String),
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// One uploaded CSV file. Replaced wholesale on every upload.
#[derive(Debug, Clone)]
pub struct Dataset {
    df: DataFrame,
    source: Option<PathBuf>,
}

impl Dataset {
    pub fn new(df: DataFrame, source: Option<PathBuf>) -> Self {
        Self { df, source }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Display name of the source file.
    pub fn file_name(&self) -> String {
        self.source
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "dataset".to_string())
    }

    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    pub fn column_count(&self) -> usize {
        self.df.width()
    }

    /// Names of the first two columns, used as the x and y axes.
    pub fn axis_names(&self) -> Result<(String, String), DataError> {
        let names = self.column_names();
        match names.as_slice() {
            [x, y, ..] => Ok((x.clone(), y.clone())),
            _ => Err(DataError::TooFewColumns(names.len())),
        }
    }

    /// Values of the first two columns as `f64`, row order preserved.
    pub fn numeric_pair(&self) -> Result<(Vec<f64>, Vec<f64>), DataError> {
        let columns = self.df.get_columns();
        if columns.len() < 2 {
            return Err(DataError::TooFewColumns(columns.len()));
        }

        let x = Self::column_as_f64(&columns[0])?;
        let y = Self::column_as_f64(&columns[1])?;
        Ok((x, y))
    }

    fn column_as_f64(column: &Column) -> Result<Vec<f64>, DataError> {
        let name = column.name().to_string();
        // Non-strict cast: unparseable text turns into nulls
        let cast = column.cast(&DataType::Float64)?;
        if cast.null_count() > 0 {
            return Err(DataError::NonNumeric(name));
        }

        // NaN and inf parse as floats but cannot be plotted or fitted
        let ca = cast.f64()?;
        ca.into_iter()
            .map(|v| match v {
                Some(v) if v.is_finite() => Ok(v),
                _ => Err(DataError::NonNumeric(name.clone())),
            })
            .collect()
    }
}

/// Reads CSV files into a [`Dataset`].
pub struct DataLoader {
    infer_schema_rows: usize,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(10000)
    }
}

impl DataLoader {
    pub fn new(infer_schema_rows: usize) -> Self {
        Self { infer_schema_rows }
    }

    /// Load a CSV file with a header row. Parse errors are not skipped.
    pub fn load_csv(&self, file_path: &Path) -> Result<Dataset, LoaderError> {
        if !file_path.is_file() {
            return Err(LoaderError::Missing(file_path.to_path_buf()));
        }

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(self.infer_schema_rows))
            .with_rechunk(true)
            .finish()?
            .collect()?;

        log::info!(
            "Loaded {} ({} rows, {} columns)",
            file_path.display(),
            df.height(),
            df.width()
        );

        Ok(Dataset::new(df, Some(file_path.to_path_buf())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_csv(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn loads_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "xy.csv", "x,y,label\n1,2,a\n2,4,b\n3,6,c\n");

        let ds = DataLoader::default().load_csv(&path).unwrap();
        assert_eq!(ds.column_names(), vec!["x", "y", "label"]);
        assert_eq!(ds.row_count(), 3);
        assert_eq!(ds.file_name(), "xy.csv");

        let (x, y) = ds.numeric_pair().unwrap();
        assert_eq!(x, vec![1.0, 2.0, 3.0]);
        assert_eq!(y, vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn missing_file_is_reported_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = DataLoader::default()
            .load_csv(&dir.path().join("nope.csv"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::Missing(_)));
    }

    #[test]
    fn ragged_rows_fail_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "bad.csv", "x,y\n1,2\n3,4,5,6\n");

        let err = DataLoader::default().load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::CsvError(_)));
    }

    #[test]
    fn single_column_has_no_numeric_pair() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "one.csv", "x\n1\n2\n");

        let ds = DataLoader::default().load_csv(&path).unwrap();
        assert!(matches!(ds.numeric_pair(), Err(DataError::TooFewColumns(1))));
        assert!(matches!(ds.axis_names(), Err(DataError::TooFewColumns(1))));
    }

    #[test]
    fn nan_cell_is_not_numeric() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "nan.csv", "x,y\n1,2\nNaN,4\n3,6\n");

        let ds = DataLoader::default().load_csv(&path).unwrap();
        match ds.numeric_pair() {
            Err(DataError::NonNumeric(col)) => assert_eq!(col, "x"),
            other => panic!("expected NonNumeric, got {other:?}"),
        }
    }

    #[test]
    fn infinite_cell_is_not_numeric() {
        let df = df!(
            "x" => [1.0, 2.0, 3.0],
            "y" => [2.0, f64::INFINITY, 6.0],
        )
        .unwrap();
        let ds = Dataset::new(df, None);

        match ds.numeric_pair() {
            Err(DataError::NonNumeric(col)) => assert_eq!(col, "y"),
            other => panic!("expected NonNumeric, got {other:?}"),
        }
    }

    #[test]
    fn text_column_is_not_numeric() {
        let df = df!(
            "name" => ["a", "b"],
            "score" => [1.0, 2.0],
        )
        .unwrap();
        let ds = Dataset::new(df, None);

        match ds.numeric_pair() {
            Err(DataError::NonNumeric(col)) => assert_eq!(col, "name"),
            other => panic!("expected NonNumeric, got {other:?}"),
        }
    }
}
