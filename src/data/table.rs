//! Table View
//! Display-ready pass-through of every row and column of a dataset.

use super::Dataset;
use polars::prelude::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    /// Build the view. No filtering, sorting or paging.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let df = dataset.frame();
        let headers = dataset.column_names();

        let series: Vec<&Series> = df
            .get_columns()
            .iter()
            .map(|col| col.as_materialized_series())
            .collect();

        // Indexed access works on any chunk layout
        let rows = (0..df.height())
            .map(|i| {
                series
                    .iter()
                    .map(|s| {
                        s.get(i)
                            .map(|v| Self::format_cell(&v))
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        Self { headers, rows }
    }

    fn format_cell(value: &AnyValue) -> String {
        match value {
            AnyValue::Null => String::new(),
            AnyValue::String(s) => s.to_string(),
            other => other.to_string().trim_matches('"').to_string(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_every_cell_through() {
        let df = df!(
            "x" => [1i64, 2, 3],
            "y" => [Some(2.5), None, Some(6.0)],
            "tag" => ["a", "b", "c"],
        )
        .unwrap();
        let table = TableView::from_dataset(&Dataset::new(df, None));

        assert_eq!(table.headers, vec!["x", "y", "tag"]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.rows[0], vec!["1", "2.5", "a"]);
        assert_eq!(table.rows[1], vec!["2", "", "b"]);
        assert_eq!(table.rows[2][2], "c");
    }

    #[test]
    fn large_file_builds_every_row() {
        use crate::data::DataLoader;
        use std::fmt::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.csv");
        let mut body = String::from("x,y,label\n");
        for i in 0..400_000 {
            writeln!(body, "{i},{},row{i}", 2 * i).unwrap();
        }
        std::fs::write(&path, body).unwrap();

        let ds = DataLoader::default().load_csv(&path).unwrap();
        let table = TableView::from_dataset(&ds);

        assert_eq!(table.row_count(), 400_000);
        assert_eq!(table.rows[0], vec!["0", "0", "row0"]);
        assert_eq!(table.rows[399_999], vec!["399999", "799998", "row399999"]);
    }

    #[test]
    fn multi_chunk_frame_is_read_in_order() {
        let mut df = df!("x" => [1i64, 2], "y" => [10i64, 20]).unwrap();
        let tail = df!("x" => [3i64], "y" => [30i64]).unwrap();
        df.vstack_mut(&tail).unwrap();
        assert!(df.first_col_n_chunks() > 1);

        let table = TableView::from_dataset(&Dataset::new(df, None));
        assert_eq!(table.rows[2], vec!["3", "30"]);
    }
}
