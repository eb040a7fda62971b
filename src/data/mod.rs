//! Data module - CSV loading and tabular display

mod loader;
mod table;

pub use loader::{DataError, DataLoader, Dataset, LoaderError};
pub use table::TableView;
