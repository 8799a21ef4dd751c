//! Data module - example dataset loading and processing

mod catalog;
mod loader;
mod processor;

pub use catalog::{DatasetName, CLARITY_RANKING};
pub use loader::{load_dataset, CsvDirectorySource, DatasetSource, ExampleDataset, LoaderError};
pub use processor::{DataProcessor, ProcessorError, TableView};
