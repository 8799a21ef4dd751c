//! Example Dataset Loader Module
//! Fetches example datasets by name and validates them against the catalog.

use crate::data::catalog::DatasetName;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error(
        "Dataset '{name}' not found at {}; download {name}.csv from https://github.com/mwaskom/seaborn-data",
        .path.display()
    )]
    NotFound { name: DatasetName, path: PathBuf },
    #[error("Dataset '{name}' is missing column '{column}'")]
    MissingColumn { name: DatasetName, column: String },
}

/// Anything that can fetch an example dataset by name.
pub trait DatasetSource {
    fn fetch(&self, name: DatasetName) -> Result<DataFrame, LoaderError>;
}

/// Reads `<key>.csv` files from a local directory.
#[derive(Debug, Clone)]
pub struct CsvDirectorySource {
    root: PathBuf,
}

impl CsvDirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, name: DatasetName) -> PathBuf {
        self.root.join(name.file_name())
    }
}

impl DatasetSource for CsvDirectorySource {
    fn fetch(&self, name: DatasetName) -> Result<DataFrame, LoaderError> {
        let path = self.path_for(name);
        if !path.is_file() {
            return Err(LoaderError::NotFound { name, path });
        }

        let df = LazyCsvReader::new(&path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        Ok(df)
    }
}

/// A loaded, validated example dataset.
#[derive(Debug, Clone)]
pub struct ExampleDataset {
    pub name: DatasetName,
    pub frame: DataFrame,
}

impl ExampleDataset {
    /// Level order of a column: the catalog order for categorical columns,
    /// otherwise distinct values in order of first appearance.
    pub fn levels(&self, column: &str) -> Result<Vec<String>, LoaderError> {
        if let Some(levels) = self.name.category_levels(column) {
            return Ok(levels.iter().map(|s| s.to_string()).collect());
        }

        let values = crate::data::DataProcessor::str_values(&self.frame, column)
            .map_err(|_| LoaderError::MissingColumn {
                name: self.name,
                column: column.to_string(),
            })?;

        let mut levels: Vec<String> = Vec::new();
        for value in values.into_iter().flatten() {
            if !levels.contains(&value) {
                levels.push(value);
            }
        }
        Ok(levels)
    }

    pub fn row_count(&self) -> usize {
        self.frame.height()
    }
}

/// Fetch a dataset from `source` and check it carries every required column.
pub fn load_dataset(
    source: &dyn DatasetSource,
    name: DatasetName,
) -> Result<ExampleDataset, LoaderError> {
    let frame = source.fetch(name)?;

    let present: Vec<String> = frame
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    if let Some(missing) = name
        .required_columns()
        .iter()
        .find(|col| !present.iter().any(|p| p == *col))
    {
        return Err(LoaderError::MissingColumn {
            name,
            column: missing.to_string(),
        });
    }

    tracing::debug!(dataset = %name, rows = frame.height(), "dataset loaded");
    Ok(ExampleDataset { name, frame })
}
