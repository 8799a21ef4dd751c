//! Data Processor Module
//! Row filtering, column extraction and table coercion for the dataset branches.

use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// A table where every cell is already rendered to text.
///
/// Categorical columns cannot be shown natively by the table sink, so the
/// whole frame is coerced to a generic representation first.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Handles filtering and column extraction operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Keep only rows where `column == value`.
    pub fn filter_eq(df: &DataFrame, column: &str, value: &str) -> Result<DataFrame, ProcessorError> {
        let filtered = df
            .clone()
            .lazy()
            .filter(col(column).eq(lit(value)))
            .collect()?;
        Ok(filtered)
    }

    /// Numeric column as f64, nulls and NaN kept as `None`.
    pub fn f64_values(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>, ProcessorError> {
        let series = df.column(column)?.cast(&DataType::Float64)?;
        let values = series
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();
        Ok(values)
    }

    /// Any column rendered as strings, nulls kept as `None`.
    pub fn str_values(df: &DataFrame, column: &str) -> Result<Vec<Option<String>>, ProcessorError> {
        let series = df.column(column)?.cast(&DataType::String)?;
        let values = series
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect();
        Ok(values)
    }

    /// Split a numeric column by the levels of a key column.
    ///
    /// Output index follows `levels`; rows whose key is not a level are dropped.
    pub fn group_values(
        df: &DataFrame,
        value_col: &str,
        key_col: &str,
        levels: &[String],
    ) -> Result<Vec<Vec<f64>>, ProcessorError> {
        let values = Self::f64_values(df, value_col)?;
        let keys = Self::str_values(df, key_col)?;

        let mut groups = vec![Vec::new(); levels.len()];
        for (value, key) in values.into_iter().zip(keys) {
            if let (Some(v), Some(k)) = (value, key) {
                if let Some(idx) = levels.iter().position(|l| *l == k) {
                    groups[idx].push(v);
                }
            }
        }
        Ok(groups)
    }

    /// Coerce every column to text for table display.
    pub fn to_object_table(df: &DataFrame) -> Result<TableView, ProcessorError> {
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rendered: Vec<Vec<Option<String>>> = columns
            .iter()
            .map(|name| Self::str_values(df, name))
            .collect::<Result<_, _>>()?;

        let rows = (0..df.height())
            .map(|i| {
                rendered
                    .iter()
                    .map(|col| col[i].clone().unwrap_or_else(|| "None".to_string()))
                    .collect()
            })
            .collect();

        Ok(TableView { columns, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        DataFrame::new(vec![
            Column::new("cut".into(), vec!["Ideal", "Fair", "Ideal", "Good"]),
            Column::new("price".into(), vec![326i64, 334, 400, 2757]),
        ])
        .unwrap()
    }

    #[test]
    fn filter_keeps_matching_rows_only() {
        let filtered = DataProcessor::filter_eq(&sample(), "cut", "Ideal").unwrap();
        assert_eq!(filtered.height(), 2);
        let cuts = DataProcessor::str_values(&filtered, "cut").unwrap();
        assert!(cuts.iter().all(|c| c.as_deref() == Some("Ideal")));
    }

    #[test]
    fn integer_columns_read_as_f64() {
        let prices = DataProcessor::f64_values(&sample(), "price").unwrap();
        assert_eq!(prices, vec![Some(326.0), Some(334.0), Some(400.0), Some(2757.0)]);
    }

    #[test]
    fn group_values_follows_level_order() {
        let levels = vec!["Good".to_string(), "Ideal".to_string()];
        let groups = DataProcessor::group_values(&sample(), "price", "cut", &levels).unwrap();
        assert_eq!(groups, vec![vec![2757.0], vec![326.0, 400.0]]);
    }

    #[test]
    fn object_table_renders_every_cell() {
        let table = DataProcessor::to_object_table(&sample()).unwrap();
        assert_eq!(table.columns, vec!["cut", "price"]);
        assert_eq!(table.row_count(), 4);
        assert_eq!(table.rows[3], vec!["Good".to_string(), "2757".to_string()]);
    }

    #[test]
    fn unknown_column_is_an_error() {
        assert!(DataProcessor::f64_values(&sample(), "carat").is_err());
    }
}
