//! Export of one render cycle's outputs to disk.

use crate::charts::{RenderError, StaticChartRenderer};
use crate::data::TableView;
use crate::gallery::{PageOutput, PlotType};
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to write table: {0}")]
    Table(#[from] PolarsError),
}

/// Write charts as `<plot>_<n>.png` and tables as `<plot>_table_<n>.csv`
/// into `dir`, returning the paths in output order.
pub fn export_outputs(
    plot: PlotType,
    outputs: &[PageOutput],
    dir: &Path,
    width: u32,
    height: u32,
) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(outputs.len());
    let (mut charts, mut tables) = (0, 0);

    for output in outputs {
        let path = match output {
            PageOutput::Chart(chart) => {
                charts += 1;
                let path = dir.join(format!("{}_{}.png", plot.slug(), charts));
                StaticChartRenderer::save_png(chart, &path, width, height)?;
                path
            }
            PageOutput::Table(table) => {
                tables += 1;
                let path = dir.join(format!("{}_table_{}.csv", plot.slug(), tables));
                write_table_csv(table, &path)?;
                path
            }
        };
        written.push(path);
    }

    tracing::info!(plot = %plot, files = written.len(), dir = %dir.display(), "export complete");
    Ok(written)
}

/// Write a text table as CSV with a header row.
pub fn write_table_csv(table: &TableView, path: &Path) -> Result<(), ExportError> {
    let columns: Vec<Column> = table
        .columns
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let cells: Vec<&str> = table.rows.iter().map(|row| row[idx].as_str()).collect();
            Column::new(name.as_str().into(), cells)
        })
        .collect();

    let mut df = DataFrame::new(columns)?;
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_csv_has_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        let table = TableView {
            columns: vec!["cut".into(), "price".into()],
            rows: vec![
                vec!["Ideal".into(), "326".into()],
                vec!["Very Good".into(), "2757".into()],
            ],
        };

        write_table_csv(&table, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["cut,price", "Ideal,326", "Very Good,2757"]);
    }

    #[test]
    fn tables_only_export_without_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let outputs = vec![PageOutput::Table(TableView {
            columns: vec!["a".into()],
            rows: vec![vec!["1".into()]],
        })];

        let written =
            export_outputs(PlotType::Histogram, &outputs, &dir.path().join("out"), 100, 100)
                .unwrap();
        assert_eq!(written, vec![dir.path().join("out").join("histogram_table_1.csv")]);
        assert!(written[0].is_file());
    }
}
