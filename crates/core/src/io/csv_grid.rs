//! Comma-separated grid reader and writer
//!
//! Row `x` of the file holds `φ[x, 0], φ[x, 1], …, φ[x, n_y − 1]`. Values are
//! written in shortest round-trip decimal form, so reloading a saved field
//! reproduces it exactly.

use crate::error::{LevelSetError, Result};
use crate::solver::FieldData;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Load a field from a CSV file
///
/// # Errors
///
/// Returns an error if the file cannot be opened, a row is ragged, a cell is
/// not a real number, or the file has no rows.
pub fn load_csv(path: &Path) -> Result<FieldData> {
    let file = File::open(path).map_err(|e| LevelSetError::io(path, e))?;
    read_grid(BufReader::new(file), path)
}

/// Save a field to a CSV file, replacing any existing file
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_csv(path: &Path, field: &FieldData) -> Result<()> {
    let file = File::create(path).map_err(|e| LevelSetError::io(path, e))?;
    write_grid(BufWriter::new(file), field, path)
}

/// Parse a grid from any reader
///
/// `origin` is only used to label errors.
///
/// # Errors
///
/// See [`load_csv`].
pub fn read_grid<R: Read>(reader: R, origin: &Path) -> Result<FieldData> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(|e| LevelSetError::Csv {
            path: origin.to_path_buf(),
            source: e,
        })?;
        let line = record.position().map_or(rows.len() + 1, |p| p.line() as usize);

        // Blank lines carry no cells
        if record.len() == 1 && record.get(0).is_some_and(str::is_empty) {
            continue;
        }

        if let Some(first) = rows.first() {
            if record.len() != first.len() {
                return Err(LevelSetError::Shape {
                    path: origin.to_path_buf(),
                    line,
                    expected: first.len(),
                    found: record.len(),
                });
            }
        }

        let row = record
            .iter()
            .enumerate()
            .map(|(column, cell)| {
                cell.parse::<f64>().map_err(|e| LevelSetError::Parse {
                    path: origin.to_path_buf(),
                    line,
                    message: format!("column {}: '{}' ({})", column + 1, cell, e),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(LevelSetError::EmptyGrid {
            path: origin.to_path_buf(),
        });
    }

    let width = rows.len();
    let height = rows[0].len();
    Ok(FieldData::from_fn(width, height, |x, y| rows[x][y]))
}

/// Serialize a grid to any writer
///
/// `origin` is only used to label errors.
///
/// # Errors
///
/// See [`save_csv`].
pub fn write_grid<W: Write>(writer: W, field: &FieldData, origin: &Path) -> Result<()> {
    let csv_error = |e: csv::Error| LevelSetError::Csv {
        path: origin.to_path_buf(),
        source: e,
    };

    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .from_writer(writer);

    let (width, height) = field.dimensions();
    for x in 0..width {
        let record = (0..height).map(|y| field.get(x, y).to_string());
        csv_writer.write_record(record).map_err(csv_error)?;
    }

    csv_writer
        .flush()
        .map_err(|e| LevelSetError::io(origin, e))
}
