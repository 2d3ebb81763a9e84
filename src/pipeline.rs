//! Row-at-a-time geocoding pipeline over a CSV dataset.
//!
//! Reads the input, resolves the `Address` column of each row in
//! order, and writes `<input stem>_geocoded.csv` next to the input.
//! Structural problems (unreadable file, missing `Address` header)
//! abort before any output exists; per-row failures are logged and the
//! row is carried through with its coordinate cells left blank.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::StringRecord;
use tracing::{debug, info, warn};

use crate::geometry::Point;
use crate::resolve::Resolver;

/// Column layout of the output: where to read addresses from and
/// where to put coordinates.
#[derive(Debug, PartialEq, Eq)]
struct Columns {
    address: usize,
    x: usize,
    y: usize,
}

/// Validate the header row and extend it with `X`/`Y` when absent.
/// Existing `X`/`Y` columns are reused in place.
fn prepare_headers(headers: &StringRecord) -> Result<(StringRecord, Columns)> {
    let address = headers
        .iter()
        .position(|h| h == "Address")
        .context("The input has no column named 'Address'")?;

    let mut out = headers.clone();
    let x = match headers.iter().position(|h| h == "X") {
        Some(i) => i,
        None => {
            out.push_field("X");
            out.len() - 1
        }
    };
    let y = match out.iter().position(|h| h == "Y") {
        Some(i) => i,
        None => {
            out.push_field("Y");
            out.len() - 1
        }
    };

    Ok((out, Columns { address, x, y }))
}

/// Pad a record out to the output width. Short rows get empty cells,
/// so the coordinate slots always exist.
fn pad_row(record: &StringRecord, width: usize) -> Vec<String> {
    let mut cells: Vec<String> = record.iter().map(String::from).collect();
    while cells.len() < width {
        cells.push(String::new());
    }
    cells
}

fn apply_point(cells: &mut [String], point: Point, columns: &Columns) {
    cells[columns.x] = point.x.to_string();
    cells[columns.y] = point.y.to_string();
}

/// `data/survey.csv` -> `data/survey_geocoded.csv`
fn output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    input.with_file_name(format!("{}_geocoded.csv", stem))
}

/// Run the pipeline over one input file, returning the output path.
///
/// Rows are processed strictly in order, one resolution completing
/// before the next begins. The output is buffered and written only
/// after every row has been handled, so an abort leaves nothing
/// half-written behind.
pub async fn run(input: &Path, resolver: &Resolver) -> Result<PathBuf> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(input)
        .with_context(|| format!("Cannot open input file {}", input.display()))?;

    let (headers, columns) = prepare_headers(reader.headers()?)?;
    let width = headers.len();

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut resolved = 0usize;

    for record in reader.records() {
        let record = record.context("Failed to read input row")?;
        let mut cells = pad_row(&record, width);
        let address = cells[columns.address].clone();

        match resolver.resolve(&address).await {
            Ok(Some(point)) => {
                debug!("{:?} -> ({}, {})", address, point.x, point.y);
                apply_point(&mut cells, point, &columns);
                resolved += 1;
            }
            Ok(None) => {
                debug!("{:?} matches neither address grammar, skipping", address);
            }
            Err(e) => {
                warn!("Could not resolve {:?}: {}", address, e);
            }
        }
        rows.push(cells);
    }

    let out_path = output_path(input);
    let mut writer = csv::Writer::from_path(&out_path)
        .with_context(|| format!("Cannot create output file {}", out_path.display()))?;
    writer.write_record(&headers)?;
    for row in &rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    info!(
        "Geocoded {}/{} rows into {}",
        resolved,
        rows.len(),
        out_path.display()
    );
    Ok(out_path)
}
