//! `csv` mode: convert every row of a headed CSV file.
//!
//! Input columns are passed through untouched and two output columns are appended (or
//! overwritten when a column of that name already exists). A row that fails to convert keeps
//! its input and gets empty output cells. Rows go through the core batch converters a chunk
//! at a time, so the `parallel` feature spreads each chunk across threads.
//!
//! Only I/O errors, CSV syntax errors, a header missing an input column, or two output
//! columns with the same name abort the run.

use crate::boundary::convert_pairs;
use crate::cli::{CsvArgs, Direction};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use geogrid_core::{BasePoint, Converter};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Rows handed to the batch converter at a time.
const CHUNK_ROWS: usize = 4096;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column(s) in header: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("Both output columns are named '{0}'")]
    DuplicateOutputColumn(String),

    #[error("Failed to open {}: {source}", .path.display())]
    File {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// What to read and where to write it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvJob {
    pub direction: Direction,
    pub input_columns: [String; 2],
    pub output_columns: [String; 2],
}

impl CsvJob {
    pub fn new(direction: Direction, first: &str, second: &str) -> Self {
        let output_columns = match direction {
            Direction::ToGrid => ["grid_x".to_string(), "grid_y".to_string()],
            Direction::ToLatlng => ["latitude".to_string(), "longitude".to_string()],
        };
        Self {
            direction,
            input_columns: [first.to_string(), second.to_string()],
            output_columns,
        }
    }

    pub fn with_output_columns(mut self, first: &str, second: &str) -> Self {
        self.output_columns = [first.to_string(), second.to_string()];
        self
    }

    pub fn from_args(args: &CsvArgs) -> Self {
        let job = match args.direction {
            Direction::ToGrid => Self::new(args.direction, &args.lat_col, &args.lng_col),
            Direction::ToLatlng => Self::new(args.direction, &args.x_col, &args.y_col),
        };
        match args.output_columns.as_deref() {
            Some([first, second]) => job.with_output_columns(first, second),
            _ => job,
        }
    }
}

/// Row counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CsvSummary {
    pub rows: usize,
    pub converted: usize,
    pub skipped: usize,
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

/// Streams `reader` to `writer`, converting each record.
pub fn convert_csv<R: Read, W: Write>(
    reader: R,
    writer: W,
    job: &CsvJob,
    converter: &Converter,
    base: &BasePoint,
) -> Result<CsvSummary, CsvError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    if job.output_columns[0] == job.output_columns[1] {
        return Err(CsvError::DuplicateOutputColumn(job.output_columns[0].clone()));
    }
    let headers = rdr.headers()?.clone();

    let [first_name, second_name] = &job.input_columns;
    let (first_idx, second_idx) = match (
        column_index(&headers, first_name),
        column_index(&headers, second_name),
    ) {
        (Some(a), Some(b)) => (a, b),
        (a, b) => {
            let mut missing = Vec::new();
            if a.is_none() {
                missing.push(first_name.clone());
            }
            if b.is_none() {
                missing.push(second_name.clone());
            }
            return Err(CsvError::MissingColumns { missing });
        }
    };

    let mut out_headers: Vec<String> = headers.iter().map(str::to_string).collect();
    let mut out_idx = [0usize; 2];
    for (slot, name) in out_idx.iter_mut().zip(&job.output_columns) {
        *slot = match column_index(&headers, name) {
            Some(i) => i,
            None => {
                out_headers.push(name.clone());
                out_headers.len() - 1
            }
        };
    }
    let width = out_headers.len();
    debug!(?out_headers, "CSV output header");

    let mut wtr = WriterBuilder::new().flexible(true).from_writer(writer);
    wtr.write_record(&out_headers)?;

    let mut summary = CsvSummary::default();
    let mut chunk: Vec<StringRecord> = Vec::with_capacity(CHUNK_ROWS);
    let mut records = rdr.into_records();
    loop {
        chunk.clear();
        for result in records.by_ref().take(CHUNK_ROWS) {
            chunk.push(result?);
        }
        if chunk.is_empty() {
            break;
        }

        let pairs = chunk.iter().map(|record| {
            (
                record.get(first_idx).unwrap_or(""),
                record.get(second_idx).unwrap_or(""),
            )
        });
        let results = convert_pairs(job.direction, pairs, converter, base);

        for (record, result) in chunk.iter().zip(results) {
            summary.rows += 1;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            if row.len() < width {
                row.resize(width, String::new());
            }
            match result {
                Ok(converted) => {
                    let [a, b] = converted.cells();
                    row[out_idx[0]] = a;
                    row[out_idx[1]] = b;
                    summary.converted += 1;
                }
                Err(e) => {
                    let line = record.position().map(|p| p.line()).unwrap_or(0);
                    warn!(line, error = %e, "Row not converted");
                    row[out_idx[0]].clear();
                    row[out_idx[1]].clear();
                    summary.skipped += 1;
                }
            }
            wtr.write_record(&row)?;
        }
    }

    wtr.flush()?;
    Ok(summary)
}

/// File-to-file wrapper around [`convert_csv`].
pub fn convert_csv_file(
    input: &Path,
    output: &Path,
    job: &CsvJob,
    converter: &Converter,
    base: &BasePoint,
) -> Result<CsvSummary, CsvError> {
    let reader = File::open(input).map_err(|source| CsvError::File {
        path: input.to_path_buf(),
        source,
    })?;
    let writer = File::create(output).map_err(|source| CsvError::File {
        path: output.to_path_buf(),
        source,
    })?;
    convert_csv(reader, writer, job, converter, base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_POINT;

    fn run(input: &str, job: &CsvJob) -> (String, CsvSummary) {
        let mut out = Vec::new();
        let summary = convert_csv(
            input.as_bytes(),
            &mut out,
            job,
            &Converter::default(),
            &DEFAULT_BASE_POINT,
        )
        .unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_appends_grid_columns() {
        let job = CsvJob::new(Direction::ToGrid, "lat", "lng");
        let (out, summary) = run("name,lat,lng\nhome,36.138755,139.388908\n", &job);
        assert_eq!(out, "name,lat,lng,grid_x,grid_y\nhome,36.138755,139.388908,-559,-395\n");
        assert_eq!(
            summary,
            CsvSummary {
                rows: 1,
                converted: 1,
                skipped: 0
            }
        );
    }

    #[test]
    fn test_failed_row_gets_empty_cells() {
        let job = CsvJob::new(Direction::ToGrid, "lat", "lng");
        let (out, summary) = run(
            "lat,lng\n,139.388908\n95,0\nabc,1\n36.138755,139.388908\n",
            &job,
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], ",139.388908,,");
        assert_eq!(lines[2], "95,0,,");
        assert_eq!(lines[3], "abc,1,,");
        assert_eq!(lines[4], "36.138755,139.388908,-559,-395");
        assert_eq!(summary.rows, 4);
        assert_eq!(summary.skipped, 3);
        assert_eq!(summary.converted, 1);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let job = CsvJob::new(Direction::ToGrid, "lat", "lng");
        let (out, summary) = run("lat,lng,note\n36.138755\n", &job);
        assert_eq!(out.lines().nth(1), Some("36.138755,,,,"));
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn test_existing_output_column_is_reused() {
        let job = CsvJob::new(Direction::ToGrid, "lat", "lng");
        let (out, _) = run("lat,lng,grid_x\n36.138755,139.388908,old\n", &job);
        assert_eq!(out, "lat,lng,grid_x,grid_y\n36.138755,139.388908,-559,-395\n");
    }

    #[test]
    fn test_custom_columns_to_latlng() {
        let job = CsvJob::new(Direction::ToLatlng, "bx", "bz").with_output_columns("lat", "lon");
        let (out, summary) = run("bx,bz\n-559,-395\n", &job);
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("bx,bz,lat,lon"));
        let cells: Vec<&str> = lines.next().unwrap().split(',').collect();
        let lat: f64 = cells[2].parse().unwrap();
        let lon: f64 = cells[3].parse().unwrap();
        assert!((lat - 36.138755).abs() < 1e-9);
        assert!((lon - 139.388908).abs() < 1e-9);
        assert_eq!(summary.converted, 1);
    }

    #[test]
    fn test_same_output_name_twice_is_rejected() {
        let job = CsvJob::new(Direction::ToGrid, "lat", "lng").with_output_columns("a", "a");
        let mut out = Vec::new();
        let err = convert_csv(
            "lat,lng\n36.1,139.3\n".as_bytes(),
            &mut out,
            &job,
            &Converter::default(),
            &DEFAULT_BASE_POINT,
        )
        .unwrap_err();
        assert!(matches!(err, CsvError::DuplicateOutputColumn(ref name) if name == "a"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_rows_beyond_one_chunk() {
        let job = CsvJob::new(Direction::ToGrid, "lat", "lng");
        let mut input = String::from("lat,lng\n");
        for i in 0..(CHUNK_ROWS + 10) {
            if i % 1000 == 7 {
                input.push_str(",139.388908\n");
            } else {
                input.push_str("36.138755,139.388908\n");
            }
        }
        let (out, summary) = run(&input, &job);
        let skipped = (0..CHUNK_ROWS + 10).filter(|i| i % 1000 == 7).count();
        assert_eq!(summary.rows, CHUNK_ROWS + 10);
        assert_eq!(summary.skipped, skipped);
        assert_eq!(out.lines().count(), CHUNK_ROWS + 11);
        assert_eq!(out.lines().last(), Some("36.138755,139.388908,-559,-395"));
        assert_eq!(out.lines().nth(8), Some(",139.388908,,"));
    }

    #[test]
    fn test_missing_columns_abort() {
        let job = CsvJob::new(Direction::ToGrid, "lat", "lng");
        let err = convert_csv(
            "latitude,lng\n1,2\n".as_bytes(),
            Vec::new(),
            &job,
            &Converter::default(),
            &DEFAULT_BASE_POINT,
        )
        .unwrap_err();
        match err {
            CsvError::MissingColumns { missing } => assert_eq!(missing, vec!["lat".to_string()]),
            other => panic!("expected missing columns, got {:?}", other),
        }
    }
}
