//! Uploaded CSV tables
//!
//! An upload is only inspected: its header becomes the column list and the
//! first rows become a preview. Nothing is kept once the response is built.

use std::collections::{HashMap, HashSet};

use csv::ReaderBuilder;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Accepted filename suffix
pub const CSV_EXTENSION: &str = ".csv";

/// Errors for uploaded files
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("no file selected")]
    NoFileSelected,

    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("the file has no columns")]
    NoColumns,

    #[error("line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, UploadError>;

/// Column list plus leading rows of an uploaded table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePreview {
    #[serde(rename = "colonnes")]
    pub columns: Vec<String>,
    pub preview: Vec<Map<String, Value>>,
}

/// Reject missing names and anything not ending in `.csv`
pub fn validate_filename(filename: Option<&str>) -> Result<&str> {
    match filename {
        None | Some("") => Err(UploadError::NoFileSelected),
        Some(name) if name.ends_with(CSV_EXTENSION) => Ok(name),
        Some(name) => Err(UploadError::UnsupportedFormat(name.to_string())),
    }
}

/// Parse CSV bytes and keep the header plus the first `max_rows` records
///
/// Repeated header names are suffixed `.1`, `.2`, ... so every column keeps
/// its own key. Short records are padded with `null`; records longer than
/// the header are an error. Cell typing follows [`parse_cell`].
pub fn preview_csv(bytes: &[u8], max_rows: usize) -> Result<TablePreview> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let columns = dedupe_columns(reader.headers()?.iter());
    if columns.is_empty() || columns.iter().all(String::is_empty) {
        return Err(UploadError::NoColumns);
    }

    let mut preview = Vec::new();
    for record in reader.records().take(max_rows) {
        let record = record?;
        if record.len() > columns.len() {
            return Err(UploadError::RaggedRow {
                line: record.position().map_or(0, |p| p.line()),
                expected: columns.len(),
                found: record.len(),
            });
        }

        let mut row = Map::new();
        for (i, column) in columns.iter().enumerate() {
            let cell = record.get(i).map_or(Value::Null, parse_cell);
            row.insert(column.clone(), cell);
        }
        preview.push(row);
    }

    tracing::debug!(columns = columns.len(), rows = preview.len(), "parsed upload");
    Ok(TablePreview { columns, preview })
}

/// Rename repeated names to `name.1`, `name.2`, ... skipping any suffixed
/// name already taken by another column
fn dedupe_columns<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut next_suffix: HashMap<&'a str, usize> = HashMap::new();
    let mut columns = Vec::new();
    for name in names {
        let mut column = name.to_string();
        if taken.contains(&column) {
            let suffix = next_suffix.entry(name).or_insert(1);
            loop {
                column = format!("{}.{}", name, suffix);
                *suffix += 1;
                if !taken.contains(&column) {
                    break;
                }
            }
        }
        taken.insert(column.clone());
        columns.push(column);
    }
    columns
}

/// Type one CSV cell
///
/// Empty cells are `null`, `true`/`false` (any case) are booleans, then
/// integers and floats are tried before falling back to the raw string.
/// `nan` and `inf` parse as floats but JSON has no encoding for them, so
/// they come back as `null`.
fn parse_cell(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::from(int);
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        if let Some(number) = Number::from_f64(float) {
            return Value::Number(number);
        }
        return Value::Null;
    }
    Value::from(raw)
}
