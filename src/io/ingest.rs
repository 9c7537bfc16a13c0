//! CSV ingest and normalization.
//!
//! This module turns an observation CSV into a clean `Dataset` that is safe
//! to fit.
//!
//! Design goals:
//! - **Strict schema** for the response column (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (no hidden reordering)
//! - **Separation of concerns**: no fitting logic here
//!
//! Schema: one row per observation. The response column is chosen by
//! `--response`, defaulting to `y` when present and otherwise to the last
//! column. An optional `id` column labels observations; every remaining
//! column is a predictor, in header order.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{Dataset, DatasetStats, FitConfig, Observation};
use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub id: Option<String>,
    pub message: String,
}

/// Ingest output: normalized dataset + stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub dataset: Dataset,
    pub stats: DatasetStats,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load and normalize an observation CSV.
pub fn load_dataset(path: &Path, config: &FitConfig) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    load_dataset_from_reader(file, config)
}

/// Load and normalize observation CSV data from any reader.
pub fn load_dataset_from_reader<R: Read>(
    reader: R,
    config: &FitConfig,
) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let columns: Vec<String> = headers.iter().map(normalize_header_name).collect();
    let layout = resolve_layout(&columns, config)?;

    let mut observations = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    id: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &layout, line) {
            Ok(observation) => observations.push(observation),
            Err(message) => row_errors.push(RowError {
                line,
                id: get_field(&record, layout.id_idx).map(str::to_string),
                message,
            }),
        }
    }

    let rows_used = observations.len();
    if rows_used == 0 {
        return Err(AppError::new(
            3,
            "No valid rows remain after normalization.",
        ));
    }

    let dataset = Dataset {
        predictor_names: layout.predictor_names,
        response_name: layout.response_name,
        observations,
    };

    let stats = DatasetStats::from_dataset(&dataset).ok_or_else(|| {
        AppError::new(3, "No valid observations remain after normalization.")
    })?;

    Ok(IngestedData {
        dataset,
        stats,
        row_errors,
        rows_read,
        rows_used,
    })
}

/// Resolved column layout for a run.
#[derive(Debug, Clone)]
struct ColumnLayout {
    id_idx: Option<usize>,
    response_idx: usize,
    response_name: String,
    predictor_idx: Vec<usize>,
    predictor_names: Vec<String>,
}

fn resolve_layout(columns: &[String], config: &FitConfig) -> Result<ColumnLayout, AppError> {
    if columns.is_empty() {
        return Err(AppError::new(2, "CSV has no columns."));
    }

    let id_idx = columns.iter().position(|c| c == "id");

    let response_idx = match &config.response {
        Some(name) => {
            let wanted = name.trim().to_ascii_lowercase();
            columns.iter().position(|c| *c == wanted).ok_or_else(|| {
                AppError::new(2, format!("Response column `{name}` not found in CSV."))
            })?
        }
        None => match columns.iter().position(|c| c == "y") {
            Some(idx) => idx,
            // Fall back to the last non-id column.
            None => columns
                .iter()
                .enumerate()
                .rev()
                .find(|(idx, _)| Some(*idx) != id_idx)
                .map(|(idx, _)| idx)
                .ok_or_else(|| {
                    AppError::new(2, "CSV has no response column (only `id`).")
                })?,
        },
    };

    if Some(response_idx) == id_idx {
        return Err(AppError::new(2, "Response column cannot be `id`."));
    }

    let mut predictor_idx = Vec::new();
    let mut predictor_names = Vec::new();
    for (idx, name) in columns.iter().enumerate() {
        if idx == response_idx || Some(idx) == id_idx {
            continue;
        }
        predictor_idx.push(idx);
        predictor_names.push(name.clone());
    }

    Ok(ColumnLayout {
        id_idx,
        response_idx,
        response_name: columns[response_idx].clone(),
        predictor_idx,
        predictor_names,
    })
}

fn parse_row(record: &StringRecord, layout: &ColumnLayout, line: usize) -> Result<Observation, String> {
    let id = get_field(record, layout.id_idx)
        .map(str::to_string)
        .unwrap_or_else(|| format!("row{line}"));

    let response = parse_f64(record, layout.response_idx, &layout.response_name)?;

    let mut predictors = Vec::with_capacity(layout.predictor_idx.len());
    for (idx, name) in layout.predictor_idx.iter().zip(&layout.predictor_names) {
        predictors.push(parse_f64(record, *idx, name)?);
    }

    Ok(Observation {
        id,
        predictors,
        response,
    })
}

fn get_field(record: &StringRecord, idx: Option<usize>) -> Option<&str> {
    let idx = idx?;
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_f64(record: &StringRecord, idx: usize, name: &str) -> Result<f64, String> {
    let raw = record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing `{name}` value."))?;
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("Invalid `{name}` value '{raw}'."))?;
    if !value.is_finite() {
        return Err(format!("Non-finite `{name}` value."));
    }
    Ok(value)
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "\u{feff}id"). If we don't strip it, column resolution
    // will incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}
