use crate::error::{HiggsError, Result};
use std::path::Path;

/// A loaded tabular dataset: one feature row and one binary label per event.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<f64>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Width of the feature rows (0 for an empty dataset).
    pub fn n_features(&self) -> usize {
        self.features.first().map_or(0, |r| r.len())
    }
}

/// Loads the HIGGS-format CSV: each row is `label, f1..fN` with no header.
/// The label must be 0.0 or 1.0 (signal = 1); every row must have the same
/// width as the first. `max_rows` caps how much of the file is read, since
/// the full dataset has 11M rows and the tutorial trains on a subsample.
pub fn load_csv(path: &Path, max_rows: Option<usize>) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    let mut features: Vec<Vec<f64>> = Vec::new();
    let mut labels: Vec<f64> = Vec::new();
    let mut expected_width: Option<usize> = None;

    for (row_idx, record) in reader.records().enumerate() {
        if let Some(cap) = max_rows {
            if features.len() >= cap {
                break;
            }
        }
        let record = record?;
        if record.len() < 2 {
            return Err(HiggsError::data(format!(
                "row {}: expected at least 2 columns (label + features), got {}",
                row_idx + 1,
                record.len()
            )));
        }

        let label: f64 = parse_cell(record.get(0).unwrap_or(""), row_idx)?;
        if label != 0.0 && label != 1.0 {
            return Err(HiggsError::data(format!(
                "row {}: label {} is not binary (expected 0.0 or 1.0)",
                row_idx + 1,
                label
            )));
        }

        let row: Vec<f64> = record
            .iter()
            .skip(1)
            .map(|cell| parse_cell(cell, row_idx))
            .collect::<Result<_>>()?;

        match expected_width {
            None => expected_width = Some(row.len()),
            Some(w) if w != row.len() => {
                return Err(HiggsError::data(format!(
                    "row {}: feature count {} does not match first row's {}",
                    row_idx + 1,
                    row.len(),
                    w
                )));
            }
            Some(_) => {}
        }

        features.push(row);
        labels.push(label);
    }

    if features.is_empty() {
        return Err(HiggsError::data("CSV contains no data rows"));
    }

    tracing::info!(
        rows = features.len(),
        n_features = features[0].len(),
        signal_fraction = labels.iter().sum::<f64>() / labels.len() as f64,
        "dataset loaded"
    );

    Ok(Dataset { features, labels })
}

fn parse_cell(cell: &str, row_idx: usize) -> Result<f64> {
    cell.trim().parse::<f64>().map_err(|_| {
        HiggsError::data(format!("row {}: '{}' is not a valid number", row_idx + 1, cell))
    })
}
