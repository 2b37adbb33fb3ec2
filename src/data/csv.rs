//! Numeric CSV loading.
//!
//! Supported format:
//! - UTF-8, comma-separated
//! - Optional header row, detected when the first row has any non-numeric,
//!   non-empty cell
//! - Double-quoted fields with embedded commas and `""` escapes

use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};

/// How the trailing column(s) of each row become a target vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LabelMode {
    /// Last column is an integer class index; one-hot encoded to `n_classes`.
    ClassIndex { n_classes: usize },
    /// Last `n_label_cols` columns are the target vector as-is.
    Columns { n_label_cols: usize },
}

/// Reads and parses a CSV file into `(inputs, targets)`.
pub fn load_csv<P: AsRef<Path>>(path: P, label_mode: LabelMode) -> Result<(Vec<Vec<f64>>, Vec<Vec<f64>>)> {
    let bytes = std::fs::read(path)?;
    parse_csv(&bytes, label_mode)
}

/// Parses CSV bytes into `(inputs, targets)` of equal length.
pub fn parse_csv(data: &[u8], label_mode: LabelMode) -> Result<(Vec<Vec<f64>>, Vec<Vec<f64>>)> {
    let text = std::str::from_utf8(data)
        .map_err(|_| Error::Csv("file is not valid UTF-8".into()))?;

    let mut inputs: Vec<Vec<f64>> = Vec::new();
    let mut targets: Vec<Vec<f64>> = Vec::new();
    // File line number (1-based) of each parsed row.
    let mut line_nums: Vec<usize> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || (idx == 0 && is_header(line)) {
            continue;
        }
        let row_num = idx + 1;
        let cells = parse_csv_row(line);

        let n_label_cols = match label_mode {
            LabelMode::ClassIndex { .. } => 1,
            LabelMode::Columns { n_label_cols } => n_label_cols,
        };
        if cells.len() < n_label_cols + 1 {
            return Err(Error::Csv(format!(
                "line {row_num}: expected at least {} columns, got {}",
                n_label_cols + 1,
                cells.len()
            )));
        }
        let (feature_cells, label_cells) = cells.split_at(cells.len() - n_label_cols);
        let feats = parse_floats(feature_cells, row_num)?;

        let label = match label_mode {
            LabelMode::ClassIndex { n_classes } => {
                let cell = label_cells[0].trim();
                let class_idx: usize = cell.parse().map_err(|_| {
                    Error::Csv(format!("line {row_num}: class index '{cell}' is not a non-negative integer"))
                })?;
                if class_idx >= n_classes {
                    return Err(Error::Csv(format!(
                        "line {row_num}: class index {class_idx} >= n_classes {n_classes}"
                    )));
                }
                let mut one_hot = vec![0.0; n_classes];
                one_hot[class_idx] = 1.0;
                one_hot
            }
            LabelMode::Columns { .. } => parse_floats(label_cells, row_num)?,
        };

        inputs.push(feats);
        targets.push(label);
        line_nums.push(row_num);
    }

    if inputs.is_empty() {
        return Err(Error::Csv("no data rows after parsing".into()));
    }

    let n_feats = inputs[0].len();
    if let Some((i, row)) = inputs.iter().enumerate().find(|(_, r)| r.len() != n_feats) {
        return Err(Error::Csv(format!(
            "line {}: feature count {} does not match line {}'s {}",
            line_nums[i],
            row.len(),
            line_nums[0],
            n_feats
        )));
    }

    Ok((inputs, targets))
}

fn is_header(line: &str) -> bool {
    parse_csv_row(line).iter().any(|c| {
        let t = c.trim();
        !t.is_empty() && t.parse::<f64>().is_err()
    })
}

/// Splits one row on commas outside double quotes.
fn parse_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}

fn parse_floats(cells: &[String], row_num: usize) -> Result<Vec<f64>> {
    cells.iter()
        .map(|c| {
            c.trim().parse::<f64>().map_err(|_| {
                Error::Csv(format!("line {row_num}: '{c}' is not a valid number"))
            })
        })
        .collect()
}
