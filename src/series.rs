//! Series extraction: raw table rows → normalized per-year records.

use crate::error::{ChartError, Result};
use crate::models::{CategoryName, Dataset, Table, YearRecord};
use ahash::AHashMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Column holding the year unless configured otherwise.
pub const DEFAULT_YEAR_COLUMN: &str = "Year";

/// What to do with a row whose year cell is not an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearPolicy {
    /// Fail extraction with [`ChartError::MalformedYear`].
    #[default]
    Strict,
    /// Drop the row and log a warning.
    Skip,
}

/// Options controlling extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractOptions {
    pub year_column: String,
    pub year_policy: YearPolicy,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            year_column: DEFAULT_YEAR_COLUMN.to_string(),
            year_policy: YearPolicy::Strict,
        }
    }
}

/// Parse a year cell. Accepts `"1990"` and integral numbers such as `"1990.0"`.
pub fn parse_year(raw: &str) -> Option<i32> {
    let s = raw.trim();
    if let Ok(y) = s.parse::<i32>() {
        return Some(y);
    }
    let f = s.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
        Some(f as i32)
    } else {
        None
    }
}

/// Coerce a count cell to a non-negative integer.
///
/// Empty, non-numeric and non-finite cells become `0`; negatives are clamped to `0`;
/// fractional values are rounded.
pub fn coerce_count(raw: &str) -> u64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0;
    }
    if let Ok(n) = s.parse::<u64>() {
        return n;
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f > 0.0 => f.round() as u64,
        Ok(f) if f.is_finite() => {
            if f < 0.0 {
                debug!("negative count `{}` clamped to 0", s);
            }
            0
        }
        _ => 0,
    }
}

/// Derive categories and per-year records from a loaded table.
///
/// Rows sharing a year collapse into one record at the first occurrence; their counts add up.
pub fn extract(table: &Table, opts: &ExtractOptions) -> Result<Dataset> {
    let first = table.rows.first().ok_or(ChartError::EmptyDataset)?;
    if !table.headers.iter().any(|h| h == &opts.year_column) {
        return Err(ChartError::MissingYearColumn(opts.year_column.clone()));
    }

    let categories: Vec<CategoryName> = first
        .columns()
        .filter(|c| *c != opts.year_column)
        .map(str::to_string)
        .collect();

    let mut records = Vec::with_capacity(table.rows.len());
    let mut slots: AHashMap<i32, usize> = AHashMap::new();
    for (idx, row) in table.rows.iter().enumerate() {
        let raw_year = row.get(&opts.year_column).unwrap_or("");
        let year = match (parse_year(raw_year), opts.year_policy) {
            (Some(y), _) => y,
            (None, YearPolicy::Strict) => {
                return Err(ChartError::MalformedYear {
                    row: idx + 1,
                    value: raw_year.to_string(),
                });
            }
            (None, YearPolicy::Skip) => {
                warn!("skipping data row {}: malformed year `{}`", idx + 1, raw_year);
                continue;
            }
        };

        let counts: BTreeMap<CategoryName, u64> = categories
            .iter()
            .map(|c| (c.clone(), row.get(c).map(coerce_count).unwrap_or(0)))
            .collect();
        match slots.get(&year) {
            Some(&slot) => {
                debug!("merging duplicate year {} from data row {}", year, idx + 1);
                let existing: &mut YearRecord = &mut records[slot];
                for (cat, n) in counts {
                    let total = existing.counts.entry(cat).or_insert(0);
                    *total = total.saturating_add(n);
                }
            }
            None => {
                slots.insert(year, records.len());
                records.push(YearRecord { year, counts });
            }
        }
    }

    if records.is_empty() {
        return Err(ChartError::EmptyDataset);
    }

    debug!(
        "extracted {} records over {} categories",
        records.len(),
        categories.len()
    );
    Ok(Dataset {
        year_column: opts.year_column.clone(),
        categories,
        records,
    })
}
