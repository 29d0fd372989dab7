use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category identifier: one of the non-year columns of the source table.
pub type CategoryName = String;

/// One source row: column name → raw cell text, in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    pub fn new(cells: Vec<(String, String)>) -> Self {
        Self { cells }
    }

    /// Raw text for `column`, if the row has that column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Column names in header order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A loaded table: header plus rows sharing that column set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Normalized per-year counts. Every known category has an entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct YearRecord {
    pub year: i32,
    pub counts: BTreeMap<CategoryName, u64>,
}

impl YearRecord {
    /// Count for `category`; categories outside the dataset read as `0`.
    pub fn count(&self, category: &str) -> u64 {
        self.counts.get(category).copied().unwrap_or(0)
    }
}

/// Result of series extraction: fixed category order plus one record per distinct year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dataset {
    pub year_column: String,
    pub categories: Vec<CategoryName>,
    pub records: Vec<YearRecord>,
}

impl Dataset {
    /// Distinct years in first-seen order.
    pub fn years(&self) -> Vec<i32> {
        let mut out: Vec<i32> = Vec::with_capacity(self.records.len());
        for r in &self.records {
            if !out.contains(&r.year) {
                out.push(r.year);
            }
        }
        out
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }
}

/// Currently checked categories, always in category enumeration order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection(Vec<CategoryName>);

impl Selection {
    /// Build a selection from arbitrary names, keeping only known categories in
    /// `categories` order.
    pub fn ordered<S: AsRef<str>>(categories: &[CategoryName], names: &[S]) -> Self {
        Self(
            categories
                .iter()
                .filter(|c| names.iter().any(|n| n.as_ref() == c.as_str()))
                .cloned()
                .collect(),
        )
    }

    pub fn all(categories: &[CategoryName]) -> Self {
        Self(categories.to_vec())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|c| c == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryName> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[CategoryName] {
        &self.0
    }
}
