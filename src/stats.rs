use crate::models::{CategoryName, Dataset, Selection};
use serde::{Deserialize, Serialize};

/// Summary statistics for one category across all records. `total` saturates at `u64::MAX`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub category: CategoryName,
    pub count: usize,
    pub total: u64,
    pub min: Option<u64>,
    pub max: Option<u64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Per-category statistics, in category order.
pub fn category_summary(dataset: &Dataset) -> Vec<Summary> {
    let mut out = Vec::with_capacity(dataset.categories.len());
    for cat in &dataset.categories {
        let mut vals: Vec<u64> = dataset.records.iter().map(|r| r.count(cat)).collect();
        vals.sort_unstable();
        let count = vals.len();
        let total = vals.iter().fold(0u64, |acc, v| acc.saturating_add(*v));
        let min = vals.first().copied();
        let max = vals.last().copied();
        let mean = if count > 0 {
            Some(vals.iter().map(|v| *v as f64).sum::<f64>() / count as f64)
        } else {
            None
        };
        let median = if count == 0 {
            None
        } else if count % 2 == 1 {
            Some(vals[count / 2] as f64)
        } else {
            Some((vals[count / 2 - 1] as f64 + vals[count / 2] as f64) / 2.0)
        };
        out.push(Summary {
            category: cat.clone(),
            count,
            total,
            min,
            max,
            mean,
            median,
        });
    }
    out
}

/// Stacked total per record for the selected categories: `(year, total)` in source order.
pub fn yearly_totals(dataset: &Dataset, selection: &Selection) -> Vec<(i32, u64)> {
    dataset
        .records
        .iter()
        .map(|r| {
            let total = selection
                .iter()
                .fold(0u64, |acc, c| acc.saturating_add(r.count(c)));
            (r.year, total)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::YearRecord;
    use std::collections::BTreeMap;

    #[test]
    fn summary_and_totals() {
        let ds = Dataset {
            year_column: "Year".into(),
            categories: vec!["A".into(), "B".into()],
            records: vec![(1990, 1, 4), (1991, 3, 0), (1992, 2, 8), (1993, 6, 1)]
                .into_iter()
                .map(|(year, a, b)| YearRecord {
                    year,
                    counts: BTreeMap::from([("A".to_string(), a), ("B".to_string(), b)]),
                })
                .collect(),
        };
        let s = category_summary(&ds);
        assert_eq!(s[0].category, "A");
        assert_eq!(s[0].total, 12);
        assert_eq!(s[0].min, Some(1));
        assert_eq!(s[0].max, Some(6));
        assert_eq!(s[0].mean, Some(3.0));
        assert_eq!(s[0].median, Some(2.5));

        let sel = Selection::all(&ds.categories);
        assert_eq!(yearly_totals(&ds, &sel)[2], (1992, 10));
    }

    #[test]
    fn huge_counts_saturate_instead_of_overflowing() {
        let big = u64::MAX;
        let ds = Dataset {
            year_column: "Year".into(),
            categories: vec!["A".into(), "B".into()],
            records: vec![1990, 1991]
                .into_iter()
                .map(|year| YearRecord {
                    year,
                    counts: BTreeMap::from([("A".to_string(), big), ("B".to_string(), big)]),
                })
                .collect(),
        };
        let s = category_summary(&ds);
        assert_eq!(s[0].total, u64::MAX);
        assert_eq!(s[0].median, Some(big as f64));
        assert_eq!(s[0].mean, Some(big as f64));

        let sel = Selection::all(&ds.categories);
        assert_eq!(yearly_totals(&ds, &sel)[0], (1990, u64::MAX));
    }
}
