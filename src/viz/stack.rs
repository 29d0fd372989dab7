//! Stacked segment computation.

use crate::models::{CategoryName, Dataset, Selection};

/// One stacked segment: cumulative counts below and at the top of this category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub year: i32,
    pub lower: u64,
    pub upper: u64,
}

/// All segments for one selected category, one per record in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackedSeries {
    pub category: CategoryName,
    pub segments: Vec<Segment>,
}

/// Stack the selected categories per record.
///
/// Stack order is the dataset's category order restricted to the selection, regardless of
/// the order in which categories were toggled on.
pub fn stack_series(dataset: &Dataset, selection: &Selection) -> Vec<StackedSeries> {
    let keys: Vec<&CategoryName> = dataset
        .categories
        .iter()
        .filter(|c| selection.contains(c))
        .collect();

    let mut out: Vec<StackedSeries> = keys
        .iter()
        .map(|c| StackedSeries {
            category: (*c).clone(),
            segments: Vec::with_capacity(dataset.records.len()),
        })
        .collect();

    for r in &dataset.records {
        let mut base = 0u64;
        for (series, key) in out.iter_mut().zip(keys.iter()) {
            let top = base.saturating_add(r.count(key));
            series.segments.push(Segment {
                year: r.year,
                lower: base,
                upper: top,
            });
            base = top;
        }
    }
    out
}
