//! Retained drawable state and the keyed diff that updates it.
//!
//! A [`Scene`] holds one [`BarGroup`] per rendered category. [`Scene::reconcile`] takes the
//! desired groups for the current selection, creates groups for new keys, replaces the
//! geometry of retained keys and drops keys that are no longer wanted.

use crate::models::CategoryName;
use ahash::{AHashMap, AHashSet};
use plotters::prelude::RGBColor;

/// One bar segment in plot-area coordinates (origin at the top-left of the plot area).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRect {
    pub year: i32,
    pub lower: u64,
    pub upper: u64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// All segments of one category, drawn with a single fill colour.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    pub key: CategoryName,
    pub color: RGBColor,
    pub rects: Vec<BarRect>,
}

/// Which keys a reconcile pass created, kept, and removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub entered: Vec<CategoryName>,
    pub updated: Vec<CategoryName>,
    pub exited: Vec<CategoryName>,
}

impl ReconcileReport {
    pub fn is_noop(&self) -> bool {
        self.entered.is_empty() && self.exited.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    groups: Vec<BarGroup>,
    index: AHashMap<CategoryName, usize>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[BarGroup] {
        &self.groups
    }

    pub fn group(&self, key: &str) -> Option<&BarGroup> {
        self.index.get(key).map(|i| &self.groups[*i])
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.key.as_str())
    }

    pub fn rect_count(&self) -> usize {
        self.groups.iter().map(|g| g.rects.len()).sum()
    }

    /// Bring the scene in line with `desired`. Group order follows `desired`.
    pub fn reconcile(&mut self, desired: Vec<BarGroup>) -> ReconcileReport {
        let wanted: AHashSet<&str> = desired.iter().map(|g| g.key.as_str()).collect();
        let mut report = ReconcileReport::default();

        // exit
        let mut retained: AHashMap<CategoryName, BarGroup> = AHashMap::new();
        for g in self.groups.drain(..) {
            if wanted.contains(g.key.as_str()) {
                retained.insert(g.key.clone(), g);
            } else {
                report.exited.push(g.key);
            }
        }

        // enter + update
        let mut next = Vec::with_capacity(desired.len());
        for want in desired {
            match retained.remove(&want.key) {
                Some(mut existing) => {
                    existing.color = want.color;
                    existing.rects = want.rects;
                    report.updated.push(existing.key.clone());
                    next.push(existing);
                }
                None => {
                    report.entered.push(want.key.clone());
                    next.push(want);
                }
            }
        }

        self.groups = next;
        self.index = self
            .groups
            .iter()
            .enumerate()
            .map(|(i, g)| (g.key.clone(), i))
            .collect();
        report
    }
}
