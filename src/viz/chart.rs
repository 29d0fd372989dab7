//! Chart renderer: stack the selection, reconcile the scene, lay out the axes.

use log::{debug, warn};

use super::axis::{Axes, build_axes};
use super::scale::{BandScale, LinearScale};
use super::scene::{BarGroup, BarRect, ReconcileReport, Scene};
use super::stack::stack_series;
use super::util::ColorAssignment;
use crate::config::ChartConfig;
use crate::error::{ChartError, Result};
use crate::models::{Dataset, Selection};

/// `Rendering` only while `recompute` runs. Seen from outside only after a panic mid-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderState {
    #[default]
    Idle,
    Rendering,
}

/// Everything a recompute reads. Borrowed so the caller keeps ownership.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub dataset: &'a Dataset,
    pub selection: &'a Selection,
    pub band: &'a BandScale,
    pub y: &'a LinearScale,
    pub colors: &'a ColorAssignment,
    pub config: &'a ChartConfig,
}

/// Result of one recompute: the scene after reconciliation plus static axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub groups: Vec<BarGroup>,
    pub axes: Axes,
    pub report: ReconcileReport,
    /// Years whose stacked total exceeds the count axis maximum.
    pub overflow_years: Vec<i32>,
}

impl Frame {
    pub fn rect_count(&self) -> usize {
        self.groups.iter().map(|g| g.rects.len()).sum()
    }
}

/// Owns the retained scene.
///
/// `recompute` takes `&mut self`, so two recomputes can never overlap. The state flag
/// guards against poisoning instead: a render that panics leaves the renderer in
/// [`RenderState::Rendering`] and later calls fail with [`ChartError::Reentrant`].
#[derive(Debug, Default)]
pub struct ChartRenderer {
    state: RenderState,
    scene: Scene,
}

impl ChartRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Recompute stacks for the selection and bring the scene up to date.
    pub fn recompute(&mut self, input: RenderInput<'_>) -> Result<Frame> {
        if self.state == RenderState::Rendering {
            return Err(ChartError::Reentrant);
        }
        self.state = RenderState::Rendering;

        let desired = desired_groups(&input);
        let report = self.scene.reconcile(desired);
        let axes = build_axes(input.band, input.y, input.config);
        let overflow_years = overflow_years(&self.scene, input.config.y_max);
        if !overflow_years.is_empty() {
            warn!(
                "totals exceed the count axis maximum ({}) in {} year(s); bars pass the plot top",
                input.config.y_max,
                overflow_years.len()
            );
        }
        debug!(
            "recompute: {} groups, {} rects (entered {:?}, exited {:?})",
            self.scene.groups().len(),
            self.scene.rect_count(),
            report.entered,
            report.exited
        );

        self.state = RenderState::Idle;
        Ok(Frame {
            groups: self.scene.groups().to_vec(),
            axes,
            report,
            overflow_years,
        })
    }
}

/// One group per selected category, one rect per record whose year is on the band scale.
fn desired_groups(input: &RenderInput<'_>) -> Vec<BarGroup> {
    let bw = input.band.bandwidth();
    stack_series(input.dataset, input.selection)
        .into_iter()
        .map(|series| {
            let rects = series
                .segments
                .iter()
                .filter_map(|s| {
                    let x = input.band.x(s.year)?;
                    let top = input.y.map(s.upper as f64);
                    let bottom = input.y.map(s.lower as f64);
                    Some(BarRect {
                        year: s.year,
                        lower: s.lower,
                        upper: s.upper,
                        x,
                        y: top,
                        width: bw,
                        height: bottom - top,
                    })
                })
                .collect();
            BarGroup {
                color: input.colors.color(&series.category),
                key: series.category,
                rects,
            }
        })
        .collect()
}

fn overflow_years(scene: &Scene, y_max: f64) -> Vec<i32> {
    let mut out: Vec<i32> = Vec::new();
    if let Some(top) = scene.groups().last() {
        for r in &top.rects {
            if r.upper as f64 > y_max && !out.contains(&r.year) {
                out.push(r.year);
            }
        }
    }
    out
}
