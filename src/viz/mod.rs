//! Visualization: scales, stacking, scene reconciliation, axes, legend and SVG output.
//!
//! - Band scale over years, linear count scale with a fixed `[0, y_max]` domain
//! - Stack order follows the dataset's category order, filtered by the selection
//! - Keyed enter/update/exit diff of bar groups between recomputes
//! - SVG output through the plotters drawing API

pub mod axis;
pub mod chart;
pub mod legend;
pub mod scale;
pub mod scene;
pub mod stack;
pub mod svg;
pub mod util;

pub use axis::{Axes, AxisTitle, Tick};
pub use chart::{ChartRenderer, Frame, RenderState};
pub use legend::{Legend, LegendItem, SelectionChanged};
pub use scale::{BandScale, LinearScale};
pub use scene::{BarGroup, BarRect, ReconcileReport, Scene};
pub use stack::{Segment, StackedSeries, stack_series};
pub use util::{ColorAssignment, Palette};

use crate::config::ChartConfig;
use crate::error::Result;
use crate::models::Dataset;
use crate::session::ChartSession;
use std::path::Path;

/// One call: select `categories` (names outside the dataset are an error), render, write SVG.
pub fn plot_stacked_bars<P: AsRef<Path>, S: AsRef<str>>(
    dataset: &Dataset,
    categories: &[S],
    out_path: P,
    config: &ChartConfig,
) -> Result<Frame> {
    let mut session = ChartSession::new(dataset.clone(), config.clone())?;
    for c in categories {
        session.set_checked(c.as_ref(), true)?;
    }
    svg::render_svg_file(session.frame(), session.config(), out_path)?;
    Ok(session.frame().clone())
}
