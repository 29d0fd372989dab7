//! Chart session: the one object that owns all chart state.
//!
//! A UI layer forwards toggle events to [`ChartSession::toggle`] (or
//! [`ChartSession::set_checked`]); the session updates the legend and immediately
//! recomputes the frame. There is no other mutable state.

use log::info;

use crate::config::ChartConfig;
use crate::error::{ChartError, Result};
use crate::models::{Dataset, Selection};
use crate::viz::chart::{ChartRenderer, Frame, RenderInput};
use crate::viz::legend::Legend;
use crate::viz::scale::{BandScale, LinearScale};
use crate::viz::util::ColorAssignment;

#[derive(Debug)]
pub struct ChartSession {
    dataset: Dataset,
    config: ChartConfig,
    colors: ColorAssignment,
    band: BandScale,
    y: LinearScale,
    legend: Legend,
    renderer: ChartRenderer,
    frame: Frame,
}

impl ChartSession {
    /// Build scales, colours and legend for `dataset` and draw the initial (empty) frame.
    pub fn new(dataset: Dataset, config: ChartConfig) -> Result<Self> {
        config.validate()?;
        let colors = ColorAssignment::new(&dataset.categories, config.palette);
        let band = BandScale::new(&dataset.years(), config.inner_width(), config.band_padding);
        let y = LinearScale::vertical(config.y_max, config.inner_height());
        let legend = Legend::new(&dataset.categories, &colors);
        let mut renderer = ChartRenderer::new();
        let selection = legend.selection();
        let frame = renderer.recompute(RenderInput {
            dataset: &dataset,
            selection: &selection,
            band: &band,
            y: &y,
            colors: &colors,
            config: &config,
        })?;
        info!(
            "session ready: {} categories, {} years",
            dataset.categories.len(),
            band.domain().len()
        );
        Ok(Self {
            dataset,
            config,
            colors,
            band,
            y,
            legend,
            renderer,
            frame,
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn colors(&self) -> &ColorAssignment {
        &self.colors
    }

    pub fn band(&self) -> &BandScale {
        &self.band
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    /// Register a listener on the legend; fired on every toggle flip.
    pub fn on_change<F: FnMut() + 'static>(&mut self, f: F) {
        self.legend.on_change(f);
    }

    /// Current selection, read from the legend.
    pub fn selection(&self) -> Selection {
        self.legend.selection()
    }

    /// Last computed frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Re-read the selection and redraw.
    pub fn recompute(&mut self) -> Result<&Frame> {
        let selection = self.legend.selection();
        self.frame = self.renderer.recompute(RenderInput {
            dataset: &self.dataset,
            selection: &selection,
            band: &self.band,
            y: &self.y,
            colors: &self.colors,
            config: &self.config,
        })?;
        Ok(&self.frame)
    }

    /// Flip one category and redraw.
    pub fn toggle(&mut self, category: &str) -> Result<&Frame> {
        self.legend.toggle(category)?;
        self.recompute()
    }

    /// Set one category; redraws only when the state changed. Returns whether it did.
    pub fn set_checked(&mut self, category: &str, checked: bool) -> Result<bool> {
        let changed = self.legend.set_checked(category, checked)?.is_some();
        if changed {
            self.recompute()?;
        }
        Ok(changed)
    }

    /// Replace the whole selection. Each flip redraws, as if clicked one by one.
    pub fn set_selection(&mut self, selection: &Selection) -> Result<()> {
        if let Some(unknown) = selection.iter().find(|c| !self.dataset.has_category(c)) {
            return Err(ChartError::UnknownCategory(unknown.clone()));
        }
        let categories = self.dataset.categories.clone();
        for c in &categories {
            self.set_checked(c, selection.contains(c))?;
        }
        Ok(())
    }

    pub fn select_all(&mut self) -> Result<&Frame> {
        self.legend.select_all();
        self.recompute()
    }

    pub fn clear(&mut self) -> Result<&Frame> {
        self.legend.clear();
        self.recompute()
    }
}
