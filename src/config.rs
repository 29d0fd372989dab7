//! Chart configuration: surface size, margins, fixed count domain and labels.
//!
//! Every field has a default (800×500, margins 20/30/70/80, count axis fixed to
//! `[0, 28]`). A JSON file may override any subset:
//!
//! ```json
//! { "width": 1000, "margin": { "left": 90 }, "palette": "office" }
//! ```

use crate::error::{ChartError, Result};
use crate::series::{ExtractOptions, YearPolicy, DEFAULT_YEAR_COLUMN};
use crate::viz::util::Palette;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Space between the surface edge and the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Margins {
    /// `left + right`, saturating.
    pub fn horizontal(&self) -> u32 {
        self.left.saturating_add(self.right)
    }

    /// `top + bottom`, saturating.
    pub fn vertical(&self) -> u32 {
        self.top.saturating_add(self.bottom)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20,
            right: 30,
            bottom: 70,
            left: 80,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub margin: Margins,
    /// Upper bound of the count axis. Not derived from data.
    pub y_max: f64,
    /// Inner and outer padding of the year bands, as a fraction of the step.
    pub band_padding: f64,
    /// Label every n-th year on the horizontal axis.
    pub x_tick_every: usize,
    /// Approximate number of count-axis ticks.
    pub y_tick_count: usize,
    pub x_title: String,
    pub y_title: String,
    pub palette: Palette,
    /// Locale tag for tick labels (`en`, `de`, …).
    pub locale: String,
    pub font_family: String,
    /// Tick label size in CSS pixels, as written to the SVG `font-size` attribute.
    pub tick_font_size: f64,
    /// Axis title size in CSS pixels.
    pub title_font_size: f64,
    pub year_column: String,
    pub year_policy: YearPolicy,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 500,
            margin: Margins::default(),
            y_max: 28.0,
            band_padding: 0.1,
            x_tick_every: 5,
            y_tick_count: 10,
            x_title: "Year".to_string(),
            y_title: "Number of Events".to_string(),
            palette: Palette::default(),
            locale: "en".to_string(),
            font_family: "sans-serif".to_string(),
            tick_font_size: 12.0,
            title_font_size: 14.0,
            year_column: DEFAULT_YEAR_COLUMN.to_string(),
            year_policy: YearPolicy::default(),
        }
    }
}

impl ChartConfig {
    /// Load a (partial) configuration from a JSON file; missing fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let txt = fs::read_to_string(path)?;
        let cfg: Self = serde_json::from_str(&txt)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject layouts that leave no plot area or an unusable axis.
    pub fn validate(&self) -> Result<()> {
        if self.margin.horizontal() >= self.width {
            return Err(ChartError::Config(format!(
                "horizontal margins ({} + {}) leave no room in width {}",
                self.margin.left, self.margin.right, self.width
            )));
        }
        if self.margin.vertical() >= self.height {
            return Err(ChartError::Config(format!(
                "vertical margins ({} + {}) leave no room in height {}",
                self.margin.top, self.margin.bottom, self.height
            )));
        }
        if !(self.y_max.is_finite() && self.y_max > 0.0) {
            return Err(ChartError::Config(format!(
                "y_max must be a positive number, got {}",
                self.y_max
            )));
        }
        if !(0.0..1.0).contains(&self.band_padding) {
            return Err(ChartError::Config(format!(
                "band_padding must be in [0, 1), got {}",
                self.band_padding
            )));
        }
        if self.x_tick_every == 0 {
            return Err(ChartError::Config("x_tick_every must be at least 1".into()));
        }
        Ok(())
    }

    /// Width of the plot area (surface minus horizontal margins).
    pub fn inner_width(&self) -> f64 {
        self.width.saturating_sub(self.margin.horizontal()) as f64
    }

    /// Height of the plot area (surface minus vertical margins).
    pub fn inner_height(&self) -> f64 {
        self.height.saturating_sub(self.margin.vertical()) as f64
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            year_column: self.year_column.clone(),
            year_policy: self.year_policy,
        }
    }
}
