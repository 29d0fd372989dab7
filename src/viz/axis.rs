//! Axis layout: tick positions, tick labels and the two axis titles.
//!
//! All coordinates are relative to the top-left corner of the plot area, like the bars.

use num_format::ToFormattedString;

use super::scale::{BandScale, LinearScale};
use super::util::map_locale;
use crate::config::ChartConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Offset along the axis (x for the year axis, y for the count axis).
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTitle {
    pub text: String,
    pub x: f64,
    pub y: f64,
    /// Degrees, counter-clockwise positive.
    pub rotation: f64,
}

/// Both axes of the chart. Static with respect to the selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    /// Year ticks along the bottom edge, at band centres.
    pub x_ticks: Vec<Tick>,
    /// Count ticks along the left edge.
    pub y_ticks: Vec<Tick>,
    /// Horizontal extent of the x domain line.
    pub x_extent: (f64, f64),
    /// Vertical extent of the y domain line (top, bottom).
    pub y_extent: (f64, f64),
    pub x_title: AxisTitle,
    pub y_title: AxisTitle,
}

/// Lay out both axes from the scales. Year ticks show every `x_tick_every`-th year in
/// domain order, starting with the first.
pub fn build_axes(band: &BandScale, y: &LinearScale, config: &ChartConfig) -> Axes {
    let half = band.bandwidth() / 2.0;
    let x_ticks = band
        .domain()
        .iter()
        .enumerate()
        .filter(|(i, _)| i % config.x_tick_every.max(1) == 0)
        .filter_map(|(_, year)| {
            band.x(*year).map(|x| Tick {
                position: x + half,
                label: year.to_string(),
            })
        })
        .collect();

    let locale = map_locale(&config.locale);
    let y_ticks = y
        .ticks(config.y_tick_count)
        .into_iter()
        .map(|v| Tick {
            position: y.map(v),
            label: format_count(v, locale),
        })
        .collect();

    let w = config.inner_width();
    let h = config.inner_height();
    Axes {
        x_ticks,
        y_ticks,
        x_extent: (0.0, w),
        y_extent: (y.map(y.domain().1), y.map(y.domain().0)),
        x_title: AxisTitle {
            text: config.x_title.clone(),
            x: w / 2.0,
            y: h + config.margin.bottom as f64 - 10.0,
            rotation: 0.0,
        },
        // Rotated -90°: anchored halfway down the plot, 20px in from the surface's left edge.
        y_title: AxisTitle {
            text: config.y_title.clone(),
            x: -(config.margin.left as f64) + 20.0,
            y: h / 2.0,
            rotation: -90.0,
        },
    }
}

/// Whole numbers get locale thousands separators; fractional ticks keep one decimal.
fn format_count(v: f64, locale: &num_format::Locale) -> String {
    if v.fract() == 0.0 {
        (v as i64).to_formatted_string(locale)
    } else {
        format!("{:.1}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axes_for(years: &[i32]) -> Axes {
        let cfg = ChartConfig::default();
        let band = BandScale::new(years, cfg.inner_width(), cfg.band_padding);
        let y = LinearScale::vertical(cfg.y_max, cfg.inner_height());
        build_axes(&band, &y, &cfg)
    }

    #[test]
    fn every_fifth_year_is_labelled() {
        let years: Vec<i32> = (1990..=2024).collect();
        let a = axes_for(&years);
        let labels: Vec<&str> = a.x_ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["1990", "1995", "2000", "2005", "2010", "2015", "2020"]
        );
    }

    #[test]
    fn count_axis_spans_fixed_domain() {
        let a = axes_for(&[1990, 1991]);
        assert_eq!(a.y_ticks.first().map(|t| t.label.as_str()), Some("0"));
        assert_eq!(a.y_ticks.last().map(|t| t.label.as_str()), Some("28"));
        assert_eq!(a.y_ticks.last().map(|t| t.position), Some(0.0));
        assert_eq!(a.y_extent, (0.0, 410.0));
    }

    #[test]
    fn titles_are_static() {
        let a = axes_for(&[1990]);
        assert_eq!(a.x_title.text, "Year");
        assert_eq!(a.x_title.x, 345.0);
        assert_eq!(a.x_title.y, 470.0);
        assert_eq!(a.y_title.text, "Number of Events");
        assert_eq!(a.y_title.x, -60.0);
        assert_eq!(a.y_title.y, 205.0);
        assert_eq!(a.y_title.rotation, -90.0);
    }
}
