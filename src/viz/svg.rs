//! Draw a [`Frame`] onto a plotters drawing area, and SVG file/string helpers.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontTransform};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_svg::SVGBackend;
use std::path::Path;

use super::chart::Frame;
use crate::config::ChartConfig;
use crate::error::{ChartError, Result};

const TICK_LEN: i32 = 6;
const TICK_PAD: i32 = 3;
/// The SVG backend writes `font-size` as the font's size divided by this factor.
const SVG_FONT_SCALE: f64 = 1.24;

/// Font whose emitted SVG `font-size` equals `px`.
fn font_px<'a>(family: &'a str, px: f64) -> FontDesc<'a> {
    (family, px * SVG_FONT_SCALE).into_font()
}

fn render_err<E: std::fmt::Debug>(e: E) -> ChartError {
    ChartError::Render(format!("{:?}", e))
}

/// Draw background, bars, axes and titles. `root` must cover the full surface.
pub fn draw_frame<DB>(
    root: &DrawingArea<DB, Shift>,
    frame: &Frame,
    config: &ChartConfig,
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(render_err)?;

    let ox = config.margin.left as f64;
    let oy = config.margin.top as f64;
    let px = |x: f64| (ox + x).round() as i32;
    let py = |y: f64| (oy + y).round() as i32;

    // Bars
    for group in &frame.groups {
        let style = group.color.filled();
        for r in &group.rects {
            let rect = Rectangle::new(
                [(px(r.x), py(r.y)), (px(r.x + r.width), py(r.y + r.height))],
                style,
            );
            root.draw(&rect).map_err(render_err)?;
        }
    }

    let axes = &frame.axes;
    let line = BLACK.stroke_width(1);
    let tick_font = font_px(&config.font_family, config.tick_font_size);

    // X axis: domain line along the bottom of the plot area, ticks pointing down.
    let x_base = py(axes.y_extent.1);
    root.draw(&PathElement::new(
        vec![(px(axes.x_extent.0), x_base), (px(axes.x_extent.1), x_base)],
        line,
    ))
    .map_err(render_err)?;
    let x_label_style = TextStyle::from(tick_font.clone())
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    for t in &axes.x_ticks {
        let x = px(t.position);
        root.draw(&PathElement::new(vec![(x, x_base), (x, x_base + TICK_LEN)], line))
            .map_err(render_err)?;
        root.draw(&Text::new(
            t.label.clone(),
            (x, x_base + TICK_LEN + TICK_PAD),
            x_label_style.clone(),
        ))
        .map_err(render_err)?;
    }

    // Y axis: domain line along the left edge, ticks pointing left.
    let y_base = px(0.0);
    root.draw(&PathElement::new(
        vec![(y_base, py(axes.y_extent.0)), (y_base, py(axes.y_extent.1))],
        line,
    ))
    .map_err(render_err)?;
    let y_label_style = TextStyle::from(tick_font)
        .color(&BLACK)
        .pos(Pos::new(HPos::Right, VPos::Center));
    for t in &axes.y_ticks {
        let y = py(t.position);
        root.draw(&PathElement::new(vec![(y_base - TICK_LEN, y), (y_base, y)], line))
            .map_err(render_err)?;
        root.draw(&Text::new(
            t.label.clone(),
            (y_base - TICK_LEN - TICK_PAD, y),
            y_label_style.clone(),
        ))
        .map_err(render_err)?;
    }

    // Titles
    for title in [&axes.x_title, &axes.y_title] {
        let mut font = font_px(&config.font_family, config.title_font_size);
        if title.rotation == -90.0 {
            font = font.transform(FontTransform::Rotate270);
        }
        let style = TextStyle::from(font)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        root.draw(&Text::new(
            title.text.clone(),
            (px(title.x), py(title.y)),
            style,
        ))
        .map_err(render_err)?;
    }

    Ok(())
}

/// Render a frame to an SVG document in memory.
pub fn render_svg_string(frame: &Frame, config: &ChartConfig) -> Result<String> {
    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, (config.width, config.height))
            .into_drawing_area();
        draw_frame(&root, frame, config)?;
        root.present().map_err(render_err)?;
    }
    Ok(buffer)
}

/// Render a frame to an SVG file.
pub fn render_svg_file<P: AsRef<Path>>(
    frame: &Frame,
    config: &ChartConfig,
    out_path: P,
) -> Result<()> {
    let svg = render_svg_string(frame, config)?;
    std::fs::write(out_path, svg)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dataset, Selection, YearRecord};
    use crate::session::ChartSession;
    use std::collections::BTreeMap;

    fn session() -> ChartSession {
        let ds = Dataset {
            year_column: "Year".into(),
            categories: vec!["Flood".into(), "Storm".into()],
            records: (1990..1995)
                .map(|year| YearRecord {
                    year,
                    counts: BTreeMap::from([("Flood".to_string(), 2), ("Storm".to_string(), 3)]),
                })
                .collect(),
        };
        ChartSession::new(ds, ChartConfig::default()).unwrap()
    }

    /// Trimmed contents of every `<text>` node, in document order.
    fn text_nodes(svg: &str) -> Vec<String> {
        svg.split("<text")
            .skip(1)
            .filter_map(|chunk| {
                let start = chunk.find('>')? + 1;
                let end = chunk.find("</text>")?;
                Some(chunk[start..end].trim().to_string())
            })
            .collect()
    }

    #[test]
    fn svg_contains_titles_and_ticks() {
        let s = session();
        let svg = render_svg_string(s.frame(), s.config()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Number of Events"));
        let texts = text_nodes(&svg);
        assert!(texts.iter().any(|t| t == "Year"));
        assert!(texts.iter().any(|t| t == "Number of Events"));
        assert!(texts.iter().any(|t| t == "1990"));
        assert!(texts.iter().any(|t| t == "28"));
        assert!(!texts.iter().any(|t| t == "1991"));
    }

    #[test]
    fn selected_colors_show_up() {
        let mut s = session();
        s.set_selection(&Selection::all(&s.dataset().categories)).unwrap();
        let svg = render_svg_string(s.frame(), s.config()).unwrap();
        assert!(svg.to_ascii_uppercase().contains("#1F77B4"));
        assert!(svg.to_ascii_uppercase().contains("#FF7F0E"));
    }

    #[test]
    fn font_sizes_match_config_in_pixels() {
        let s = session();
        let svg = render_svg_string(s.frame(), s.config()).unwrap();
        let sizes: Vec<f64> = svg
            .split("font-size=\"")
            .skip(1)
            .filter_map(|chunk| chunk.split('"').next()?.parse().ok())
            .collect();
        assert!(!sizes.is_empty());
        for size in sizes {
            assert!(
                (size - 12.0).abs() < 1e-6 || (size - 14.0).abs() < 1e-6,
                "unexpected font-size {size}"
            );
        }
    }
}
