/*!
 * Desktop viewer for yearstack - stacked yearly event counts by category
 *
 * - Open a CSV/TSV table (or pass its path as the first argument)
 * - One checkbox + colour swatch + label per category
 * - Every checkbox change recomputes the stack and repaints the chart
 * - Export the current chart as SVG
 */

use anyhow::{Context, Result};
use eframe::egui;
use egui::epaint::TextShape;
use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};
use std::path::{Path, PathBuf};
use yearstack::viz::svg;
use yearstack::{ChartConfig, ChartSession, series, storage};

fn main() -> Result<(), eframe::Error> {
    // Enable logging for better debugging
    env_logger::init();

    let initial = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 620.0])
            .with_min_inner_size([700.0, 400.0])
            .with_title("yearstack"),
        ..Default::default()
    };

    eframe::run_native(
        "yearstack",
        options,
        Box::new(move |_cc| Ok(Box::new(YearstackApp::new(initial)))),
    )
}

/// Main application state
struct YearstackApp {
    config: ChartConfig,
    session: Option<ChartSession>,
    source: Option<PathBuf>,

    // UI state
    status_message: String,
    error_message: String,
}

impl YearstackApp {
    fn new(initial: Option<PathBuf>) -> Self {
        let mut app = Self {
            config: ChartConfig::default(),
            session: None,
            source: None,
            status_message: String::new(),
            error_message: String::new(),
        };
        if let Some(path) = initial {
            app.open(&path);
        }
        app
    }

    /// Load a table and start a fresh session. A failure leaves no chart and shows the error.
    fn open(&mut self, path: &Path) {
        match open_session(path, &self.config) {
            Ok(session) => {
                self.status_message = format!(
                    "Loaded {} rows, {} categories from {}",
                    session.dataset().records.len(),
                    session.dataset().categories.len(),
                    path.display()
                );
                self.error_message.clear();
                self.session = Some(session);
                self.source = Some(path.to_path_buf());
            }
            Err(err) => {
                self.session = None;
                self.source = None;
                self.status_message.clear();
                self.error_message = format!("{:#}", err);
            }
        }
    }

    fn export_svg(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let start_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let Some(path) = rfd::FileDialog::new()
            .add_filter("SVG", &["svg"])
            .set_directory(start_dir)
            .set_file_name("yearstack_chart.svg")
            .save_file()
        else {
            return;
        };
        match svg::render_svg_file(session.frame(), session.config(), &path) {
            Ok(()) => {
                self.status_message = format!("Wrote chart to {}", path.display());
                self.error_message.clear();
            }
            Err(err) => self.error_message = format!("Failed to write chart: {}", err),
        }
    }

    fn legend_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Categories");
        ui.add_space(5.0);

        let Some(session) = self.session.as_mut() else {
            ui.label("Open a table to begin.");
            return;
        };

        // Snapshot the controls; the session owns the real state.
        let items: Vec<(String, Color32, bool)> = session
            .legend()
            .items()
            .iter()
            .map(|i| (i.category.clone(), to_color32(i.color), i.checked))
            .collect();

        let mut error = None;
        for (name, color, mut checked) in items {
            ui.horizontal(|ui| {
                let (swatch, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
                ui.painter().rect_filled(swatch, 0.0, color);
                if ui.checkbox(&mut checked, name.as_str()).changed()
                    && let Err(err) = session.set_checked(&name, checked)
                {
                    error = Some(err.to_string());
                }
            });
        }

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui.button("Select all").clicked()
                && let Err(err) = session.select_all()
            {
                error = Some(err.to_string());
            }
            if ui.button("Clear").clicked()
                && let Err(err) = session.clear()
            {
                error = Some(err.to_string());
            }
        });

        if let Some(err) = error {
            self.error_message = err;
        }
    }
}

fn open_session(path: &Path, config: &ChartConfig) -> Result<ChartSession> {
    let table = storage::load_table(path, &Default::default())
        .with_context(|| format!("Failed to load {}", path.display()))?;
    let dataset = series::extract(&table, &config.extract_options())
        .with_context(|| format!("Failed to read series from {}", path.display()))?;
    Ok(ChartSession::new(dataset, config.clone())?)
}

fn to_color32(c: plotters::prelude::RGBColor) -> Color32 {
    Color32::from_rgb(c.0, c.1, c.2)
}

/// Paint the current frame, scaled uniformly to fit `ui`'s available space.
fn paint_chart(ui: &mut egui::Ui, session: &ChartSession) {
    let config = session.config();
    let frame = session.frame();
    let avail = ui.available_size();
    let scale = (avail.x / config.width as f32)
        .min(avail.y / config.height as f32)
        .max(0.1);
    let size = Vec2::new(config.width as f32 * scale, config.height as f32 * scale);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min;
    let ox = config.margin.left as f32;
    let oy = config.margin.top as f32;
    let at = |x: f64, y: f64| -> Pos2 {
        Pos2::new(
            origin.x + (ox + x as f32) * scale,
            origin.y + (oy + y as f32) * scale,
        )
    };

    painter.rect_filled(response.rect, 0.0, Color32::WHITE);
    // Bars past the count maximum are cut at the surface edge.
    let painter = painter.with_clip_rect(response.rect);

    for group in &frame.groups {
        let fill = to_color32(group.color);
        for r in &group.rects {
            let rect = Rect::from_two_pos(at(r.x, r.y), at(r.x + r.width, r.y + r.height));
            painter.rect_filled(rect, 0.0, fill);
        }
    }

    let axes = &frame.axes;
    let stroke = Stroke::new(1.0, Color32::BLACK);
    let tick_font = FontId::proportional(config.tick_font_size as f32 * scale);
    let title_font = FontId::proportional(config.title_font_size as f32 * scale);
    let tick = 6.0 * scale;

    let base = axes.y_extent.1;
    painter.line_segment([at(axes.x_extent.0, base), at(axes.x_extent.1, base)], stroke);
    for t in &axes.x_ticks {
        let p = at(t.position, base);
        painter.line_segment([p, p + Vec2::new(0.0, tick)], stroke);
        painter.text(
            p + Vec2::new(0.0, tick + 2.0),
            Align2::CENTER_TOP,
            &t.label,
            tick_font.clone(),
            Color32::BLACK,
        );
    }

    painter.line_segment([at(0.0, axes.y_extent.0), at(0.0, axes.y_extent.1)], stroke);
    for t in &axes.y_ticks {
        let p = at(0.0, t.position);
        painter.line_segment([p - Vec2::new(tick, 0.0), p], stroke);
        painter.text(
            p - Vec2::new(tick + 2.0, 0.0),
            Align2::RIGHT_CENTER,
            &t.label,
            tick_font.clone(),
            Color32::BLACK,
        );
    }

    painter.text(
        at(axes.x_title.x, axes.x_title.y),
        Align2::CENTER_BOTTOM,
        &axes.x_title.text,
        title_font.clone(),
        Color32::BLACK,
    );
    let galley = painter.layout_no_wrap(axes.y_title.text.clone(), title_font, Color32::BLACK);
    let anchor = at(axes.y_title.x, axes.y_title.y);
    // Rotated text is placed by its top-left corner; shift so the label is centred on the anchor.
    let pos = anchor + Vec2::new(-galley.size().y, galley.size().x / 2.0);
    painter.add(
        TextShape::new(pos, galley, Color32::BLACK).with_angle(-std::f32::consts::FRAC_PI_2),
    );
}

impl eframe::App for YearstackApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open…").clicked() {
                    let start_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Tables", &["csv", "tsv", "tab"])
                        .set_directory(start_dir)
                        .pick_file()
                    {
                        self.open(&path);
                    }
                }
                if ui
                    .add_enabled(self.session.is_some(), egui::Button::new("Export SVG…"))
                    .clicked()
                {
                    self.export_svg();
                }
                if let Some(src) = &self.source {
                    ui.label(src.display().to_string());
                }
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            if !self.status_message.is_empty() {
                ui.colored_label(Color32::DARK_GREEN, &self.status_message);
            }
            if !self.error_message.is_empty() {
                ui.colored_label(Color32::RED, &self.error_message);
            }
        });

        egui::SidePanel::left("legend")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.legend_panel(ui));
            });

        egui::CentralPanel::default().show(ctx, |ui| match &self.session {
            Some(session) => paint_chart(ui, session),
            None => {
                ui.centered_and_justified(|ui| ui.label("No chart loaded"));
            }
        });
    }
}
