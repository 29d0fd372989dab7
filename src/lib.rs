//! yearstack
//!
//! A small Rust library for turning a table of yearly event counts by category into a
//! stacked bar chart. Pairs with the `yearstack` CLI and the `yearstack-gui` viewer.
//!
//! ### Features
//! - Load comma- or tab-delimited tables; non-numeric counts become `0`
//! - Stable per-category colours and a checkbox-style legend
//! - Keyed recompute: toggling a category re-stacks and reconciles the bar groups
//! - SVG output with a year axis (every 5th year) and a fixed `[0, 28]` count axis
//! - Per-category summary statistics and normalized CSV/JSON export
//!
//! ### Example
//! ```no_run
//! use yearstack::{ChartConfig, ChartSession, series, storage};
//!
//! let config = ChartConfig::default();
//! let table = storage::load_table("events-US-1990-2024.csv", &Default::default())?;
//! let dataset = series::extract(&table, &config.extract_options())?;
//! let mut session = ChartSession::new(dataset, config)?;
//! session.toggle("Flooding")?;
//! yearstack::viz::svg::render_svg_file(session.frame(), session.config(), "events.svg")?;
//! # Ok::<(), yearstack::ChartError>(())
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod series;
pub mod session;
pub mod stats;
pub mod storage;
pub mod viz;

pub use config::{ChartConfig, Margins};
pub use error::{ChartError, Result};
pub use models::{CategoryName, Dataset, RawRow, Selection, Table, YearRecord};
pub use session::ChartSession;
