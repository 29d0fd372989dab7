//! Utility functions for visualization: palettes, colour assignment, locale mapping.

use crate::models::CategoryName;
use ahash::AHashMap;
use num_format::Locale;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};

/// d3 "category10" scheme, the default categorical palette.
const CATEGORY10: [RGBColor; 10] = [
    RGBColor(31, 119, 180),  // blue   (#1f77b4)
    RGBColor(255, 127, 14),  // orange (#ff7f0e)
    RGBColor(44, 160, 44),   // green  (#2ca02c)
    RGBColor(214, 39, 40),   // red    (#d62728)
    RGBColor(148, 103, 189), // purple (#9467bd)
    RGBColor(140, 86, 75),   // brown  (#8c564b)
    RGBColor(227, 119, 194), // pink   (#e377c2)
    RGBColor(127, 127, 127), // gray   (#7f7f7f)
    RGBColor(188, 189, 34),  // olive  (#bcbd22)
    RGBColor(23, 190, 207),  // cyan   (#17becf)
];

/// Microsoft Office (2013+) chart series palette.
const OFFICE10: [RGBColor; 10] = [
    RGBColor(68, 114, 196),  // blue      (#4472C4)
    RGBColor(237, 125, 49),  // orange    (#ED7D31)
    RGBColor(165, 165, 165), // gray      (#A5A5A5)
    RGBColor(255, 192, 0),   // gold      (#FFC000)
    RGBColor(91, 155, 213),  // light blue(#5B9BD5)
    RGBColor(112, 173, 71),  // green     (#70AD47)
    RGBColor(38, 68, 120),   // dark blue (#264478)
    RGBColor(158, 72, 14),   // dark org. (#9E480E)
    RGBColor(99, 99, 99),    // dark gray (#636363)
    RGBColor(153, 115, 0),   // brownish  (#997300)
];

/// Repeating palettes available for category colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    #[default]
    Category10,
    Office,
}

impl Palette {
    /// Colour at `idx`, wrapping around the palette.
    #[inline]
    pub fn color(self, idx: usize) -> RGBColor {
        let colors: &[RGBColor; 10] = match self {
            Palette::Category10 => &CATEGORY10,
            Palette::Office => &OFFICE10,
        };
        colors[idx % colors.len()]
    }
}

/// Stable category → colour mapping, assigned once in category order.
#[derive(Debug, Clone)]
pub struct ColorAssignment {
    order: Vec<CategoryName>,
    colors: AHashMap<CategoryName, RGBColor>,
}

impl ColorAssignment {
    pub fn new(categories: &[CategoryName], palette: Palette) -> Self {
        let colors = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), palette.color(i)))
            .collect();
        Self {
            order: categories.to_vec(),
            colors,
        }
    }

    /// Colour of `category`; unknown categories get black.
    pub fn color(&self, category: &str) -> RGBColor {
        self.colors.get(category).copied().unwrap_or(BLACK)
    }

    /// `(category, colour)` pairs in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&CategoryName, RGBColor)> {
        self.order.iter().map(|c| (c, self.color(c)))
    }
}

/// `#rrggbb` form of a colour.
pub fn hex(color: RGBColor) -> String {
    format!("#{:02x}{:02x}{:02x}", color.0, color.1, color.2)
}

/// Map a user-provided locale tag to a `num_format::Locale`.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    }
}
