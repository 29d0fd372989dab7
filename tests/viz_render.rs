use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use yearstack::models::{Dataset, YearRecord};
use yearstack::viz::{self, Palette, svg};
use yearstack::{ChartConfig, ChartSession};

fn sample_dataset() -> Dataset {
    let categories: Vec<String> = vec!["Flooding".into(), "Drought".into(), "Wildfire".into()];
    let records = (1990..=2024)
        .map(|year| YearRecord {
            year,
            counts: BTreeMap::from([
                ("Flooding".to_string(), (year % 4) as u64),
                ("Drought".to_string(), (year % 3) as u64),
                ("Wildfire".to_string(), (year % 5) as u64),
            ]),
        })
        .collect();
    Dataset {
        year_column: "Year".into(),
        categories,
        records,
    }
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

fn write_and_check<F: Fn(&PathBuf)>(maker: F, name: &str) {
    let tmp = std::env::temp_dir();
    let path: PathBuf = tmp.join(format!("yearstack_viz_{}.svg", name));
    maker(&path);
    let meta = fs::metadata(&path).expect("file created");
    assert!(meta.len() > 0, "svg has content");
    fs::remove_file(&path).ok();
}

#[test]
fn plot_stacked_bars_produces_file() {
    let ds = sample_dataset();
    write_and_check(
        |p| {
            let frame =
                viz::plot_stacked_bars(&ds, &["Wildfire", "Flooding"], p, &ChartConfig::default())
                    .unwrap();
            assert_eq!(frame.rect_count(), 2 * 35);
            let keys: Vec<&str> = frame.groups.iter().map(|g| g.key.as_str()).collect();
            assert_eq!(keys, vec!["Flooding", "Wildfire"]);
        },
        "stacked",
    );
}

#[test]
fn palettes_and_sizes_produce_files() {
    let ds = sample_dataset();
    let configs = [
        ChartConfig::default(),
        ChartConfig {
            palette: Palette::Office,
            ..Default::default()
        },
        ChartConfig {
            width: 1200,
            height: 700,
            ..Default::default()
        },
    ];
    for (i, cfg) in configs.iter().enumerate() {
        write_and_check(
            |p| {
                viz::plot_stacked_bars(&ds, &["Drought"], p, cfg).unwrap();
            },
            &format!("cfg{}", i),
        );
    }
}

#[test]
fn unknown_category_is_error() {
    let ds = sample_dataset();
    let tmp = std::env::temp_dir().join("yearstack_viz_unknown.svg");
    let e = viz::plot_stacked_bars(&ds, &["Volcano"], &tmp, &ChartConfig::default());
    assert!(e.is_err());
}

#[test]
fn year_axis_labels_every_fifth_year() {
    let s = ChartSession::new(sample_dataset(), ChartConfig::default()).unwrap();
    let svg = svg::render_svg_string(s.frame(), s.config()).unwrap();
    let years: Vec<String> = text_nodes(&svg)
        .into_iter()
        .filter(|t| t.len() == 4 && t.chars().all(|c| c.is_ascii_digit()))
        .collect();
    assert_eq!(
        years,
        vec!["1990", "1995", "2000", "2005", "2010", "2015", "2020"]
    );
}

#[test]
fn rendering_twice_is_identical() {
    let mut s = ChartSession::new(sample_dataset(), ChartConfig::default()).unwrap();
    s.toggle("Drought").unwrap();
    let a = svg::render_svg_string(s.frame(), s.config()).unwrap();
    s.recompute().unwrap();
    let b = svg::render_svg_string(s.frame(), s.config()).unwrap();
    assert_eq!(a, b);
}
