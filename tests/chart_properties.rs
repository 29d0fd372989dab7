use std::collections::BTreeSet;
use yearstack::storage::{LoadOptions, parse_table};
use yearstack::viz::BarRect;
use yearstack::{ChartConfig, ChartSession, Dataset, Selection, series};

fn dataset(src: &str) -> Dataset {
    let table = parse_table(src.as_bytes(), &LoadOptions::default()).unwrap();
    series::extract(&table, &Default::default()).unwrap()
}

fn scenario() -> Dataset {
    dataset("Year,A,B\n1990,2,3\n1991,n/a,4\n1992,1,1\n")
}

fn session(ds: Dataset) -> ChartSession {
    ChartSession::new(ds, ChartConfig::default()).unwrap()
}

fn rect_for(s: &ChartSession, key: &str, year: i32) -> BarRect {
    *s.frame()
        .groups
        .iter()
        .find(|g| g.key == key)
        .and_then(|g| g.rects.iter().find(|r| r.year == year))
        .expect("rect present")
}

#[test]
fn single_category_spans_its_own_count() {
    let mut s = session(scenario());
    s.toggle("A").unwrap();
    let f = s.frame();
    assert_eq!(f.groups.len(), 1);
    let r = rect_for(&s, "A", 1990);
    assert_eq!((r.lower, r.upper), (0, 2));
}

#[test]
fn two_categories_stack_in_column_order() {
    let mut s = session(scenario());
    // click order B then A; stack order stays A below B
    s.toggle("B").unwrap();
    s.toggle("A").unwrap();
    let a = rect_for(&s, "A", 1990);
    let b = rect_for(&s, "B", 1990);
    assert_eq!((a.lower, a.upper), (0, 2));
    assert_eq!((b.lower, b.upper), (2, 5));
    let keys: Vec<&str> = s.frame().groups.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, vec!["A", "B"]);
    // B sits directly on top of A in pixel space
    assert!((b.y + b.height - a.y).abs() < 1e-9);
}

#[test]
fn non_numeric_cell_counts_as_zero() {
    let ds = scenario();
    let rec = ds.records.iter().find(|r| r.year == 1991).unwrap();
    assert_eq!(rec.count("A"), 0);

    let mut s = session(ds);
    s.toggle("A").unwrap();
    let r = rect_for(&s, "A", 1991);
    assert_eq!(r.height, 0.0);
}

#[test]
fn rect_count_is_selection_times_years() {
    let ds = dataset("Year,A,B,C\n2000,1,2,3\n2001,4,5,6\n2002,7,8,9\n2003,0,0,0\n");
    let years = ds.years().len();
    let mut s = session(ds);
    assert_eq!(s.frame().rect_count(), 0);
    for (i, c) in ["A", "B", "C"].iter().enumerate() {
        s.toggle(c).unwrap();
        assert_eq!(s.frame().rect_count(), (i + 1) * years);
    }
    s.toggle("B").unwrap();
    assert_eq!(s.frame().rect_count(), 2 * years);
}

#[test]
fn repeated_year_rows_yield_one_bar_per_year() {
    let ds = dataset("Year,A,B\n1990,2,3\n1991,1,1\n1990,4,4\n");
    let years = ds.years().len();
    assert_eq!(ds.records.len(), years);
    let mut s = session(ds);
    s.select_all().unwrap();
    assert_eq!(s.frame().rect_count(), 2 * years);
    let b = rect_for(&s, "B", 1990);
    assert_eq!((b.lower, b.upper), (6, 13));
}

#[test]
fn stacking_invariant_holds_for_every_year() {
    let ds = dataset("Year,A,B,C\n2000,1,2,3\n2001,4,0,6\n2002,7,8,9\n");
    let mut s = session(ds.clone());
    s.select_all().unwrap();
    for rec in &ds.records {
        let mut prev_upper = 0;
        for cat in &ds.categories {
            let r = rect_for(&s, cat, rec.year);
            assert_eq!(r.lower, prev_upper, "lower bound of {cat} in {}", rec.year);
            assert_eq!(r.upper, r.lower + rec.count(cat));
            prev_upper = r.upper;
        }
    }
}

#[test]
fn recompute_is_idempotent() {
    let mut s = session(scenario());
    s.toggle("A").unwrap();
    s.toggle("B").unwrap();
    let first = s.frame().groups.clone();
    let again = s.recompute().unwrap();
    assert_eq!(again.groups, first);
    assert!(again.report.entered.is_empty());
    assert!(again.report.exited.is_empty());
}

#[test]
fn toggle_on_then_off_restores_groups() {
    let mut s = session(scenario());
    s.toggle("B").unwrap();
    let before: BTreeSet<String> = s.frame().groups.iter().map(|g| g.key.clone()).collect();
    let before_geometry = s.frame().groups.clone();

    let entered = s.toggle("A").unwrap().report.entered.clone();
    assert_eq!(entered, vec!["A"]);
    let exited = s.toggle("A").unwrap().report.exited.clone();
    assert_eq!(exited, vec!["A"]);

    let after: BTreeSet<String> = s.frame().groups.iter().map(|g| g.key.clone()).collect();
    assert_eq!(before, after);
    assert_eq!(s.frame().groups, before_geometry);
}

#[test]
fn empty_selection_draws_axes_only() {
    let s = session(scenario());
    assert!(s.selection().is_empty());
    let f = s.frame();
    assert!(f.groups.is_empty());
    assert_eq!(f.axes.x_title.text, "Year");
    assert_eq!(f.axes.y_title.text, "Number of Events");
    assert!(!f.axes.y_ticks.is_empty());
}

#[test]
fn totals_above_axis_maximum_still_render() {
    // fixed [0, 28] count axis: a total of 40 extends past the plot top
    let mut s = session(dataset("Year,A,B\n1990,25,15\n1991,1,1\n"));
    s.select_all().unwrap();
    let f = s.frame();
    assert_eq!(f.rect_count(), 4);
    assert_eq!(f.overflow_years, vec![1990]);
    let top = rect_for(&s, "B", 1990);
    assert!(top.y < 0.0, "segment is drawn above the plot area");
    let svg = yearstack::viz::svg::render_svg_string(s.frame(), s.config()).unwrap();
    assert!(svg.contains("<rect"));
}

#[test]
fn unknown_category_is_rejected() {
    let mut s = session(scenario());
    assert!(matches!(
        s.toggle("Z"),
        Err(yearstack::ChartError::UnknownCategory(_))
    ));
    let bad = Selection::ordered(&["Z".to_string()], &["Z"]);
    assert!(s.set_selection(&bad).is_err());
}

#[test]
fn listeners_see_each_toggle() {
    use std::cell::Cell;
    use std::rc::Rc;

    let mut s = session(scenario());
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    s.on_change(move || h.set(h.get() + 1));
    s.toggle("A").unwrap();
    s.toggle("B").unwrap();
    assert!(!s.set_checked("B", true).unwrap());
    assert_eq!(hits.get(), 2);
}
