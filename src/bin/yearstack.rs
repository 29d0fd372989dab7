use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use num_format::ToFormattedString;
use std::path::{Path, PathBuf};
use yearstack::series::YearPolicy;
use yearstack::viz::{Palette, svg};
use yearstack::{ChartConfig, ChartSession, Dataset, Selection, series, stats, storage};

#[derive(Parser, Debug)]
#[command(
    name = "yearstack",
    version,
    about = "Render stacked bar charts of yearly event counts by category"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the chart for a set of categories to an SVG file.
    Render(RenderArgs),
    /// List the categories found in the table, with their colours.
    Categories(InputArgs),
    /// Print per-category statistics.
    Stats(StatsArgs),
    /// Write the normalized records (counts coerced to integers) as CSV or JSON.
    Export(ExportArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PaletteArg {
    Category10,
    Office,
}

impl From<PaletteArg> for Palette {
    fn from(p: PaletteArg) -> Self {
        match p {
            PaletteArg::Category10 => Palette::Category10,
            PaletteArg::Office => Palette::Office,
        }
    }
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input table (.csv, or .tsv for tab-delimited).
    #[arg(short, long)]
    input: PathBuf,
    /// JSON chart configuration; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Name of the year column.
    #[arg(long)]
    year_column: Option<String>,
    /// Drop rows with a malformed year instead of failing.
    #[arg(long, default_value_t = false)]
    skip_bad_years: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Output SVG path.
    #[arg(short, long)]
    out: PathBuf,
    /// Categories to stack, separated by comma or semicolon.
    #[arg(short, long, conflicts_with = "all")]
    select: Option<String>,
    /// Stack every category.
    #[arg(long, default_value_t = false)]
    all: bool,
    /// Surface width.
    #[arg(long)]
    width: Option<u32>,
    /// Surface height.
    #[arg(long)]
    height: Option<u32>,
    /// Colour palette.
    #[arg(long, value_enum)]
    palette: Option<PaletteArg>,
}

#[derive(Args, Debug)]
struct StatsArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Locale for number formatting (e.g., en or de).
    #[arg(long, default_value = "en")]
    locale: String,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Output path.
    #[arg(short, long)]
    out: PathBuf,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            let s = format!("{:.2}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Categories(args) => cmd_categories(args),
        Command::Stats(args) => cmd_stats(args),
        Command::Export(args) => cmd_export(args),
    }
}

/// Resolve configuration (file, then flags) and load + extract the dataset.
fn load(args: &InputArgs) -> Result<(ChartConfig, Dataset)> {
    let mut config = match &args.config {
        Some(p) => ChartConfig::from_json_file(p)
            .with_context(|| format!("reading config {}", p.display()))?,
        None => ChartConfig::default(),
    };
    if let Some(col) = &args.year_column {
        config.year_column = col.clone();
    }
    if args.skip_bad_years {
        config.year_policy = YearPolicy::Skip;
    }
    let table = storage::load_table(&args.input, &Default::default())
        .with_context(|| format!("loading {}", args.input.display()))?;
    let dataset = series::extract(&table, &config.extract_options())
        .with_context(|| format!("extracting series from {}", args.input.display()))?;
    Ok((config, dataset))
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let (mut config, dataset) = load(&args.input)?;
    if let Some(w) = args.width {
        config.width = w;
    }
    if let Some(h) = args.height {
        config.height = h;
    }
    if let Some(p) = args.palette {
        config.palette = p.into();
    }

    let mut session = ChartSession::new(dataset, config)?;
    let selection = if args.all {
        Selection::all(&session.dataset().categories)
    } else {
        let names = args.select.as_deref().map(parse_list).unwrap_or_default();
        for n in &names {
            if !session.dataset().has_category(n) {
                anyhow::bail!(
                    "unknown category `{}` (available: {})",
                    n,
                    session.dataset().categories.join(", ")
                );
            }
        }
        Selection::ordered(&session.dataset().categories, &names)
    };
    session.set_selection(&selection)?;

    svg::render_svg_file(session.frame(), session.config(), &args.out)
        .with_context(|| format!("writing {}", args.out.display()))?;
    let frame = session.frame();
    if !frame.overflow_years.is_empty() {
        eprintln!(
            "Note: totals exceed the count axis maximum ({}) in: {}",
            session.config().y_max,
            frame
                .overflow_years
                .iter()
                .map(|y| y.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    eprintln!(
        "Wrote {} bars ({} categories) to {}",
        frame.rect_count(),
        frame.groups.len(),
        args.out.display()
    );
    Ok(())
}

fn cmd_categories(args: InputArgs) -> Result<()> {
    let (config, dataset) = load(&args)?;
    let colors = yearstack::viz::ColorAssignment::new(&dataset.categories, config.palette);
    for (name, color) in colors.iter() {
        println!("{}  {}", yearstack::viz::util::hex(color), name);
    }
    Ok(())
}

fn cmd_stats(args: StatsArgs) -> Result<()> {
    let (_config, dataset) = load(&args.input)?;
    let locale = yearstack::viz::util::map_locale(&args.locale);
    for s in stats::category_summary(&dataset) {
        println!(
            "{}  years={} total={}  min={} max={} mean={} median={}",
            s.category,
            s.count,
            s.total.to_formatted_string(locale),
            s.min.map(|v| v.to_string()).unwrap_or_else(|| "NA".into()),
            s.max.map(|v| v.to_string()).unwrap_or_else(|| "NA".into()),
            fmt_opt(s.mean),
            fmt_opt(s.median)
        );
    }
    Ok(())
}

fn cmd_export(args: ExportArgs) -> Result<()> {
    let (_config, dataset) = load(&args.input)?;
    let path: &Path = &args.out;
    let fmt = match args.format {
        Some(OutFormat::Csv) => "csv",
        Some(OutFormat::Json) => "json",
        None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
    }
    .to_ascii_lowercase();
    match fmt.as_str() {
        "csv" => storage::save_csv(&dataset, path)?,
        "json" => storage::save_json(&dataset, path)?,
        other => anyhow::bail!("unsupported format: {}", other),
    }
    eprintln!("Saved {} rows to {}", dataset.records.len(), path.display());
    Ok(())
}
