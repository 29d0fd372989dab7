//! Table loading and export of normalized records.

use crate::error::Result;
use crate::models::{Dataset, RawRow, Table};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::debug;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Options for reading a delimited table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    /// Field delimiter. `None` infers it from the file extension
    /// (`.tsv`/`.tab` → tab, else comma).
    pub delimiter: Option<u8>,
}

/// Pick a delimiter for `path` when none is configured.
pub fn infer_delimiter(path: &Path) -> u8 {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("tsv") | Some("tab") => b'\t',
        _ => b',',
    }
}

/// Load a delimited table from disk. A single attempt; failures are returned as-is.
pub fn load_table<P: AsRef<Path>>(path: P, opts: &LoadOptions) -> Result<Table> {
    let path = path.as_ref();
    let delimiter = opts.delimiter.unwrap_or_else(|| infer_delimiter(path));
    let file = File::open(path).map_err(csv::Error::from)?;
    let table = parse_table(
        file,
        &LoadOptions {
            delimiter: Some(delimiter),
        },
    )?;
    debug!(
        "loaded {} rows x {} columns from {}",
        table.rows.len(),
        table.headers.len(),
        path.display()
    );
    Ok(table)
}

/// Parse a delimited table from any reader. The first record is the header.
pub fn parse_table<R: Read>(reader: R, opts: &LoadOptions) -> Result<Table> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(opts.delimiter.unwrap_or(b','))
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let cells = headers
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();
        rows.push(RawRow::new(cells));
    }
    Ok(Table { headers, rows })
}

/// Save normalized records as CSV: year column first, then categories in order.
pub fn save_csv<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    let mut header = Vec::with_capacity(dataset.categories.len() + 1);
    header.push(dataset.year_column.as_str());
    header.extend(dataset.categories.iter().map(String::as_str));
    wtr.write_record(&header)?;
    for r in &dataset.records {
        let mut row = Vec::with_capacity(header.len());
        row.push(r.year.to_string());
        row.extend(dataset.categories.iter().map(|c| r.count(c).to_string()));
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save the normalized dataset as pretty JSON.
pub fn save_json<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(dataset)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
