use std::collections::HashMap;
use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::{BidError, Result};
use crate::models::RawRow;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// How credit and TAFB cells are written in the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TimeFormat {
    /// Decimal hours: 80.5 is eighty and a half hours.
    #[default]
    Decimal,
    /// Clock hours.minutes: 80.30 (or 80.3) is eighty hours thirty minutes.
    Hhmm,
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub time_format: TimeFormat,
    /// Worksheet to read; defaults to the first one.
    pub sheet: Option<String>,
}

const LINE_NUMBER: &str = "line_number";
const CREDIT: &str = "credit";
const TAFB: &str = "tafb";
const CREW: &str = "crew";
const CATEGORY: &str = "category";

const COLUMN_ALIASES: &[(&str, &[&str])] = &[
    (LINE_NUMBER, &["line_number", "line", "line_no", "line_#"]),
    (CREDIT, &["credit", "credit_hours"]),
    (TAFB, &["tafb"]),
    (CREW, &["crew", "crew_positions"]),
    (CATEGORY, &["category", "type", "position"]),
];

// ---------------------------------------------------------------------------
// Cell parsing helpers
// ---------------------------------------------------------------------------

fn normalize_header(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

pub fn parse_integer(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if let Ok(v) = s.parse::<i64>() {
        return Some(v);
    }
    let d = s.parse::<Decimal>().ok()?;
    if d.fract().is_zero() {
        d.to_i64()
    } else {
        None
    }
}

pub fn parse_hours(raw: &str, format: TimeFormat) -> Option<Decimal> {
    let s = raw.trim();
    match format {
        TimeFormat::Decimal => s.parse::<Decimal>().ok(),
        TimeFormat::Hhmm => {
            let (negative, body) = match s.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, s),
            };
            let (h, m) = body.split_once('.').unwrap_or((body, "0"));
            if h.is_empty() || !h.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            if !m.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            let hours: i64 = h.parse().ok()?;
            let minutes: i64 = match m.len() {
                1 => m.parse::<i64>().ok()? * 10,
                2 => m.parse().ok()?,
                _ => return None,
            };
            if minutes > 59 {
                return None;
            }
            let total = Decimal::from(hours) + Decimal::from(minutes) / Decimal::from(60);
            Some(if negative { -total } else { total })
        }
    }
}

// ---------------------------------------------------------------------------
// Source kinds, dispatched on file extension
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SourceKind {
    Csv,
    #[cfg(feature = "xlsx")]
    Spreadsheet,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            #[cfg(feature = "xlsx")]
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(Self::Spreadsheet),
            _ => Err(BidError::UnsupportedFormat(format!(
                "cannot read '{}' (expected .csv, .xlsx, .xlsm, .xls or .ods)",
                path.display()
            ))),
        }
    }

    /// Read every row of the source as trimmed text cells, header included.
    #[allow(unused_variables)]
    pub fn read_table(&self, path: &Path, sheet: Option<&str>) -> Result<Vec<Vec<String>>> {
        match self {
            Self::Csv => read_csv_table(path),
            #[cfg(feature = "xlsx")]
            Self::Spreadsheet => read_spreadsheet_table(path, sheet),
        }
    }
}

fn read_csv_table(path: &Path) -> Result<Vec<Vec<String>>> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));
    let mut table = Vec::new();
    for result in rdr.records() {
        let record = result?;
        table.push(record.iter().map(|f| f.trim().to_string()).collect());
    }
    Ok(table)
}

/// Requested worksheet, or the first one when none is named.
#[cfg(feature = "xlsx")]
fn pick_sheet(names: &[String], requested: Option<&str>) -> Result<String> {
    match requested {
        Some(s) if names.iter().any(|n| n == s) => Ok(s.to_string()),
        Some(s) => Err(BidError::malformed(
            0,
            "-",
            format!("no worksheet named '{s}' (have: {})", names.join(", ")),
        )),
        None => names
            .first()
            .cloned()
            .ok_or_else(|| BidError::malformed(0, "-", "workbook has no worksheets")),
    }
}

#[cfg(feature = "xlsx")]
fn cell_text(cell: &calamine::Data) -> String {
    use calamine::Data;

    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        // Shortest decimal form, so 80.3 stays "80.3" for clock-time parsing.
        Data::Float(f) => Decimal::try_from(*f)
            .map(|d| d.normalize().to_string())
            .unwrap_or_else(|_| f.to_string()),
        other => other.to_string(),
    }
}

#[cfg(feature = "xlsx")]
fn read_spreadsheet_table(path: &Path, sheet: Option<&str>) -> Result<Vec<Vec<String>>> {
    use calamine::Reader;

    let mut workbook = calamine::open_workbook_auto(path)?;
    let name = pick_sheet(&workbook.sheet_names(), sheet)?;
    tracing::debug!("reading worksheet '{name}' from {}", path.display());
    let range = workbook.worksheet_range(&name)?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

// ---------------------------------------------------------------------------
// Table -> raw rows
// ---------------------------------------------------------------------------

fn column_index(header: &[String], column: &str) -> Result<usize> {
    let aliases = COLUMN_ALIASES
        .iter()
        .find(|(name, _)| *name == column)
        .map(|(_, a)| *a)
        .unwrap_or(&[]);
    header
        .iter()
        .position(|h| aliases.contains(&normalize_header(h).as_str()))
        .ok_or_else(|| BidError::MissingColumn(column.to_string()))
}

fn required<'a>(record: &'a [String], idx: usize, row: usize, column: &str) -> Result<&'a str> {
    match record.get(idx).map(|s| s.trim()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(BidError::malformed(row, column, "value is missing")),
    }
}

/// Turn a header-first table into typed rows, preserving source order.
pub fn parse_table(table: &[Vec<String>], time_format: TimeFormat) -> Result<Vec<RawRow>> {
    let Some((header, records)) = table.split_first() else {
        return Err(BidError::malformed(1, "-", "input has no header row"));
    };

    let idx_line = column_index(header, LINE_NUMBER)?;
    let idx_credit = column_index(header, CREDIT)?;
    let idx_tafb = column_index(header, TAFB)?;
    let idx_crew = column_index(header, CREW)?;
    let idx_category = column_index(header, CATEGORY)?;

    let mut rows = Vec::new();
    let mut seen: HashMap<i64, usize> = HashMap::new();
    for (i, record) in records.iter().enumerate() {
        let row = i + 2;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let raw = required(record, idx_line, row, LINE_NUMBER)?;
        let line_number = parse_integer(raw).ok_or_else(|| {
            BidError::malformed(row, LINE_NUMBER, format!("expected an integer, got '{raw}'"))
        })?;
        if let Some(first) = seen.insert(line_number, row) {
            return Err(BidError::malformed(row, LINE_NUMBER, format!("duplicate of row {first}")));
        }

        let raw = required(record, idx_credit, row, CREDIT)?;
        let credit = parse_hours(raw, time_format).ok_or_else(|| {
            BidError::malformed(row, CREDIT, format!("expected hours, got '{raw}'"))
        })?;

        let raw = required(record, idx_tafb, row, TAFB)?;
        let tafb = parse_hours(raw, time_format).ok_or_else(|| {
            BidError::malformed(row, TAFB, format!("expected hours, got '{raw}'"))
        })?;

        let raw = required(record, idx_crew, row, CREW)?;
        let crew = parse_integer(raw).ok_or_else(|| {
            BidError::malformed(row, CREW, format!("expected an integer, got '{raw}'"))
        })?;

        let category = required(record, idx_category, row, CATEGORY)?.to_string();

        rows.push(RawRow {
            row,
            line_number,
            credit,
            tafb,
            crew,
            category,
        });
    }
    Ok(rows)
}

/// Read a CSV or spreadsheet file into raw rows.
pub fn load_rows(path: &Path, opts: &LoadOptions) -> Result<Vec<RawRow>> {
    let kind = SourceKind::from_path(path)?;
    let table = kind.read_table(path, opts.sheet.as_deref())?;
    let rows = parse_table(&table, opts.time_format)?;
    tracing::info!("loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}
