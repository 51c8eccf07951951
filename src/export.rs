use std::path::{Path, PathBuf};

use crate::error::{BidError, Result};
use crate::fmt::{cents, hours, money};
use crate::models::BidLine;

pub const HEADERS: [&str; 9] = [
    "Rank",
    "Line",
    "Credit",
    "TAFB",
    "Crew",
    "Position",
    "Pay Credit",
    "Per Diem",
    "Total Pay",
];

/// Display cells for one ranked line, in `HEADERS` order.
pub fn display_cells(rank: usize, line: &BidLine) -> [String; 9] {
    [
        rank.to_string(),
        line.line_number().to_string(),
        hours(line.credit()),
        hours(line.tafb()),
        line.crew().to_string(),
        line.position().to_string(),
        money(line.pay_credit()),
        money(line.per_diem()),
        money(line.pay_total()),
    ]
}

/// Heading text shared by every renderer.
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub title: String,
    pub source: String,
}

// ---------------------------------------------------------------------------
// Report formats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    #[cfg(feature = "pdf")]
    Pdf,
    Html,
    Csv,
}

impl ReportFormat {
    pub fn key(&self) -> &'static str {
        match self {
            #[cfg(feature = "pdf")]
            Self::Pdf => "pdf",
            Self::Html => "html",
            Self::Csv => "csv",
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            #[cfg(feature = "pdf")]
            "pdf" => Ok(Self::Pdf),
            "html" | "htm" => Ok(Self::Html),
            "csv" => Ok(Self::Csv),
            _ => Err(BidError::UnsupportedFormat(format!(
                "cannot infer report format from '{}'; pass --format",
                path.display()
            ))),
        }
    }

    /// Render the whole report in memory.
    pub fn render(&self, lines: &[BidLine], meta: &ReportMeta) -> Result<Vec<u8>> {
        match self {
            #[cfg(feature = "pdf")]
            Self::Pdf => crate::pdf::render_ranking(lines, meta),
            Self::Html => Ok(crate::html::render_ranking(lines, meta).into_bytes()),
            Self::Csv => render_csv(lines),
        }
    }
}

fn render_csv(lines: &[BidLine]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record([
        "rank",
        "line_number",
        "credit",
        "tafb",
        "crew",
        "position",
        "pay_credit",
        "per_diem",
        "pay_total",
        "international",
    ])
    .map_err(|e| BidError::Render(e.to_string()))?;
    for (i, line) in lines.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            line.line_number().to_string(),
            hours(line.credit()),
            hours(line.tafb()),
            line.crew().to_string(),
            line.position().to_string(),
            cents(line.pay_credit()),
            cents(line.per_diem()),
            cents(line.pay_total()),
            line.international().to_string(),
        ])
        .map_err(|e| BidError::Render(e.to_string()))?;
    }
    wtr.into_inner().map_err(|e| BidError::Render(e.to_string()))
}

fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "report".to_string());
    path.with_file_name(format!(".{name}.partial"))
}

/// Write a rendered artifact. The file only appears once fully written.
pub fn write_artifact(bytes: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| BidError::Render(format!("cannot create {}: {e}", parent.display())))?;
    }
    let tmp = partial_path(path);
    let written = std::fs::write(&tmp, bytes).and_then(|_| std::fs::rename(&tmp, path));
    if let Err(e) = written {
        let _ = std::fs::remove_file(&tmp);
        return Err(BidError::Render(format!("cannot write {}: {e}", path.display())));
    }
    tracing::info!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
