pub mod rank;
pub mod rates;
pub mod show;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::calculator::compute_lines;
use crate::error::Result;
use crate::export::ReportFormat;
use crate::loader::{load_rows, LoadOptions, TimeFormat};
use crate::models::BidLine;
use crate::ranker::rank;
use crate::settings::load_rates;

#[derive(Parser)]
#[command(name = "bidline", about = "Rank flight-attendant bid lines by total pay.")]
pub struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank a bid packet and write the report document.
    ///
    /// Every line is paid at least the 70 credit-hour monthly guarantee by
    /// default. Set `"guarantee_hours": "0"` in the rates file to pay actual
    /// credit only (see `bidline rates`).
    Rank {
        #[command(flatten)]
        input: InputArgs,
        /// Report file to write (.pdf, .html or .csv)
        output: PathBuf,
        /// Report format (default: from the output extension)
        #[arg(long, value_enum)]
        format: Option<ReportFormat>,
        /// Report title
        #[arg(long, default_value = "Monthly Bid Lines")]
        title: String,
    },
    /// Print the ranked bid lines as a table.
    Show {
        #[command(flatten)]
        input: InputArgs,
        /// Only show the top N lines
        #[arg(long)]
        top: Option<usize>,
    },
    /// Print the effective pay rates as JSON, or write them to a file.
    Rates {
        /// Rates file to read (default: ~/.config/bidline/rates.json, else built-in)
        #[arg(long)]
        rates: Option<PathBuf>,
        /// Write the rates to this path instead of printing them
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

/// Options shared by every command that reads a bid packet.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Bid packet to read (.csv, .xlsx, .xlsm, .xls, .ods)
    pub input: PathBuf,
    /// Rates file (default: ~/.config/bidline/rates.json, else built-in rates
    /// with a 70-hour guarantee)
    #[arg(long)]
    pub rates: Option<PathBuf>,
    /// How credit and TAFB are written in the input
    #[arg(long = "time-format", value_enum, default_value = "decimal")]
    pub time_format: TimeFormat,
    /// Price lines with more than one crew position as both FMP and Any FA
    #[arg(long = "split-crew")]
    pub split_crew: bool,
    /// Worksheet name for spreadsheet input (default: first sheet)
    #[arg(long)]
    pub sheet: Option<String>,
}

/// Load, price and rank the lines named by `args`.
///
/// Input problems are reported before rates problems.
pub(crate) fn ranked_lines(args: &InputArgs) -> Result<Vec<BidLine>> {
    let opts = LoadOptions {
        time_format: args.time_format,
        sheet: args.sheet.clone(),
    };
    let rows = load_rows(&args.input, &opts)?;
    let rates = load_rates(args.rates.as_deref())?;
    let lines = compute_lines(&rows, &rates, args.split_crew)?;
    let ranked = rank(lines);
    tracing::debug!(
        top = ranked.first().map(|l| l.line_number()),
        "ranked {} lines",
        ranked.len()
    );
    Ok(ranked)
}
