use std::path::Path;

use crate::cli::{ranked_lines, InputArgs};
use crate::error::Result;
use crate::export::{write_artifact, ReportFormat, ReportMeta};
use crate::fmt::money;

pub fn run(input: &InputArgs, output: &Path, format: Option<ReportFormat>, title: &str) -> Result<()> {
    // Format is resolved before the input is read.
    let format = match format {
        Some(f) => f,
        None => ReportFormat::from_path(output)?,
    };

    let lines = ranked_lines(input)?;

    let meta = ReportMeta {
        title: title.to_string(),
        source: input
            .input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
    };
    let bytes = format.render(&lines, &meta)?;
    write_artifact(&bytes, output)?;

    match lines.first() {
        Some(top) => println!(
            "Ranked {} lines; top is line {} ({}) at {}",
            lines.len(),
            top.line_number(),
            top.position(),
            money(top.pay_total())
        ),
        None => println!("Input has no bid lines"),
    }
    println!("Wrote {} ({})", output.display(), format.key());
    Ok(())
}
