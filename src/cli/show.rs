use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use crate::cli::{ranked_lines, InputArgs};
use crate::error::Result;
use crate::export::{display_cells, HEADERS};
use crate::models::{BidLine, Position};

pub fn format_ranking(lines: &[BidLine], top: Option<usize>) -> String {
    let mut table = Table::new();
    table.set_header(HEADERS.to_vec());

    let shown = top.unwrap_or(lines.len()).min(lines.len());
    for (i, line) in lines.iter().take(shown).enumerate() {
        let cells = display_cells(i + 1, line);
        let row: Vec<Cell> = cells
            .iter()
            .enumerate()
            .map(|(col, value)| {
                if col == 5 {
                    let label = match line.position() {
                        Position::Fmp => value.yellow().bold(),
                        Position::AnyFa => value.blue(),
                    };
                    Cell::new(label)
                } else {
                    Cell::new(value).set_alignment(CellAlignment::Right)
                }
            })
            .collect();
        table.add_row(row);
    }

    let mut out = format!("Bid Lines by Total Pay\n{table}");
    if shown < lines.len() {
        out.push_str(&format!("\n{} of {} lines shown", shown, lines.len()));
    }
    out
}

pub fn run(input: &InputArgs, top: Option<usize>) -> Result<()> {
    let lines = ranked_lines(input)?;
    println!("{}", format_ranking(&lines, top));
    Ok(())
}
