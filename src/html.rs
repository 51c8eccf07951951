use std::fmt::Write;

use crate::export::{display_cells, ReportMeta, HEADERS};
use crate::models::{BidLine, Position};

const STYLE: &str = "\
body { font-family: Helvetica, Arial, sans-serif; margin: 2em; }
h1 { margin-bottom: 0.2em; }
p.meta { color: #555; margin-top: 0; }
table { border-collapse: collapse; }
th { font-size: 18px; text-align: center; font-weight: bold; color: blue; background-color: lightgrey; padding: 4px 10px; }
td { font-size: 15px; text-align: right; color: white; padding: 3px 10px; }
td.position { text-align: center; }
tr.fmp td { background-color: orange; }
tr.any-fa td { background-color: blue; }
";

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn row_class(position: Position) -> &'static str {
    match position {
        Position::Fmp => "fmp",
        Position::AnyFa => "any-fa",
    }
}

/// Standalone HTML page with one table, FMP rows orange and Any FA rows blue.
pub fn render_ranking(lines: &[BidLine], meta: &ReportMeta) -> String {
    let title = escape(&meta.title);
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M");
    let mut html = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(html, "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">");
    let _ = writeln!(html, "<title>{title}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>");
    let _ = writeln!(html, "<h1>{title}</h1>");
    let _ = writeln!(
        html,
        "<p class=\"meta\">{} &middot; {} lines &middot; generated {generated}</p>",
        escape(&meta.source),
        lines.len()
    );

    html.push_str("<table>\n<thead><tr>");
    for h in HEADERS {
        let _ = write!(html, "<th>{}</th>", escape(h));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for (i, line) in lines.iter().enumerate() {
        let _ = write!(html, "<tr class=\"{}\">", row_class(line.position()));
        for (col, value) in display_cells(i + 1, line).iter().enumerate() {
            if col == 5 {
                let _ = write!(html, "<td class=\"position\">{}</td>", escape(value));
            } else {
                let _ = write!(html, "<td>{}</td>", escape(value));
            }
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    html
}
