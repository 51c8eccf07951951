use std::io::BufWriter;

use printpdf::*;

use crate::error::{BidError, Result};
use crate::export::{display_cells, ReportMeta, HEADERS};
use crate::models::{BidLine, Position};

// US Letter dimensions (mm)
const PAGE_W: f32 = 215.9;
const PAGE_H: f32 = 279.4;
const MARGIN_TOP: f32 = 25.4;
const MARGIN_BOTTOM: f32 = 25.4;
const MARGIN_LEFT: f32 = 19.05;
const MARGIN_RIGHT: f32 = 19.05;
const ROW_H: f32 = 5.0;
const FONT_SIZE: f32 = 9.0;
const TITLE_SIZE: f32 = 16.0;
const SUBTITLE_SIZE: f32 = 10.0;

fn approx_text_width(text: &str, size: f32) -> f32 {
    text.len() as f32 * size * 0.18
}

fn pdf_err(e: impl std::fmt::Debug) -> BidError {
    BidError::Render(format!("{e:?}"))
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

struct Col {
    width: f32,
    align: Align,
}

const COLS: [Col; 9] = [
    Col { width: 12.0, align: Align::Right },
    Col { width: 16.0, align: Align::Right },
    Col { width: 18.0, align: Align::Right },
    Col { width: 18.0, align: Align::Right },
    Col { width: 12.0, align: Align::Right },
    Col { width: 20.0, align: Align::Left },
    Col { width: 27.0, align: Align::Right },
    Col { width: 24.0, align: Align::Right },
    Col { width: 30.8, align: Align::Right },
];

/// Position column gap so left-aligned text clears the numeric column before it.
const POSITION_PAD: f32 = 3.0;

fn seat_color(position: Position) -> Color {
    match position {
        Position::Fmp => Color::Rgb(Rgb::new(0.85, 0.45, 0.0, None)),
        Position::AnyFa => Color::Rgb(Rgb::new(0.1, 0.25, 0.75, None)),
    }
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

struct PdfWriter {
    doc: PdfDocumentReference,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    current_page: PdfPageIndex,
    current_layer: PdfLayerIndex,
    y: f32,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
        let font = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_err)?;
        Ok(Self {
            doc,
            font,
            font_bold,
            current_page: page,
            current_layer: layer,
            y: MARGIN_TOP,
        })
    }

    fn pdf_y(&self) -> f32 {
        PAGE_H - self.y
    }

    fn layer(&self) -> PdfLayerReference {
        self.doc
            .get_page(self.current_page)
            .get_layer(self.current_layer)
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Layer");
        self.current_page = page;
        self.current_layer = layer;
        self.y = MARGIN_TOP;
    }

    /// Returns true when a page break happened.
    fn ensure_space(&mut self, needed: f32) -> bool {
        if self.y + needed > PAGE_H - MARGIN_BOTTOM {
            self.new_page();
            true
        } else {
            false
        }
    }

    fn text(&self, s: &str, x: f32, size: f32, bold: bool) {
        let font = if bold {
            self.font_bold.clone()
        } else {
            self.font.clone()
        };
        self.layer().use_text(s, size, Mm(x), Mm(self.pdf_y()), &font);
    }

    fn hline(&self, x1: f32, x2: f32) {
        let layer = self.layer();
        layer.set_outline_thickness(0.5);
        let line = Line {
            points: vec![
                (Point::new(Mm(x1), Mm(self.pdf_y())), false),
                (Point::new(Mm(x2), Mm(self.pdf_y())), false),
            ],
            is_closed: false,
        };
        layer.add_line(line);
    }

    fn header(&mut self, meta: &ReportMeta, count: usize) {
        self.text(&meta.title, MARGIN_LEFT, TITLE_SIZE, true);
        self.y += 7.0;
        if !meta.source.is_empty() {
            self.text(&meta.source, MARGIN_LEFT, SUBTITLE_SIZE, false);
            self.y += 5.0;
        }
        self.text(&format!("{count} lines ranked by total pay"), MARGIN_LEFT, SUBTITLE_SIZE, false);
        self.y += 5.0;
        let ts = chrono::Local::now()
            .format("Generated %Y-%m-%d %H:%M")
            .to_string();
        self.text(&ts, MARGIN_LEFT, 8.0, false);
        self.y += 5.0;
        self.hline(MARGIN_LEFT, PAGE_W - MARGIN_RIGHT);
        self.y += 5.0;
    }

    fn cells(&self, values: &[String], bold: bool) {
        let mut x = MARGIN_LEFT;
        for (col, value) in COLS.iter().zip(values) {
            match col.align {
                Align::Left => self.text(value, x + POSITION_PAD, FONT_SIZE, bold),
                Align::Right => {
                    let tw = approx_text_width(value, FONT_SIZE);
                    self.text(value, x + col.width - tw, FONT_SIZE, bold);
                }
            }
            x += col.width;
        }
    }

    fn table_header(&mut self) {
        self.ensure_space(ROW_H * 2.0);
        let headers: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
        self.cells(&headers, true);
        self.y += ROW_H;
        self.hline(MARGIN_LEFT, PAGE_W - MARGIN_RIGHT);
        self.y += 2.0;
    }

    fn table_row(&mut self, values: &[String], color: Color) {
        if self.ensure_space(ROW_H) {
            self.table_header();
        }
        let layer = self.layer();
        layer.set_fill_color(color);
        self.cells(values, false);
        layer.set_fill_color(black());
        self.y += ROW_H;
    }

    fn to_bytes(self) -> Result<Vec<u8>> {
        let mut buf = BufWriter::new(Vec::new());
        self.doc.save(&mut buf).map_err(pdf_err)?;
        buf.into_inner().map_err(|e| BidError::Render(e.to_string()))
    }
}

pub fn render_ranking(lines: &[BidLine], meta: &ReportMeta) -> Result<Vec<u8>> {
    let mut pdf = PdfWriter::new(&meta.title)?;
    pdf.header(meta, lines.len());
    pdf.table_header();

    for (i, line) in lines.iter().enumerate() {
        let values = display_cells(i + 1, line);
        pdf.table_row(&values, seat_color(line.position()));
    }

    pdf.to_bytes()
}
