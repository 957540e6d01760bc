//! A4 PDF typesetting for rendered invoices.
//!
//! Each text page becomes one PDF page set in Courier, so the PDF keeps the
//! column layout of the text invoice exactly. The grand-total line is set in
//! bold on a shaded band.

use printpdf::path::PaintMode;
use printpdf::{BuiltinFont, Color, Greyscale, Mm, PdfDocument, Rect};
use roomrent_core::invoice::TOTAL_LABEL;
use roomrent_core::InvoiceDocument;

use crate::error::{StoreError, StoreResult};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;

const MAX_FONT_PT: f32 = 10.0;
/// Courier glyph advance as a fraction of the font size.
const COURIER_ADVANCE: f32 = 0.6;
const PT_PER_MM: f32 = 72.0 / 25.4;

/// 0.0 is black, 1.0 white.
const TOTAL_SHADE: f32 = 0.92;

/// Font size and line spacing that fit `columns × rows` onto the page.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Geometry {
    font_pt: f32,
    leading_mm: f32,
    char_mm: f32,
}

impl Geometry {
    fn new(columns: usize, rows: usize) -> Self {
        let usable_w = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
        let usable_h = PAGE_HEIGHT_MM - 2.0 * MARGIN_MM;
        let row_mm = usable_h / rows.max(1) as f32;

        let by_width = usable_w * PT_PER_MM / (COURIER_ADVANCE * columns.max(1) as f32);
        let by_height = row_mm * PT_PER_MM * 0.85;
        let font_pt = MAX_FONT_PT.min(by_width).min(by_height);

        Geometry {
            font_pt,
            leading_mm: row_mm.min(font_pt / PT_PER_MM * 1.5),
            char_mm: font_pt * COURIER_ADVANCE / PT_PER_MM,
        }
    }

    fn for_document(document: &InvoiceDocument) -> Self {
        let pages = document.pages();
        let columns = pages
            .iter()
            .flatten()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let rows = pages.iter().map(Vec::len).max().unwrap_or(0);
        Geometry::new(columns, rows)
    }

    /// Baseline of line `row`, counted from the top margin.
    fn baseline_mm(&self, row: usize) -> f32 {
        PAGE_HEIGHT_MM - MARGIN_MM - self.leading_mm * (row as f32 + 0.8)
    }
}

/// Typesets `document` and returns the PDF file contents.
pub(crate) fn render(document: &InvoiceDocument, title: &str) -> StoreResult<Vec<u8>> {
    let geometry = Geometry::for_document(document);
    let (pdf, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Invoice");
    let regular = pdf.add_builtin_font(BuiltinFont::Courier).map_err(pdf_error)?;
    let bold = pdf.add_builtin_font(BuiltinFont::CourierBold).map_err(pdf_error)?;

    for (index, lines) in document.pages().iter().enumerate() {
        let (page, layer) = if index == 0 {
            (first_page, first_layer)
        } else {
            pdf.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Invoice")
        };
        let layer = pdf.get_page(page).get_layer(layer);

        for (row, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let baseline = geometry.baseline_mm(row);

            if line.contains(TOTAL_LABEL) {
                let indent = line.chars().take_while(|c| *c == ' ').count();
                let band = Rect::new(
                    Mm(MARGIN_MM + indent as f32 * geometry.char_mm - 1.0),
                    Mm(baseline - geometry.leading_mm * 0.3),
                    Mm(MARGIN_MM + line.chars().count() as f32 * geometry.char_mm + 1.0),
                    Mm(baseline + geometry.leading_mm * 0.75),
                )
                .with_mode(PaintMode::Fill);
                layer.set_fill_color(Color::Greyscale(Greyscale::new(TOTAL_SHADE, None)));
                layer.add_rect(band);
                layer.set_fill_color(Color::Greyscale(Greyscale::new(0.0, None)));
                layer.use_text(line.as_str(), geometry.font_pt, Mm(MARGIN_MM), Mm(baseline), &bold);
            } else {
                layer.use_text(line.as_str(), geometry.font_pt, Mm(MARGIN_MM), Mm(baseline), &regular);
            }
        }
    }

    pdf.save_to_bytes().map_err(pdf_error)
}

fn pdf_error(err: impl std::fmt::Debug) -> StoreError {
    StoreError::Pdf(format!("{:?}", err))
}
