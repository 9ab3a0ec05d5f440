//! Paginated table renderer shared by every report shape.
//!
//! A render walks `Heading -> Summary -> TableHeader -> TableBody ->
//! (PageBreak -> TableHeader -> TableBody)* -> Footer`, drawing onto a
//! [`Canvas`] which is then encoded to PDF in one piece.

use std::io::Write;

use dues_shared::config::ReportsConfig;
use dues_shared::types::format_amount;
use rust_decimal::Decimal;
use tracing::debug;

use super::canvas::{Canvas, Rect, Shade};
use super::error::RenderError;
use super::format::format_period_label;
use super::layout::{PageGeometry, PageLayoutState, line_height, paginate};
use super::metrics::Font;
use super::pdf::PdfWriter;

const ORGANIZATION_SIZE: u16 = 20;
const TITLE_SIZE: u16 = 16;
const SECTION_SIZE: u16 = 14;
const BODY_TEXT_SIZE: u16 = 12;
const SIGNATURE_SIZE: u16 = 10;
const SIGNATURE_SPACING: i32 = 250;
const SIGNATURE_LINE: &str = "___________________";

/// Organization name and currency unit printed on every report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBranding {
    /// Printed at the top of every report.
    pub organization_name: String,
    /// Appended verbatim to every amount.
    pub currency_unit: String,
}

impl ReportBranding {
    /// Creates branding.
    #[must_use]
    pub fn new(organization_name: impl Into<String>, currency_unit: impl Into<String>) -> Self {
        Self {
            organization_name: organization_name.into(),
            currency_unit: currency_unit.into(),
        }
    }

    /// Formats an amount with the currency unit.
    #[must_use]
    pub fn amount(&self, amount: Decimal) -> String {
        format_amount(amount, &self.currency_unit)
    }
}

impl Default for ReportBranding {
    fn default() -> Self {
        Self::from(&ReportsConfig::default())
    }
}

impl From<&ReportsConfig> for ReportBranding {
    fn from(config: &ReportsConfig) -> Self {
        Self::new(&config.organization_name, &config.currency_unit)
    }
}

/// Column layout of a report table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSchema {
    /// Column widths in points, left to right.
    pub column_widths: Vec<u16>,
    /// Column headers, one per width.
    pub column_headers: Vec<String>,
    /// Header font size.
    pub header_size: u16,
    /// Body font size.
    pub body_size: u16,
}

impl ReportSchema {
    /// Creates a schema with 10 pt headers and a 9 pt body.
    #[must_use]
    pub fn new<H, S>(column_widths: impl Into<Vec<u16>>, column_headers: H) -> Self
    where
        H: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            column_widths: column_widths.into(),
            column_headers: column_headers.into_iter().map(Into::into).collect(),
            header_size: 10,
            body_size: 9,
        }
    }

    /// Overrides the font sizes.
    #[must_use]
    pub const fn with_font_sizes(mut self, header_size: u16, body_size: u16) -> Self {
        self.header_size = header_size;
        self.body_size = body_size;
        self
    }

    /// Checks that widths and headers line up and every width is positive.
    ///
    /// # Errors
    ///
    /// Returns `SchemaMismatch`, `EmptySchema` or `ZeroWidth`.
    pub fn validate(&self) -> Result<(), RenderError> {
        let widths = self.column_widths.len();
        let headers = self.column_headers.len();
        if widths != headers {
            return Err(RenderError::SchemaMismatch { widths, headers });
        }
        if widths == 0 {
            return Err(RenderError::EmptySchema);
        }
        if let Some(column) = self.column_widths.iter().position(|w| *w == 0) {
            return Err(RenderError::ZeroWidth { column });
        }
        Ok(())
    }

    /// Sum of the column widths.
    #[must_use]
    pub fn total_width(&self) -> i32 {
        self.column_widths.iter().map(|w| i32::from(*w)).sum()
    }
}

/// One `label: value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    /// Label.
    pub label: String,
    /// Preformatted value.
    pub value: String,
}

impl SummaryLine {
    /// Creates a line.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    fn text(&self) -> String {
        format!("{}: {}", self.label, self.value)
    }
}

/// Lines printed between the heading and the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryBlock {
    /// Optional underlined heading.
    pub heading: Option<String>,
    /// Lines in order.
    pub lines: Vec<SummaryLine>,
}

impl SummaryBlock {
    /// Creates a block without heading.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the heading.
    #[must_use]
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    /// Appends a line.
    #[must_use]
    pub fn line(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.lines.push(SummaryLine::new(label, value));
        self
    }
}

/// Everything around the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportDocument {
    /// Report title.
    pub title: String,
    /// Period label, `YYYY-MM-DD au YYYY-MM-DD` or free text.
    pub period: Option<String>,
    /// Summary block.
    pub summary: Option<SummaryBlock>,
    /// Underlined heading right above the table.
    pub table_heading: Option<String>,
    /// Right-aligned lines after the table.
    pub closing_lines: Vec<String>,
    /// Signature labels, left to right, on the last page.
    pub signatures: Vec<String>,
}

impl ReportDocument {
    /// Creates a document with only a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the period label.
    #[must_use]
    pub fn with_period(mut self, period: impl Into<String>) -> Self {
        self.period = Some(period.into());
        self
    }

    /// Sets the summary block.
    #[must_use]
    pub fn with_summary(mut self, summary: SummaryBlock) -> Self {
        self.summary = Some(summary);
        self
    }

    /// Sets the table heading.
    #[must_use]
    pub fn with_table_heading(mut self, heading: impl Into<String>) -> Self {
        self.table_heading = Some(heading.into());
        self
    }

    /// Appends a closing line.
    #[must_use]
    pub fn with_closing_line(mut self, line: impl Into<String>) -> Self {
        self.closing_lines.push(line.into());
        self
    }

    /// Appends a signature block.
    #[must_use]
    pub fn with_signature(mut self, label: impl Into<String>) -> Self {
        self.signatures.push(label.into());
        self
    }
}

/// A finished PDF document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    /// Complete PDF file.
    pub bytes: Vec<u8>,
    /// Number of pages.
    pub page_count: usize,
}

impl RenderedReport {
    /// Writes the whole document to `dest` in one call.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Write` if the destination fails.
    pub fn write_to<W: Write>(&self, dest: &mut W) -> Result<(), RenderError> {
        dest.write_all(&self.bytes).map_err(RenderError::write)?;
        dest.flush().map_err(RenderError::write)
    }
}

/// Lays out and encodes report tables.
///
/// The renderer holds no per-call state; every call builds its own
/// [`PageLayoutState`] and [`Canvas`].
#[derive(Debug, Clone, Default)]
pub struct ReportRenderer {
    geometry: PageGeometry,
    branding: ReportBranding,
}

impl ReportRenderer {
    /// Creates a renderer for US Letter pages.
    #[must_use]
    pub fn new(branding: ReportBranding) -> Self {
        Self {
            geometry: PageGeometry::letter(),
            branding,
        }
    }

    /// Overrides the page geometry.
    #[must_use]
    pub const fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Branding in use.
    #[must_use]
    pub const fn branding(&self) -> &ReportBranding {
        &self.branding
    }

    /// Page geometry in use.
    #[must_use]
    pub const fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Lays out `rows` under `document` and encodes the result.
    ///
    /// # Errors
    ///
    /// Returns a schema error before anything is drawn, or an encoding error.
    pub fn render<R, F>(
        &self,
        document: &ReportDocument,
        schema: &ReportSchema,
        rows: &[R],
        row_to_cells: F,
    ) -> Result<RenderedReport, RenderError>
    where
        F: Fn(&R) -> Vec<String>,
    {
        let canvas = self.layout(document, schema, rows, row_to_cells)?;
        let bytes = PdfWriter::encode(&canvas)?;
        Ok(RenderedReport {
            bytes,
            page_count: canvas.page_count(),
        })
    }

    /// Lays out `rows` under `document` without encoding.
    ///
    /// Short rows render their missing cells empty; extra cells are ignored.
    ///
    /// # Errors
    ///
    /// Returns a schema error when widths and headers disagree.
    pub fn layout<R, F>(
        &self,
        document: &ReportDocument,
        schema: &ReportSchema,
        rows: &[R],
        row_to_cells: F,
    ) -> Result<Canvas, RenderError>
    where
        F: Fn(&R) -> Vec<String>,
    {
        schema.validate()?;

        let geometry = &self.geometry;
        let mut canvas = Canvas::new(geometry.width, geometry.height);
        let mut state = PageLayoutState::new(geometry);
        state.rows_remaining = rows.len();

        self.draw_heading(&mut canvas, &mut state, document);
        if let Some(summary) = &document.summary {
            self.draw_summary(&mut canvas, &mut state, summary);
        }
        if let Some(heading) = &document.table_heading {
            self.underlined(&mut canvas, &mut state, heading);
            state.advance(line_height(SECTION_SIZE));
        }

        for slice in paginate(geometry, state.cursor_y, rows.len()) {
            if slice.new_page {
                canvas.add_page();
                state.next_page(geometry);
            }
            self.draw_row(&mut canvas, schema, slice.top, &schema.column_headers, true);
            let mut y = slice.top + geometry.row_height;
            for row in &rows[slice.rows.clone()] {
                self.draw_row(&mut canvas, schema, y, &row_to_cells(row), false);
                y += geometry.row_height;
            }
            state.rows_remaining -= slice.rows.len();
            state.cursor_y = slice.bottom(geometry);
        }

        if !document.closing_lines.is_empty() {
            state.advance(2 * line_height(BODY_TEXT_SIZE));
            for line in &document.closing_lines {
                self.ensure_room(&mut canvas, &mut state, line_height(BODY_TEXT_SIZE));
                let width = points(Font::Regular.text_width_points(line, BODY_TEXT_SIZE));
                let x = geometry.width - geometry.margin - width;
                canvas.text(
                    x.max(geometry.margin),
                    state.cursor_y,
                    Font::Regular,
                    BODY_TEXT_SIZE,
                    line,
                );
                state.advance(line_height(BODY_TEXT_SIZE));
            }
        }

        self.draw_signatures(&mut canvas, &mut state, &document.signatures);

        debug!(
            title = %document.title,
            rows = rows.len(),
            pages = canvas.page_count(),
            "laid out report"
        );
        Ok(canvas)
    }

    fn draw_heading(
        &self,
        canvas: &mut Canvas,
        state: &mut PageLayoutState,
        document: &ReportDocument,
    ) {
        let organization = &self.branding.organization_name;
        self.centered(canvas, state, Font::Bold, ORGANIZATION_SIZE, organization);
        self.centered(canvas, state, Font::Bold, TITLE_SIZE, &document.title);
        state.advance(line_height(TITLE_SIZE));

        if let Some(period) = &document.period {
            let text = format!("Période: {}", format_period_label(period));
            self.centered(canvas, state, Font::Regular, BODY_TEXT_SIZE, &text);
            state.advance(2 * line_height(BODY_TEXT_SIZE));
        }
    }

    fn draw_summary(
        &self,
        canvas: &mut Canvas,
        state: &mut PageLayoutState,
        summary: &SummaryBlock,
    ) {
        if let Some(heading) = &summary.heading {
            self.underlined(canvas, state, heading);
        }
        for line in &summary.lines {
            self.ensure_room(canvas, state, line_height(BODY_TEXT_SIZE));
            canvas.text(
                self.geometry.margin,
                state.cursor_y,
                Font::Regular,
                BODY_TEXT_SIZE,
                line.text(),
            );
            state.advance(line_height(BODY_TEXT_SIZE));
        }
        state.advance(2 * line_height(BODY_TEXT_SIZE));
    }

    fn draw_row(
        &self,
        canvas: &mut Canvas,
        schema: &ReportSchema,
        y: i32,
        cells: &[String],
        header: bool,
    ) {
        let geometry = &self.geometry;
        let (font, size) = if header {
            (Font::Bold, schema.header_size)
        } else {
            (Font::Regular, schema.body_size)
        };

        let rect = Rect::new(geometry.margin, y, schema.total_width(), geometry.row_height);
        if header {
            canvas.fill_rect(rect, Shade::LightGray);
        }
        canvas.stroke_rect(rect);

        let mut x = geometry.margin;
        for (index, width) in schema.column_widths.iter().map(|w| i32::from(*w)).enumerate() {
            if index > 0 {
                canvas.line((x, y), (x, rect.bottom()));
            }
            let cell = cells.get(index).map_or("", String::as_str);
            let room = u32::try_from(width - 2 * geometry.cell_padding).unwrap_or(0);
            let text = font.fit_text(cell, size, room);
            if !text.is_empty() {
                canvas.text(x + geometry.cell_padding, y + geometry.cell_padding, font, size, text);
            }
            x += width;
        }
    }

    fn draw_signatures(
        &self,
        canvas: &mut Canvas,
        state: &mut PageLayoutState,
        signatures: &[String],
    ) {
        if signatures.is_empty() {
            return;
        }
        let geometry = &self.geometry;
        let top = geometry.footer_top();
        if state.cursor_y > top {
            canvas.add_page();
            state.next_page(geometry);
        }

        let mut x = geometry.margin;
        for label in signatures {
            canvas.text(x, top, Font::Regular, SIGNATURE_SIZE, format!("{label}:"));
            canvas.text(x, top + 20, Font::Regular, SIGNATURE_SIZE, SIGNATURE_LINE);
            x += SIGNATURE_SPACING;
        }
        state.cursor_y = top + 20 + line_height(SIGNATURE_SIZE);
    }

    fn centered(
        &self,
        canvas: &mut Canvas,
        state: &mut PageLayoutState,
        font: Font,
        size: u16,
        text: &str,
    ) {
        self.ensure_room(canvas, state, line_height(size));
        let width = points(font.text_width_points(text, size));
        let x = ((self.geometry.width - width) / 2).max(self.geometry.margin);
        canvas.text(x, state.cursor_y, font, size, text);
        state.advance(line_height(size));
    }

    fn underlined(&self, canvas: &mut Canvas, state: &mut PageLayoutState, text: &str) {
        self.ensure_room(canvas, state, line_height(SECTION_SIZE));
        let x = self.geometry.margin;
        let width = points(Font::Regular.text_width_points(text, SECTION_SIZE));
        let underline_y = state.cursor_y + i32::from(SECTION_SIZE);
        canvas.text(x, state.cursor_y, Font::Regular, SECTION_SIZE, text);
        canvas.line((x, underline_y), (x + width, underline_y));
        state.advance(line_height(SECTION_SIZE));
    }

    fn ensure_room(&self, canvas: &mut Canvas, state: &mut PageLayoutState, needed: i32) {
        if state.cursor_y + needed > self.geometry.height - self.geometry.margin {
            canvas.add_page();
            state.next_page(&self.geometry);
        }
    }
}

fn points(width: u32) -> i32 {
    i32::try_from(width).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::canvas::DrawOp;
    use rstest::rstest;

    fn schema() -> ReportSchema {
        ReportSchema::new(vec![80, 120, 100], ["Date", "Membre", "Montant"])
    }

    fn cells(row: &(&str, &str, &str)) -> Vec<String> {
        vec![row.0.to_string(), row.1.to_string(), row.2.to_string()]
    }

    #[rstest]
    #[case(vec![80, 120], vec!["Date"])]
    #[case(vec![80], vec!["Date", "Membre"])]
    #[case(vec![], vec!["Date"])]
    fn test_schema_mismatch(#[case] widths: Vec<u16>, #[case] headers: Vec<&str>) {
        let schema = ReportSchema::new(widths, headers);
        assert!(matches!(
            schema.validate(),
            Err(RenderError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_and_zero_width_schema() {
        let empty = ReportSchema::new(Vec::new(), Vec::<String>::new());
        assert!(matches!(empty.validate(), Err(RenderError::EmptySchema)));
        let zero = ReportSchema::new(vec![80, 0], ["Date", "Membre"]);
        assert!(matches!(zero.validate(), Err(RenderError::ZeroWidth { column: 1 })));
    }

    #[test]
    fn test_mismatch_fails_before_drawing() {
        let renderer = ReportRenderer::default();
        let bad = ReportSchema::new(vec![80, 120], ["Date"]);
        let rows = [("05/01/2024", "A", "1 GNF")];
        let result = renderer.render(&ReportDocument::new("Test"), &bad, &rows, cells);
        assert!(matches!(
            result,
            Err(RenderError::SchemaMismatch {
                widths: 2,
                headers: 1
            })
        ));
    }

    #[test]
    fn test_short_rows_render_empty_cells() {
        let renderer = ReportRenderer::default();
        let rows = [("05/01/2024", "", "")];
        let canvas = renderer
            .layout(&ReportDocument::new("Test"), &schema(), &rows, |row| {
                vec![row.0.to_string()]
            })
            .unwrap();
        let page = &canvas.pages()[0];
        assert!(page.contains_text("05/01/2024"));
        assert!(page.contains_text("Montant"));
    }

    #[test]
    fn test_cell_text_stays_inside_its_column() {
        let renderer = ReportRenderer::default();
        let long = "Une très longue désignation qui déborderait largement de la colonne";
        let rows = [("05/01/2024", long, "50000 GNF")];
        let canvas = renderer
            .layout(&ReportDocument::new("Test"), &schema(), &rows, cells)
            .unwrap();

        let drawn = canvas.pages()[0]
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Text { x, text, size, font, .. } if text.starts_with("Une") => {
                    Some((*x, text.clone(), *size, *font))
                }
                _ => None,
            })
            .unwrap();
        let (x, text, size, font) = drawn;
        assert!(text.ends_with("..."));
        // Member column spans 130..250; text starts at 135 and must end by 245.
        assert_eq!(x, 135);
        assert!(x + points(font.text_width_points(&text, size)) <= 245);
    }

    #[test]
    fn test_header_is_filled_and_body_is_not() {
        let renderer = ReportRenderer::default();
        let rows = [("05/01/2024", "A", "1 GNF"), ("06/01/2024", "B", "2 GNF")];
        let canvas = renderer
            .layout(&ReportDocument::new("Test"), &schema(), &rows, cells)
            .unwrap();
        let ops = &canvas.pages()[0].ops;

        let fills = ops.iter().filter(|op| matches!(op, DrawOp::FillRect { .. })).count();
        let borders = ops.iter().filter(|op| matches!(op, DrawOp::StrokeRect { .. })).count();
        let dividers = ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { from, to } if from.0 == to.0))
            .count();
        assert_eq!(fills, 1);
        assert_eq!(borders, 3);
        // Two internal boundaries per row, three rows.
        assert_eq!(dividers, 6);
    }

    #[test]
    fn test_signatures_on_last_page_only() {
        let renderer = ReportRenderer::default();
        let rows: Vec<(&str, &str, &str)> = (0..80).map(|_| ("05/01/2024", "A", "1 GNF")).collect();
        let document = ReportDocument::new("Test")
            .with_signature("Signature Secrétaire")
            .with_signature("Signature Trésorier");
        let canvas = renderer.layout(&document, &schema(), &rows, cells).unwrap();

        let pages = canvas.pages();
        assert!(pages.len() > 1);
        let last = pages.last().unwrap();
        assert!(last.contains_text("Signature Secrétaire:"));
        assert!(last.contains_text("Signature Trésorier:"));
        for page in &pages[..pages.len() - 1] {
            assert!(!page.contains_text("Signature Secrétaire:"));
        }

        let signature_y = last
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Text { y, text, .. } if text == "Signature Trésorier:" => Some(*y),
                _ => None,
            })
            .unwrap();
        assert_eq!(signature_y, 692);
    }

    #[test]
    fn test_signatures_move_to_new_page_when_content_reaches_them() {
        let renderer = ReportRenderer::default();
        // Organization, title and spacing take 59 points above the table.
        let capacity = renderer.geometry().rows_per_page(109);
        let rows: Vec<(&str, &str, &str)> = (0..capacity).map(|_| ("d", "m", "a")).collect();
        let document = ReportDocument::new("Test")
            .with_closing_line("Total payé: 0 GNF")
            .with_signature("Signature Secrétaire");
        let canvas = renderer.layout(&document, &schema(), &rows, cells).unwrap();

        assert_eq!(canvas.page_count(), 2);
        assert!(canvas.pages()[0].contains_text("Total payé: 0 GNF"));
        assert!(canvas.pages()[1].contains_text("Signature Secrétaire:"));
    }

    #[test]
    fn test_period_line_uses_display_dates() {
        let renderer = ReportRenderer::default();
        let document = ReportDocument::new("Rapport").with_period("2024-01-01 au 2024-01-31");
        let rows: [(&str, &str, &str); 0] = [];
        let canvas = renderer.layout(&document, &schema(), &rows, cells).unwrap();
        assert!(canvas.pages()[0].contains_text("Période: 01/01/2024 au 31/01/2024"));
        assert!(canvas.pages()[0].contains_text("Les Étoiles de Horè-Koubi"));
    }

    #[test]
    fn test_write_to_failing_destination() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk full"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let report = RenderedReport {
            bytes: b"%PDF-1.5".to_vec(),
            page_count: 1,
        };
        assert!(matches!(report.write_to(&mut Broken), Err(RenderError::Write(_))));

        let mut sink = Vec::new();
        report.write_to(&mut sink).unwrap();
        assert_eq!(sink, b"%PDF-1.5");
    }
}
