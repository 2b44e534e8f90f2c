use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::{aggregate::NormalizedReport, Error, Result};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const LEFT_MARGIN_MM: f32 = 20.0;
const TITLE_SIZE: f32 = 18.0;
const BODY_SIZE: f32 = 12.0;
const LINE_STEP_MM: f32 = 10.0;
const WRAPPED_LINE_STEP_MM: f32 = 5.0;
/// Roughly 170mm of 12pt Helvetica.
const WRAP_COLUMNS: usize = 80;

/// One line of text on the page. `y_mm` is measured from the top edge.
#[derive(PartialEq, Debug, Clone)]
pub struct SheetLine {
    #[allow(missing_docs)]
    pub text: String,
    #[allow(missing_docs)]
    pub font_size: f32,
    #[allow(missing_docs)]
    pub y_mm: f32,
}

/// The laid-out content of a single-page report export.
#[derive(PartialEq, Debug, Clone)]
pub struct ReportSheet {
    /// Suggested file name, `report-<id>.pdf`.
    pub file_name: String,
    #[allow(missing_docs)]
    pub lines: Vec<SheetLine>,
}

impl ReportSheet {
    /// Lay out `normalized` on one A4 page.
    pub fn for_report(normalized: &NormalizedReport) -> Self {
        let report = &normalized.report;
        let id = report.id_or_empty();

        let mut cursor = Cursor {
            lines: vec![SheetLine {
                text: "FixMyBlock Report".to_string(),
                font_size: TITLE_SIZE,
                y_mm: 20.0,
            }],
            y_mm: 35.0,
        };

        cursor.line(format!("Report ID: {id}"));
        cursor.line(format!("Problem Type: {}", report.problem_type.label()));

        if let Some(near_school) = report.is_near_school() {
            let answer = if near_school { "Yes" } else { "No" };
            cursor.line(format!("Near School: {answer}"));
            if let Some(school) = report.school_name() {
                cursor.line(format!("School Name: {school}"));
            }
        }

        let location = report
            .location
            .map(|location| location.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        cursor.line(format!("Location: {location}"));
        cursor.line("Description:");

        let description = if report.description.trim().is_empty() {
            "No description provided"
        } else {
            report.description.as_str()
        };
        let wrapped = wrap(description, WRAP_COLUMNS);
        let last = wrapped.len().saturating_sub(1);
        for (i, text) in wrapped.into_iter().enumerate() {
            let step = if i == last {
                LINE_STEP_MM
            } else {
                WRAPPED_LINE_STEP_MM
            };
            cursor.line_with_step(text, step);
        }

        cursor.line(format!(
            "Date: {}",
            normalized.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        Self {
            file_name: format!("report-{id}.pdf"),
            lines: cursor.lines,
        }
    }

    /// Render the sheet as PDF bytes.
    pub fn render(&self) -> Result<Vec<u8>> {
        let (doc, page, layer) = PdfDocument::new(
            "FixMyBlock Report",
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Layer 1",
        );
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| Error::Pdf(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);

        for line in &self.lines {
            layer.use_text(
                line.text.clone(),
                line.font_size,
                Mm(LEFT_MARGIN_MM),
                Mm(PAGE_HEIGHT_MM - line.y_mm),
                &font,
            );
        }

        doc.save_to_bytes().map_err(|e| Error::Pdf(e.to_string()))
    }
}

struct Cursor {
    lines: Vec<SheetLine>,
    y_mm: f32,
}

impl Cursor {
    fn line(&mut self, text: impl Into<String>) {
        self.line_with_step(text, LINE_STEP_MM);
    }

    fn line_with_step(&mut self, text: impl Into<String>, step_mm: f32) {
        self.lines.push(SheetLine {
            text: text.into(),
            font_size: BODY_SIZE,
            y_mm: self.y_mm,
        });
        self.y_mm += step_mm;
    }
}

/// Greedy word wrap. Words longer than `columns` get a line of their own.
fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > columns && !current.is_empty() {
                lines.push(core::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }

    lines
}
