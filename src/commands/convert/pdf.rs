use std::path::Path;

use tracing::{info, warn};

use super::backends::PdfTextBackend;
use crate::model::ConversionResult;
use crate::normalize::{PAGE_MARKER, is_divider_text, is_page_break_text, normalize_page_breaks};
use crate::sanitize::sanitize_html;

pub const PDF_INFO: &str = "H1 tags have been converted to H2 (H1 is reserved for page titles). Page breaks between PDF pages are marked with <!-- page -->.";
pub const PDF_BACKEND_MISSING: &str =
    "PDF conversion requires pdftotext (poppler-utils). Install poppler-utils and retry";

pub fn convert(backend: &dyn PdfTextBackend, path: &Path) -> ConversionResult {
    if !backend.is_available() {
        warn!(backend = backend.name(), "pdf backend unavailable");
        return ConversionResult::failure(PDF_BACKEND_MISSING);
    }

    match backend.extract_pages(path) {
        Ok(pages) => {
            let html = sanitize_html(&normalize_page_breaks(&render_pages(&pages)));
            info!(
                path = %path.display(),
                backend = backend.name(),
                pages = pages.len(),
                html_bytes = html.len(),
                "converted pdf document"
            );
            ConversionResult::success(html, PDF_INFO)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "pdf extraction failed");
            ConversionResult::failure(format!("{err:#}"))
        }
    }
}

/// Rebuilds paragraphs from blank-line separated page text, with a marker
/// between consecutive pages. Paragraph text is emitted verbatim.
pub fn render_pages(pages: &[Option<String>]) -> String {
    let mut parts = Vec::<String>::new();

    for (index, page) in pages.iter().enumerate() {
        if index > 0 {
            parts.push(PAGE_MARKER.to_string());
        }

        let Some(text) = page.as_deref().filter(|text| !text.is_empty()) else {
            continue;
        };

        let text = text.replace('\u{000C}', &format!("\n\n{PAGE_MARKER}\n\n"));
        for paragraph in text.split("\n\n") {
            let paragraph = paragraph.trim();
            if paragraph.is_empty() {
                continue;
            }

            if paragraph == PAGE_MARKER
                || is_divider_text(paragraph)
                || is_page_break_text(paragraph)
            {
                parts.push(PAGE_MARKER.to_string());
            } else {
                parts.push(format!("<p>{paragraph}</p>"));
            }
        }
    }

    parts.join("\n")
}
