use std::path::Path;

use tracing::{info, warn};

use super::backends::DocxBackend;
use crate::model::ConversionResult;
use crate::normalize::normalize_page_breaks;
use crate::sanitize::sanitize_html;

pub const DOCX_INFO: &str = "H1 tags have been converted to H2 (H1 is reserved for page titles). Page breaks are marked with <!-- page -->.";
pub const DOCX_BACKEND_MISSING: &str =
    "pandoc not installed. Install pandoc from https://pandoc.org/installing.html";

pub fn convert(backend: &dyn DocxBackend, path: &Path) -> ConversionResult {
    if !backend.is_available() {
        warn!(backend = backend.name(), "word backend unavailable");
        return ConversionResult::failure(DOCX_BACKEND_MISSING);
    }

    match backend.convert_to_html(path) {
        Ok(raw) => {
            let html = sanitize_html(&normalize_page_breaks(&raw));
            info!(
                path = %path.display(),
                backend = backend.name(),
                html_bytes = html.len(),
                "converted word document"
            );
            ConversionResult::success(html, DOCX_INFO)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "word conversion failed");
            ConversionResult::failure(format!("{err:#}"))
        }
    }
}
