use std::fs;
use std::path::Path;

use tracing::{info, warn};

use super::backends::Toolchain;
use super::{docx, pdf};
use crate::cli::FormatArg;
use crate::model::{ConversionRequest, ConversionResult, DocumentFormat};

pub fn dispatch(request: &ConversionRequest, toolchain: &Toolchain) -> ConversionResult {
    let path = request.input.as_path();

    if !path.exists() {
        warn!(path = %path.display(), "input file missing");
        return ConversionResult::failure(format!("File not found: {}", path.display()));
    }

    if let Some(max_bytes) = request.max_bytes {
        match fs::metadata(path) {
            Ok(metadata) if metadata.len() > max_bytes => {
                warn!(path = %path.display(), bytes = metadata.len(), max_bytes, "input too large");
                return ConversionResult::failure(format!(
                    "File too large (max {max_bytes} bytes)"
                ));
            }
            Ok(_) => {}
            Err(err) => {
                return ConversionResult::failure(format!(
                    "failed to inspect {}: {err}",
                    path.display()
                ));
            }
        }
    }

    let format = match resolve_format(path, request.format) {
        Ok(format) => format,
        Err(message) => {
            warn!(path = %path.display(), "unsupported input format");
            return ConversionResult::failure(message);
        }
    };

    info!(
        path = %path.display(),
        format = format.as_str(),
        "starting conversion"
    );

    match format {
        DocumentFormat::Docx => docx::convert(toolchain.docx.as_ref(), path),
        DocumentFormat::Pdf => pdf::convert(toolchain.pdf.as_ref(), path),
    }
}

/// An explicit format wins; `auto` goes by the lower-cased extension.
pub fn resolve_format(path: &Path, requested: FormatArg) -> Result<DocumentFormat, String> {
    match requested {
        FormatArg::Docx => return Ok(DocumentFormat::Docx),
        FormatArg::Pdf => return Ok(DocumentFormat::Pdf),
        FormatArg::Auto => {}
    }

    let extension = path
        .extension()
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default();

    match extension.as_str() {
        ".docx" | ".doc" => Ok(DocumentFormat::Docx),
        ".pdf" => Ok(DocumentFormat::Pdf),
        _ => Err(format!(
            "Unsupported format: {extension}. Supported: .docx, .pdf"
        )),
    }
}
