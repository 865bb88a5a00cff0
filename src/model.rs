use std::path::PathBuf;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::cli::FormatArg;

#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub input: PathBuf,
    pub format: FormatArg,
    pub max_bytes: Option<u64>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DocumentFormat {
    Docx,
    Pdf,
}

impl DocumentFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Pdf => "pdf",
        }
    }
}

/// Outcome of a single conversion, printed as the JSON envelope
/// `{"success": true, "html", "info"}` or `{"success": false, "error"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionResult {
    Success { html: String, info: String },
    Failure { error: String },
}

impl ConversionResult {
    pub fn success(html: String, info: impl Into<String>) -> Self {
        Self::Success {
            html,
            info: info.into(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl Serialize for ConversionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success { html, info } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("html", html)?;
                map.serialize_entry("info", info)?;
                map.end()
            }
            Self::Failure { error } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
                map.end()
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ElementListing {
    pub allowed_elements: Vec<&'static str>,
    pub info: String,
    pub note: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_has_html_and_info() {
        let result = ConversionResult::success("<p>a</p>".to_string(), "done");
        let value = serde_json::to_value(&result).expect("serializes");

        assert_eq!(value["success"], true);
        assert_eq!(value["html"], "<p>a</p>");
        assert_eq!(value["info"], "done");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn failure_envelope_has_only_error() {
        let result = ConversionResult::failure("File not found: x.pdf");
        let raw = serde_json::to_string(&result).expect("serializes");

        assert_eq!(raw, r#"{"success":false,"error":"File not found: x.pdf"}"#);
        assert!(!result.is_success());
    }
}
