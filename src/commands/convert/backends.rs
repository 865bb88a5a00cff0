use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::cli::ToolArgs;
use crate::util::command_version_optional;

/// Turns a Word document into an HTML fragment.
pub trait DocxBackend {
    fn name(&self) -> &str;

    /// Whether the backend was found when the toolchain was probed.
    fn is_available(&self) -> bool;

    fn convert_to_html(&self, path: &Path) -> Result<String>;
}

/// Extracts plain text from a PDF, one entry per page in document order.
/// `None` marks a page without extractable text.
pub trait PdfTextBackend {
    fn name(&self) -> &str;

    fn is_available(&self) -> bool;

    fn extract_pages(&self, path: &Path) -> Result<Vec<Option<String>>>;
}

pub struct Toolchain {
    pub docx: Box<dyn DocxBackend>,
    pub pdf: Box<dyn PdfTextBackend>,
}

impl Toolchain {
    /// Probes the external tools once; converters consult the result instead
    /// of failing at spawn time.
    pub fn detect(tools: &ToolArgs) -> Self {
        Self {
            docx: Box::new(PandocBackend::probe(&tools.pandoc_bin)),
            pdf: Box::new(PdftotextBackend::probe(&tools.pdftotext_bin)),
        }
    }
}

pub struct PandocBackend {
    program: PathBuf,
    version: Option<String>,
}

impl PandocBackend {
    pub fn probe(program: &Path) -> Self {
        let version = command_version_optional(program, &["--version"]);
        debug!(
            program = %program.display(),
            version = %version.as_deref().unwrap_or("unavailable"),
            "probed word backend"
        );
        Self {
            program: program.to_path_buf(),
            version,
        }
    }
}

impl DocxBackend for PandocBackend {
    fn name(&self) -> &str {
        "pandoc"
    }

    fn is_available(&self) -> bool {
        self.version.is_some()
    }

    fn convert_to_html(&self, path: &Path) -> Result<String> {
        let output = Command::new(&self.program)
            .arg("--from=docx")
            .arg("--to=html")
            .arg("--wrap=none")
            .arg(path)
            .output()
            .with_context(|| {
                format!(
                    "failed to execute {} for {}",
                    self.program.display(),
                    path.display()
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "pandoc returned non-zero exit status for {}: {}",
                path.display(),
                stderr.trim()
            );
        }

        String::from_utf8(output.stdout)
            .with_context(|| format!("pandoc produced non-UTF-8 html for {}", path.display()))
    }
}

pub struct PdftotextBackend {
    program: PathBuf,
    version: Option<String>,
}

impl PdftotextBackend {
    pub fn probe(program: &Path) -> Self {
        let version = command_version_optional(program, &["-v"]);
        debug!(
            program = %program.display(),
            version = %version.as_deref().unwrap_or("unavailable"),
            "probed pdf backend"
        );
        Self {
            program: program.to_path_buf(),
            version,
        }
    }
}

impl PdfTextBackend for PdftotextBackend {
    fn name(&self) -> &str {
        "pdftotext"
    }

    fn is_available(&self) -> bool {
        self.version.is_some()
    }

    fn extract_pages(&self, path: &Path) -> Result<Vec<Option<String>>> {
        let output = Command::new(&self.program)
            .arg("-enc")
            .arg("UTF-8")
            .arg(path)
            .arg("-")
            .output()
            .with_context(|| {
                format!(
                    "failed to execute {} for {}",
                    self.program.display(),
                    path.display()
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "pdftotext returned non-zero exit status for {}: {}",
                path.display(),
                stderr.trim()
            );
        }

        Ok(split_pages(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// pdftotext ends every page with a form feed, so only the chunk after the
/// final one is dropped. Blank pages inside or at the end stay as `None`.
pub fn split_pages(raw: &str) -> Vec<Option<String>> {
    if raw.is_empty() {
        return Vec::new();
    }

    raw.strip_suffix('\u{000C}')
        .unwrap_or(raw)
        .split('\u{000C}')
        .map(|chunk| chunk.replace('\u{0000}', ""))
        .map(|page| if page.trim().is_empty() { None } else { Some(page) })
        .collect()
}

#[cfg(all(test, unix))]
mod tests {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    use super::*;

    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod script");
        path
    }

    #[test]
    fn pdftotext_pages_are_split_on_form_feeds() {
        let dir = tempfile::tempdir().expect("tempdir");
        let program = write_script(
            dir.path(),
            "pdftotext",
            r#"if [ "$1" = "-v" ]; then echo "pdftotext version 24.02.0" >&2; exit 0; fi
printf 'First page\n\fSecond page\n\f\f'"#,
        );

        let backend = PdftotextBackend::probe(&program);
        assert!(backend.is_available());

        let pages = backend
            .extract_pages(&dir.path().join("input.pdf"))
            .expect("extract pages");
        assert_eq!(
            pages,
            vec![
                Some("First page\n".to_string()),
                Some("Second page\n".to_string()),
                None
            ]
        );
    }

    #[test]
    fn pdftotext_failure_carries_stderr() {
        let dir = tempfile::tempdir().expect("tempdir");
        let program = write_script(
            dir.path(),
            "pdftotext",
            r#"if [ "$1" = "-v" ]; then echo "pdftotext version 24.02.0" >&2; exit 0; fi
echo "Syntax Error: Couldn't find trailer dictionary" >&2
exit 1"#,
        );

        let error = PdftotextBackend::probe(&program)
            .extract_pages(&dir.path().join("broken.pdf"))
            .expect_err("non-zero exit should fail");
        let message = format!("{error:#}");
        assert!(message.contains("pdftotext returned non-zero exit status"));
        assert!(message.contains("Couldn't find trailer dictionary"));
    }

    #[test]
    fn pandoc_output_is_returned_as_html() {
        let dir = tempfile::tempdir().expect("tempdir");
        let program = write_script(
            dir.path(),
            "pandoc",
            r#"if [ "$1" = "--version" ]; then echo "pandoc 3.1.11"; exit 0; fi
printf '<h1 id="t">Title</h1>\n'"#,
        );

        let backend = PandocBackend::probe(&program);
        assert!(backend.is_available());
        assert_eq!(
            backend
                .convert_to_html(&dir.path().join("essay.docx"))
                .expect("convert"),
            "<h1 id=\"t\">Title</h1>\n"
        );
    }

    #[test]
    fn pandoc_failures_are_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let failing = write_script(
            dir.path(),
            "pandoc-failing",
            r#"if [ "$1" = "--version" ]; then echo "pandoc 3.1.11"; exit 0; fi
echo "couldn't unpack docx container" >&2
exit 64"#,
        );
        let garbled = write_script(
            dir.path(),
            "pandoc-garbled",
            r#"if [ "$1" = "--version" ]; then echo "pandoc 3.1.11"; exit 0; fi
printf '\377\376'"#,
        );
        let input = dir.path().join("essay.docx");

        let error = PandocBackend::probe(&failing)
            .convert_to_html(&input)
            .expect_err("non-zero exit should fail");
        assert!(format!("{error:#}").contains("couldn't unpack docx container"));

        let error = PandocBackend::probe(&garbled)
            .convert_to_html(&input)
            .expect_err("invalid utf-8 should fail");
        assert!(format!("{error:#}").contains("non-UTF-8"));
    }

    #[test]
    fn missing_binaries_are_unavailable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let tools = ToolArgs {
            pandoc_bin: dir.path().join("no-pandoc"),
            pdftotext_bin: dir.path().join("no-pdftotext"),
        };

        let toolchain = Toolchain::detect(&tools);
        assert!(!toolchain.docx.is_available());
        assert!(!toolchain.pdf.is_available());
        assert_eq!(toolchain.docx.name(), "pandoc");
        assert_eq!(toolchain.pdf.name(), "pdftotext");
    }
}
