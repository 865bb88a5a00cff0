use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Parser, Debug)]
#[command(
    name = "docfrag",
    version,
    about = "Convert Word and PDF documents to HTML fragments for CMS import"
)]
pub struct Cli {
    /// Path to the input document.
    #[arg(required_unless_present = "list_elements")]
    pub input: Option<PathBuf>,

    /// Force a specific format instead of detecting it from the extension.
    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    pub format: FormatArg,

    /// Print the allowed HTML elements as JSON and exit.
    #[arg(long, default_value_t = false)]
    pub list_elements: bool,

    /// Reject inputs larger than this many bytes (0 disables the check).
    #[arg(long, default_value_t = DEFAULT_MAX_BYTES)]
    pub max_bytes: u64,

    #[command(flatten)]
    pub tools: ToolArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ToolArgs {
    #[arg(long, env = "DOCFRAG_PANDOC", default_value = "pandoc")]
    pub pandoc_bin: PathBuf,

    #[arg(long, env = "DOCFRAG_PDFTOTEXT", default_value = "pdftotext")]
    pub pdftotext_bin: PathBuf,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum FormatArg {
    Auto,
    Docx,
    Pdf,
}

impl FormatArg {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Docx => "docx",
            Self::Pdf => "pdf",
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_elements_does_not_require_input() {
        let cli = Cli::try_parse_from(["docfrag", "--list-elements"]).expect("should parse");
        assert!(cli.list_elements);
        assert!(cli.input.is_none());
    }

    #[test]
    fn list_elements_accepts_and_ignores_input() {
        let cli = Cli::try_parse_from(["docfrag", "--list-elements", "x.pdf"]).expect("should parse");
        assert!(cli.list_elements);
        assert_eq!(cli.input, Some(PathBuf::from("x.pdf")));
    }

    #[test]
    fn input_is_required_without_list_elements() {
        assert!(Cli::try_parse_from(["docfrag"]).is_err());
    }

    #[test]
    fn format_override_and_defaults_parse() {
        let cli = Cli::try_parse_from(["docfrag", "--format=pdf", "scan.bin"]).expect("should parse");
        assert_eq!(cli.format, FormatArg::Pdf);
        assert_eq!(cli.input, Some(PathBuf::from("scan.bin")));
        assert_eq!(cli.max_bytes, DEFAULT_MAX_BYTES);

        let cli = Cli::try_parse_from(["docfrag", "report.docx"]).expect("should parse");
        assert_eq!(cli.format, FormatArg::Auto);
        assert_eq!(cli.format.as_str(), "auto");
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["docfrag", "--format=odt", "a.odt"]).is_err());
    }
}
