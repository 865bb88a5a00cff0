use std::io;
use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use super::backends::Toolchain;
use super::dispatch::dispatch;
use crate::cli::Cli;
use crate::model::ConversionRequest;
use crate::util::write_json_line;

/// Converts `input`, prints the JSON envelope and reports whether it succeeded.
pub fn run(input: PathBuf, cli: &Cli) -> Result<bool> {
    let request = ConversionRequest {
        input,
        format: cli.format,
        max_bytes: (cli.max_bytes > 0).then_some(cli.max_bytes),
    };

    info!(
        path = %request.input.display(),
        format = request.format.as_str(),
        "conversion requested"
    );

    let toolchain = Toolchain::detect(&cli.tools);
    let result = dispatch(&request, &toolchain);

    write_json_line(&mut io::stdout().lock(), &result)?;
    Ok(result.is_success())
}
