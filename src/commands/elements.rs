use std::io;

use anyhow::Result;
use tracing::info;

use crate::sanitize::element_listing;
use crate::util::write_json_pretty;

pub fn run() -> Result<()> {
    let listing = element_listing();
    info!(
        element_count = listing.allowed_elements.len(),
        "listing allowed elements"
    );

    write_json_pretty(&mut io::stdout().lock(), &listing)
}
