//! `headspace render` - markdown to sanitized HTML.

use anyhow::{Context, Result};
use headspace_core::markdown::{RenderOptions, render};

pub fn run(file: &str, header_ids: bool, copy_buttons: bool) -> Result<()> {
    let input =
        std::fs::read_to_string(file).with_context(|| format!("failed to read {file}"))?;

    let options = RenderOptions::new()
        .with_header_ids(header_ids)
        .with_copy_buttons(copy_buttons);

    println!("{}", render(&input, &options));
    Ok(())
}
