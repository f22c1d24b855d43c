//! Output formats for the CLI: trait-based format dispatch.

pub mod json;
pub mod summary;

use anyhow::{anyhow, Result};
use guidedoc::Repository;

/// Trait for rendering a parsed repository into a specific output format.
pub trait Renderer {
    fn render(&self, repo: &Repository) -> Result<String>;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "summary" | "text" => Ok(Box::new(summary::SummaryRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!(
            "unknown format: {}. Use summary or json",
            format
        )),
    }
}
