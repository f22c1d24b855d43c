//! Plain-text overview of a parsed repository.

use crate::render::Renderer;
use anyhow::Result;
use guidedoc::{Feature, Repository};
use std::fmt::Write;

pub struct SummaryRenderer;

impl Renderer for SummaryRenderer {
    fn render(&self, repo: &Repository) -> Result<String> {
        let mut out = String::new();

        match (repo.version(), repo.git_version_tag()) {
            (Some(version), Some(tag)) => writeln!(out, "version {} ({})", version, tag)?,
            _ => writeln!(out, "version unknown")?,
        }
        if let Some(revision) = repo.git_revision() {
            writeln!(out, "revision {}", revision)?;
        }

        let promoted = repo.promoted_klasses()?;
        if !promoted.is_empty() {
            writeln!(out, "\n## Promoted\n")?;
            for klass in promoted {
                writeln!(out, "* {}", klass.name)?;
            }
        }

        writeln!(out, "\n## Classes\n")?;
        for klass in repo.klasses() {
            let count = klass.functions.len();
            write!(
                out,
                "* {} ({} {})",
                klass.name,
                count,
                if count == 1 { "feature" } else { "features" }
            )?;
            if !klass.is_stable() {
                write!(out, " [{}]", klass.visibility)?;
            }
            writeln!(out)?;
        }

        let index = repo.feature_index();
        writeln!(out, "\n## Guide\n")?;
        for entry in index.entries() {
            let feature = entry.representative();
            write!(
                out,
                "* {:<5} {} {}",
                feature.short_kind(),
                feature.name(),
                feature.guide_path()
            )?;
            if entry.features().len() > 1 {
                write!(out, " (x{})", entry.features().len())?;
            }
            writeln!(out)?;
        }

        if !repo.changelog().is_empty() {
            writeln!(out, "\n## Releases\n")?;
            for release in repo.changelog().releases() {
                match repo.release_date(release) {
                    Some(date) => writeln!(out, "* {} ({})", release.version, date)?,
                    None => writeln!(out, "* {}", release.version)?,
                }
            }
        }

        Ok(out)
    }
}
