//! JSON renderer: the whole model for tooling integration.
//!
//! Classes are serialized as parsed; the feature index is flattened into
//! one record per guide page.

use crate::render::Renderer;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use guidedoc::{Feature, FeatureKind, Klass, Repository, Visibility};
use semver::Version;
use serde::Serialize;

pub struct JsonRenderer;

#[derive(Serialize)]
struct Snapshot<'a> {
    version: Option<&'a Version>,
    revision: Option<String>,
    promoted_klasses: Vec<&'a str>,
    klasses: &'a [Klass],
    guide: Vec<GuidePage>,
    releases: Vec<ReleaseRecord<'a>>,
}

#[derive(Serialize)]
struct GuidePage {
    guide_id: String,
    guide_path: String,
    name: String,
    kind: FeatureKind,
    visibility: Visibility,
    search_text: String,
    features: usize,
}

#[derive(Serialize)]
struct ReleaseRecord<'a> {
    version: &'a str,
    date: Option<NaiveDate>,
    git_tag: String,
    source_url: String,
    markdown: &'a str,
}

impl Renderer for JsonRenderer {
    fn render(&self, repo: &Repository) -> Result<String> {
        let index = repo.feature_index();
        let guide = index
            .entries()
            .iter()
            .map(|entry| {
                let feature = entry.representative();
                GuidePage {
                    guide_id: feature.guide_id(),
                    guide_path: feature.guide_path(),
                    name: feature.name().to_string(),
                    kind: feature.kind(),
                    visibility: feature.visibility(),
                    search_text: feature.search_text(),
                    features: entry.features().len(),
                }
            })
            .collect();

        let releases = repo
            .changelog()
            .releases()
            .iter()
            .map(|release| ReleaseRecord {
                version: &release.version,
                date: repo.release_date(release),
                git_tag: release.git_tag(),
                source_url: release.source_url(repo.repository_url()),
                markdown: &release.markdown,
            })
            .collect();

        let snapshot = Snapshot {
            version: repo.version(),
            revision: repo.git_revision(),
            promoted_klasses: repo
                .promoted_klasses()?
                .into_iter()
                .map(|k| k.name.as_str())
                .collect(),
            klasses: repo.klasses(),
            guide,
            releases,
        };

        let mut out =
            serde_json::to_string_pretty(&snapshot).context("failed to serialize model")?;
        out.push('\n');
        Ok(out)
    }
}
