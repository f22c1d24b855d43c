//! A documented library checked out on disk.
//!
//! Loading runs one full parse pass: every source file below the source
//! directory (in sorted path order), the changelog and the version file.
//! [`Repository::reload`] throws the model away and parses again.

use crate::changelog::{Changelog, Release};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::feature::Feature;
use crate::index::FeatureIndex;
use crate::model::Klass;
use crate::parser::ParseContext;
use crate::vcs::{GitCli, VersionControl};
use chrono::NaiveDate;
use regex::Regex;
use semver::Version;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info, warn};

static RE_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?").unwrap()
});

pub struct Repository {
    root: PathBuf,
    config: Config,
    vcs: Box<dyn VersionControl>,
    klasses: Vec<Klass>,
    changelog: Changelog,
    version: Option<Version>,
}

impl Repository {
    /// Load the repository at `root`, asking git for dates and revisions.
    pub fn load(root: impl AsRef<Path>, config: Config) -> Result<Self> {
        let vcs = Box::new(GitCli::new(root.as_ref()));
        Self::load_with(root, config, vcs)
    }

    /// Load with a custom version-control backend.
    pub fn load_with(
        root: impl AsRef<Path>,
        config: Config,
        vcs: Box<dyn VersionControl>,
    ) -> Result<Self> {
        let mut repository = Repository {
            root: root.as_ref().to_path_buf(),
            config,
            vcs,
            klasses: Vec::new(),
            changelog: Changelog::default(),
            version: None,
        };
        repository.reload()?;
        Ok(repository)
    }

    /// Discard the model and parse everything again.
    pub fn reload(&mut self) -> Result<()> {
        self.klasses = Vec::new();
        self.changelog = Changelog::default();
        self.version = None;

        self.klasses = self.parse_sources()?;
        self.changelog = self.read_changelog()?;
        self.version = self.read_version()?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn repository_url(&self) -> &str {
        &self.config.repository_url
    }

    /// Documented source files, sorted.
    pub fn source_paths(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(Error::InputNotFound(self.root.clone()));
        }
        let base = self.root.join(&self.config.source_dir);
        let base = glob::Pattern::escape(&base.to_string_lossy());

        let mut paths = Vec::new();
        for ext in &self.config.extensions {
            let pattern = format!("{}/**/*.{}", base, ext);
            debug!(pattern = %pattern, "source pattern");
            paths.extend(
                glob::glob(&pattern)?
                    .filter_map(|r| r.ok())
                    .filter(|p| p.is_file()),
            );
        }
        paths.sort();
        paths.dedup();
        Ok(paths)
    }

    fn parse_sources(&self) -> Result<Vec<Klass>> {
        let paths = self.source_paths()?;
        debug!(count = paths.len(), "source paths");

        let mut ctx = ParseContext::new().strict(self.config.strict);
        for path in &paths {
            let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
            if self.config.reset_active_class_per_file {
                ctx.reset_active_class();
            }
            let parsed = ctx.parse_source(&source).map_err(|e| Error::Source {
                path: path.clone(),
                source: Box::new(e),
            })?;
            debug!(path = %path.display(), blocks = parsed, "parsed source");
        }

        let klasses = ctx.into_klasses();
        info!(
            files = paths.len(),
            klasses = klasses.len(),
            functions = klasses.iter().map(|k| k.functions.len()).sum::<usize>(),
            "parsed repository"
        );
        Ok(klasses)
    }

    fn read_changelog(&self) -> Result<Changelog> {
        let path = self.root.join(&self.config.changelog);
        if !path.is_file() {
            warn!(path = %path.display(), "changelog not found");
            return Ok(Changelog::default());
        }
        let text = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        Ok(Changelog::parse(&text))
    }

    fn read_version(&self) -> Result<Option<Version>> {
        let path = self.root.join(&self.config.version_file);
        if !path.is_file() {
            warn!(path = %path.display(), "version file not found");
            return Ok(None);
        }
        let text = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        RE_VERSION
            .find_iter(&text)
            .find_map(|m| Version::parse(m.as_str()).ok())
            .map(Some)
            .ok_or(Error::InvalidVersion(path))
    }

    pub fn klasses(&self) -> &[Klass] {
        &self.klasses
    }

    pub fn klass_for_name(&self, name: &str) -> Result<&Klass> {
        self.klasses
            .iter()
            .find(|k| k.name == name)
            .ok_or_else(|| Error::UnknownClass(name.to_string()))
    }

    /// The configured promoted classes, in configuration order.
    pub fn promoted_klasses(&self) -> Result<Vec<&Klass>> {
        self.config
            .promoted_klasses
            .iter()
            .map(|name| self.klass_for_name(name))
            .collect()
    }

    /// Every class followed by its functions, in parse order.
    pub fn all_features(&self) -> Vec<&dyn Feature> {
        self.klasses.iter().flat_map(|k| k.features()).collect()
    }

    pub fn feature_index(&self) -> FeatureIndex<'_> {
        FeatureIndex::build(self.all_features())
    }

    pub fn feature_guide_ids(&self) -> Vec<String> {
        self.feature_index().guide_ids().to_vec()
    }

    /// All features shown on the guide page `guide_id`.
    pub fn features_for_guide_id(&self, guide_id: &str) -> Result<Vec<&dyn Feature>> {
        Ok(self.feature_index().find_by_guide_id(guide_id)?.to_vec())
    }

    pub fn changelog(&self) -> &Changelog {
        &self.changelog
    }

    pub fn release_date(&self, release: &Release) -> Option<NaiveDate> {
        release.date(self.vcs.as_ref())
    }

    pub fn version(&self) -> Option<&Version> {
        self.version.as_ref()
    }

    pub fn git_version_tag(&self) -> Option<String> {
        self.version.as_ref().map(|v| format!("v{}", v))
    }

    pub fn git_revision(&self) -> Option<String> {
        self.vcs.revision()
    }
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("root", &self.root)
            .field(
                "klass_names",
                &self.klasses.iter().map(|k| k.name.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
