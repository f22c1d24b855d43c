//! Changelog parsing.
//!
//! A release section starts with a line holding a `MAJOR.MINOR.PATCH`
//! version, underlined by a line of dashes:
//!
//! ```text
//! 1.2.3
//! -----
//! Release notes
//! ```
//!
//! Text before the first heading is an introduction and is dropped.

use crate::vcs::VersionControl;
use chrono::{DateTime, NaiveDate};
use regex::Regex;
use std::cell::OnceCell;
use std::sync::LazyLock;
use tracing::debug;

static RE_RELEASE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(\d+\.\d+\.\d+)\n-+\n+").unwrap());

#[derive(Debug, Clone)]
pub struct Release {
    pub version: String,
    pub markdown: String,
    date: OnceCell<Option<NaiveDate>>,
}

impl Release {
    pub fn new(version: impl Into<String>, markdown: impl Into<String>) -> Self {
        Release {
            version: version.into(),
            markdown: markdown.into(),
            date: OnceCell::new(),
        }
    }

    pub fn git_tag(&self) -> String {
        format!("v{}", self.version)
    }

    /// Tree URL of this release's tag below `repository_url`.
    pub fn source_url(&self, repository_url: &str) -> String {
        format!(
            "{}/tree/{}",
            repository_url.trim_end_matches('/'),
            self.git_tag()
        )
    }

    /// Release date from the tag's commit, looked up once.
    pub fn date(&self, vcs: &dyn VersionControl) -> Option<NaiveDate> {
        *self.date.get_or_init(|| {
            let tag = self.git_tag();
            let raw = vcs.tag_timestamp(&tag)?;
            match DateTime::parse_from_str(raw.trim(), "%Y-%m-%d %H:%M:%S %z") {
                Ok(timestamp) => Some(timestamp.date_naive()),
                Err(e) => {
                    debug!(tag = %tag, raw = %raw, error = %e, "unparseable tag timestamp");
                    None
                }
            }
        })
    }
}

/// All releases of a changelog, newest first as written.
#[derive(Debug, Clone, Default)]
pub struct Changelog {
    releases: Vec<Release>,
}

impl Changelog {
    pub fn parse(markdown: &str) -> Self {
        let text = markdown.replace('\r', "");
        let headings: Vec<_> = RE_RELEASE_HEADING.captures_iter(&text).collect();

        let releases = headings
            .iter()
            .enumerate()
            .map(|(i, caps)| {
                let body_start = caps.get(0).map_or(0, |m| m.end());
                let body_end = headings
                    .get(i + 1)
                    .and_then(|next| next.get(0))
                    .map_or(text.len(), |m| m.start());
                Release::new(&caps[1], &text[body_start..body_end])
            })
            .collect();

        Changelog { releases }
    }

    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    pub fn versions(&self) -> Vec<&str> {
        self.releases.iter().map(|r| r.version.as_str()).collect()
    }

    pub fn release_for_version(&self, version: &str) -> Option<&Release> {
        self.releases.iter().find(|r| r.version == version)
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakeVcs {
        timestamp: Option<&'static str>,
        calls: Cell<usize>,
    }

    impl VersionControl for FakeVcs {
        fn tag_timestamp(&self, _tag: &str) -> Option<String> {
            self.calls.set(self.calls.get() + 1);
            self.timestamp.map(str::to_string)
        }

        fn revision(&self) -> Option<String> {
            None
        }
    }

    #[test]
    fn splits_releases_and_drops_intro() {
        let text = "intro\n\n1.2.3\n-----\nBody A\n\n1.2.2\n-----\nBody B\n";
        let changelog = Changelog::parse(text);
        let releases = changelog.releases();
        assert_eq!(releases.len(), 2);
        assert_eq!(releases[0].version, "1.2.3");
        assert_eq!(releases[0].markdown, "Body A\n\n");
        assert_eq!(releases[1].version, "1.2.2");
        assert_eq!(releases[1].markdown, "Body B\n");
    }

    #[test]
    fn carriage_returns_are_stripped() {
        let changelog = Changelog::parse("0.1.0\r\n---\r\n\r\nFirst\r\n");
        assert_eq!(changelog.versions(), vec!["0.1.0"]);
        assert_eq!(changelog.releases()[0].markdown, "First\n");
    }

    #[test]
    fn version_must_fill_the_line() {
        let changelog = Changelog::parse("Upgrade to 1.2.3\n-----\nnope\n");
        assert!(changelog.is_empty());
    }

    #[test]
    fn release_lookup() {
        let changelog = Changelog::parse("2.0.0\n--\nTwo\n1.0.0\n--\nOne\n");
        assert_eq!(changelog.release_for_version("1.0.0").unwrap().markdown, "One\n");
        assert!(changelog.release_for_version("3.0.0").is_none());
    }

    #[test]
    fn tag_and_url() {
        let release = Release::new("0.50.0", "");
        assert_eq!(release.git_tag(), "v0.50.0");
        assert_eq!(
            release.source_url("https://github.com/unpoly/unpoly/"),
            "https://github.com/unpoly/unpoly/tree/v0.50.0"
        );
    }

    #[test]
    fn date_is_resolved_once() {
        let vcs = FakeVcs {
            timestamp: Some("2017-12-06 08:14:52 +0100"),
            calls: Cell::new(0),
        };
        let release = Release::new("0.50.0", "");
        let expected = NaiveDate::from_ymd_opt(2017, 12, 6);
        assert_eq!(release.date(&vcs), expected);
        assert_eq!(release.date(&vcs), expected);
        assert_eq!(vcs.calls.get(), 1);
    }

    #[test]
    fn missing_tag_has_no_date() {
        let vcs = FakeVcs {
            timestamp: None,
            calls: Cell::new(0),
        };
        assert_eq!(Release::new("9.9.9", "").date(&vcs), None);

        let garbage = FakeVcs {
            timestamp: Some("yesterday"),
            calls: Cell::new(0),
        };
        assert_eq!(Release::new("9.9.9", "").date(&garbage), None);
    }
}
