//! The `Feature` capability shared by classes and functions.
//!
//! Everything a guide page needs to list, link and sort a documented item.

use crate::model::{Function, Klass, Visibility};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Class,
    Function,
    Selector,
    Event,
}

impl FeatureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FeatureKind::Class => "class",
            FeatureKind::Function => "function",
            FeatureKind::Selector => "selector",
            FeatureKind::Event => "event",
        }
    }

    pub fn short(self) -> &'static str {
        match self {
            FeatureKind::Class => "cls",
            FeatureKind::Function => "fn",
            FeatureKind::Selector => "sel",
            FeatureKind::Event => "ev",
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait Feature {
    fn name(&self) -> &str;
    fn kind(&self) -> FeatureKind;
    fn visibility(&self) -> Visibility;
    fn guide_markdown(&self) -> &str;

    /// Guide page id. Not unique: `[up-close]` documented on two classes
    /// shares one page.
    fn guide_id(&self) -> String {
        guide_id(self.name())
    }

    fn guide_path(&self) -> String {
        format!("/{}", self.guide_id())
    }

    fn short_kind(&self) -> &'static str {
        self.kind().short()
    }

    fn search_text(&self) -> String {
        let name = self.name().to_lowercase();
        let words: Vec<&str> = name
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        format!("{} {}", name, words.join(" "))
    }

    fn sort_name(&self) -> String {
        self.name()
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase()
    }

    fn is_stable(&self) -> bool {
        self.visibility() == Visibility::Public
    }

    fn is_experimental(&self) -> bool {
        self.visibility() == Visibility::Protected
    }

    fn is_internal(&self) -> bool {
        self.visibility() == Visibility::Private
    }
}

/// Total order over features: sort name, then exact name.
pub fn compare(a: &dyn Feature, b: &dyn Feature) -> Ordering {
    a.sort_name()
        .cmp(&b.sort_name())
        .then_with(|| a.name().cmp(b.name()))
}

/// Slug used as a guide page id.
///
/// Lowercase; anything but ASCII alphanumerics, `.`, `-` and `_` becomes a
/// hyphen; hyphen runs collapse and are trimmed from both ends.
pub fn guide_id(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        let c = if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
            c
        } else {
            '-'
        };
        if c == '-' && id.ends_with('-') {
            continue;
        }
        id.push(c);
    }
    id.trim_matches('-').to_string()
}

impl Feature for Klass {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> FeatureKind {
        FeatureKind::Class
    }

    fn visibility(&self) -> Visibility {
        self.visibility
    }

    fn guide_markdown(&self) -> &str {
        &self.guide_markdown
    }
}

impl Feature for Function {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> FeatureKind {
        if self.ujs || self.name.contains('[') || self.name.starts_with('.') {
            FeatureKind::Selector
        } else if self.name.contains(':') {
            FeatureKind::Event
        } else {
            FeatureKind::Function
        }
    }

    fn visibility(&self) -> Visibility {
        self.visibility
    }

    fn guide_markdown(&self) -> &str {
        &self.guide_markdown
    }
}

impl Klass {
    /// The class itself followed by its functions.
    pub fn features(&self) -> Vec<&dyn Feature> {
        let mut features: Vec<&dyn Feature> = Vec::with_capacity(self.functions.len() + 1);
        features.push(self);
        features.extend(self.functions.iter().map(|f| f as &dyn Feature));
        features
    }
}
