//! Feature index: features grouped by guide id.
//!
//! Several features may share one guide id (we document `[up-close]` on more
//! than one class) and are then shown together on one guide page. Each group
//! becomes an [`Entry`] whose display attributes come from its first feature.

use crate::error::{Error, Result};
use crate::feature::{compare, Feature};
use std::cmp::Ordering;
use std::collections::HashMap;

/// One guide page: a representative feature plus every feature sharing its id.
#[derive(Clone)]
pub struct Entry<'a> {
    representative: &'a dyn Feature,
    features: Vec<&'a dyn Feature>,
}

impl<'a> Entry<'a> {
    fn new(features: Vec<&'a dyn Feature>) -> Self {
        Entry {
            representative: features[0],
            features,
        }
    }

    /// The first feature encountered with this guide id.
    pub fn representative(&self) -> &'a dyn Feature {
        self.representative
    }

    pub fn features(&self) -> &[&'a dyn Feature] {
        &self.features
    }

    pub fn guide_id(&self) -> String {
        self.representative.guide_id()
    }
}

impl PartialEq for Entry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry<'_> {}

impl PartialOrd for Entry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self.representative, other.representative)
    }
}

impl std::fmt::Debug for Entry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("guide_id", &self.guide_id())
            .field("features", &self.features.len())
            .finish()
    }
}

pub struct FeatureIndex<'a> {
    features: Vec<&'a dyn Feature>,
    guide_ids: Vec<String>,
    groups: HashMap<String, Vec<&'a dyn Feature>>,
    entries: Vec<Entry<'a>>,
}

impl<'a> FeatureIndex<'a> {
    /// Group `features` by guide id.
    ///
    /// Guide ids keep their first-encounter order and each group keeps
    /// insertion order. Entries are sorted with a stable sort, so entries
    /// that compare equal stay in first-encounter order.
    pub fn build(features: Vec<&'a dyn Feature>) -> Self {
        let mut guide_ids: Vec<String> = Vec::new();
        let mut groups: HashMap<String, Vec<&'a dyn Feature>> = HashMap::new();

        for feature in &features {
            let id = feature.guide_id();
            groups
                .entry(id.clone())
                .or_insert_with(|| {
                    guide_ids.push(id);
                    Vec::new()
                })
                .push(*feature);
        }

        let mut entries: Vec<Entry<'a>> = guide_ids
            .iter()
            .map(|id| Entry::new(groups[id].clone()))
            .collect();
        entries.sort();

        FeatureIndex {
            features,
            guide_ids,
            groups,
            entries,
        }
    }

    /// Every feature, ungrouped, in input order.
    pub fn all(&self) -> &[&'a dyn Feature] {
        &self.features
    }

    pub fn entries(&self) -> &[Entry<'a>] {
        &self.entries
    }

    /// Distinct guide ids in first-encounter order.
    pub fn guide_ids(&self) -> &[String] {
        &self.guide_ids
    }

    pub fn find_by_guide_id(&self, guide_id: &str) -> Result<&[&'a dyn Feature]> {
        self.groups
            .get(guide_id)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::UnknownGuideId(guide_id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
