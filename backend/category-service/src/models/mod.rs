use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use uuid::Uuid;

pub type CategoryId = i64;
pub type SubjectId = i64;

/// A named grouping of subjects, as shown on the listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A single voteable link inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    #[serde(default)]
    pub votes: u64,
    pub link: String,
}

/// Accumulated vote counts per category for one device.
///
/// Weights grow by one per vote and never decay. Absent categories weigh 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceWeights(BTreeMap<CategoryId, u32>);

impl PreferenceWeights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn weight(&self, category_id: CategoryId) -> u32 {
        self.0.get(&category_id).copied().unwrap_or(0)
    }

    pub fn record_vote(&mut self, category_id: CategoryId) -> u32 {
        let weight = self.0.entry(category_id).or_insert(0);
        *weight = weight.saturating_add(1);
        *weight
    }

    /// Category ids with a nonzero weight.
    pub fn preferred_ids(&self) -> HashSet<CategoryId> {
        self.0
            .iter()
            .filter(|(_, weight)| **weight > 0)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|weight| *weight == 0)
    }
}

impl FromIterator<(CategoryId, u32)> for PreferenceWeights {
    fn from_iter<I: IntoIterator<Item = (CategoryId, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Opaque token identifying an anonymous browser.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    const MAX_LEN: usize = 128;

    /// Accepts any non-blank token up to 128 visible ASCII characters.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty()
            || raw.len() > Self::MAX_LEN
            || !raw.chars().all(|c| c.is_ascii_graphic())
        {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Two categories linked by subject-name substring overlap.
///
/// Emitted per direction; consumers read `related` as the discovered side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelatedCategoryPair {
    pub source: CategoryId,
    pub related: CategoryId,
}

impl RelatedCategoryPair {
    pub fn new(source: CategoryId, related: CategoryId) -> Self {
        Self { source, related }
    }

    pub fn reversed(self) -> Self {
        Self {
            source: self.related,
            related: self.source,
        }
    }
}

/// Offset/limit window over the category listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: usize,
    pub limit: usize,
}

impl PageWindow {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }
}

/// Result of a recorded vote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoteReceipt {
    pub category_id: CategoryId,
    pub subject: Subject,
    pub preferences: PreferenceWeights,
}
