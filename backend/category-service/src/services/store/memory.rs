use super::CategoryStore;
use crate::error::{AppError, Result};
use crate::models::{
    Category, CategoryId, DeviceId, PageWindow, PreferenceWeights, RelatedCategoryPair,
    SubjectId, VoteReceipt,
};
use crate::services::signals::{discover_related_pairs, similar_device_category_ids};
use async_trait::async_trait;
use dashmap::DashMap;
use std::cmp::Reverse;
use std::collections::HashSet;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// In-process store: categories behind a lock, preferences keyed per device.
#[derive(Debug, Default)]
pub struct MemoryStore {
    categories: RwLock<Vec<Category>>,
    preferences: DashMap<DeviceId, PreferenceWeights>,
}

impl MemoryStore {
    pub fn new(categories: Vec<Category>) -> Self {
        info!("Memory store seeded with {} categories", categories.len());
        Self {
            categories: RwLock::new(categories),
            preferences: DashMap::new(),
        }
    }

    /// Parse a JSON array of categories.
    pub fn from_json(json: &str) -> Result<Self> {
        let categories: Vec<Category> = serde_json::from_str(json)?;
        let mut seen = HashSet::new();
        if let Some(duplicate) = categories.iter().find(|c| !seen.insert(c.id)) {
            return Err(AppError::BadRequest(format!(
                "duplicate category id {} in catalog",
                duplicate.id
            )));
        }
        Ok(Self::new(categories))
    }
}

fn by_relevance(mut category: Category) -> Category {
    category
        .subjects
        .sort_by_key(|subject| (Reverse(subject.votes), subject.id));
    category
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn list_categories(&self, window: PageWindow) -> Result<Vec<Category>> {
        let categories = self.categories.read().await;
        Ok(categories
            .iter()
            .skip(window.offset)
            .take(window.limit)
            .cloned()
            .map(by_relevance)
            .collect())
    }

    async fn device_preferences(&self, device: &DeviceId) -> Result<PreferenceWeights> {
        Ok(self
            .preferences
            .get(device)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn related_pairs(
        &self,
        preferred: &HashSet<CategoryId>,
    ) -> Result<Vec<RelatedCategoryPair>> {
        let categories = self.categories.read().await;
        Ok(discover_related_pairs(&categories, preferred))
    }

    async fn similar_device_category_ids(
        &self,
        device: &DeviceId,
        preferred: &HashSet<CategoryId>,
    ) -> Result<HashSet<CategoryId>> {
        // Snapshot first so no shard guard is held while comparing.
        let snapshot: Vec<(DeviceId, PreferenceWeights)> = self
            .preferences
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();

        Ok(similar_device_category_ids(
            device,
            preferred,
            snapshot.iter().map(|(d, w)| (d, w)),
        ))
    }

    async fn record_vote(
        &self,
        device: &DeviceId,
        category_id: CategoryId,
        subject_id: SubjectId,
        known: Option<PreferenceWeights>,
    ) -> Result<VoteReceipt> {
        let subject = {
            let mut categories = self.categories.write().await;
            let category = categories
                .iter_mut()
                .find(|c| c.id == category_id)
                .ok_or_else(|| AppError::NotFound(format!("category {}", category_id)))?;
            let subject = category
                .subjects
                .iter_mut()
                .find(|s| s.id == subject_id)
                .ok_or_else(|| {
                    AppError::NotFound(format!(
                        "subject {} in category {}",
                        subject_id, category_id
                    ))
                })?;
            subject.votes = subject.votes.saturating_add(1);
            subject.clone()
        };

        let preferences = {
            let mut entry = self.preferences.entry(device.clone()).or_default();
            if let Some(known) = known {
                *entry = known;
            }
            entry.record_vote(category_id);
            entry.value().clone()
        };

        debug!(
            device = %device,
            category_id,
            subject_id,
            votes = subject.votes,
            "Vote recorded"
        );

        Ok(VoteReceipt {
            category_id,
            subject,
            preferences,
        })
    }
}
