mod memory;

pub use memory::MemoryStore;

use crate::error::Result;
use crate::models::{
    Category, CategoryId, DeviceId, PageWindow, PreferenceWeights, RelatedCategoryPair,
    SubjectId, VoteReceipt,
};
use async_trait::async_trait;
use std::collections::HashSet;

/// Read/write access to categories, subjects and device preferences.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Categories in the page window, subjects ordered by votes descending.
    async fn list_categories(&self, window: PageWindow) -> Result<Vec<Category>>;

    async fn device_preferences(&self, device: &DeviceId) -> Result<PreferenceWeights>;

    /// Pairs linking `preferred` categories to others by subject-name overlap.
    async fn related_pairs(
        &self,
        preferred: &HashSet<CategoryId>,
    ) -> Result<Vec<RelatedCategoryPair>>;

    /// Categories preferred by other devices sharing one of `preferred`.
    async fn similar_device_category_ids(
        &self,
        device: &DeviceId,
        preferred: &HashSet<CategoryId>,
    ) -> Result<HashSet<CategoryId>>;

    /// Count a vote and bump the device's weight for `category_id`.
    ///
    /// `known` replaces the stored weights first when the client holds them.
    async fn record_vote(
        &self,
        device: &DeviceId,
        category_id: CategoryId,
        subject_id: SubjectId,
        known: Option<PreferenceWeights>,
    ) -> Result<VoteReceipt>;
}
