//! Category listing pipeline
//!
//! Gathers candidates and personalization signals from the store, then hands
//! the joined, request-scoped data to the synchronous ranker.

use crate::error::Result;
use crate::models::{
    Category, CategoryId, DeviceId, PageWindow, PreferenceWeights, SubjectId, VoteReceipt,
};
use crate::services::ranking::CategoryRanker;
use crate::services::signals::InterestSignals;
use crate::services::store::CategoryStore;
use std::sync::Arc;
use tracing::info;

pub struct CategoryFeedService {
    store: Arc<dyn CategoryStore>,
    ranker: CategoryRanker,
}

impl CategoryFeedService {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        Self {
            store,
            ranker: CategoryRanker::new(),
        }
    }

    /// Personalized listing for one device.
    ///
    /// `cookie_preferences` wins over stored weights when present.
    pub async fn for_you(
        &self,
        device: &DeviceId,
        cookie_preferences: Option<PreferenceWeights>,
        window: PageWindow,
    ) -> Result<Vec<Category>> {
        let preferences = match cookie_preferences {
            Some(preferences) => preferences,
            None => self.store.device_preferences(device).await?,
        };
        let preferred = preferences.preferred_ids();

        let (candidates, related_pairs, similar_ids) = tokio::try_join!(
            self.store.list_categories(window),
            self.store.related_pairs(&preferred),
            self.store.similar_device_category_ids(device, &preferred),
        )?;

        let signals = InterestSignals::new(preferences, related_pairs, similar_ids);
        let ranked = self.ranker.rank(candidates, &signals);

        info!(
            device = %device,
            offset = window.offset,
            limit = window.limit,
            candidates = ranked.stats.candidates,
            matched = ranked.stats.matched,
            fallback = ranked.stats.fallback,
            "For-you listing ranked"
        );

        Ok(ranked.categories)
    }

    /// Unpersonalized listing in storage order.
    pub async fn latest(&self, window: PageWindow) -> Result<Vec<Category>> {
        self.store.list_categories(window).await
    }

    /// Record a vote; `cookie_preferences` carries the client's current weights.
    pub async fn vote(
        &self,
        device: &DeviceId,
        category_id: CategoryId,
        subject_id: SubjectId,
        cookie_preferences: Option<PreferenceWeights>,
    ) -> Result<VoteReceipt> {
        self.store
            .record_vote(device, category_id, subject_id, cookie_preferences)
            .await
    }
}
