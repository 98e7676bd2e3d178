/// Personalization signals
///
/// The three inputs that decide which categories a device is interested in:
/// - **Preferences**: the device's own accumulated vote weights
/// - **Related**: categories whose subject names overlap a preferred category's
/// - **Similar devices**: categories preferred by devices sharing a preference
mod related;
mod similar;

pub use related::discover_related_pairs;
pub use similar::similar_device_category_ids;

use crate::models::{CategoryId, PreferenceWeights, RelatedCategoryPair};
use std::collections::HashSet;

/// Request-scoped signal bundle handed to the ranker.
#[derive(Debug, Clone, Default)]
pub struct InterestSignals {
    pub preferences: PreferenceWeights,
    pub related_pairs: Vec<RelatedCategoryPair>,
    pub similar_device_category_ids: HashSet<CategoryId>,
}

impl InterestSignals {
    pub fn new(
        preferences: PreferenceWeights,
        related_pairs: Vec<RelatedCategoryPair>,
        similar_device_category_ids: HashSet<CategoryId>,
    ) -> Self {
        Self {
            preferences,
            related_pairs,
            similar_device_category_ids,
        }
    }

    /// Union of preferred ids, the related side of each pair and similar-device ids.
    pub fn interest_set(&self) -> HashSet<CategoryId> {
        let mut interest = self.preferences.preferred_ids();
        interest.extend(self.related_pairs.iter().map(|pair| pair.related));
        interest.extend(self.similar_device_category_ids.iter().copied());
        interest
    }
}
