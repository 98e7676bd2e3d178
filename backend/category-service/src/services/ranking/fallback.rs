//! Fallback ordering for requests without any personalization signal.
//!
//! A device with no preferences, no related categories and no similar
//! devices still gets the full candidate window, in a uniformly random
//! order so every category gets exposure.

use crate::models::Category;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Uniformly permute `categories` in place (Fisher-Yates).
pub fn shuffle_candidates<R: Rng + ?Sized>(categories: &mut [Category], rng: &mut R) {
    categories.shuffle(rng);
    debug!("Fallback shuffle applied to {} categories", categories.len());
}
