/// Ranking Module
///
/// Orders the candidate category window for the "for you" listing.
///
/// # Workflow
/// 1. Build the interest set from the request's signals
/// 2. Keep the candidates in the interest set, in their original order
/// 3. No match at all: fall back to a uniform shuffle of every candidate
/// 4. Stable sort by descending preference weight
///
/// The ranker is pure and stateless: no I/O, nothing cached between calls.
pub mod fallback;

pub use fallback::shuffle_candidates;

use crate::models::{Category, CategoryId};
use crate::services::signals::InterestSignals;
use rand::Rng;
use std::cmp::Reverse;
use std::collections::HashSet;
use tracing::debug;

/// Per-call counters, logged by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankStats {
    pub candidates: usize,
    pub interest_set: usize,
    pub matched: usize,
    pub fallback: bool,
}

#[derive(Debug, Clone)]
pub struct RankedCategories {
    pub categories: Vec<Category>,
    pub stats: RankStats,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryRanker;

impl CategoryRanker {
    pub fn new() -> Self {
        Self
    }

    /// Rank with the thread-local RNG for the fallback path.
    pub fn rank(&self, candidates: Vec<Category>, signals: &InterestSignals) -> RankedCategories {
        self.rank_with_rng(candidates, signals, &mut rand::thread_rng())
    }

    pub fn rank_with_rng<R: Rng + ?Sized>(
        &self,
        candidates: Vec<Category>,
        signals: &InterestSignals,
        rng: &mut R,
    ) -> RankedCategories {
        let interest = signals.interest_set();
        let mut stats = RankStats {
            candidates: candidates.len(),
            interest_set: interest.len(),
            ..Default::default()
        };

        let (matched, rest) = partition_by_interest(candidates, &interest);
        stats.matched = matched.len();

        let mut ordered = if matched.is_empty() && !rest.is_empty() {
            stats.fallback = true;
            let mut all = rest;
            shuffle_candidates(&mut all, rng);
            all
        } else {
            matched
        };

        // sort_by_key is stable: equal weights keep the order from above.
        ordered.sort_by_key(|category| Reverse(signals.preferences.weight(category.id)));

        debug!(
            candidates = stats.candidates,
            interest_set = stats.interest_set,
            matched = stats.matched,
            fallback = stats.fallback,
            "Ranked category candidates"
        );

        RankedCategories {
            categories: ordered,
            stats,
        }
    }
}

/// Split candidates into those in `interest` and the rest, keeping relative order.
pub fn partition_by_interest(
    candidates: Vec<Category>,
    interest: &HashSet<CategoryId>,
) -> (Vec<Category>, Vec<Category>) {
    candidates
        .into_iter()
        .partition(|category| interest.contains(&category.id))
}
