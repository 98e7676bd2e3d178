pub mod feed;
pub mod ranking;
pub mod signals;
pub mod store;

pub use feed::CategoryFeedService;
pub use ranking::{CategoryRanker, RankStats, RankedCategories};
pub use signals::InterestSignals;
pub use store::{CategoryStore, MemoryStore};
