pub mod categories;
pub mod cookies;

pub use categories::{
    list_categories, vote_subject, CategoriesQuery, CategoriesResponse, ListingType, VoteResponse,
};

use crate::config::RankingConfig;
use crate::services::CategoryFeedService;
use actix_web::web;
use std::sync::Arc;

/// Shared handler state
pub struct AppState {
    pub feed: Arc<CategoryFeedService>,
    pub ranking: RankingConfig,
}

async fn health() -> &'static str {
    "OK"
}

/// Register every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .service(list_categories)
        .service(vote_subject);
}
