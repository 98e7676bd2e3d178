/// Category API Handlers
///
/// HTTP endpoints for listing and voting
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::cookies::{
    device_cookie, device_from_request, preferences_cookie, preferences_from_request,
};
use super::AppState;
use crate::error::Result;
use crate::models::{Category, CategoryId, PageWindow, PreferenceWeights, Subject, SubjectId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListingType {
    /// Storage order
    #[default]
    Latest,
    /// Personalized for the requesting device
    ForYou,
}

/// Query parameters for GET /api/categories
#[derive(Debug, Deserialize)]
pub struct CategoriesQuery {
    #[serde(rename = "type", default)]
    pub listing: ListingType,
    #[serde(default)]
    pub offset: usize,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VoteResponse {
    pub category_id: CategoryId,
    pub subject: Subject,
    pub preferences: PreferenceWeights,
}

/// GET /api/categories
#[get("/api/categories")]
pub async fn list_categories(
    req: HttpRequest,
    query: web::Query<CategoriesQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (device, issued) = device_from_request(&req);
    let window = PageWindow::new(query.offset, state.ranking.clamp_limit(query.limit));

    debug!(
        device = %device,
        listing = ?query.listing,
        offset = window.offset,
        limit = window.limit,
        "Listing categories"
    );

    let categories = match query.listing {
        ListingType::ForYou => {
            state
                .feed
                .for_you(&device, preferences_from_request(&req), window)
                .await
        }
        ListingType::Latest => state.feed.latest(window).await,
    }
    .map_err(|err| {
        error!(device = %device, "Failed to list categories: {}", err);
        err
    })?;

    let mut response = HttpResponse::Ok();
    if issued {
        response.cookie(device_cookie(&device));
    }

    let count = categories.len();
    Ok(response.json(CategoriesResponse { categories, count }))
}

/// POST /api/categories/{category_id}/subjects/{subject_id}/vote
#[post("/api/categories/{category_id}/subjects/{subject_id}/vote")]
pub async fn vote_subject(
    req: HttpRequest,
    path: web::Path<(CategoryId, SubjectId)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (category_id, subject_id) = path.into_inner();
    let (device, issued) = device_from_request(&req);

    let receipt = state
        .feed
        .vote(
            &device,
            category_id,
            subject_id,
            preferences_from_request(&req),
        )
        .await?;

    let mut response = HttpResponse::Ok();
    if issued {
        response.cookie(device_cookie(&device));
    }
    response.cookie(preferences_cookie(&receipt.preferences));

    Ok(response.json(VoteResponse {
        category_id: receipt.category_id,
        subject: receipt.subject,
        preferences: receipt.preferences,
    }))
}
