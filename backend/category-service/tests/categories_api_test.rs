use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use std::collections::HashSet;
use std::sync::Arc;

use category_service::config::RankingConfig;
use category_service::handlers::cookies::{
    encode_preferences, DEVICE_COOKIE, PREFERENCES_COOKIE,
};
use category_service::handlers::{self, AppState, CategoriesResponse, VoteResponse};
use category_service::models::PreferenceWeights;
use category_service::{CategoryFeedService, MemoryStore};

const CATALOG: &str = r#"[
    {"id": 1, "name": "Programming", "subjects": [
        {"id": 1, "name": "Rust", "votes": 4, "link": "https://www.rust-lang.org"},
        {"id": 2, "name": "Haskell", "votes": 1, "link": "https://www.haskell.org"}
    ]},
    {"id": 2, "name": "Games", "subjects": [
        {"id": 1, "name": "Rust (video game)", "votes": 2, "link": "https://rust.facepunch.com"}
    ]},
    {"id": 3, "name": "Baking", "subjects": [
        {"id": 1, "name": "Sourdough", "votes": 7, "link": "https://example.com/sourdough"}
    ]},
    {"id": 4, "name": "Hiking", "coordinates": {"latitude": 46.55, "longitude": 7.98}, "subjects": [
        {"id": 1, "name": "Eiger trail", "votes": 3, "link": "https://example.com/eiger"}
    ]},
    {"id": 5, "name": "Bread", "subjects": [
        {"id": 1, "name": "Rye", "votes": 0, "link": "https://example.com/rye"}
    ]}
]"#;

fn state(ranking: RankingConfig) -> web::Data<AppState> {
    let store = MemoryStore::from_json(CATALOG).expect("catalog parses");
    web::Data::new(AppState {
        feed: Arc::new(CategoryFeedService::new(Arc::new(store))),
        ranking,
    })
}

fn ids(body: &CategoriesResponse) -> Vec<i64> {
    body.categories.iter().map(|c| c.id).collect()
}

fn device(token: &str) -> Cookie<'static> {
    Cookie::new(DEVICE_COOKIE, token.to_string())
}

#[actix_web::test]
async fn health_returns_ok() {
    let app = test::init_service(
        App::new()
            .app_data(state(RankingConfig::default()))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "OK");
}

#[actix_web::test]
async fn latest_listing_respects_window_and_issues_device_cookie() {
    let app = test::init_service(
        App::new()
            .app_data(state(RankingConfig::default()))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/categories?offset=1&limit=2")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp
        .response()
        .cookies()
        .any(|cookie| cookie.name() == DEVICE_COOKIE));

    let body: CategoriesResponse = test::read_body_json(resp).await;
    assert_eq!(ids(&body), vec![2, 3]);
    assert_eq!(body.count, 2);
}

#[actix_web::test]
async fn limit_is_clamped_to_max() {
    let ranking = RankingConfig {
        default_limit: 2,
        max_limit: 3,
        catalog_path: None,
    };
    let app = test::init_service(
        App::new()
            .app_data(state(ranking))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/categories?limit=50")
        .cookie(device("known"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.response().cookies().next().is_none());
    let body: CategoriesResponse = test::read_body_json(resp).await;
    assert_eq!(body.count, 3);

    let req = test::TestRequest::get().uri("/api/categories").to_request();
    let body: CategoriesResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.count, 2);
}

#[actix_web::test]
async fn for_you_without_signals_returns_whole_window() {
    let app = test::init_service(
        App::new()
            .app_data(state(RankingConfig::default()))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/categories?type=for-you")
        .cookie(device("brand-new"))
        .to_request();
    let body: CategoriesResponse = test::call_and_read_body_json(&app, req).await;

    let got: HashSet<i64> = ids(&body).into_iter().collect();
    assert_eq!(got, HashSet::from([1, 2, 3, 4, 5]));
    assert_eq!(body.count, 5);
}

#[actix_web::test]
async fn for_you_uses_cookie_preferences_and_related_categories() {
    let app = test::init_service(
        App::new()
            .app_data(state(RankingConfig::default()))
            .configure(handlers::configure),
    )
    .await;

    // Programming weighs 3; Games shares the "Rust" subject name.
    let prefs: PreferenceWeights = [(1, 3)].into_iter().collect();
    let req = test::TestRequest::get()
        .uri("/api/categories?type=for-you")
        .cookie(device("reader"))
        .cookie(Cookie::new(PREFERENCES_COOKIE, encode_preferences(&prefs)))
        .to_request();
    let body: CategoriesResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(ids(&body), vec![1, 2]);
}

#[actix_web::test]
async fn votes_feed_preferences_and_similar_devices() {
    let app = test::init_service(
        App::new()
            .app_data(state(RankingConfig::default()))
            .configure(handlers::configure),
    )
    .await;

    // Another device likes Baking and Hiking.
    for category in [3, 4] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/categories/{}/subjects/1/vote", category))
            .cookie(device("hiker"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    // This device votes Baking twice.
    let mut last: Option<VoteResponse> = None;
    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/categories/3/subjects/1/vote")
            .cookie(device("baker"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp
            .response()
            .cookies()
            .any(|cookie| cookie.name() == PREFERENCES_COOKIE));
        last = Some(test::read_body_json(resp).await);
    }
    let vote = last.expect("vote response");
    assert_eq!(vote.subject.votes, 10);
    assert_eq!(vote.preferences.weight(3), 2);

    // Stored weights are used when no preferences cookie is sent.
    let req = test::TestRequest::get()
        .uri("/api/categories?type=for-you")
        .cookie(device("baker"))
        .to_request();
    let body: CategoriesResponse = test::call_and_read_body_json(&app, req).await;

    // Baking by weight; Hiking via the similar device. Bread has no overlap.
    assert_eq!(ids(&body), vec![3, 4]);
}

#[actix_web::test]
async fn vote_keeps_weights_held_in_cookie() {
    let app = test::init_service(
        App::new()
            .app_data(state(RankingConfig::default()))
            .configure(handlers::configure),
    )
    .await;

    // The store has never seen this device, but its cookie carries history.
    let prefs: PreferenceWeights = [(1, 5)].into_iter().collect();
    let req = test::TestRequest::post()
        .uri("/api/categories/2/subjects/1/vote")
        .cookie(device("returning"))
        .cookie(Cookie::new(PREFERENCES_COOKIE, encode_preferences(&prefs)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let refreshed = resp
        .response()
        .cookies()
        .find(|cookie| cookie.name() == PREFERENCES_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .expect("preferences cookie");
    let vote: VoteResponse = test::read_body_json(resp).await;

    assert_eq!(vote.preferences.weight(1), 5);
    assert_eq!(vote.preferences.weight(2), 1);
    assert_eq!(refreshed, encode_preferences(&vote.preferences));

    // Later listings without the cookie rank from the merged stored weights.
    let req = test::TestRequest::get()
        .uri("/api/categories?type=for-you")
        .cookie(device("returning"))
        .to_request();
    let body: CategoriesResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body), vec![1, 2]);
}

#[actix_web::test]
async fn vote_on_unknown_subject_is_not_found() {
    let app = test::init_service(
        App::new()
            .app_data(state(RankingConfig::default()))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/categories/1/subjects/99/vote")
        .cookie(device("someone"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn unknown_listing_type_is_rejected() {
    let app = test::init_service(
        App::new()
            .app_data(state(RankingConfig::default()))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/categories?type=popular")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
