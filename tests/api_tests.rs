/// HTTP surface tests
mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use common::*;
use manga_catalog_scraper::api;

macro_rules! app {
    ($renderer:expr) => {{
        let (_, catalog) = catalog($renderer);
        test::init_service(
            App::new()
                .app_data(web::Data::new(catalog))
                .configure(api::configure),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_search_requires_query() {
    let app = app!(FixtureRenderer::new());

    for uri in ["/titles/search", "/titles/search?q=%20%20"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Missing 'q' parameter");
    }
}

#[actix_web::test]
async fn test_recent_with_bad_page_uses_first_page() {
    let html = card_page(&[manga_card(Some("Dandadan"), Some("/c.jpg"))]);
    let app = app!(FixtureRenderer::new().page("https://mangadex.org/titles/recent?page=1", html));

    let req = test::TestRequest::get().uri("/recent?page=abc").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["page"], 1);
    assert_eq!(body["results_count"], 1);
    assert_eq!(body["results"][0]["manga_url"], "https://mangadex.org/title/dandadan");
    assert_eq!(body["results"][0]["cover_image"], "https://mangadex.org/c.jpg");
}

#[actix_web::test]
async fn test_unknown_category_is_a_structured_result() {
    let app = app!(FixtureRenderer::new().page(TAGS_URL, TAGS_PAGE));

    let req = test::TestRequest::get().uri("/titles?category=Cooking").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["results"], serde_json::json!([]));
    assert_eq!(body["results_count"], 0);
    assert_eq!(body["error"], "Category 'Cooking' not found");
}

#[actix_web::test]
async fn test_render_timeout_maps_to_gateway_timeout() {
    let app = app!(FixtureRenderer::new());

    let req = test::TestRequest::get().uri("/latest").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::GATEWAY_TIMEOUT);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains(".chapter-feed__container"));
}

#[actix_web::test]
async fn test_categories_and_metrics() {
    let app = app!(FixtureRenderer::new().page(TAGS_URL, TAGS_PAGE));

    let req = test::TestRequest::get().uri("/categories").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["categories"][0]["slug"], "action");

    let req = test::TestRequest::get().uri("/metrics").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body[0]["operation"], "categories");
    assert_eq!(body[0]["successful_calls"], 1);
}
