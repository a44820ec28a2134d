//! JSON endpoints over [`Catalog`].
//!
//! Browser sessions block, so each call runs on actix-web's blocking pool
//! and concurrent requests get their own sessions.

use crate::catalog::Catalog;
use crate::error::ScrapeError;
use crate::urls::parse_page;
use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;

type Params = web::Query<HashMap<String, String>>;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(latest)
        .service(recent)
        .service(search)
        .service(titles)
        .service(categories)
        .service(metrics);
}

fn param<'a>(query: &'a Params, key: &str) -> Option<&'a str> {
    query.get(key).map(String::as_str)
}

/// HTTP status for an operation-fatal failure
pub fn status_for(error: &ScrapeError) -> StatusCode {
    match error {
        ScrapeError::RenderTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        ScrapeError::NavigationFailure { .. } | ScrapeError::Session(_) => StatusCode::BAD_GATEWAY,
        ScrapeError::InvalidSelector(_) | ScrapeError::InvalidPattern(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn respond<T: Serialize>(result: Result<Result<T, ScrapeError>, BlockingError>) -> HttpResponse {
    match result {
        Ok(Ok(body)) => HttpResponse::Ok().json(body),
        Ok(Err(e)) => {
            log::error!("Catalog operation failed: {}", e);
            HttpResponse::build(status_for(&e)).json(serde_json::json!({"error": e.to_string()}))
        }
        Err(e) => {
            log::error!("Blocking task failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({"error": e.to_string()}))
        }
    }
}

#[get("/latest")]
async fn latest(data: web::Data<Catalog>, query: Params) -> impl Responder {
    let page = parse_page(param(&query, "page"));
    let catalog = data.into_inner();
    respond(web::block(move || catalog.get_latest_updates(page)).await)
}

#[get("/recent")]
async fn recent(data: web::Data<Catalog>, query: Params) -> impl Responder {
    let page = parse_page(param(&query, "page"));
    let catalog = data.into_inner();
    respond(web::block(move || catalog.get_recent_listings(page)).await)
}

#[get("/titles")]
async fn titles(data: web::Data<Catalog>, query: Params) -> impl Responder {
    let page = parse_page(param(&query, "page"));
    let category = param(&query, "category").map(str::to_string);
    let catalog = data.into_inner();
    respond(web::block(move || catalog.get_all_listings(page, category.as_deref())).await)
}

#[get("/titles/search")]
async fn search(data: web::Data<Catalog>, query: Params) -> impl Responder {
    let q = match param(&query, "q").map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => q.to_string(),
        None => {
            return HttpResponse::BadRequest().json(serde_json::json!({"error": "Missing 'q' parameter"}))
        }
    };
    let page = parse_page(param(&query, "page"));
    let catalog = data.into_inner();
    respond(web::block(move || catalog.search_listings(&q, page)).await)
}

#[get("/categories")]
async fn categories(data: web::Data<Catalog>) -> impl Responder {
    let catalog = data.into_inner();
    respond(web::block(move || catalog.get_categories()).await)
}

#[get("/metrics")]
async fn metrics(data: web::Data<Catalog>) -> impl Responder {
    HttpResponse::Ok().json(data.metrics())
}
