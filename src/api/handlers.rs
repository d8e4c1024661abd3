// HTTP request handlers for API endpoints

use crate::api::models::*;
use crate::catalog::params::{ListingParams, RawListingQuery};
use crate::catalog::query::run_listing;
use crate::store::SharedStore;
use actix_web::{http::header, web, HttpResponse, Result};
use std::time::SystemTime;

/// Product listing endpoint. Raw parameters are sanitized before anything
/// touches the store, so bad input can only produce a defaulted query,
/// never an error.
pub async fn list_products(
    raw: web::Query<RawListingQuery>,
    store: web::Data<SharedStore>,
) -> Result<HttpResponse> {
    let params = ListingParams::from_raw(&raw);
    tracing::info!(
        limit = params.limit,
        page = params.page,
        sort = params.sort.as_str(),
        direction = params.direction.as_str(),
        search = %params.search,
        categories = params.categories.len(),
        colors = params.colors.len(),
        sale_only = params.sale_only,
        "product listing requested"
    );

    let store = match store.get().await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "product store unavailable");
            return Ok(no_store(HttpResponse::InternalServerError())
                .json(ErrorResponse::new(format!("{e:#}"))));
        }
    };

    match run_listing(store, &params).await {
        Ok(page) => {
            tracing::info!(
                returned = page.products.len(),
                total = page.total_count,
                "product listing served"
            );
            Ok(no_store(HttpResponse::Ok()).json(ProductsResponse::from(page)))
        }
        Err(e) => {
            tracing::error!(error = %e, "product listing failed");
            Ok(no_store(HttpResponse::InternalServerError())
                .json(ErrorResponse::new(format!("{e:#}"))))
        }
    }
}

/// Every listing response is request-scoped; tell callers not to cache.
fn no_store(mut builder: actix_web::HttpResponseBuilder) -> actix_web::HttpResponseBuilder {
    builder.insert_header((header::CACHE_CONTROL, "no-store"));
    builder
}

/// Health check endpoint
pub async fn health_check(store: web::Data<SharedStore>) -> Result<HttpResponse> {
    let db_status = match store.get().await {
        Ok(store) => match sqlx::query_scalar::<_, bool>("SELECT true")
            .persistent(false)
            .fetch_one(&store.pool)
            .await
        {
            Ok(_) => "connected",
            Err(_) => "disconnected",
        },
        Err(_) => "unconfigured",
    };

    let uptime = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let response = HealthResponse {
        status: "healthy".to_string(),
        database: db_status.to_string(),
        uptime_seconds: uptime,
    };

    Ok(HttpResponse::Ok().json(response))
}
