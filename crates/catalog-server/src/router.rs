use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::products;
use crate::state::AppState;

/// Build the axum router with all catalog endpoints.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;
    Router::new()
        .route("/health", get(handler::health_handler))
        .route("/info", get(handler::info_handler))
        .merge(product_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(products::list).post(products::create))
        .route(
            "/api/products/:id",
            get(products::get)
                .put(products::update)
                .delete(products::delete),
        )
        .route(
            "/api/products/batch",
            post(products::create_batch)
                .put(products::update_batch)
                .delete(products::delete_batch),
        )
        .route("/api/products/category/:category", get(products::by_category))
        .route("/api/products/search", get(products::search))
        .route("/api/products/price-range", get(products::price_range))
        .route("/api/products/in-stock", get(products::in_stock))
        .route("/api/products/out-of-stock", get(products::out_of_stock))
        .route("/api/products/low-stock", get(products::low_stock))
        .route("/api/products/categories", get(products::categories))
        .route("/api/products/stats", get(products::stats))
        .route("/api/products/popular", get(products::popular))
        .route("/api/products/trending", get(products::popular))
        .route("/api/products/new", get(products::newest))
        .route("/api/products/discount", get(products::discounted))
        .route("/api/products/featured", get(products::featured))
        .route("/api/products/duplicates", get(products::duplicates))
        .route("/api/products/export", get(products::list))
        .route("/api/products/import", post(products::create_batch))
        .route("/api/products/similar/:id", get(products::similar))
        .route("/api/products/related/:id", get(products::related))
        .route("/api/products/validate/:id", get(products::validate))
        .route("/api/products/:id/history", get(products::history))
        .route("/api/products/:id/stock", put(products::update_stock))
        .route("/api/products/:id/discount", put(products::update_discount))
        .route("/api/products/:id/feature", put(products::update_feature))
}
