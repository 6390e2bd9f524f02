//! Product routes: request shaping and validation around the store.
//!
//! Handlers assign identifiers and timestamps, validate input, and translate
//! store results into JSON. All catalog semantics live in `catalog-store`.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use catalog_store::views;
use catalog_types::{
    validate_discount, HistoryEntry, Product, ProductId, ProductInput, ProductStats,
};

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

type Products = ServerResult<Json<Vec<Product>>>;

#[derive(Debug, Deserialize)]
pub struct StockUpdate {
    pub stock: u32,
}

#[derive(Debug, Deserialize)]
pub struct DiscountUpdate {
    pub discount: f64,
}

#[derive(Debug, Deserialize)]
pub struct FeatureUpdate {
    pub featured: bool,
}

#[derive(Debug, Deserialize)]
pub struct BatchUpdateRequest {
    pub ids: Vec<ProductId>,
    pub update: ProductInput,
}

#[derive(Debug, Deserialize)]
pub struct BatchDeleteRequest {
    pub ids: Vec<ProductId>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PriceRangeQuery {
    pub min: Option<String>,
    pub max: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ThresholdQuery {
    pub threshold: Option<String>,
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ServerResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ServerError::BadRequest(rejection.body_text()))
}

fn parse_param<T: FromStr>(raw: Option<&str>, name: &str) -> ServerResult<T> {
    raw.and_then(|v| v.trim().parse().ok())
        .ok_or_else(|| ServerError::BadRequest(format!("invalid or missing '{name}' parameter")))
}

fn parse_or<T: FromStr>(raw: Option<&str>, name: &str, default: T) -> ServerResult<T> {
    match raw {
        None => Ok(default),
        Some(_) => parse_param(raw, name),
    }
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

pub async fn list(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.store.list_all())
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> ServerResult<Json<Product>> {
    Ok(Json(state.store.get_by_id(&id)?))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<Product>)> {
    let input = body(payload)?;
    input.validate()?;
    let product = input.into_product(ProductId::generate(), Utc::now());
    state.store.create(product.clone())?;
    tracing::info!(id = %product.id, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> ServerResult<Json<Product>> {
    let input = body(payload)?;
    input.validate()?;
    let mut product = state.store.get_by_id(&id)?;
    input.apply_to(&mut product, Utc::now());
    Ok(Json(state.store.update(&id, product)?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> ServerResult<StatusCode> {
    state.store.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Filters and search
// ---------------------------------------------------------------------------

pub async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<Vec<Product>> {
    Json(state.store.get_by_category(&category))
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Products {
    let q = query
        .q
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ServerError::BadRequest("query parameter 'q' is required".into()))?;
    Ok(Json(views::search(&state.store.list_all(), &q)))
}

pub async fn price_range(
    State(state): State<AppState>,
    Query(query): Query<PriceRangeQuery>,
) -> Products {
    let min: f64 = parse_param(query.min.as_deref(), "min")?;
    let max: f64 = parse_param(query.max.as_deref(), "max")?;
    Ok(Json(state.store.get_by_price_range(min, max)))
}

pub async fn in_stock(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.store.get_in_stock())
}

pub async fn out_of_stock(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.store.get_out_of_stock())
}

pub async fn low_stock(
    State(state): State<AppState>,
    Query(query): Query<ThresholdQuery>,
) -> Products {
    let threshold = parse_or(
        query.threshold.as_deref(),
        "threshold",
        state.config.low_stock_threshold,
    )?;
    Ok(Json(state.store.get_low_stock(threshold)))
}

pub async fn discounted(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.store.get_discounted())
}

pub async fn featured(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.store.get_featured())
}

pub async fn popular(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Products {
    let limit = parse_or(query.limit.as_deref(), "limit", state.config.default_limit)?;
    Ok(Json(state.store.get_popular(limit)))
}

pub async fn newest(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Products {
    let limit = parse_or(query.limit.as_deref(), "limit", state.config.default_limit)?;
    Ok(Json(state.store.get_new(limit)))
}

pub async fn similar(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Products {
    let target = state.store.get_by_id(&id)?;
    Ok(Json(views::similar(&state.store.list_all(), &target)))
}

pub async fn related(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Products {
    let target = state.store.get_by_id(&id)?;
    Ok(Json(views::related(&state.store.list_all(), &target)))
}

pub async fn duplicates(State(state): State<AppState>) -> Json<BTreeMap<String, Vec<Product>>> {
    Json(views::duplicates(&state.store.list_all()))
}

pub async fn validate(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> ServerResult<Json<BTreeMap<&'static str, bool>>> {
    let product = state.store.get_by_id(&id)?;
    Ok(Json(views::validation_report(&product)))
}

// ---------------------------------------------------------------------------
// Aggregates and history
// ---------------------------------------------------------------------------

pub async fn categories(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.store.get_all_categories())
}

pub async fn stats(State(state): State<AppState>) -> Json<ProductStats> {
    Json(state.store.get_stats())
}

pub async fn history(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> ServerResult<Json<Vec<HistoryEntry>>> {
    Ok(Json(state.store.get_by_id(&id)?.history))
}

// ---------------------------------------------------------------------------
// Partial updates
// ---------------------------------------------------------------------------

pub async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    payload: Result<Json<StockUpdate>, JsonRejection>,
) -> ServerResult<Json<Product>> {
    let StockUpdate { stock } = body(payload)?;
    Ok(Json(state.store.update_stock(&id, stock)?))
}

pub async fn update_discount(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    payload: Result<Json<DiscountUpdate>, JsonRejection>,
) -> ServerResult<Json<Product>> {
    let DiscountUpdate { discount } = body(payload)?;
    validate_discount(discount)?;
    Ok(Json(state.store.update_discount(&id, discount)?))
}

pub async fn update_feature(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    payload: Result<Json<FeatureUpdate>, JsonRejection>,
) -> ServerResult<Json<Product>> {
    let FeatureUpdate { featured } = body(payload)?;
    Ok(Json(state.store.update_feature(&id, featured)?))
}

// ---------------------------------------------------------------------------
// Batch operations
// ---------------------------------------------------------------------------

/// Create many products. Also serves `/import`.
pub async fn create_batch(
    State(state): State<AppState>,
    payload: Result<Json<Vec<ProductInput>>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<Vec<Product>>)> {
    let inputs = body(payload)?;
    for input in &inputs {
        input.validate()?;
    }
    let now = Utc::now();
    let products: Vec<Product> = inputs
        .into_iter()
        .map(|input| input.into_product(ProductId::generate(), now))
        .collect();
    state.store.create_batch(products.clone())?;
    tracing::info!(count = products.len(), "batch created");
    Ok((StatusCode::CREATED, Json(products)))
}

pub async fn update_batch(
    State(state): State<AppState>,
    payload: Result<Json<BatchUpdateRequest>, JsonRejection>,
) -> Products {
    let BatchUpdateRequest { ids, update } = body(payload)?;
    update.validate()?;
    let now = Utc::now();
    let mut updates = HashMap::with_capacity(ids.len());
    for id in &ids {
        let mut product = state.store.get_by_id(id)?;
        update.clone().apply_to(&mut product, now);
        updates.insert(id.clone(), product);
    }
    state.store.update_batch(updates.clone())?;
    let updated = ids
        .iter()
        .filter_map(|id| updates.remove(id))
        .collect();
    Ok(Json(updated))
}

pub async fn delete_batch(
    State(state): State<AppState>,
    payload: Result<Json<BatchDeleteRequest>, JsonRejection>,
) -> ServerResult<StatusCode> {
    let BatchDeleteRequest { ids } = body(payload)?;
    state.store.delete_batch(&ids)?;
    Ok(StatusCode::NO_CONTENT)
}
