//! Storefront API routes for catalog browsing and order submission.
//!
//! JSON API Endpoints:
//! - `GET  /api/products`      — product list, optional `toppings` filter
//! - `GET  /api/products/{id}` — single product with absolute image URLs
//! - `GET  /api/toppings`      — ingredient catalog, verbatim
//! - `POST /api/orders`        — submit a new order
//!
//! Static:
//! - `GET  /img/*`             — product images from the configured directory
//!
//! Cross-origin requests are allowed unconditionally: the storefront frontend
//! is served from a different origin.

use std::path::Path as FsPath;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header::CONTENT_TYPE, header::HOST, HeaderMap, Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{error, info};
use uuid::Uuid;

use forno_core::catalog::ToppingFilter;
use forno_core::domain::order::{OrderDraft, OrderId};
use forno_core::domain::product::{ImageUrlBase, ProductId, ProductView};
use forno_core::errors::ApplicationError;
use forno_store::{CatalogStore, OrderStore, StoreError};

#[derive(Clone)]
pub struct ApiState {
    pub catalog: Arc<dyn CatalogStore>,
    pub orders: Arc<dyn OrderStore>,
}

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default)]
pub struct ProductsQuery {
    pub toppings: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrderReceipt {
    pub message: String,
    #[serde(rename = "orderId")]
    pub order_id: OrderId,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn router(state: ApiState, images_dir: &FsPath) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/api/products", get(list_products))
        .route("/api/products/{id}", get(get_product))
        .route("/api/toppings", get(list_toppings))
        .route("/api/orders", post(create_order))
        .nest_service("/img", ServeDir::new(images_dir))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn list_products(
    State(state): State<ApiState>,
    Query(query): Query<ProductsQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<ProductView>>, (StatusCode, Json<ApiError>)> {
    let catalog = state.catalog.load().await.map_err(catalog_unavailable)?;

    let filter = ToppingFilter::parse(query.toppings.as_deref());
    // List responses always advertise https image URLs; the detail endpoint
    // mirrors the request scheme instead.
    let base = ImageUrlBase::https(request_host(&headers));

    let products = catalog
        .select(&filter)
        .into_iter()
        .map(|product| ProductView::render(product, &base))
        .collect();

    Ok(Json(products))
}

async fn get_product(
    Path(raw_id): Path<String>,
    State(state): State<ApiState>,
    headers: HeaderMap,
) -> Result<Json<ProductView>, (StatusCode, Json<ApiError>)> {
    let catalog = state.catalog.load().await.map_err(catalog_unavailable)?;

    let product = raw_id
        .parse::<i64>()
        .ok()
        .and_then(|id| catalog.find(ProductId(id)))
        .ok_or_else(|| not_found("Product not found"))?;

    // An empty image list is fine; only a catalog entry with no image field
    // at all counts as missing.
    if product.img.is_none() {
        return Err(not_found("Images not found for this product"));
    }

    let base = ImageUrlBase::new(request_scheme(&headers), request_host(&headers));
    Ok(Json(ProductView::render(product, &base)))
}

async fn list_toppings(
    State(state): State<ApiState>,
) -> Result<Json<Value>, (StatusCode, Json<ApiError>)> {
    let catalog = state.catalog.load().await.map_err(catalog_unavailable)?;
    Ok(Json(catalog.toppings))
}

async fn create_order(
    State(state): State<ApiState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<OrderReceipt>), (StatusCode, Json<ApiError>)> {
    let draft = OrderDraft::from_payload(&payload).map_err(|err| bad_request(err.into()))?;

    let order = state.orders.append(draft).await.map_err(persistence_failure)?;

    info!(
        event_name = "storefront.order.created",
        order_id = order.id.0,
        line_items = order.pizzas.len(),
        "order appended to log"
    );

    Ok((
        StatusCode::CREATED,
        Json(OrderReceipt {
            message: "Order created successfully".to_string(),
            order_id: order.id,
        }),
    ))
}

// ---------------------------------------------------------------------------
// Request context
// ---------------------------------------------------------------------------

fn request_host(headers: &HeaderMap) -> String {
    headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost")
        .to_string()
}

/// Scheme as seen by the client: honours `X-Forwarded-Proto` from a fronting
/// proxy, plain http otherwise.
fn request_scheme(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("http")
        .to_string()
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

fn bad_request(error: ApplicationError) -> (StatusCode, Json<ApiError>) {
    (StatusCode::BAD_REQUEST, Json(ApiError { error: error.client_message() }))
}

fn not_found(message: &str) -> (StatusCode, Json<ApiError>) {
    let error = ApplicationError::NotFound(message.to_string());
    (StatusCode::NOT_FOUND, Json(ApiError { error: error.client_message() }))
}

fn catalog_unavailable(error: StoreError) -> (StatusCode, Json<ApiError>) {
    respond(StatusCode::SERVICE_UNAVAILABLE, ApplicationError::Unavailable(error.to_string()))
}

fn persistence_failure(error: StoreError) -> (StatusCode, Json<ApiError>) {
    respond(StatusCode::INTERNAL_SERVER_ERROR, ApplicationError::Persistence(error.to_string()))
}

fn respond(status: StatusCode, error: ApplicationError) -> (StatusCode, Json<ApiError>) {
    let correlation_id = Uuid::new_v4();
    error!(
        event_name = "storefront.request.failed",
        correlation_id = %correlation_id,
        status = status.as_u16(),
        error = %error,
        "request failed"
    );
    (status, Json(ApiError { error: error.client_message() }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
