//! HTTP transport: routes, request/response shapes, error mapping.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::model::{Cart, EnrichedCart};
use crate::service::{CartError, CartService};

/// Shared request state.
#[derive(Clone)]
pub struct AppState {
    pub carts: Arc<CartService>,
}

/// Build the application router.
pub fn router(carts: Arc<CartService>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(
            "/cart/:user_id",
            post(add_to_cart).get(get_cart).delete(delete_cart),
        )
        .route(
            "/cart/:user_id/:product_id",
            put(update_cart_item).delete(delete_cart_item),
        )
        .with_state(AppState { carts })
        .layer(TraceLayer::new_for_http())
}

impl IntoResponse for CartError {
    fn into_response(self) -> Response {
        let status = match &self {
            CartError::Validation(_) => StatusCode::BAD_REQUEST,
            CartError::NotFound(_) => StatusCode::NOT_FOUND,
            CartError::Upstream(_) => StatusCode::BAD_GATEWAY,
            CartError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!(%status, "{self}");
        } else {
            debug!(%status, "{self}");
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct AddItemRequest {
    product_id: i64,
    quantity: i64,
}

#[derive(Debug, Deserialize)]
struct UpdateQuantityRequest {
    quantity: i64,
}

async fn healthz() -> &'static str {
    "ok"
}

async fn add_to_cart(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<Cart>), CartError> {
    let cart = state
        .carts
        .add_item(&user_id, req.product_id, req.quantity)
        .await?;
    Ok((StatusCode::CREATED, Json(cart)))
}

async fn get_cart(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<EnrichedCart>, CartError> {
    Ok(Json(state.carts.get_cart(&user_id).await?))
}

async fn update_cart_item(
    State(state): State<AppState>,
    Path((user_id, product_id)): Path<(String, i64)>,
    Json(req): Json<UpdateQuantityRequest>,
) -> Result<Json<EnrichedCart>, CartError> {
    let cart = state
        .carts
        .set_item_quantity(&user_id, product_id, req.quantity)
        .await?;
    Ok(Json(cart))
}

async fn delete_cart_item(
    State(state): State<AppState>,
    Path((user_id, product_id)): Path<(String, i64)>,
) -> Result<StatusCode, CartError> {
    state.carts.remove_item(&user_id, product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_cart(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, CartError> {
    state.carts.delete_cart(&user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
