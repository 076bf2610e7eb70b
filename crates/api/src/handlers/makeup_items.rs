//! Handlers for `/makeup-items`.
//!
//! Thin adapters from HTTP to [`InventoryService`](crate::inventory::InventoryService);
//! every response uses the `{ "success": ... }` envelope.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use vanity_core::envelope::{AckResponse, BulkRequest, DataResponse};
use vanity_core::item::MakeupItemInput;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::state::AppState;

/// GET /makeup-items
pub async fn list_items(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = state.inventory.list_items().await?;
    Ok(Json(DataResponse::ok(items)))
}

/// GET /makeup-items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let item = state.inventory.get_item(&id).await?;
    Ok(Json(DataResponse::ok(item)))
}

/// POST /makeup-items
///
/// Creates an item. The id is minted unless the body carries one.
pub async fn create_item(
    State(state): State<AppState>,
    AppJson(input): AppJson<MakeupItemInput>,
) -> AppResult<impl IntoResponse> {
    let item = state.inventory.create_item(input).await?;
    Ok(Json(DataResponse::ok(item)))
}

/// PUT /makeup-items/{id}
///
/// Full replacement; creates the record if it does not exist.
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<MakeupItemInput>,
) -> AppResult<impl IntoResponse> {
    let item = state.inventory.update_item(&id, input).await?;
    Ok(Json(DataResponse::ok(item)))
}

/// DELETE /makeup-items/{id}
///
/// Succeeds whether or not the item existed.
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.inventory.delete_item(&id).await?;
    Ok(Json(AckResponse::ok()))
}

/// POST /makeup-items/bulk
///
/// Returns 200 when every element was stored and 207 Multi-Status when
/// some were not.
pub async fn bulk_create(
    State(state): State<AppState>,
    AppJson(body): AppJson<BulkRequest>,
) -> AppResult<impl IntoResponse> {
    let report = state.inventory.bulk_create(body.items).await?;
    let status = if report.success {
        StatusCode::OK
    } else {
        StatusCode::MULTI_STATUS
    };
    Ok((status, Json(report)))
}
