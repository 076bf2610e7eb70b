//! Route definitions for makeup items.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::makeup_items;
use crate::state::AppState;

/// Item routes, mounted at the root.
///
/// ```text
/// GET    /makeup-items          -> list_items
/// POST   /makeup-items          -> create_item
/// POST   /makeup-items/bulk     -> bulk_create
/// GET    /makeup-items/{id}     -> get_item
/// PUT    /makeup-items/{id}     -> update_item
/// DELETE /makeup-items/{id}     -> delete_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/makeup-items",
            get(makeup_items::list_items).post(makeup_items::create_item),
        )
        .route("/makeup-items/bulk", post(makeup_items::bulk_create))
        .route(
            "/makeup-items/{id}",
            get(makeup_items::get_item)
                .put(makeup_items::update_item)
                .delete(makeup_items::delete_item),
        )
}
