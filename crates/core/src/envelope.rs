//! JSON envelopes shared by the REST service and its client.
//!
//! Every response carries a `success` flag. Payload-bearing responses add
//! `data`, bulk inserts add `count`, and failures add `error`.

use serde::{Deserialize, Serialize};

use crate::types::ItemId;

/// `{ "success": true, "data": T }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `{ "success": true }` for operations without a payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// `{ "success": false, "error": "...", "code": "..." }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Request body for the bulk insert endpoint.
///
/// `items` is kept as raw JSON so a non-array payload can be rejected with a
/// clear message and each element parsed on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkRequest {
    #[serde(default)]
    pub items: serde_json::Value,
}

/// Outcome of a bulk insert.
///
/// `count` is the number of records written. Each element that could not be
/// written is listed in `failures` by its position in the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkResponse {
    pub success: bool,
    pub count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<BulkFailure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A single rejected element of a bulk insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkFailure {
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    pub error: String,
}
