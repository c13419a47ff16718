//! Response envelope for API handlers.
//!
//! Every successful endpoint wraps its payload in `{ "data": ... }` so
//! clients can distinguish payloads from the `{ "error", "code" }` shape
//! produced by [`crate::error::AppError`] without inspecting the status
//! line. Handlers return [`DataResponse`] rather than building the
//! envelope with `serde_json::json!` so the payload type stays visible
//! in the handler signature.

use serde::Serialize;

/// The `{ "data": T }` success envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
