//! Home route

use axum::Json;
use serde_json::{json, Value};

/// Static acknowledgment payload for the public home page
///
/// GET /
pub async fn home() -> Json<Value> {
    Json(json!("[GET] /home"))
}
