//! Health check handler: `GET /health`.

use axum::Json;
use serde_json::{json, Value};

/// Reports service liveness.
pub async fn check() -> Json<Value> {
    Json(json!({ "checksRun": 1 }))
}
