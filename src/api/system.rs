//! システムAPI（ヘルスチェック）

use axum::Json;
use serde_json::{json, Value};

/// GET /health
///
/// 死活監視用。常に200を返す。
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
