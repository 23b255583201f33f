//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use crate::common::error::DockError;
use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub DockError);

impl From<DockError> for AppError {
    fn from(err: DockError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.0.status_code();

        // Validation/NotFound は呼び出し側由来の情報のみを含むため詳細を返す
        // （バッチ中の不正件数は呼び出し側へ通知する契約）。
        // それ以外は external_message() で内部情報の露出を避ける。
        let message = match &self.0 {
            DockError::Validation(_) | DockError::NotFound(_) => self.0.to_string(),
            _ => self.0.external_message().to_string(),
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }

        let payload = json!({
            "error": message
        });

        (status, Json(payload)).into_response()
    }
}
