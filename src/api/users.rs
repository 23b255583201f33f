//! ユーザー一覧API（オペレーター専用）
//!
//! `GET /user_ids` を提供する。オペレーター認証ミドルウェアの
//! 背後に配置される。

use super::error::AppError;
use crate::{ingest, AppState};
use axum::{extract::State, Json};

/// GET /user_ids
///
/// プロビジョニング済みの全ユーザーの外部ID一覧を返す。
pub async fn list_user_ids(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let ids = ingest::list_owners(&state.db_pool).await?;

    Ok(Json(ids))
}
