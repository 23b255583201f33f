//! ログ投稿・取得API
//!
//! `POST /logs/submit` と `GET /logs` を提供する。

use super::error::AppError;
use crate::auth::middleware::{extract_bearer_identity, CallerIdentity};
use crate::auth::{OPERATOR_PASSWORD_HEADER, OPERATOR_USERNAME_HEADER, OWNER_ID_HEADER};
use crate::common::error::DockError;
use crate::common::types::{LogRecord, NewLogEntry};
use crate::config::AuthConfig;
use crate::{ingest, AppState};
use axum::{extract::State, http::HeaderMap, Extension, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 投稿レスポンス
#[derive(Debug, Clone, Serialize)]
pub struct SubmitResponse {
    /// 永続化された件数
    pub persisted_count: usize,
}

/// ログ取得レスポンスの1件
#[derive(Debug, Clone, Serialize)]
pub struct LogEntryResponse {
    /// ログメッセージ
    pub message: String,
    /// イベント時刻
    pub time: DateTime<Utc>,
    /// 重大度ラベル
    pub level: String,
}

impl From<LogRecord> for LogEntryResponse {
    fn from(record: LogRecord) -> Self {
        Self {
            message: record.message,
            time: record.time,
            level: record.level,
        }
    }
}

/// POST /logs/submit
///
/// トークン検証ミドルウェアを通過した投稿のみが到達する。
/// バッチ全体を単一の原子的な単位として永続化する。
pub async fn submit_logs(
    State(state): State<AppState>,
    Extension(identity): Extension<CallerIdentity>,
    Json(entries): Json<Vec<NewLogEntry>>,
) -> Result<Json<SubmitResponse>, AppError> {
    let persisted_count = ingest::submit(&state.db_pool, &identity.0, &entries).await?;

    Ok(Json(SubmitResponse { persisted_count }))
}

/// GET /logs
///
/// 2つの読み取りパスを提供する:
/// - オペレーターパス: `dev-username` / `dev-password` ヘッダーで認証し、
///   `user-id` ヘッダーで指定した所有者のログを取得する。
/// - セルフパス: ベアラー識別子の所有者自身のログを取得する。
pub async fn fetch_logs(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<LogEntryResponse>>, AppError> {
    let owner_external_id = resolve_read_identity(&state.auth, &headers)?;

    let records = ingest::fetch(&state.db_pool, &owner_external_id).await?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// 読み取り対象の所有者を解決する
///
/// オペレーターヘッダーが提示されていればオペレーターパス、
/// なければベアラー識別子によるセルフパス。どちらの資格情報も
/// なければ認証エラー。
fn resolve_read_identity(auth: &AuthConfig, headers: &HeaderMap) -> Result<String, DockError> {
    let has_operator_headers = headers.contains_key(OPERATOR_USERNAME_HEADER)
        || headers.contains_key(OPERATOR_PASSWORD_HEADER);

    if has_operator_headers {
        let username = header_str(headers, OPERATOR_USERNAME_HEADER);
        let password = header_str(headers, OPERATOR_PASSWORD_HEADER);

        if !auth.operator.verify(username, password) {
            return Err(DockError::Authentication(
                "operator credential mismatch".to_string(),
            ));
        }

        let owner = header_str(headers, OWNER_ID_HEADER);
        if owner.is_empty() {
            return Err(DockError::Validation(format!(
                "missing {} header",
                OWNER_ID_HEADER
            )));
        }
        return Ok(owner.to_string());
    }

    extract_bearer_identity(headers)
        .ok_or_else(|| DockError::Authentication("missing read credentials".to_string()))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}
