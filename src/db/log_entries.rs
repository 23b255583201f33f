//! ログエントリの永続化（トランザクション一括挿入と時系列取得）

use crate::common::error::DockError;
use crate::common::types::{LogRecord, NewLogEntry};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

/// ログエントリを単一トランザクションで一括挿入
///
/// 1件でも失敗した場合はトランザクション全体がロールバックされ、
/// 何も永続化されない（all-or-nothing）。イベント時刻は呼び出し側の
/// 値をそのまま保存する。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `owner_id` - 所有ユーザーの内部ID
/// * `entries` - 挿入するエントリ
///
/// # Returns
/// * `Ok(usize)` - 挿入件数（`entries.len()`と等しい）
/// * `Err(DockError)` - 挿入失敗（全件ロールバック済み）
pub async fn insert_batch(
    pool: &SqlitePool,
    owner_id: Uuid,
    entries: &[NewLogEntry],
) -> Result<usize, DockError> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| DockError::Database(format!("Failed to begin transaction: {}", e)))?;

    for entry in entries {
        sqlx::query("INSERT INTO log_entries (user_id, time, message, level) VALUES (?, ?, ?, ?)")
            .bind(owner_id.to_string())
            .bind(entry.time.to_rfc3339())
            .bind(&entry.message)
            .bind(&entry.level)
            .execute(&mut *tx)
            .await
            .map_err(|e| DockError::Database(format!("Failed to insert log entry: {}", e)))?;
    }

    tx.commit()
        .await
        .map_err(|e| DockError::Database(format!("Failed to commit log entries: {}", e)))?;

    Ok(entries.len())
}

/// 所有ユーザーのログエントリを時系列で取得
///
/// イベント時刻の昇順、同時刻は挿入順で返す。
/// 時刻はUTC固定オフセットのRFC3339文字列として保存されているため、
/// 文字列順がそのまま時系列順になる。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `owner_id` - 所有ユーザーの内部ID
///
/// # Returns
/// * `Ok(Vec<LogRecord>)` - エントリ一覧（空の場合もある）
/// * `Err(DockError)` - 取得失敗
pub async fn list_for_owner(
    pool: &SqlitePool,
    owner_id: Uuid,
) -> Result<Vec<LogRecord>, DockError> {
    let rows = sqlx::query_as::<_, LogEntryRow>(
        "SELECT id, user_id, time, message, level FROM log_entries WHERE user_id = ? ORDER BY time ASC, id ASC",
    )
    .bind(owner_id.to_string())
    .fetch_all(pool)
    .await
    .map_err(|e| DockError::Database(format!("Failed to list log entries: {}", e)))?;

    Ok(rows.into_iter().map(|r| r.into_record()).collect())
}

// SQLiteからの行取得用の内部型
#[derive(sqlx::FromRow)]
struct LogEntryRow {
    id: i64,
    user_id: String,
    time: String,
    message: String,
    level: String,
}

impl LogEntryRow {
    fn into_record(self) -> LogRecord {
        let owner = Uuid::parse_str(&self.user_id).unwrap();
        let time = DateTime::parse_from_rfc3339(&self.time)
            .unwrap()
            .with_timezone(&Utc);

        LogRecord {
            id: self.id,
            owner,
            time,
            message: self.message,
            level: self.level,
        }
    }
}
