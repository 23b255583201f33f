//! ユーザーCRUD操作（作成と参照のみ。更新・削除は存在しない）

use crate::common::error::DockError;
use crate::common::types::User;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

/// ユーザーを作成
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `external_id` - 外部ID（一意）
///
/// # Returns
/// * `Ok(User)` - 作成されたユーザー
/// * `Err(DockError::Conflict)` - 外部IDが既に存在する
/// * `Err(DockError::Database)` - その他の作成失敗
pub async fn create(pool: &SqlitePool, external_id: &str) -> Result<User, DockError> {
    let id = Uuid::new_v4();
    let created_at = Utc::now();

    sqlx::query("INSERT INTO users (id, external_id, created_at) VALUES (?, ?, ?)")
        .bind(id.to_string())
        .bind(external_id)
        .bind(created_at.to_rfc3339())
        .execute(pool)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint failed") {
                DockError::Conflict(format!("External id '{}' already exists", external_id))
            } else {
                DockError::Database(format!("Failed to create user: {}", e))
            }
        })?;

    Ok(User {
        id,
        external_id: external_id.to_string(),
        created_at,
    })
}

/// 外部IDでユーザーを検索
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `external_id` - 外部ID
///
/// # Returns
/// * `Ok(Some(User))` - ユーザーが見つかった
/// * `Ok(None)` - ユーザーが見つからなかった
/// * `Err(DockError)` - 検索失敗
pub async fn find_by_external_id(
    pool: &SqlitePool,
    external_id: &str,
) -> Result<Option<User>, DockError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, external_id, created_at FROM users WHERE external_id = ?",
    )
    .bind(external_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| DockError::Database(format!("Failed to find user: {}", e)))?;

    Ok(row.map(|r| r.into_user()))
}

/// 外部IDでユーザーを解決し、存在しなければ作成する（遅延プロビジョニング）
///
/// 同一外部IDに対する同時初回投稿では、一意制約違反を「他の呼び出しが
/// 競合に勝った」とみなし、確定済みの行を再読込して返す。
/// ストレージの一意制約が唯一の裁定者であり、アプリケーション側の
/// ロックは使わない。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `external_id` - 外部ID
///
/// # Returns
/// * `Ok(User)` - 既存または新規作成されたユーザー
/// * `Err(DockError)` - 解決失敗
pub async fn get_or_create(pool: &SqlitePool, external_id: &str) -> Result<User, DockError> {
    if let Some(user) = find_by_external_id(pool, external_id).await? {
        return Ok(user);
    }

    match create(pool, external_id).await {
        Ok(user) => Ok(user),
        Err(DockError::Conflict(_)) => {
            // 競合に負けた側: 勝者が挿入した行を再読込（リトライは1回のみ）
            find_by_external_id(pool, external_id)
                .await?
                .ok_or_else(|| {
                    DockError::Database(format!(
                        "User '{}' vanished after uniqueness conflict",
                        external_id
                    ))
                })
        }
        Err(e) => Err(e),
    }
}

/// すべてのユーザーの外部ID一覧を取得
///
/// # Arguments
/// * `pool` - データベース接続プール
///
/// # Returns
/// * `Ok(Vec<String>)` - 外部ID一覧（作成順）
/// * `Err(DockError)` - 取得失敗
pub async fn list_external_ids(pool: &SqlitePool) -> Result<Vec<String>, DockError> {
    let ids: Vec<String> =
        sqlx::query_scalar("SELECT external_id FROM users ORDER BY created_at ASC, id ASC")
            .fetch_all(pool)
            .await
            .map_err(|e| DockError::Database(format!("Failed to list users: {}", e)))?;

    Ok(ids)
}

// SQLiteからの行取得用の内部型
#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    external_id: String,
    created_at: String,
}

impl UserRow {
    fn into_user(self) -> User {
        let id = Uuid::parse_str(&self.id).unwrap();
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .unwrap()
            .with_timezone(&Utc);

        User {
            id,
            external_id: self.external_id,
            created_at,
        }
    }
}
