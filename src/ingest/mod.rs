//! 取り込み・取得エンジン
//!
//! 検証済みの投稿を永続化し、ユーザー単位の分離を保ったまま
//! 読み取りを提供する。トークン検証（投稿パス）と資格情報検証
//! （オペレーターパス）は呼び出し側の層で完了している前提。

use crate::common::error::{DockError, DockResult};
use crate::common::types::{LogRecord, NewLogEntry};
use crate::db::{log_entries, users};
use sqlx::SqlitePool;

/// ログバッチを投稿する
///
/// 所有者を解決（未知の外部IDなら遅延プロビジョニング）し、
/// 全エントリを単一トランザクションで永続化する。バッチ内に
/// 不正なエントリが1件でもあれば全体を拒否し、何も永続化しない。
/// 空バッチでも所有者のプロビジョニングは行う。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `owner_external_id` - 投稿者の外部ID（上流で認証済み）
/// * `entries` - 投稿エントリ
///
/// # Returns
/// * `Ok(usize)` - 永続化件数（`entries.len()`と等しい）
/// * `Err(DockError::Validation)` - バッチ内に不正なエントリがある
/// * `Err(DockError)` - 永続化失敗（何も可視化されない）
pub async fn submit(
    pool: &SqlitePool,
    owner_external_id: &str,
    entries: &[NewLogEntry],
) -> DockResult<usize> {
    validate_batch(entries)?;

    let owner = users::get_or_create(pool, owner_external_id).await?;

    if entries.is_empty() {
        return Ok(0);
    }

    let persisted = log_entries::insert_batch(pool, owner.id, entries).await?;

    tracing::info!(
        owner = %owner.external_id,
        count = persisted,
        "Persisted log batch"
    );

    Ok(persisted)
}

/// 所有者のログエントリを取得する
///
/// 未知の外部IDは`NotFound`（「存在するが空」とは区別される）。
/// 読み取りは決してユーザーを作成しない。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `owner_external_id` - 所有者の外部ID
///
/// # Returns
/// * `Ok(Vec<LogRecord>)` - イベント時刻昇順（同時刻は挿入順）のエントリ
/// * `Err(DockError::NotFound)` - 所有者がプロビジョニングされていない
pub async fn fetch(pool: &SqlitePool, owner_external_id: &str) -> DockResult<Vec<LogRecord>> {
    let owner = users::find_by_external_id(pool, owner_external_id)
        .await?
        .ok_or_else(|| DockError::NotFound(format!("owner '{}'", owner_external_id)))?;

    log_entries::list_for_owner(pool, owner.id).await
}

/// プロビジョニング済みの所有者の外部ID一覧を取得する
///
/// # Arguments
/// * `pool` - データベース接続プール
///
/// # Returns
/// * `Ok(Vec<String>)` - 外部ID一覧
pub async fn list_owners(pool: &SqlitePool) -> DockResult<Vec<String>> {
    users::list_external_ids(pool).await
}

/// バッチ全体を事前検証する
///
/// 必須フィールドが空のエントリを不正とみなし、件数を添えて
/// バッチ全体を拒否する。永続化より先に実行されるため、
/// 失敗時にストレージへの書き込みは発生しない。
fn validate_batch(entries: &[NewLogEntry]) -> DockResult<()> {
    let malformed = entries
        .iter()
        .filter(|e| e.message.trim().is_empty() || e.level.trim().is_empty())
        .count();

    if malformed > 0 {
        return Err(DockError::Validation(format!(
            "{} of {} entries failed validation",
            malformed,
            entries.len()
        )));
    }

    Ok(())
}
