//! データモデル
//!
//! ユーザーとログエントリの型定義

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ログ投稿者（ユーザー）
///
/// 初回投稿時に遅延プロビジョニングされ、以後変更・削除されない。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// 内部ID（システム採番、再利用されない）
    pub id: Uuid,
    /// 外部ID（呼び出し側が提示する識別子、一意）
    pub external_id: String,
    /// 作成日時
    pub created_at: DateTime<Utc>,
}

/// 投稿されるログエントリ1件（リクエストボディ）
///
/// `time` は呼び出し側のイベント時刻。必須フィールドであり、
/// サーバー側で現在時刻に補完することはない。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLogEntry {
    /// ログメッセージ（自由テキスト）
    pub message: String,
    /// 重大度ラベル
    pub level: String,
    /// イベント時刻（呼び出し側指定）
    pub time: DateTime<Utc>,
}

/// 永続化済みログエントリ
///
/// 永続化後は不変。更新・削除操作は存在しない。
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    /// エントリID（挿入順、タイブレークに使用）
    pub id: i64,
    /// 所有ユーザーの内部ID
    pub owner: Uuid,
    /// イベント時刻
    pub time: DateTime<Utc>,
    /// ログメッセージ
    pub message: String,
    /// 重大度ラベル
    pub level: String,
}
