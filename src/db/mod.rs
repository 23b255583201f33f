//! データベースアクセス層
//!
//! SQLiteベースのデータ永続化

/// データベースマイグレーション
pub mod migrations;

/// ユーザー管理（遅延プロビジョニング）
pub mod users;

/// ログエントリ管理（追記専用）
pub mod log_entries;
