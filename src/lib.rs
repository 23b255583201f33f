//! logdock
//!
//! 識別済みユーザーからのログ投稿を受け付け、本人または
//! オペレーターによる取得を提供するサービス

#![warn(missing_docs)]

/// 共通型定義（エラー・データモデル）
pub mod common;

/// REST APIハンドラー
pub mod api;

/// 認証・認可機能（署名トークン、オペレーター資格情報）
pub mod auth;

/// データベースアクセス
pub mod db;

/// 取り込み・取得エンジン
pub mod ingest;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 設定管理（環境変数ヘルパー・認証設定）
pub mod config;

/// サーバー起動・シャットダウン
pub mod server;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// データベース接続プール
    pub db_pool: sqlx::SqlitePool,
    /// 認証設定（プロセス起動時に構築、読み取り専用）
    pub auth: config::AuthConfig,
}
