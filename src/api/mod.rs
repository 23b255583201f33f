//! REST APIハンドラーとルーター構築

use crate::auth::middleware::{ingest_auth_middleware, operator_auth_middleware};
use crate::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// APIエラーレスポンス型
pub mod error;

/// ログ投稿・取得API
pub mod logs;

/// ユーザー一覧API
pub mod users;

/// システムAPI
pub mod system;

/// アプリケーションのルーターを構築する
///
/// # Arguments
/// * `state` - アプリケーション状態
///
/// # Returns
/// * `Router` - 全ルートとミドルウェアを設定済みのルーター
pub fn create_app(state: AppState) -> Router {
    // 投稿パスはトークン検証ミドルウェアを通ってからハンドラーに到達する
    let ingest_routes = Router::new()
        .route("/logs/submit", post(logs::submit_logs))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            ingest_auth_middleware,
        ));

    // オペレーター専用ルート
    let operator_routes = Router::new()
        .route("/user_ids", get(users::list_user_ids))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            operator_auth_middleware,
        ));

    Router::new()
        .merge(ingest_routes)
        .merge(operator_routes)
        .route("/logs", get(logs::fetch_logs))
        .route("/health", get(system::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
