//! 認証ミドルウェア
//!
//! 投稿パス: ベアラー識別子 + 署名トークンを検証し、呼び出し元の
//! 識別子をリクエスト拡張に格納する。
//! オペレーターパス: 静的資格情報対を検証する。

use crate::auth::token;
use crate::auth::{INGEST_TOKEN_HEADER, OPERATOR_PASSWORD_HEADER, OPERATOR_USERNAME_HEADER};
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// 認証済みの呼び出し元識別子
///
/// 上流の識別レイヤーで解決済みの不透明な外部IDであり、
/// この層では内容を解釈せずそのまま信用する。
#[derive(Debug, Clone)]
pub struct CallerIdentity(pub String);

/// AuthorizationヘッダーからBearer値を取り出す
pub(crate) fn extract_bearer_identity(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let value = auth_header.strip_prefix("Bearer ")?;
    if value.is_empty() {
        return None;
    }
    Some(value.to_string())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

/// 投稿トークン認証ミドルウェア
///
/// ベアラー識別子と `x-log-token` ヘッダーのトークンを検証し、
/// 成功時に`CallerIdentity`をリクエスト拡張へ格納する。
/// トークンの構造エラーと署名不一致は同一のレスポンスになる。
///
/// # Arguments
/// * `State(state)` - アプリケーション状態（共有シークレット参照用）
/// * `request` - HTTPリクエスト
/// * `next` - 次のミドルウェア/ハンドラー
///
/// # Returns
/// * `Ok(Response)` - 認証成功
/// * `Err(Response)` - 認証失敗、401 Unauthorized
pub async fn ingest_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let external_id = extract_bearer_identity(request.headers()).ok_or_else(|| {
        (
            StatusCode::UNAUTHORIZED,
            "Missing Authorization header. Expected 'Bearer <identity>'".to_string(),
        )
            .into_response()
    })?;

    let presented = header_str(request.headers(), INGEST_TOKEN_HEADER);
    if presented.is_empty() {
        return Err((
            StatusCode::UNAUTHORIZED,
            format!("Missing {} header", INGEST_TOKEN_HEADER),
        )
            .into_response());
    }

    // トークン値そのものはログに残さない
    if !token::validate(presented, state.auth.ingest_secret.as_bytes()) {
        tracing::warn!("Ingest token validation failed for caller");
        return Err((StatusCode::UNAUTHORIZED, "Invalid ingest token".to_string()).into_response());
    }

    request.extensions_mut().insert(CallerIdentity(external_id));

    Ok(next.run(request).await)
}

/// オペレーター認証ミドルウェア
///
/// `dev-username` / `dev-password` ヘッダーを静的資格情報対と照合する。
/// 欠落ヘッダーは空文字列として扱い、どちらのフィールドが誤っていても
/// 同一の401レスポンスを返す。
///
/// # Arguments
/// * `State(state)` - アプリケーション状態（オペレーター資格情報参照用）
/// * `request` - HTTPリクエスト
/// * `next` - 次のミドルウェア/ハンドラー
///
/// # Returns
/// * `Ok(Response)` - 認証成功
/// * `Err(Response)` - 認証失敗、401 Unauthorized
pub async fn operator_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let username = header_str(request.headers(), OPERATOR_USERNAME_HEADER);
    let password = header_str(request.headers(), OPERATOR_PASSWORD_HEADER);

    if !state.auth.operator.verify(username, password) {
        tracing::warn!("Operator authentication failed");
        return Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string()).into_response());
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use crate::auth::operator::OperatorCredentials;
    use axum::{body::Body, http::Request as HttpRequest, middleware as axum_middleware, routing::get, Router};
    use tower::ServiceExt;

    async fn test_state() -> AppState {
        let db_pool = crate::db::test_utils::test_db_pool().await;
        AppState {
            db_pool,
            auth: AuthConfig {
                ingest_secret: "test-ingest-secret".to_string(),
                operator: OperatorCredentials {
                    username: "ops".to_string(),
                    password: "hunter2".to_string(),
                },
            },
        }
    }

    fn ingest_app(state: AppState) -> Router {
        Router::new()
            .route(
                "/t",
                get(
                    |axum::extract::Extension(identity): axum::extract::Extension<
                        CallerIdentity,
                    >| async move { identity.0 },
                ),
            )
            .layer(axum_middleware::from_fn_with_state(
                state,
                ingest_auth_middleware,
            ))
    }

    #[tokio::test]
    async fn ingest_middleware_accepts_valid_token_and_injects_identity() {
        let state = test_state().await;
        let token = token::sign("payload-for-test", state.auth.ingest_secret.as_bytes());
        let app = ingest_app(state);

        let res = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/t")
                    .header("authorization", "Bearer device-42")
                    .header(INGEST_TOKEN_HEADER, token)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(std::str::from_utf8(&body).unwrap(), "device-42");
    }

    #[tokio::test]
    async fn ingest_middleware_rejects_bad_token() {
        let state = test_state().await;
        let app = ingest_app(state);

        let res = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/t")
                    .header("authorization", "Bearer device-42")
                    .header(INGEST_TOKEN_HEADER, "definitely-not-a-valid-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn ingest_middleware_rejects_missing_bearer() {
        let state = test_state().await;
        let token = token::sign("payload-for-test", state.auth.ingest_secret.as_bytes());
        let app = ingest_app(state);

        let res = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/t")
                    .header(INGEST_TOKEN_HEADER, token)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn operator_middleware_checks_credentials() {
        let state = test_state().await;
        let app = Router::new()
            .route("/ops", get(|| async { "ok" }))
            .layer(axum_middleware::from_fn_with_state(
                state,
                operator_auth_middleware,
            ));

        let ok = app
            .clone()
            .oneshot(
                HttpRequest::builder()
                    .uri("/ops")
                    .header(OPERATOR_USERNAME_HEADER, "ops")
                    .header(OPERATOR_PASSWORD_HEADER, "hunter2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);

        let bad_password = app
            .clone()
            .oneshot(
                HttpRequest::builder()
                    .uri("/ops")
                    .header(OPERATOR_USERNAME_HEADER, "ops")
                    .header(OPERATOR_PASSWORD_HEADER, "wrong")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(bad_password.status(), StatusCode::UNAUTHORIZED);

        let missing = app
            .oneshot(HttpRequest::builder().uri("/ops").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn operator_failure_is_identical_for_username_and_password() {
        let state = test_state().await;
        let app = Router::new()
            .route("/ops", get(|| async { "ok" }))
            .layer(axum_middleware::from_fn_with_state(
                state,
                operator_auth_middleware,
            ));

        let wrong_user = app
            .clone()
            .oneshot(
                HttpRequest::builder()
                    .uri("/ops")
                    .header(OPERATOR_USERNAME_HEADER, "nope")
                    .header(OPERATOR_PASSWORD_HEADER, "hunter2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let wrong_pass = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/ops")
                    .header(OPERATOR_USERNAME_HEADER, "ops")
                    .header(OPERATOR_PASSWORD_HEADER, "nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(wrong_user.status(), wrong_pass.status());
        let b1 = axum::body::to_bytes(wrong_user.into_body(), usize::MAX)
            .await
            .unwrap();
        let b2 = axum::body::to_bytes(wrong_pass.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(b1, b2);
    }
}
