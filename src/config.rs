//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables and the
//! process-wide read-only `AuthConfig` built once at startup and carried
//! inside `AppState` (never a mutable global).

use crate::auth::operator::OperatorCredentials;
use crate::common::error::{DockError, DockResult};

/// Get an environment variable
///
/// # Arguments
/// * `name` - The environment variable name
///
/// # Returns
/// * `Some(value)` - The environment variable value
/// * `None` - The variable is not set
pub fn get_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Get an environment variable with a default value
///
/// # Arguments
/// * `name` - The environment variable name
/// * `default` - The default value to return if the variable is not set
///
/// # Returns
/// The environment variable value or the default
pub fn get_env_or(name: &str, default: &str) -> String {
    get_env(name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable, parsing to a specific type
///
/// # Arguments
/// * `name` - The environment variable name
/// * `default` - The default value to return if the variable is not set or parsing fails
///
/// # Returns
/// The parsed environment variable value or the default
pub fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    get_env(name).and_then(|s| s.parse().ok()).unwrap_or(default)
}

/// 認証設定（共有シークレットとオペレーター資格情報）
///
/// プロセス起動時に一度だけ構築され、以後読み取り専用。
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// 投稿トークン署名用の共有シークレット
    pub ingest_secret: String,
    /// 特権読み取りパス用のオペレーター資格情報
    pub operator: OperatorCredentials,
}

impl AuthConfig {
    /// 環境変数から認証設定を読み込む
    ///
    /// `LOGDOCK_INGEST_SECRET` / `LOGDOCK_OPERATOR_USERNAME` /
    /// `LOGDOCK_OPERATOR_PASSWORD` がすべて必要。
    ///
    /// # Returns
    /// * `Ok(AuthConfig)` - 読み込み成功
    /// * `Err(DockError::Config)` - 必須変数の欠落
    pub fn from_env() -> DockResult<Self> {
        let ingest_secret = require_env("LOGDOCK_INGEST_SECRET")?;
        let username = require_env("LOGDOCK_OPERATOR_USERNAME")?;
        let password = require_env("LOGDOCK_OPERATOR_PASSWORD")?;

        Ok(Self {
            ingest_secret,
            operator: OperatorCredentials { username, password },
        })
    }
}

fn require_env(name: &str) -> DockResult<String> {
    match get_env(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(DockError::Config(format!(
            "Environment variable '{}' must be set and non-empty",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn set_all() {
        std::env::set_var("LOGDOCK_INGEST_SECRET", "secret");
        std::env::set_var("LOGDOCK_OPERATOR_USERNAME", "ops");
        std::env::set_var("LOGDOCK_OPERATOR_PASSWORD", "hunter2");
    }

    fn clear_all() {
        std::env::remove_var("LOGDOCK_INGEST_SECRET");
        std::env::remove_var("LOGDOCK_OPERATOR_USERNAME");
        std::env::remove_var("LOGDOCK_OPERATOR_PASSWORD");
    }

    #[test]
    #[serial]
    fn test_get_env_or_default() {
        std::env::remove_var("LOGDOCK_TEST_MISSING");
        assert_eq!(get_env_or("LOGDOCK_TEST_MISSING", "fallback"), "fallback");
    }

    #[test]
    #[serial]
    fn test_get_env_parse() {
        std::env::set_var("LOGDOCK_TEST_PORT", "9000");
        let port: u16 = get_env_parse("LOGDOCK_TEST_PORT", 8080);
        assert_eq!(port, 9000);
        std::env::remove_var("LOGDOCK_TEST_PORT");
    }

    #[test]
    #[serial]
    fn test_get_env_parse_invalid_uses_default() {
        std::env::set_var("LOGDOCK_TEST_PORT2", "not-a-number");
        let port: u16 = get_env_parse("LOGDOCK_TEST_PORT2", 8080);
        assert_eq!(port, 8080);
        std::env::remove_var("LOGDOCK_TEST_PORT2");
    }

    #[test]
    #[serial]
    fn test_auth_config_from_env() {
        set_all();
        let config = AuthConfig::from_env().expect("config should load");
        assert_eq!(config.ingest_secret, "secret");
        assert_eq!(config.operator.username, "ops");
        assert_eq!(config.operator.password, "hunter2");
        clear_all();
    }

    #[test]
    #[serial]
    fn test_auth_config_missing_secret_fails() {
        set_all();
        std::env::remove_var("LOGDOCK_INGEST_SECRET");
        let result = AuthConfig::from_env();
        assert!(matches!(result, Err(DockError::Config(_))));
        clear_all();
    }

    #[test]
    #[serial]
    fn test_auth_config_empty_secret_fails() {
        set_all();
        std::env::set_var("LOGDOCK_INGEST_SECRET", "   ");
        let result = AuthConfig::from_env();
        assert!(matches!(result, Err(DockError::Config(_))));
        clear_all();
    }
}
