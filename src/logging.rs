//! ロギング初期化ユーティリティ
//!
//! `RUST_LOG` によるフィルタリングと、`LOGDOCK_LOG_DIR` 設定時の
//! 日次ローテーションファイル出力をサポートする。
//! 生のトークンやシークレットはいかなる診断経路にも出力しない。

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ロギングを初期化する
///
/// `LOGDOCK_LOG_DIR` が設定されている場合はファイル出力も行い、
/// そのライターを生存させる`WorkerGuard`を返す。呼び出し側は
/// プロセス終了までガードを保持すること。
///
/// # Returns
/// * `Some(WorkerGuard)` - ファイル出力が有効
/// * `None` - 標準エラー出力のみ
pub fn init() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match crate::config::get_env("LOGDOCK_LOG_DIR") {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "logdock.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(fmt::layer())
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .init();
            Some(guard)
        }
        None => {
            registry.with(fmt::layer()).init();
            None
        }
    }
}
