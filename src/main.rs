//! logdock Server Entry Point

use clap::{Args, Parser, Subcommand};
use logdock::config::AuthConfig;
use logdock::{config, db, logging, server, AppState};
use tracing::info;

#[derive(Parser)]
#[command(name = "logdock", version, about = "Multi-tenant log intake service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// サーバーを起動する
    Serve(ServeArgs),
    /// 投稿トークンを発行する（LOGDOCK_INGEST_SECRETが必要）
    IssueToken,
}

#[derive(Args)]
struct ServeArgs {
    /// バインドするホスト
    #[arg(long, env = "LOGDOCK_HOST", default_value = "0.0.0.0")]
    host: String,

    /// バインドするポート
    #[arg(long, env = "LOGDOCK_PORT", default_value_t = 8080)]
    port: u16,

    /// データベースURL
    #[arg(long, env = "LOGDOCK_DATABASE_URL", default_value = "sqlite:data/logdock.db")]
    database_url: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            let _log_guard = logging::init();
            serve(args).await;
        }
        Commands::IssueToken => {
            issue_token();
        }
    }
}

async fn serve(args: ServeArgs) {
    let auth = match AuthConfig::from_env() {
        Ok(auth) => auth,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    ensure_database_dir(&args.database_url);

    let db_pool = match db::migrations::initialize_database(&args.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    info!("Database initialized: {}", args.database_url);

    let state = AppState { db_pool, auth };
    let bind_addr = format!("{}:{}", args.host, args.port);

    server::run(state, &bind_addr).await;
}

fn issue_token() {
    match config::get_env("LOGDOCK_INGEST_SECRET") {
        Some(secret) if !secret.trim().is_empty() => {
            let token = logdock::auth::token::issue(secret.as_bytes());
            println!("{}", token);
        }
        _ => {
            eprintln!("Error: LOGDOCK_INGEST_SECRET must be set and non-empty");
            std::process::exit(1);
        }
    }
}

/// SQLiteファイルの親ディレクトリを作成する
///
/// `sqlite:` スキームのファイルパスのみ対象。インメモリDBや
/// その他のURLは何もしない。
fn ensure_database_dir(database_url: &str) {
    let Some(path) = database_url.strip_prefix("sqlite:") else {
        return;
    };
    if path.starts_with(':') {
        return;
    }
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create database directory: {}", e);
                std::process::exit(1);
            }
        }
    }
}
