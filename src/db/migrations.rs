//! データベースマイグレーション実行

use crate::common::error::DockError;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};

/// SQLiteデータベース接続プールを作成してマイグレーションを実行
///
/// # Arguments
/// * `database_url` - データベースURL（例: "sqlite:data/logdock.db"）
///
/// # Returns
/// * `Ok(SqlitePool)` - 初期化済みデータベースプール
/// * `Err(DockError)` - 初期化失敗
pub async fn initialize_database(database_url: &str) -> Result<SqlitePool, DockError> {
    // データベースファイルが存在しない場合は作成
    if !Sqlite::database_exists(database_url)
        .await
        .map_err(|e| DockError::Database(format!("Failed to check database: {}", e)))?
    {
        tracing::info!("Creating database: {}", database_url);
        Sqlite::create_database(database_url)
            .await
            .map_err(|e| DockError::Database(format!("Failed to create database: {}", e)))?;
    }

    // 接続プールを作成
    let pool = SqlitePool::connect(database_url)
        .await
        .map_err(|e| DockError::Database(format!("Failed to connect to database: {}", e)))?;

    // マイグレーションを実行
    run_migrations(&pool).await?;

    Ok(pool)
}

/// マイグレーションを実行（sqlx::migrate!マクロを使用）
///
/// # Arguments
/// * `pool` - データベース接続プール
///
/// # Returns
/// * `Ok(())` - マイグレーション成功
/// * `Err(DockError)` - マイグレーション失敗
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DockError> {
    tracing::info!("Running database migrations");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DockError::Database(format!("Failed to run migrations: {}", e)))?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}
