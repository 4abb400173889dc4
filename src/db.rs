use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::info;

/// Builds the process-wide connection pool from a PostgreSQL connection string
pub async fn connect_sqlx(db_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(Duration::from_secs(2))
        .connect(db_url)
        .await
}

/// Idempotent schema bootstrap, run once at startup before the service accepts
/// traffic. This is a guarded "create if absent" call, not a migration system.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("Verifying todo schema.");
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS todo_item ( \
            id SERIAL PRIMARY KEY, \
            title TEXT NOT NULL, \
            description TEXT, \
            completed BOOLEAN NOT NULL DEFAULT FALSE \
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}
