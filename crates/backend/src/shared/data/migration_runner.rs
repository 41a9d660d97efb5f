use sqlx::sqlite::SqlitePool;

async fn has_table(pool: &SqlitePool, table_name: &str) -> anyhow::Result<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(1) FROM sqlite_master WHERE type='table' AND name = ?1",
    )
    .bind(table_name)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

/// Apply the embedded schema migrations
pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    let has_migrations_table = has_table(pool, "_sqlx_migrations").await?;
    let has_core_table = has_table(pool, "invoices").await?;
    if !has_migrations_table && has_core_table {
        tracing::info!(
            "Existing dashboard tables found without migration history. Schema migration runs in idempotent mode."
        );
    }

    sqlx::migrate!("./migrations").run(pool).await?;

    tracing::info!("Database migrations applied successfully");
    Ok(())
}
