#![cfg(test)]
use configs::DatabaseConfig;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

fn test_config() -> anyhow::Result<DatabaseConfig> {
    let _ = dotenvy::dotenv();
    let url = std::env::var("DATABASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL missing"))?;
    let cfg = DatabaseConfig { url, min_connections: 1, ..Default::default() };
    cfg.validate()?;
    Ok(cfg)
}

/// Connection to the Postgres test database; errors when `DATABASE_URL` is absent
/// so callers can skip.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = test_config()?;

    MIGRATED
        .get_or_try_init(|| async {
            let db = models::db::connect_and_migrate(&cfg).await?;
            drop(db);
            Ok::<(), anyhow::Error>(())
        })
        .await?;

    // Fresh connection for the current test's runtime
    models::db::connect_with_config(&cfg).await
}
