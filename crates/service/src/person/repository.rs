use std::sync::Arc;

use async_trait::async_trait;
use configs::{DatabaseConfig, StoreBackend};
use sea_orm::DatabaseConnection;
use tracing::info;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::person::{file::FilePersonRepository, Person};

/// Storage seam for person records. Ids are already parsed here; the store
/// assigns them on create.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Person>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<Person>, ServiceError>;
    async fn create(&self, name: &str, number: &str) -> Result<Person, ServiceError>;
    /// `None` fields keep their stored value. Returns `None` if the id is unknown.
    async fn update(&self, id: Uuid, name: Option<&str>, number: Option<&str>) -> Result<Option<Person>, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmPersonRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl PersonRepository for SeaOrmPersonRepository {
    async fn list(&self) -> Result<Vec<Person>, ServiceError> {
        Ok(models::person::list(&self.db).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Person>, ServiceError> {
        Ok(models::person::find(&self.db, id).await?)
    }

    async fn create(&self, name: &str, number: &str) -> Result<Person, ServiceError> {
        Ok(models::person::create(&self.db, name, number).await?)
    }

    async fn update(&self, id: Uuid, name: Option<&str>, number: Option<&str>) -> Result<Option<Person>, ServiceError> {
        Ok(models::person::update(&self.db, id, name, number).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(models::person::delete(&self.db, id).await?)
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(models::person::count(&self.db).await?)
    }
}

/// Build the repository the configured database URL points at.
pub async fn open_repository(cfg: &DatabaseConfig) -> anyhow::Result<Arc<dyn PersonRepository>> {
    match cfg.backend()? {
        StoreBackend::Postgres(_) => {
            let db = models::db::connect_and_migrate(cfg).await?;
            info!(backend = "postgres", "person store ready");
            Ok(Arc::new(SeaOrmPersonRepository { db }))
        }
        StoreBackend::File(path) => {
            let repo = FilePersonRepository::open(&path).await?;
            info!(backend = "file", path = %path.display(), "person store ready");
            Ok(repo)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn seaorm_repository_crud() -> anyhow::Result<()> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {}", e);
                return Ok(());
            }
        };
        let repo = SeaOrmPersonRepository { db };

        let created = repo.create("Mary Poppendieck", "39-23-6423122").await?;
        let found = repo.get(created.id).await?.expect("created row is readable");
        assert_eq!(found.name, "Mary Poppendieck");
        assert!(repo.list().await?.iter().any(|p| p.id == created.id));
        assert!(repo.count().await? >= 1);

        let updated = repo.update(created.id, None, Some("040-1234")).await?.expect("row exists");
        assert_eq!(updated.name, "Mary Poppendieck");
        assert_eq!(updated.number, "040-1234");
        assert_eq!(updated.date, created.date);

        assert!(repo.delete(created.id).await?);
        assert!(!repo.delete(created.id).await?);
        assert!(repo.get(created.id).await?.is_none());
        assert!(repo.update(created.id, Some("x"), None).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn seaorm_repository_stores_long_values() -> anyhow::Result<()> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {}", e);
                return Ok(());
            }
        };
        let repo = SeaOrmPersonRepository { db };

        let name = "n".repeat(300);
        let number = "1".repeat(300);
        let created = repo.create(&name, &number).await?;
        let found = repo.get(created.id).await?.expect("created row is readable");
        assert_eq!((found.name.len(), found.number.len()), (300, 300));
        repo.delete(created.id).await?;
        Ok(())
    }
}
