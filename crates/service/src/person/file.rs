use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::person::{repository::PersonRepository, Person};
use crate::storage::json_map_store::JsonMapStore;

/// File storage: person records persisted as a JSON map keyed by id.
pub struct FilePersonRepository {
    store: Arc<JsonMapStore<Uuid, Person>>,
}

impl FilePersonRepository {
    /// Open (or create) the JSON file at `path`.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonMapStore::<Uuid, Person>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }
}

#[async_trait]
impl PersonRepository for FilePersonRepository {
    async fn list(&self) -> Result<Vec<Person>, ServiceError> {
        let mut people = self.store.values().await;
        people.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(people)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Person>, ServiceError> {
        Ok(self.store.get(&id).await)
    }

    async fn create(&self, name: &str, number: &str) -> Result<Person, ServiceError> {
        let person = Person::new(name.to_string(), number.to_string());
        self.store.insert(person.id, person.clone()).await?;
        Ok(person)
    }

    async fn update(&self, id: Uuid, name: Option<&str>, number: Option<&str>) -> Result<Option<Person>, ServiceError> {
        // Unknown ids must not rewrite the file.
        if self.store.get(&id).await.is_none() {
            return Ok(None);
        }
        self.store
            .update_map(|map| {
                let Some(existing) = map.get_mut(&id) else {
                    return Ok(None);
                };
                existing.apply_update(name.map(str::to_string), number.map(str::to_string));
                Ok(Some(existing.clone()))
            })
            .await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        self.store.remove(&id).await
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(self.store.len().await as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("persons_{}.json", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn file_repository_crud_and_reload() -> anyhow::Result<()> {
        let path = temp_path();
        let repo = FilePersonRepository::open(&path).await?;

        let arto = repo.create("Arto Hellas", "040-123456").await?;
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let ada = repo.create("Ada Lovelace", "39-44-5323523").await?;
        assert_eq!(repo.count().await?, 2);

        let listed: Vec<Uuid> = repo.list().await?.into_iter().map(|p| p.id).collect();
        assert_eq!(listed, vec![arto.id, ada.id]);

        let updated = repo.update(ada.id, Some("Ada L."), None).await?.expect("ada exists");
        assert_eq!(updated.number, "39-44-5323523");
        assert_eq!(updated.date, ada.date);

        assert!(repo.delete(arto.id).await?);
        assert!(!repo.delete(arto.id).await?);
        assert!(repo.update(arto.id, Some("ghost"), None).await?.is_none());

        let reopened = FilePersonRepository::open(&path).await?;
        let people = reopened.list().await?;
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].name, "Ada L.");
        assert_eq!(people[0].id, ada.id);

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }
}
