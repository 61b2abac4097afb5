use std::sync::Arc;

use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::person::{domain::PersonInput, repository::PersonRepository, Person};

/// Application service encapsulating phonebook rules.
/// Raw path ids are parsed here so every store sees well-formed ids only.
#[derive(Clone)]
pub struct PersonService {
    repo: Arc<dyn PersonRepository>,
}

impl PersonService {
    pub fn new(repo: Arc<dyn PersonRepository>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<Person>, ServiceError> {
        self.repo.list().await
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        self.repo.count().await
    }

    pub async fn get(&self, raw_id: &str) -> Result<Person, ServiceError> {
        let id = models::person::parse_id(raw_id)?;
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("person"))
    }

    /// Presence checks only, `name` before `number`.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: PersonInput) -> Result<Person, ServiceError> {
        let name = models::person::require_field("name", input.name)?;
        let number = models::person::require_field("number", input.number)?;
        let person = self.repo.create(&name, &number).await?;
        info!(id = %person.id, "created person");
        Ok(person)
    }

    /// No validation: absent fields keep their stored values.
    #[instrument(skip(self, input))]
    pub async fn update(&self, raw_id: &str, input: PersonInput) -> Result<Person, ServiceError> {
        let id = models::person::parse_id(raw_id)?;
        let updated = self
            .repo
            .update(id, input.name.as_deref(), input.number.as_deref())
            .await?
            .ok_or_else(|| ServiceError::not_found("person"))?;
        info!(id = %id, "updated person");
        Ok(updated)
    }

    /// Deleting an unknown id is not an error.
    #[instrument(skip(self))]
    pub async fn delete(&self, raw_id: &str) -> Result<(), ServiceError> {
        let id = models::person::parse_id(raw_id)?;
        let existed = self.repo.delete(id).await?;
        info!(id = %id, existed, "deleted person");
        Ok(())
    }
}
