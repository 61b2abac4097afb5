use chrono::Utc;
use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "person")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub number: String,
    /// Creation time; never touched by updates.
    pub date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Parse a path segment into a person id. Anything that is not a UUID is malformed.
pub fn parse_id(raw: &str) -> Result<Uuid, errors::ModelError> {
    Uuid::parse_str(raw).map_err(|_| errors::ModelError::InvalidId(raw.to_string()))
}

/// Presence check: absent, `null` and blank values all count as missing.
pub fn require_field(field: &str, value: Option<String>) -> Result<String, errors::ModelError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(errors::ModelError::Validation(format!("{field} missing"))),
    }
}

impl Model {
    /// Fresh record with a store-assigned id and the current timestamp.
    pub fn new(name: String, number: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            number,
            date: Utc::now().into(),
        }
    }

    /// Overwrite the fields that are present; `id` and `date` are preserved.
    pub fn apply_update(&mut self, name: Option<String>, number: Option<String>) {
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(number) = number {
            self.number = number;
        }
    }
}

pub async fn create(db: &DatabaseConnection, name: &str, number: &str) -> Result<Model, errors::ModelError> {
    let person = Model::new(name.to_string(), number.to_string());
    let am = ActiveModel {
        id: Set(person.id),
        name: Set(person.name),
        number: Set(person.number),
        date: Set(person.date),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .order_by_asc(Column::Date)
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(id).one(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn count(db: &DatabaseConnection) -> Result<u64, errors::ModelError> {
    Entity::find().count(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Returns `None` when no record has this id.
pub async fn update(
    db: &DatabaseConnection,
    id: Uuid,
    name: Option<&str>,
    number: Option<&str>,
) -> Result<Option<Model>, errors::ModelError> {
    let Some(found) = find(db, id).await? else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    if let Some(name) = name {
        am.name = Set(name.to_string());
    }
    if let Some(number) = number {
        am.number = Set(number.to_string());
    }
    let updated = am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(Some(updated))
}

/// Returns whether a row was removed.
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ModelError;

    #[test]
    fn parse_id_accepts_uuid_and_rejects_garbage() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert!(matches!(parse_id("not-an-id"), Err(ModelError::InvalidId(raw)) if raw == "not-an-id"));
        assert!(matches!(parse_id("5c41c90e455a3e2b6c7e2b1f"), Err(ModelError::InvalidId(_))));
    }

    #[test]
    fn parse_id_rejects_surrounding_whitespace() {
        let id = Uuid::new_v4();
        assert!(matches!(parse_id(&format!(" {id}")), Err(ModelError::InvalidId(_))));
        assert!(matches!(parse_id(&format!("{id}\n")), Err(ModelError::InvalidId(_))));
    }

    #[test]
    fn require_field_treats_blank_as_missing() {
        assert_eq!(require_field("name", Some("Arto".into())).unwrap(), "Arto");
        for value in [None, Some(String::new()), Some("   ".into())] {
            match require_field("number", value) {
                Err(ModelError::Validation(msg)) => assert_eq!(msg, "number missing"),
                other => panic!("expected validation error, got {other:?}"),
            }
        }
    }

    #[test]
    fn apply_update_keeps_id_date_and_absent_fields() {
        let mut p = Model::new("Ada Lovelace".into(), "39-44-5323523".into());
        let (id, date) = (p.id, p.date);

        p.apply_update(None, Some("040-123456".into()));
        assert_eq!(p.name, "Ada Lovelace");
        assert_eq!(p.number, "040-123456");

        p.apply_update(Some("Ada".into()), None);
        assert_eq!(p.name, "Ada");
        assert_eq!((p.id, p.date), (id, date));
    }

    #[test]
    fn serializes_wire_fields() {
        let p = Model::new("Arto Hellas".into(), "040-123456".into());
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["id"], p.id.to_string());
        assert_eq!(json["name"], "Arto Hellas");
        assert_eq!(json["number"], "040-123456");
        assert!(json["date"].is_string());
    }
}
