use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use service::person::{Person, PersonInput};

use crate::errors::ApiError;
use crate::routes::AppState;

type IdParam = Result<Path<String>, PathRejection>;
type Payload = Result<Json<PersonInput>, JsonRejection>;

/// A body sent without a JSON content type reads as `{}`; anything else that
/// fails to parse is a client error.
fn input_or_empty(payload: Payload) -> Result<PersonInput, ApiError> {
    match payload {
        Ok(Json(input)) => Ok(input),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(PersonInput::default()),
        Err(rejection) => Err(rejection.into()),
    }
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Person>>, ApiError> {
    Ok(Json(state.persons.list().await?))
}

pub async fn get(State(state): State<AppState>, id: IdParam) -> Result<Json<Person>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.persons.get(&id).await?))
}

pub async fn create(State(state): State<AppState>, payload: Payload) -> Result<Json<Person>, ApiError> {
    let input = input_or_empty(payload)?;
    Ok(Json(state.persons.create(input).await?))
}

pub async fn update(State(state): State<AppState>, id: IdParam, payload: Payload) -> Result<Json<Person>, ApiError> {
    let Path(id) = id?;
    let input = input_or_empty(payload)?;
    Ok(Json(state.persons.update(&id, input).await?))
}

pub async fn delete(State(state): State<AppState>, id: IdParam) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.persons.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Catch-all for routes and methods nothing else handles.
pub async fn unknown_endpoint() -> ApiError {
    ApiError::UnknownEndpoint
}
