use axum::{extract::State, response::Html};
use chrono::Utc;

use crate::errors::ApiError;
use crate::routes::AppState;

/// Landing page: record count and server time.
pub async fn info(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let count = state.persons.count().await?;
    Ok(Html(render(count, &Utc::now().to_rfc2822())))
}

fn render(count: u64, timestamp: &str) -> String {
    format!("<p>Phonebook has information for {count} people</p>\n<p>{timestamp}</p>\n")
}
