use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("malformatted id: {0}")]
    InvalidId(String),
    #[error("database error: {0}")]
    Db(String),
}
