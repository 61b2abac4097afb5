//! Person directory: domain input, storage backends and the service on top.

pub mod domain;
pub mod file;
pub mod repository;
pub mod service;

pub use domain::PersonInput;
pub use models::person::Model as Person;
pub use repository::{open_repository, PersonRepository};
pub use service::PersonService;
