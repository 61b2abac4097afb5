//! Service layer for the phonebook.
//! - `PersonRepository` hides which store backs the records.
//! - `PersonService` owns identifier parsing and create-time presence checks.

pub mod errors;
pub mod person;
pub mod storage;
#[cfg(test)]
pub mod test_support;
