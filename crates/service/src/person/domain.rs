use serde::{Deserialize, Serialize};

/// Request body for create and update. Both fields are optional on the wire:
/// create rejects missing ones, update leaves them untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PersonInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
}

impl PersonInput {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self { name: Some(name.into()), number: Some(number.into()) }
    }
}
