//! Storage helpers for the service layer.
//!
//! `JsonMapStore` backs the file-based person repository.

pub mod json_map_store;
