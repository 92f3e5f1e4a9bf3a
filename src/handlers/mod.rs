//! HTTP handlers for entity CRUD and custom mapping routes.

pub mod entity;
pub mod mapping;
