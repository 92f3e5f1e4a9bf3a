//! CrudService: generic CRUD over the flat-file store.

mod crud;
pub mod query;
mod validation;
pub use crud::{next_id, CrudService};
pub use validation::RuleEvaluator;
