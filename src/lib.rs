//! filecrud: configuration-driven REST backend over flat JSON files.
//!
//! Mount [`crud_routes`] with a [`CrudOptions`] to get list/read/create/
//! replace/delete routes for an entity (or an entity URL parameter), backed
//! by one JSON array document per entity under the configured data dir, with
//! declarative create validation and caller-defined per-item mapping routes.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{CrudOptions, CustomRule, Method, RequiredIfRule, RuleSet};
pub use error::{AppError, ConfigError, FieldError};
pub use handlers::mapping::{
    handler_fn, Mapping, MappingContext, MappingHandler, RecordUpdater,
};
pub use response::Page;
pub use routes::{common_routes, crud_routes};
pub use service::{next_id, CrudService, RuleEvaluator};
pub use state::AppState;
pub use store::{FileStore, Record};
