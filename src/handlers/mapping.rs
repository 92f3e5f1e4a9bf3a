//! Caller-supplied per-item routes and their execution context.

use crate::error::AppError;
use crate::response::empty_object;
use crate::service::CrudService;
use crate::state::AppState;
use crate::store::FileStore;
use async_trait::async_trait;
use axum::{http::HeaderMap, Json};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// What a mapping handler gets to work with: the matched record (or `{}`),
/// the read error if any, and on POST routes the request body plus an
/// updater bound to the matched id.
pub struct MappingContext {
    pub entity: String,
    pub id: i64,
    pub headers: HeaderMap,
    /// Matched record as a JSON object, `{}` when the id matches nothing.
    pub data: Value,
    /// Store read failure, surfaced to the handler instead of aborting the
    /// route.
    pub error: Option<String>,
    /// POST body, when one was sent.
    pub body: Option<Value>,
    /// Replace-by-id bound to this entity and id. POST routes only.
    pub updater: Option<RecordUpdater>,
}

/// Read-modify-write replacement of one record, handed to mapping POST
/// handlers so they can persist a new version of the item they were invoked
/// on.
#[derive(Clone)]
pub struct RecordUpdater {
    store: Arc<FileStore>,
    entity: String,
    id: i64,
}

impl RecordUpdater {
    pub async fn apply(&self, replacement: Value) -> Result<Value, AppError> {
        let record = match replacement {
            Value::Object(m) => m,
            _ => return Err(AppError::BadRequest("replacement must be a JSON object".into())),
        };
        let stored = CrudService::replace_by_id(&self.store, &self.entity, self.id, record).await?;
        Ok(Value::Object(stored))
    }
}

/// A custom route body. The returned value is JSON-encoded as the response.
#[async_trait]
pub trait MappingHandler: Send + Sync {
    async fn handle(&self, ctx: MappingContext) -> Value;
}

/// Adapts a plain closure into a [`MappingHandler`], for handlers with
/// nothing to await.
pub fn handler_fn<F>(f: F) -> FnHandler<F>
where
    F: Fn(MappingContext) -> Value + Send + Sync,
{
    FnHandler(f)
}

pub struct FnHandler<F>(F);

#[async_trait]
impl<F> MappingHandler for FnHandler<F>
where
    F: Fn(MappingContext) -> Value + Send + Sync,
{
    async fn handle(&self, ctx: MappingContext) -> Value {
        (self.0)(ctx)
    }
}

/// Handlers for one URL suffix; at least one of `get`/`post` must be set.
#[derive(Clone, Default)]
pub struct Mapping {
    pub get: Option<Arc<dyn MappingHandler>>,
    pub post: Option<Arc<dyn MappingHandler>>,
}

impl Mapping {
    pub fn on_get(handler: impl MappingHandler + 'static) -> Self {
        Mapping {
            get: Some(Arc::new(handler)),
            post: None,
        }
    }

    pub fn on_post(handler: impl MappingHandler + 'static) -> Self {
        Mapping {
            get: None,
            post: Some(Arc::new(handler)),
        }
    }

    pub fn and_post(mut self, handler: impl MappingHandler + 'static) -> Self {
        self.post = Some(Arc::new(handler));
        self
    }
}

/// Shared route body for mapping GET/POST: look up the item, build the
/// context, run the caller's handler, encode its return value.
pub(crate) async fn run_mapping(
    state: AppState,
    params: HashMap<String, String>,
    headers: HeaderMap,
    body: Option<Value>,
    handler: Arc<dyn MappingHandler>,
    with_updater: bool,
) -> Result<Json<Value>, AppError> {
    let entity = super::entity::entity_from(&state, &params)?;
    let id = super::entity::parse_id(&params)?;
    let (data, error) = match CrudService::get_by_id(&state.store, &entity, id).await {
        Ok(Some(record)) => (Value::Object(record), None),
        Ok(None) => (empty_object(), None),
        Err(e) => (empty_object(), Some(e.to_string())),
    };
    let updater = if with_updater {
        Some(RecordUpdater {
            store: state.store.clone(),
            entity: entity.clone(),
            id,
        })
    } else {
        None
    };
    let ctx = MappingContext {
        entity,
        id,
        headers,
        data,
        error,
        body,
        updater,
    };
    Ok(Json(handler.handle(ctx).await))
}
