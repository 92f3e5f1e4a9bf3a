//! Builds a CRUD route group from mount options.

use crate::config::{method_enabled, validate, CrudOptions, Method};
use crate::error::ConfigError;
use crate::handlers::entity::{create, list, read, remove, update};
use crate::handlers::mapping::run_mapping;
use crate::state::AppState;
use crate::store::FileStore;
use axum::{
    extract::{DefaultBodyLimit, Path, State},
    http::HeaderMap,
    routing::{post, MethodRouter},
    Json, Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Registers the standard routes (gated by `options.methods`) plus the
/// custom mapping routes, all sharing one store handle. Patterns follow the
/// original layout: `/<prefix>/<entity>` and `/<prefix>/<entity>/:id`, with
/// `:prefix`/`:entity` URL parameters for unset segments. Each registered
/// route is logged.
pub fn crud_routes(store: Arc<FileStore>, options: CrudOptions) -> Result<Router, ConfigError> {
    validate(&options)?;

    let list_pattern = options.list_pattern();
    let single_pattern = options.single_pattern();
    let methods = options.methods.clone();
    let mappings = options.mappings.clone();
    let state = AppState {
        store,
        options: Arc::new(options),
    };

    let get_on = method_enabled(&methods, Method::Get);
    let post_on = method_enabled(&methods, Method::Post);
    let put_on = method_enabled(&methods, Method::Put);
    let delete_on = method_enabled(&methods, Method::Delete);

    let mut router = Router::new();
    let mut list_routes: MethodRouter<AppState> = MethodRouter::new();
    let mut single_routes: MethodRouter<AppState> = MethodRouter::new();

    if get_on {
        tracing::info!("GET {}", list_pattern);
        tracing::info!("GET {}", single_pattern);
        list_routes = list_routes.get(list);
        single_routes = single_routes.get(read);
    }
    if post_on {
        tracing::info!("POST {}", list_pattern);
        list_routes = list_routes.post(create);
    }
    if put_on {
        tracing::info!("PUT {}", single_pattern);
        single_routes = single_routes.put(update);
    }
    if delete_on {
        tracing::info!("DELETE {}", single_pattern);
        single_routes = single_routes.delete(remove);
        let delete_pattern = format!("{}/delete", single_pattern);
        tracing::info!("POST {}", delete_pattern);
        router = router.route(&delete_pattern, post(remove));
    }

    if get_on || post_on {
        router = router.route(&list_pattern, list_routes);
    }
    if get_on || put_on || delete_on {
        router = router.route(&single_pattern, single_routes);
    }

    for (suffix, mapping) in &mappings {
        let pattern = format!("{}{}", single_pattern, suffix);
        let mut routes: MethodRouter<AppState> = MethodRouter::new();
        if let Some(handler) = mapping.get.clone() {
            tracing::info!("GET {}", pattern);
            routes = routes.get(
                move |State(state): State<AppState>,
                      Path(params): Path<HashMap<String, String>>,
                      headers: HeaderMap| async move {
                    run_mapping(state, params, headers, None, handler, false).await
                },
            );
        }
        if let Some(handler) = mapping.post.clone() {
            tracing::info!("POST {}", pattern);
            routes = routes.post(
                move |State(state): State<AppState>,
                      Path(params): Path<HashMap<String, String>>,
                      headers: HeaderMap,
                      body: Option<Json<Value>>| async move {
                    let body = body.map(|Json(v)| v);
                    run_mapping(state, params, headers, body, handler, true).await
                },
            );
        }
        router = router.route(&pattern, routes);
    }

    Ok(router
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state))
}
