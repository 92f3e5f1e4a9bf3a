//! Example server: one fixed-entity group with validation and custom
//! mappings, plus a catch-all group that takes the entity from the URL.

use async_trait::async_trait;
use axum::Router;
use filecrud::{
    common_routes, crud_routes, handler_fn, CrudOptions, CustomRule, FileStore, Mapping,
    MappingContext, MappingHandler, RequiredIfRule, RuleSet,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

/// POST /api/widgets/:id/publish — flips the matched record to published via
/// the bound updater.
struct Publish;

#[async_trait]
impl MappingHandler for Publish {
    async fn handle(&self, ctx: MappingContext) -> Value {
        if let Some(err) = ctx.error {
            return json!({ "error": err });
        }
        let Some(record) = ctx.data.as_object().filter(|m| !m.is_empty()).cloned() else {
            return json!({ "error": format!("no widget with id {}", ctx.id) });
        };
        let mut updated = record;
        updated.insert("status".into(), json!("published"));
        let updater = ctx.updater.expect("POST mappings carry an updater");
        match updater.apply(Value::Object(updated)).await {
            Ok(stored) => stored,
            Err(e) => json!({ "error": e.to_string() }),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("filecrud=info".parse()?))
        .init();

    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".into());
    let store = Arc::new(FileStore::open(data_dir).await?);

    let mut widgets = CrudOptions {
        prefix: Some("api".into()),
        validation: RuleSet {
            required: vec!["name".into()],
            custom: vec![CustomRule {
                type_: "in".into(),
                field: "status".into(),
                values: vec![json!("draft"), json!("published")],
            }],
            required_if: vec![RequiredIfRule {
                field: "status".into(),
                value: json!("published"),
                fields: vec!["published_at".into()],
            }],
        },
        ..CrudOptions::for_entity("widgets")
    };
    widgets.mappings.insert(
        "/summary".into(),
        Mapping::on_get(handler_fn(|ctx: MappingContext| {
            json!({ "entity": ctx.entity, "id": ctx.id, "record": ctx.data })
        })),
    );
    widgets
        .mappings
        .insert("/publish".into(), Mapping::on_post(Publish));

    // Read-only browsing of any other entity: /public/<entity>.
    let public = CrudOptions {
        prefix: Some("public".into()),
        methods: vec![filecrud::Method::Get],
        ..CrudOptions::default()
    };

    let app = Router::new()
        .merge(common_routes())
        .merge(crud_routes(store.clone(), widgets)?)
        .merge(crud_routes(store, public)?)
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind("0.0.0.0:3000").await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
