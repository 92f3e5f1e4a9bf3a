//! Mount options and the declarative validation rule types.

use crate::handlers::mapping::Mapping;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Route families a mounted group can expose. `All` enables everything.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    All,
    Get,
    Post,
    Put,
    Delete,
}

pub(crate) fn method_enabled(methods: &[Method], wanted: Method) -> bool {
    methods.iter().any(|m| *m == Method::All || *m == wanted)
}

/// Declarative validation rules, applied to create payloads only.
/// Deserializable so rule sets can live in JSON config files.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleSet {
    /// Field names that must be present and truthy.
    pub required: Vec<String>,
    /// Enumerated-value constraints; only `type: "in"` is recognized.
    pub custom: Vec<CustomRule>,
    /// Fields that become required when another field holds a given value.
    pub required_if: Vec<RequiredIfRule>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CustomRule {
    #[serde(rename = "type")]
    pub type_: String,
    pub field: String,
    pub values: Vec<serde_json::Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RequiredIfRule {
    pub field: String,
    pub value: serde_json::Value,
    pub fields: Vec<String>,
}

/// Options for one mounted route group.
#[derive(Clone)]
pub struct CrudOptions {
    /// Leading path segment. `None` mounts a `:prefix` URL parameter.
    pub prefix: Option<String>,
    /// Fixed entity name. `None` takes the entity from the URL.
    pub entity: Option<String>,
    /// Which route families to register.
    pub methods: Vec<Method>,
    /// Storage root; one `<entity>.json` document per entity.
    pub data_dir: PathBuf,
    /// Rules evaluated on create.
    pub validation: RuleSet,
    /// Custom per-item routes keyed by URL suffix (e.g. "/publish").
    pub mappings: HashMap<String, Mapping>,
}

impl Default for CrudOptions {
    fn default() -> Self {
        CrudOptions {
            prefix: None,
            entity: None,
            methods: vec![Method::All],
            data_dir: PathBuf::from("data"),
            validation: RuleSet::default(),
            mappings: HashMap::new(),
        }
    }
}

impl CrudOptions {
    /// Options for a fixed entity with everything else defaulted.
    pub fn for_entity(entity: impl Into<String>) -> Self {
        CrudOptions {
            entity: Some(entity.into()),
            ..CrudOptions::default()
        }
    }

    pub(crate) fn list_pattern(&self) -> String {
        format!(
            "/{}/{}",
            segment(&self.prefix, ":prefix"),
            segment(&self.entity, ":entity")
        )
    }

    pub(crate) fn single_pattern(&self) -> String {
        format!("{}/:id", self.list_pattern())
    }
}

fn segment(fixed: &Option<String>, placeholder: &str) -> String {
    fixed.clone().unwrap_or_else(|| placeholder.to_string())
}
