//! Mount-time option validation.

use crate::config::{method_enabled, CrudOptions, Method};
use crate::error::ConfigError;
use crate::store::is_valid_segment;

/// Checks a route group's options before any route is registered: literal
/// path segments must be well formed, mapping suffixes must not collide with
/// built-in routes, and every mapping needs at least one handler. Custom
/// rules with an unsupported type are tolerated (evaluation skips them) but
/// logged.
pub fn validate(options: &CrudOptions) -> Result<(), ConfigError> {
    if let Some(prefix) = &options.prefix {
        if !is_valid_segment(prefix) {
            return Err(ConfigError::InvalidSegment {
                kind: "prefix",
                value: prefix.clone(),
            });
        }
    }
    if let Some(entity) = &options.entity {
        if !is_valid_segment(entity) {
            return Err(ConfigError::InvalidSegment {
                kind: "entity",
                value: entity.clone(),
            });
        }
    }

    let delete_routes = method_enabled(&options.methods, Method::Delete);
    for (suffix, mapping) in &options.mappings {
        let tail = suffix.strip_prefix('/');
        if !tail.map(is_valid_segment).unwrap_or(false) {
            return Err(ConfigError::BadMappingSuffix(suffix.clone()));
        }
        // POST <single>/delete is taken by the delete alias.
        if delete_routes && suffix == "/delete" {
            return Err(ConfigError::ReservedMappingSuffix(suffix.clone()));
        }
        if mapping.get.is_none() && mapping.post.is_none() {
            return Err(ConfigError::EmptyMapping(suffix.clone()));
        }
    }

    for rule in &options.validation.custom {
        if rule.type_ != "in" {
            tracing::warn!(
                rule_type = %rule.type_,
                field = %rule.field,
                "unsupported custom rule type; rule will be skipped"
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::mapping::{handler_fn, Mapping, MappingContext};
    use serde_json::Value;

    fn noop(_ctx: MappingContext) -> Value {
        crate::response::empty_object()
    }

    #[test]
    fn default_options_are_valid() {
        assert!(validate(&CrudOptions::default()).is_ok());
    }

    #[test]
    fn malformed_prefix_is_rejected() {
        let options = CrudOptions {
            prefix: Some("a/b".into()),
            ..CrudOptions::default()
        };
        assert!(matches!(
            validate(&options),
            Err(ConfigError::InvalidSegment { kind: "prefix", .. })
        ));
    }

    #[test]
    fn mapping_suffix_must_be_a_slash_segment() {
        let mut options = CrudOptions::default();
        options.mappings.insert("publish".into(), Mapping::on_get(handler_fn(noop)));
        assert!(matches!(
            validate(&options),
            Err(ConfigError::BadMappingSuffix(_))
        ));
    }

    #[test]
    fn delete_suffix_is_reserved_while_delete_routes_exist() {
        let mut options = CrudOptions::default();
        options.mappings.insert("/delete".into(), Mapping::on_get(handler_fn(noop)));
        assert!(matches!(
            validate(&options),
            Err(ConfigError::ReservedMappingSuffix(_))
        ));

        let mut options = CrudOptions {
            methods: vec![Method::Get],
            ..CrudOptions::default()
        };
        options.mappings.insert("/delete".into(), Mapping::on_get(handler_fn(noop)));
        assert!(validate(&options).is_ok());
    }

    #[test]
    fn mapping_without_handlers_is_rejected() {
        let mut options = CrudOptions::default();
        options.mappings.insert("/publish".into(), Mapping::default());
        assert!(matches!(
            validate(&options),
            Err(ConfigError::EmptyMapping(_))
        ));
    }
}
