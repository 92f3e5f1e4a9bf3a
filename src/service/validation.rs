//! Declarative rule evaluation for create payloads.

use crate::config::RuleSet;
use crate::error::FieldError;
use crate::store::Record;
use serde_json::Value;

pub struct RuleEvaluator;

impl RuleEvaluator {
    /// Evaluates the rule set in three ordered stages: required fields,
    /// enumerated-value ("in") constraints, conditionally required fields.
    /// A stage that yields errors stops evaluation, so the returned list
    /// never mixes stages. Empty means the candidate is valid.
    pub fn validate(candidate: &Record, rules: &RuleSet) -> Vec<FieldError> {
        let mut errors = Vec::new();

        for field in &rules.required {
            if is_falsy(candidate.get(field.as_str())) {
                errors.push(FieldError::required(field));
            }
        }
        if !errors.is_empty() {
            return errors;
        }

        for rule in &rules.custom {
            // Unrecognized rule types are skipped, not rejected.
            if rule.type_ != "in" {
                continue;
            }
            if let Some(v) = candidate.get(rule.field.as_str()) {
                if !rule.values.iter().any(|allowed| allowed == v) {
                    errors.push(FieldError::invalid_value(&rule.field, &rule.values));
                }
            }
        }
        if !errors.is_empty() {
            return errors;
        }

        for rule in &rules.required_if {
            if candidate.get(rule.field.as_str()) == Some(&rule.value) {
                for name in &rule.fields {
                    // Falsy is acceptable here; only a missing key counts.
                    if !candidate.contains_key(name.as_str()) {
                        errors.push(FieldError::required(name));
                    }
                }
            }
        }
        errors
    }
}

/// Absent, null, false, numeric zero, and the empty string are all "missing"
/// for required-field purposes.
fn is_falsy(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !*b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}
