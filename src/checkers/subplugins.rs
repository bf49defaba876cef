//! Subplugin type declarations.

use anyhow::Result;
use regex::Regex;
use serde_json::Value;

use crate::{
    checkers::{Checker, read_target},
    component::Component,
    context::StringContext,
    finder, php,
    result::ValidationResult,
};

const JSON_FILE: &str = "db/subplugins.json";
const PHP_FILE: &str = "db/subplugins.php";

/// Each declared subplugin type needs a `subplugintype_{type}` string and
/// its `_plural` companion.
///
/// The JSON declaration is authoritative when both files exist; the
/// structured-array PHP file is a legacy fallback.
pub struct SubpluginsChecker;

impl Checker for SubpluginsChecker {
    fn name(&self) -> &str {
        "subplugins"
    }

    fn applies_to(&self, component: &Component) -> bool {
        component.has_file(JSON_FILE) || component.has_file(PHP_FILE)
    }

    fn check(&self, component: &Component) -> Result<ValidationResult> {
        let mut result = ValidationResult::default();
        let types = if component.has_file(JSON_FILE) {
            json_types(component, &mut result)
        } else {
            php_types(component, &mut result)
        };

        for (subplugin_type, context) in types {
            result.add_required_string(
                format!("subplugintype_{subplugin_type}"),
                context.clone(),
            );
            result.add_required_string(format!("subplugintype_{subplugin_type}_plural"), context);
        }
        Ok(result)
    }
}

fn json_types(
    component: &Component,
    result: &mut ValidationResult,
) -> Vec<(String, StringContext)> {
    let Some(content) = read_target(component, JSON_FILE, result) else {
        return Vec::new();
    };
    let root: Value = match serde_json::from_str(&content) {
        Ok(root) => root,
        Err(err) => {
            result.add_error(format!("Failed to parse {JSON_FILE}: {err}"));
            return Vec::new();
        }
    };
    let Some(root) = root.as_object() else {
        result.add_error(format!("Failed to parse {JSON_FILE}: expected a JSON object"));
        return Vec::new();
    };

    // The newer section name wins when both are declared.
    let mut types = Vec::new();
    for section in ["subplugintypes", "plugintypes"] {
        if let Some(declared) = root.get(section).and_then(Value::as_object) {
            for name in declared.keys() {
                if types.iter().any(|(existing, _)| existing == name) {
                    continue;
                }
                let mut context = StringContext::new(
                    Some(JSON_FILE.to_string()),
                    None,
                    Some(format!("Subplugin type {name}")),
                );
                if let Ok(pattern) = Regex::new(&format!(r#""{}"\s*:"#, regex::escape(name)))
                    && let Some(line) =
                        finder::find_line_in_file(&component.path(JSON_FILE), &pattern)
                {
                    context.set_line(line as i64);
                }
                types.push((name.clone(), context));
            }
        }
    }
    types
}

fn php_types(component: &Component, result: &mut ValidationResult) -> Vec<(String, StringContext)> {
    let Some(content) = read_target(component, PHP_FILE, result) else {
        return Vec::new();
    };
    php::top_level_array_keys(&content)
        .into_iter()
        .map(|key| {
            let context = StringContext::at(PHP_FILE, key.line as i64)
                .with_description(format!("Subplugin type {}", key.value));
            (key.value, context)
        })
        .collect()
}
