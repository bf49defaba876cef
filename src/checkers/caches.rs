//! Cache definitions.

use anyhow::Result;

use crate::{
    checkers::{Checker, read_target},
    component::Component,
    context::StringContext,
    php,
    result::ValidationResult,
};

const CACHES_FILE: &str = "db/caches.php";

/// Every cache definition needs a `cachedef_{name}` display string.
pub struct CachesChecker;

impl Checker for CachesChecker {
    fn name(&self) -> &str {
        "caches"
    }

    fn applies_to(&self, component: &Component) -> bool {
        component.has_file(CACHES_FILE)
    }

    fn check(&self, component: &Component) -> Result<ValidationResult> {
        let mut result = ValidationResult::default();
        let Some(content) = read_target(component, CACHES_FILE, &mut result) else {
            return Ok(result);
        };

        for definition in php::top_level_array_keys(&content) {
            let context = StringContext::at(CACHES_FILE, definition.line as i64)
                .with_description(format!("Cache definition {}", definition.value));
            result.add_required_string(format!("cachedef_{}", definition.value), context);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_cache_definitions_map_to_cachedef_keys() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("db")).unwrap();
        fs::write(
            dir.path().join("db/caches.php"),
            "<?php\n$definitions = [\n    'sessions' => [\n        'mode' => cache_store::MODE_APPLICATION,\n    ],\n    'userdata' => ['mode' => cache_store::MODE_SESSION],\n];\n",
        )
        .unwrap();
        let component = Component::new("local_demo", dir.path()).unwrap();

        assert!(CachesChecker.applies_to(&component));
        let result = CachesChecker.check(&component).unwrap();
        let keys: Vec<&String> = result.required_strings().keys().collect();
        assert_eq!(keys, ["cachedef_sessions", "cachedef_userdata"]);
        assert_eq!(
            result.required_strings()["cachedef_sessions"].line(),
            Some(3)
        );
    }

    #[test]
    fn test_does_not_apply_without_caches_file() {
        let dir = tempdir().unwrap();
        let component = Component::new("local_demo", dir.path()).unwrap();
        assert!(!CachesChecker.applies_to(&component));
    }
}
