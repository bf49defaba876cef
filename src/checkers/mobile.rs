//! Mobile app addon declarations.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

use crate::{
    checkers::{Checker, read_target},
    component::Component,
    context::StringContext,
    result::ValidationResult,
};

const MOBILE_FILE: &str = "db/mobile.php";

/// First host branch shipping the mobile addon framework.
const MIN_BRANCH: u32 = 31;

/// `[key, component]` pairs inside the addon `lang` arrays.
static LANG_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\[\s*['"]([^'"]+)['"]\s*,\s*['"]([^'"]+)['"]\s*\]"#)
        .expect("static pattern compiles")
});

/// Mobile addons declare the strings the app ships as `[key, component]`
/// pairs; pairs naming this component become requirements, pairs naming any
/// other component are dropped.
pub struct MobileChecker {
    branch: u32,
}

impl MobileChecker {
    pub fn new(branch: u32) -> Self {
        Self { branch }
    }
}

impl Checker for MobileChecker {
    fn name(&self) -> &str {
        "mobile"
    }

    fn applies_to(&self, component: &Component) -> bool {
        self.branch >= MIN_BRANCH && component.has_file(MOBILE_FILE)
    }

    fn check(&self, component: &Component) -> Result<ValidationResult> {
        let mut result = ValidationResult::default();
        let Some(content) = read_target(component, MOBILE_FILE, &mut result) else {
            return Ok(result);
        };

        for (index, line) in content.lines().enumerate() {
            for captures in LANG_PAIR.captures_iter(line) {
                if &captures[2] != component.component() {
                    continue;
                }
                let context = StringContext::at(MOBILE_FILE, (index + 1) as i64)
                    .with_description("Mobile addon string");
                result.add_required_string(captures[1].to_string(), context);
            }
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

    fn component_with_mobile(content: &str) -> (tempfile::TempDir, Component) {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("db")).unwrap();
        fs::write(dir.path().join("db/mobile.php"), content).unwrap();
        let component = Component::new("mod_demo", dir.path()).unwrap();
        (dir, component)
    }

    #[test]
    fn test_applies_only_on_supporting_branches() {
        let (_dir, component) = component_with_mobile("<?php\n$addons = [];\n");
        assert!(MobileChecker::new(31).applies_to(&component));
        assert!(MobileChecker::new(45).applies_to(&component));
        assert!(!MobileChecker::new(30).applies_to(&component));
    }

    #[test]
    fn test_matching_component_pairs_become_requirements() {
        let (_dir, component) = component_with_mobile(
            "<?php\n$addons = [\n    'mod_demo' => [\n        'handlers' => [],\n        'lang' => [\n            ['pluginname', 'mod_demo'],\n            ['submit', 'mod_demo'],\n            ['cancel', 'core'],\n        ],\n    ],\n];\n",
        );
        let result = MobileChecker::new(45).check(&component).unwrap();

        let keys: Vec<&String> = result.required_strings().keys().collect();
        assert_eq!(keys, ["pluginname", "submit"]);
        assert_eq!(result.required_strings()["submit"].line(), Some(7));
    }

    #[test]
    fn test_foreign_component_pairs_are_dropped() {
        let (_dir, component) = component_with_mobile(
            "<?php\n$addons = ['mod_demo' => ['lang' => [['cancel', 'core'], ['ok', 'mod_other']]]];\n",
        );
        let result = MobileChecker::new(45).check(&component).unwrap();
        assert!(result.required_strings().is_empty());
    }
}
