//! Capability (permission) declarations.

use anyhow::Result;

use crate::{
    checkers::{Checker, read_target},
    component::Component,
    context::StringContext,
    php,
    result::ValidationResult,
};

const ACCESS_FILE: &str = "db/access.php";

/// Every declared capability needs a display string named after the
/// capability with its type prefix stripped: `mod/demo:view` → `demo:view`.
pub struct CapabilitiesChecker;

impl Checker for CapabilitiesChecker {
    fn name(&self) -> &str {
        "capabilities"
    }

    fn applies_to(&self, component: &Component) -> bool {
        component.has_file(ACCESS_FILE)
    }

    fn check(&self, component: &Component) -> Result<ValidationResult> {
        let mut result = ValidationResult::default();
        let Some(content) = read_target(component, ACCESS_FILE, &mut result) else {
            return Ok(result);
        };

        for capability in php::top_level_array_keys(&content) {
            let key = capability
                .value
                .rsplit('/')
                .next()
                .unwrap_or(&capability.value)
                .to_string();
            let context = StringContext::at(ACCESS_FILE, capability.line as i64)
                .with_description(format!("Capability {}", capability.value));
            result.add_required_string(key, context);
        }
        Ok(result)
    }
}
