//! Message provider declarations.

use anyhow::Result;

use crate::{
    checkers::{Checker, read_target},
    component::Component,
    context::StringContext,
    php,
    result::ValidationResult,
};

const MESSAGES_FILE: &str = "db/messages.php";

/// Every message provider needs a `messageprovider:{name}` display string.
pub struct MessagesChecker;

impl Checker for MessagesChecker {
    fn name(&self) -> &str {
        "messages"
    }

    fn applies_to(&self, component: &Component) -> bool {
        component.has_file(MESSAGES_FILE)
    }

    fn check(&self, component: &Component) -> Result<ValidationResult> {
        let mut result = ValidationResult::default();
        let Some(content) = read_target(component, MESSAGES_FILE, &mut result) else {
            return Ok(result);
        };

        for provider in php::top_level_array_keys(&content) {
            let context = StringContext::at(MESSAGES_FILE, provider.line as i64)
                .with_description(format!("Message provider {}", provider.value));
            result.add_required_string(format!("messageprovider:{}", provider.value), context);
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
    fn test_providers_map_to_messageprovider_keys() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("db")).unwrap();
        fs::write(
            dir.path().join("db/messages.php"),
            "<?php\n$messageproviders = [\n    'submission' => [],\n    'expiry' => [\n        'defaults' => ['popup' => MESSAGE_PERMITTED],\n    ],\n];\n",
        )
        .unwrap();
        let component = Component::new("mod_demo", dir.path()).unwrap();

        let result = MessagesChecker.check(&component).unwrap();
        let keys: Vec<&String> = result.required_strings().keys().collect();
        assert_eq!(
            keys,
            ["messageprovider:expiry", "messageprovider:submission"]
        );
    }
}
