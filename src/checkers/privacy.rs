//! Privacy provider declarations.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

use crate::{
    checkers::{Checker, read_target},
    component::Component,
    context::StringContext,
    result::ValidationResult,
};

const PROVIDER_FILE: &str = "classes/privacy/provider.php";

/// Key a null provider's `get_reason()` conventionally returns.
const DEFAULT_REASON_KEY: &str = "privacy:metadata";

static PRIVACY_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"['"](privacy:[a-z0-9_:.\-]+)['"]"#).expect("static pattern compiles")
});

/// Privacy metadata strings: every explicit `privacy:*` literal handed to
/// the metadata collection builders, or the conventional reason key for a
/// null provider that names none.
pub struct PrivacyProviderChecker;

impl Checker for PrivacyProviderChecker {
    fn name(&self) -> &str {
        "privacyprovider"
    }

    fn applies_to(&self, component: &Component) -> bool {
        component.has_file(PROVIDER_FILE)
    }

    fn check(&self, component: &Component) -> Result<ValidationResult> {
        let mut result = ValidationResult::default();
        let Some(content) = read_target(component, PROVIDER_FILE, &mut result) else {
            return Ok(result);
        };

        let mut found_any = false;
        for (index, line) in content.lines().enumerate() {
            for captures in PRIVACY_LITERAL.captures_iter(line) {
                found_any = true;
                let context = StringContext::at(PROVIDER_FILE, (index + 1) as i64)
                    .with_description("Privacy metadata");
                result.add_required_string(captures[1].to_string(), context);
            }
        }

        if !found_any && content.contains("null_provider") {
            result.add_required_string(
                DEFAULT_REASON_KEY,
                StringContext::new(
                    Some(PROVIDER_FILE.to_string()),
                    None,
                    Some("Null privacy provider reason".to_string()),
                ),
            );
        }
        Ok(result)
    }
}
