//! Exception and error-raising calls in source text.

use std::{fs, sync::LazyLock};

use anyhow::Result;
use regex::Regex;

use crate::{
    checkers::Checker, component::Component, context::StringContext, discovery,
    result::ValidationResult,
};

/// Exception constructors and error calls whose first literal argument is an
/// error-string key. An optional second literal names the component the key
/// belongs to.
static ERROR_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:new\s+\\?moodle_exception|print_error)\s*\(\s*['"]([^'"]+)['"](?:\s*,\s*['"]([^'"]+)['"])?"#,
    )
    .expect("static pattern compiles")
});

/// Error-string keys raised by the component's own code.
pub struct ExceptionChecker;

impl Checker for ExceptionChecker {
    fn name(&self) -> &str {
        "exception"
    }

    fn applies_to(&self, component: &Component) -> bool {
        !discovery::source_files(component).is_empty()
    }

    fn check(&self, component: &Component) -> Result<ValidationResult> {
        let mut result = ValidationResult::default();
        for file in discovery::source_files(component) {
            let relative = component.relative(&file);
            let Ok(content) = fs::read_to_string(&file) else {
                result.add_warning(format!("Unable to read {relative}"));
                continue;
            };

            for (index, line) in content.lines().enumerate() {
                for captures in ERROR_CALL.captures_iter(line) {
                    let key = &captures[1];
                    // A key raised for another component is that component's
                    // problem; core error codes default to the 'error' file.
                    if let Some(target) = captures.get(2)
                        && target.as_str() != component.component()
                        && target.as_str() != component.name()
                    {
                        continue;
                    }
                    if !looks_like_string_key(key) {
                        continue;
                    }
                    let context = StringContext::at(relative.clone(), (index + 1) as i64)
                        .with_description("Exception string");
                    result.add_required_string(key.to_string(), context);
                }
            }
        }
        Ok(result)
    }
}

/// Literal free-text messages are not lookups; identifier-shaped keys are.
fn looks_like_string_key(candidate: &str) -> bool {
    candidate.len() > 1
        && candidate.chars().all(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | ':' | '-')
        })
}
