//! Tag area declarations.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

use crate::{
    checkers::{Checker, read_target},
    component::Component,
    context::StringContext,
    result::ValidationResult,
};

const TAG_FILE: &str = "db/tag.php";

static ITEM_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"['"]itemtype['"]\s*=>\s*['"]([^'"]+)['"]"#).expect("static pattern compiles")
});

/// Every declared tag area needs a `tagarea_{itemtype}` display string.
pub struct TagsChecker;

impl Checker for TagsChecker {
    fn name(&self) -> &str {
        "tags"
    }

    fn applies_to(&self, component: &Component) -> bool {
        component.has_file(TAG_FILE)
    }

    fn check(&self, component: &Component) -> Result<ValidationResult> {
        let mut result = ValidationResult::default();
        let Some(content) = read_target(component, TAG_FILE, &mut result) else {
            return Ok(result);
        };

        for (index, line) in content.lines().enumerate() {
            for captures in ITEM_TYPE.captures_iter(line) {
                let item_type = &captures[1];
                let context = StringContext::at(TAG_FILE, (index + 1) as i64)
                    .with_description(format!("Tag area {item_type}"));
                result.add_required_string(format!("tagarea_{item_type}"), context);
            }
        }
        Ok(result)
    }
}
