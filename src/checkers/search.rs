//! Search area declarations.

use std::{fs, sync::LazyLock};

use anyhow::Result;
use regex::Regex;

use crate::{
    checkers::Checker, component::Component, context::StringContext, result::ValidationResult,
};

const SEARCH_GLOB: &str = "classes/search/*.php";

/// Classes extending one of the core search base types.
static EXTENDS_BASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"extends\s+\\?core_search\\base(?:_\w+)?|extends\s+base(?:_\w+)?\b")
        .expect("static pattern compiles")
});

/// Every search area class needs a `search:{classname}` display string.
pub struct SearchAreaChecker;

impl Checker for SearchAreaChecker {
    fn name(&self) -> &str {
        "searcharea"
    }

    fn applies_to(&self, component: &Component) -> bool {
        !component.files_matching(SEARCH_GLOB).is_empty()
    }

    fn check(&self, component: &Component) -> Result<ValidationResult> {
        let mut result = ValidationResult::default();
        for file in component.files_matching(SEARCH_GLOB) {
            let relative = component.relative(&file);
            let Ok(content) = fs::read_to_string(&file) else {
                result.add_warning(format!("Unable to read {relative}"));
                continue;
            };

            let Some(line) = content
                .lines()
                .position(|line| EXTENDS_BASE.is_match(line))
            else {
                continue;
            };
            let Some(class_name) = file.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let context = StringContext::at(relative, (line + 1) as i64)
                .with_description(format!("Search area {class_name}"));
            result.add_required_string(format!("search:{}", class_name.to_lowercase()), context);
        }
        Ok(result)
    }
}
