//! Grade item mapping declarations.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

use crate::{
    checkers::{Checker, read_target},
    component::Component,
    context::StringContext,
    php,
    result::ValidationResult,
};

const GRADEITEMS_FILE: &str = "classes/grades/gradeitems.php";

/// `number => 'name'` entries of the item-number mapping.
static MAPPED_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\d+\s*=>\s*['"]([^'"]*)['"]"#).expect("static pattern compiles")
});

/// Quoted names inside the advanced-grading list.
static ITEM_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"]([a-z][a-z0-9_]*)['"]"#).expect("static pattern compiles"));

/// Grade item mappings need `grade_{name}_name` strings; advanced-grading
/// item names need `gradeitem:{name}` strings.
pub struct GradeItemChecker;

impl Checker for GradeItemChecker {
    fn name(&self) -> &str {
        "gradeitem"
    }

    fn applies_to(&self, component: &Component) -> bool {
        component.has_file(GRADEITEMS_FILE)
    }

    fn check(&self, component: &Component) -> Result<ValidationResult> {
        let mut result = ValidationResult::default();
        let Some(content) = read_target(component, GRADEITEMS_FILE, &mut result) else {
            return Ok(result);
        };

        if let Some((body, start_line)) =
            php::function_body(&content, "get_itemname_mapping_for_itemnumber")
        {
            for (index, line) in body.lines().enumerate() {
                for captures in MAPPED_ITEM.captures_iter(line) {
                    let name = &captures[1];
                    // Item number 0 is commonly mapped to '' (no named item).
                    if name.is_empty() {
                        continue;
                    }
                    let context =
                        StringContext::at(GRADEITEMS_FILE, (start_line + index) as i64)
                            .with_description(format!("Grade item {name}"));
                    result.add_required_string(format!("grade_{name}_name"), context);
                }
            }
        }

        if let Some((body, start_line)) =
            php::function_body(&content, "get_advancedgrading_itemnames")
        {
            for (index, line) in body.lines().enumerate() {
                for captures in ITEM_NAME.captures_iter(line) {
                    let name = &captures[1];
                    let context =
                        StringContext::at(GRADEITEMS_FILE, (start_line + index) as i64)
                            .with_description(format!("Advanced grading item {name}"));
                    result.add_required_string(format!("gradeitem:{name}"), context);
                }
            }
        }
        Ok(result)
    }
}
