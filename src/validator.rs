//! Orchestration of a full validation run.

use std::fs;

use regex::Regex;

use crate::{
    bridge::HostBridge,
    checkers::{self, Checker},
    component::Component,
    config::ValidationConfig,
    context::StringContext,
    discovery,
    error_handler::ErrorHandler,
    lang::{self, LangFile},
    result::ValidationResult,
};

/// Runs every applicable checker, the source usage scan and the language
/// file reconciliation for one component.
pub struct StringValidator<'a> {
    component: &'a Component,
    bridge: &'a dyn HostBridge,
    config: &'a ValidationConfig,
    handler: ErrorHandler,
}

/// Single entry point: validate a component against its declared language
/// file. A pure function of (component contents, configuration).
pub fn validate(
    component: &Component,
    bridge: &dyn HostBridge,
    config: &ValidationConfig,
) -> ValidationResult {
    StringValidator::new(component, bridge, config).validate()
}

impl<'a> StringValidator<'a> {
    pub fn new(
        component: &'a Component,
        bridge: &'a dyn HostBridge,
        config: &'a ValidationConfig,
    ) -> Self {
        Self {
            component,
            bridge,
            config,
            handler: ErrorHandler::new(config.debug()),
        }
    }

    pub fn validate(&self) -> ValidationResult {
        self.validate_with_checkers(self.assemble_checkers())
    }

    /// Full pipeline over an explicit checker list. Seam for callers that
    /// bring their own analysis strategies.
    pub fn validate_with_checkers(&self, checkers: Vec<Box<dyn Checker>>) -> ValidationResult {
        let mut result = ValidationResult::new(self.config.strict());

        self.run_checkers(checkers, &mut result);
        self.scan_usages(&mut result);

        let lang_path = discovery::lang_file_path(self.component, self.config.language());
        match lang::parse_lang_file(&lang_path, self.config.language()) {
            Ok(lang) => self.reconcile(&mut result, &lang),
            Err(err) => {
                // Without the declared strings there is nothing to reconcile
                // against; the remaining stages are skipped.
                self.handler.handle_file_error(
                    &mut result,
                    &format!(
                        "Unable to load language file {}",
                        discovery::lang_file_relative(self.component, self.config.language())
                    ),
                    &anyhow::Error::new(err),
                    true,
                );
            }
        }
        result
    }

    /// Custom checkers first, then the built-ins unless disabled. A custom
    /// entry overrides the built-in of the same name.
    fn assemble_checkers(&self) -> Vec<Box<dyn Checker>> {
        let mut assembled: Vec<Box<dyn Checker>> = Vec::new();
        for name in self.config.custom_checkers() {
            // Unknown names surface as a warning during the run, see run_checkers.
            if let Some(checker) = checkers::checker_by_name(name, self.bridge) {
                assembled.push(checker);
            }
        }
        if self.config.use_builtin_checkers() {
            for checker in checkers::builtin_checkers(self.bridge) {
                if !assembled.iter().any(|c| c.name() == checker.name()) {
                    assembled.push(checker);
                }
            }
        }
        assembled
    }

    fn run_checkers(&self, checkers: Vec<Box<dyn Checker>>, result: &mut ValidationResult) {
        for name in self.config.custom_checkers() {
            if checkers::checker_by_name(name, self.bridge).is_none() {
                result.add_warning(format!("Unknown checker: {name}"));
            }
        }
        for checker in checkers {
            if !checker.applies_to(self.component) {
                continue;
            }
            match checker.check(self.component) {
                Ok(found) => result.merge(found),
                Err(err) => {
                    self.handler
                        .handle_checker_error(result, checker.name(), &err, true);
                }
            }
        }
    }

    /// Scan the component's own source for calls that resolve a string key
    /// at runtime against this component.
    fn scan_usages(&self, result: &mut ValidationResult) {
        let patterns = usage_patterns(self.component);
        for file in discovery::source_files(self.component) {
            let relative = self.component.relative(&file);
            let Ok(content) = fs::read_to_string(&file) else {
                result.add_warning(format!("Unable to read source file {relative}"));
                continue;
            };
            for (index, line) in content.lines().enumerate() {
                for pattern in &patterns {
                    for captures in pattern.captures_iter(line) {
                        let context = StringContext::at(relative.clone(), (index + 1) as i64)
                            .with_description("Used in source code");
                        result.add_required_string(captures[1].to_string(), context);
                    }
                }
            }
        }
    }

    fn reconcile(&self, result: &mut ValidationResult, lang: &LangFile) {
        let required = result.required_strings().clone();
        for (key, context) in &required {
            if self.config.should_exclude_string(key) {
                continue;
            }
            if lang.contains_key(key) {
                result.add_success();
            } else {
                result.add_error_in(format!("Missing required string: {key}"), context);
            }
        }

        if self.config.check_unused() {
            let lang_relative =
                discovery::lang_file_relative(self.component, self.config.language());
            let core_used = core_used_keys(self.component);
            for (key, declared) in &lang.strings {
                if required.contains_key(key)
                    || core_used.contains(&key.as_str())
                    || self.config.should_exclude_string(key)
                {
                    continue;
                }
                let context = StringContext::at(lang_relative.clone(), declared.line as i64);
                result.add_warning_in(format!("Unused string: {key}"), &context);
            }
        }
    }
}

/// Keys the host application reads directly; never reported unused.
fn core_used_keys(component: &Component) -> &'static [&'static str] {
    if component.plugin_type() == "mod" {
        &[
            "pluginname",
            "pluginname_help",
            "pluginname_link",
            "privacy:metadata",
            "modulename",
            "modulenameplural",
            "modulename_help",
            "modulename_link",
        ]
    } else {
        &[
            "pluginname",
            "pluginname_help",
            "pluginname_link",
            "privacy:metadata",
        ]
    }
}

/// Call shapes that resolve a string key against this component. Matching is
/// arity-tolerant: only the leading arguments up to the component name are
/// anchored, any trailing arguments are accepted.
fn usage_patterns(component: &Component) -> Vec<Regex> {
    // Activity modules may be addressed by bare module name.
    let component_arg = if component.plugin_type() == "mod" {
        format!(
            "(?:{}|{})",
            regex::escape(component.component()),
            regex::escape(component.name())
        )
    } else {
        regex::escape(component.component())
    };

    [
        format!(r#"get_string\s*\(\s*['"]([^'"$]+)['"]\s*,\s*['"]{component_arg}['"]\s*[,)]"#),
        format!(
            r#"new\s+lang_string\s*\(\s*['"]([^'"$]+)['"]\s*,\s*['"]{component_arg}['"]\s*[,)]"#
        ),
        format!(
            r#"addHelpButton\s*\(\s*['"][^'"]*['"]\s*,\s*['"]([^'"$]+)['"]\s*,\s*['"]{component_arg}['"]\s*[,)]"#
        ),
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("static call patterns compile"))
    .collect()
}
