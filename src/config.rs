//! Validation configuration.
//!
//! The core never reads ambient process state; callers resolve flags and
//! environment into a [`ValidationConfig`] up front and hand it in.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use glob::Pattern;

pub const DEFAULT_LANGUAGE: &str = "en";

/// Immutable per-run configuration.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    language: String,
    strict: bool,
    check_unused: bool,
    exclude_patterns: Vec<Pattern>,
    custom_checkers: Vec<String>,
    use_builtin_checkers: bool,
    debug: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            strict: false,
            check_unused: false,
            exclude_patterns: Vec::new(),
            custom_checkers: Vec::new(),
            use_builtin_checkers: true,
            debug: false,
        }
    }
}

impl ValidationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from a flat string-keyed option bag.
    ///
    /// Recognized keys: `language`, `strict`, `check-unused`,
    /// `exclude-patterns` (comma-separated), `checkers` (comma-separated),
    /// `use-builtin-checkers`, `debug`. Missing keys fall back to defaults.
    pub fn from_options(options: &BTreeMap<String, String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(language) = options.get("language") {
            config.language = language.clone();
        }
        if let Some(value) = options.get("strict") {
            config.strict = parse_bool(value);
        }
        if let Some(value) = options.get("check-unused") {
            config.check_unused = parse_bool(value);
        }
        if let Some(value) = options.get("exclude-patterns") {
            config.exclude_patterns = compile_patterns(&split_list(value))?;
        }
        if let Some(value) = options.get("checkers") {
            config.custom_checkers = split_list(value);
        }
        if let Some(value) = options.get("use-builtin-checkers") {
            config.use_builtin_checkers = parse_bool(value);
        }
        if let Some(value) = options.get("debug") {
            config.debug = parse_bool(value);
        }
        Ok(config)
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_check_unused(mut self, check_unused: bool) -> Self {
        self.check_unused = check_unused;
        self
    }

    pub fn with_exclude_patterns(mut self, patterns: &[&str]) -> Result<Self> {
        let owned: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        self.exclude_patterns = compile_patterns(&owned)?;
        Ok(self)
    }

    pub fn with_custom_checkers(mut self, checkers: &[&str]) -> Self {
        self.custom_checkers = checkers.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_builtin_checkers(mut self, use_builtin: bool) -> Self {
        self.use_builtin_checkers = use_builtin;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    pub fn check_unused(&self) -> bool {
        self.check_unused
    }

    pub fn custom_checkers(&self) -> &[String] {
        &self.custom_checkers
    }

    pub fn use_builtin_checkers(&self) -> bool {
        self.use_builtin_checkers
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Whether a string key is excluded from error/warning consideration.
    ///
    /// Patterns use anchored shell-glob semantics (`*` any run, `?` exactly
    /// one character), matched case-sensitively against the full key. The
    /// first matching pattern wins; an empty pattern list excludes nothing.
    pub fn should_exclude_string(&self, key: &str) -> bool {
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.matches(key))
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim(), "1" | "true" | "yes" | "on")
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).with_context(|| format!("Invalid exclusion pattern: \"{}\"", p)))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = ValidationConfig::default();
        assert_eq!(config.language(), "en");
        assert!(!config.strict());
        assert!(!config.check_unused());
        assert!(config.use_builtin_checkers());
        assert!(!config.debug());
        assert!(config.custom_checkers().is_empty());
    }

    #[test]
    fn test_from_options() {
        let options: BTreeMap<String, String> = [
            ("language", "de"),
            ("strict", "1"),
            ("check-unused", "true"),
            ("exclude-patterns", "privacy:* , , cachedef_*"),
            ("checkers", "capabilities,tags"),
            ("use-builtin-checkers", "0"),
            ("debug", "yes"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = ValidationConfig::from_options(&options).unwrap();
        assert_eq!(config.language(), "de");
        assert!(config.strict());
        assert!(config.check_unused());
        assert!(config.should_exclude_string("privacy:metadata"));
        assert!(config.should_exclude_string("cachedef_foo"));
        assert_eq!(config.custom_checkers(), ["capabilities", "tags"]);
        assert!(!config.use_builtin_checkers());
        assert!(config.debug());
    }

    #[test]
    fn test_from_options_empty_segments_dropped() {
        let options: BTreeMap<String, String> =
            [("exclude-patterns".to_string(), " , ,a*,".to_string())].into();
        let config = ValidationConfig::from_options(&options).unwrap();
        assert!(config.should_exclude_string("abc"));
        assert!(!config.should_exclude_string("bcd"));
    }

    #[test]
    fn test_from_options_invalid_pattern_fails() {
        let options: BTreeMap<String, String> =
            [("exclude-patterns".to_string(), "[invalid".to_string())].into();
        assert!(ValidationConfig::from_options(&options).is_err());
    }

    #[test]
    fn test_should_exclude_string_full_match_only() {
        let config = ValidationConfig::default()
            .with_exclude_patterns(&["cachedef_*", "task?"])
            .unwrap();

        assert!(config.should_exclude_string("cachedef_sessions"));
        assert!(config.should_exclude_string("cachedef_"));
        // Anchored: the pattern must cover the whole key, not a substring.
        assert!(!config.should_exclude_string("xcachedef_sessions"));
        assert!(config.should_exclude_string("task1"));
        assert!(!config.should_exclude_string("task12"));
        assert!(!config.should_exclude_string("task"));
    }

    #[test]
    fn test_should_exclude_string_case_sensitive() {
        let config = ValidationConfig::default()
            .with_exclude_patterns(&["Error*"])
            .unwrap();
        assert!(config.should_exclude_string("ErrorCode"));
        assert!(!config.should_exclude_string("errorcode"));
    }

    #[test]
    fn test_empty_pattern_list_excludes_nothing() {
        let config = ValidationConfig::default();
        assert!(!config.should_exclude_string("anything"));
    }
}
