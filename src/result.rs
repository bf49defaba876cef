//! Accumulated outcome of a validation run.

use std::collections::BTreeMap;

use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

use crate::context::StringContext;

/// Glyph prefixed to formatted error lines.
pub const ERROR_MARK: &str = "\u{2718}"; // ✘

/// Glyph prefixed to formatted warning lines.
pub const WARNING_MARK: &str = "\u{26a0}"; // ⚠

/// Fixed-shape numeric record for machine consumption (exit-code decisions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub successes: usize,
    pub total_issues: usize,
    pub is_valid: bool,
}

/// Collects required strings, diagnostics and successes across checkers and
/// the reconciliation stages.
///
/// Raw entry points (`add_raw_error`, `add_raw_warning`) only touch the raw
/// collections; the formatting entry points additionally append a
/// glyph-prefixed human-readable line to [`messages`](ValidationResult::messages).
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    strict: bool,
    required_strings: BTreeMap<String, StringContext>,
    errors: Vec<String>,
    warnings: Vec<String>,
    successes: usize,
    messages: Vec<String>,
}

impl ValidationResult {
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            ..Self::default()
        }
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Record a string the component is required to declare.
    ///
    /// Inserting an already-known key overwrites its context (last write wins).
    pub fn add_required_string(&mut self, key: impl Into<String>, context: StringContext) {
        self.required_strings.insert(key.into(), context);
    }

    pub fn required_strings(&self) -> &BTreeMap<String, StringContext> {
        &self.required_strings
    }

    pub fn add_raw_error(&mut self, text: impl Into<String>) {
        self.errors.push(text.into());
    }

    pub fn add_raw_warning(&mut self, text: impl Into<String>) {
        self.warnings.push(text.into());
    }

    pub fn add_error(&mut self, text: impl Into<String>) {
        self.add_error_in(text, &StringContext::default());
    }

    /// Record an error and a formatted message line carrying the context's
    /// key/value pairs inline.
    pub fn add_error_in(&mut self, text: impl Into<String>, context: &StringContext) {
        let text = text.into();
        self.messages.push(format!(
            "{} {}{}",
            ERROR_MARK.red(),
            text,
            render_context(context)
        ));
        self.errors.push(text);
    }

    pub fn add_warning(&mut self, text: impl Into<String>) {
        self.add_warning_in(text, &StringContext::default());
    }

    pub fn add_warning_in(&mut self, text: impl Into<String>, context: &StringContext) {
        let text = text.into();
        self.messages.push(format!(
            "{} {}{}",
            WARNING_MARK.yellow(),
            text,
            render_context(context)
        ));
        self.warnings.push(text);
    }

    pub fn add_success(&mut self) {
        self.successes += 1;
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Ordered human-readable lines suitable for direct display.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> usize {
        self.successes
    }

    pub fn total_issues(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Valid iff there are no errors and, under strict mode, no warnings.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty() && (!self.strict || self.warnings.is_empty())
    }

    pub fn summary(&self) -> Summary {
        Summary {
            errors: self.errors.len(),
            warnings: self.warnings.len(),
            successes: self.successes,
            total_issues: self.total_issues(),
            is_valid: self.is_valid(),
        }
    }

    /// Fold another result into this one.
    ///
    /// Own entries keep their position, incoming entries are appended; on a
    /// required-string key conflict the incoming context wins.
    pub fn merge(&mut self, other: ValidationResult) {
        for (key, context) in other.required_strings {
            self.required_strings.insert(key, context);
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.messages.extend(other.messages);
        self.successes += other.successes;
    }
}

fn render_context(context: &StringContext) -> String {
    let map = context.to_map();
    if map.is_empty() {
        return String::new();
    }
    let pairs: Vec<String> = map
        .iter()
        .map(|(key, value)| match value {
            Value::String(s) => format!("{}: {}", key, s),
            other => format!("{}: {}", key, other),
        })
        .collect();
    format!(" ({})", pairs.join(", "))
}
