//! Location and description metadata attached to a discovered string requirement.

use std::fmt;

use serde_json::{Map, Value};

/// Where and why a required string was discovered.
///
/// Contexts are created once the key is known and enriched later: a checker
/// records the file up front and backfills the line with [`set_line`] once a
/// text scan resolves it. That backfill is the only mutation a context
/// supports.
///
/// [`set_line`]: StringContext::set_line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringContext {
    file: Option<String>,
    line: Option<i64>,
    description: Option<String>,
}

impl StringContext {
    pub fn new(file: Option<String>, line: Option<i64>, description: Option<String>) -> Self {
        Self {
            file,
            line,
            description,
        }
    }

    /// Context with a resolved file and line.
    pub fn at(file: impl Into<String>, line: i64) -> Self {
        Self::new(Some(file.into()), Some(line), None)
    }

    /// Context carrying only a free-text description.
    pub fn described(description: impl Into<String>) -> Self {
        Self::new(None, None, Some(description.into()))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn line(&self) -> Option<i64> {
        self.line
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Overwrite the line unconditionally.
    ///
    /// Non-positive values are stored as-is: a line that is merely set, even
    /// zero or negative, still counts as present for [`has_location`].
    ///
    /// [`has_location`]: StringContext::has_location
    pub fn set_line(&mut self, line: i64) {
        self.line = Some(line);
    }

    /// True iff the file is set and non-empty and the line is set.
    pub fn has_location(&self) -> bool {
        self.file.as_deref().is_some_and(|f| !f.is_empty()) && self.line.is_some()
    }

    /// Sparse map of the non-empty fields under `file`, `line` and `context`.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if let Some(file) = self.file.as_deref()
            && !file.is_empty()
        {
            map.insert("file".to_string(), Value::from(file));
        }
        if let Some(line) = self.line {
            map.insert("line".to_string(), Value::from(line));
        }
        if let Some(description) = self.description.as_deref()
            && !description.is_empty()
        {
            map.insert("context".to_string(), Value::from(description));
        }
        map
    }
}

impl fmt::Display for StringContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(description) = self.description.as_deref()
            && !description.is_empty()
        {
            parts.push(description.to_string());
        }
        if self.has_location() {
            parts.push(format!(
                "in {}:{}",
                self.file.as_deref().unwrap_or_default(),
                self.line.unwrap_or_default()
            ));
        }
        write!(f, "{}", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_accessors_return_stored_values() {
        let ctx = StringContext::new(
            Some("db/access.php".to_string()),
            Some(12),
            Some("Capability".to_string()),
        );
        assert_eq!(ctx.file(), Some("db/access.php"));
        assert_eq!(ctx.line(), Some(12));
        assert_eq!(ctx.description(), Some("Capability"));
    }

    #[test]
    fn test_set_line_overwrites_unconditionally() {
        let mut ctx = StringContext::at("lib.php", 10);
        ctx.set_line(42);
        assert_eq!(ctx.line(), Some(42));
        ctx.set_line(0);
        assert_eq!(ctx.line(), Some(0));
        ctx.set_line(-3);
        assert_eq!(ctx.line(), Some(-3));
    }

    #[test]
    fn test_has_location_requires_file_and_line() {
        assert!(!StringContext::default().has_location());
        assert!(!StringContext::described("somewhere").has_location());
        assert!(!StringContext::new(Some("lib.php".to_string()), None, None).has_location());
        assert!(!StringContext::new(None, Some(5), None).has_location());
        assert!(StringContext::at("lib.php", 5).has_location());
    }

    #[test]
    fn test_has_location_accepts_zero_and_negative_lines() {
        // Zero and negative lines count as "set" on purpose: line numbers are
        // backfilled after discovery and callers rely on the set/unset
        // distinction, not the value.
        assert!(StringContext::at("lib.php", 0).has_location());
        assert!(StringContext::at("lib.php", -1).has_location());
    }

    #[test]
    fn test_empty_file_is_not_a_location() {
        assert!(!StringContext::at("", 5).has_location());
    }

    #[test]
    fn test_to_map_is_sparse() {
        let map = StringContext::default().to_map();
        assert!(map.is_empty());

        let map = StringContext::at("lib.php", 3)
            .with_description("Used in source code")
            .to_map();
        assert_eq!(map.get("file"), Some(&serde_json::json!("lib.php")));
        assert_eq!(map.get("line"), Some(&serde_json::json!(3)));
        assert_eq!(
            map.get("context"),
            Some(&serde_json::json!("Used in source code"))
        );
    }

    #[test]
    fn test_to_map_omits_empty_strings() {
        let map = StringContext::new(Some(String::new()), Some(1), Some(String::new())).to_map();
        assert!(!map.contains_key("file"));
        assert!(!map.contains_key("context"));
        assert!(map.contains_key("line"));
    }

    #[test]
    fn test_display_joins_description_and_location() {
        assert_eq!(StringContext::default().to_string(), "");
        assert_eq!(
            StringContext::described("Capability").to_string(),
            "Capability"
        );
        assert_eq!(
            StringContext::at("db/access.php", 7).to_string(),
            "in db/access.php:7"
        );
        assert_eq!(
            StringContext::at("db/access.php", 7)
                .with_description("Capability")
                .to_string(),
            "Capability in db/access.php:7"
        );
    }
}
