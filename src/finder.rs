//! Positional provenance recovery: given a value known to live in a file,
//! find the line it sits on.
//!
//! All lookups are line-oriented text scans over the file as text; the file
//! is never loaded as code. Lookups return `None` for a missing file or no
//! match — absence of a line is an answer, not an error.

use std::{fs, path::Path};

use regex::Regex;

/// Call names whose quoted arguments resolve string keys at runtime.
const STRING_CALL: &str = r"(?:get_string|new\s+lang_string|addHelpButton)";

/// First 1-based line where `key` appears as a quoted array key immediately
/// followed by `=>`, either quote style.
///
/// The key is regex-escaped, so keys containing `/` or `.` (capability
/// names) need no caller-side treatment.
pub fn find_array_key_line(file: &Path, key: &str) -> Option<usize> {
    let pattern = Regex::new(&format!(
        r#"['"]{}['"]\s*=>"#,
        regex::escape(key)
    ))
    .ok()?;
    find_line_in_file(file, &pattern)
}

/// First 1-based line where `value` appears as a quoted argument to a
/// recognized string-producing call.
///
/// Tolerates arbitrary inter-token whitespace, either quote style, a leading
/// element-name argument (help buttons) and any number of trailing
/// arguments.
pub fn find_string_literal_line(file: &Path, value: &str) -> Option<usize> {
    let escaped = regex::escape(value);
    let pattern = Regex::new(&format!(
        r#"{STRING_CALL}\s*\(\s*(?:['"][^'"]*['"]\s*,\s*)?['"]{escaped}['"]\s*[,)]"#
    ))
    .ok()?;
    find_line_in_file(file, &pattern)
}

/// Generic line lookup with a caller-supplied pattern.
///
/// Blank lines are preserved by the scan so line numbers stay accurate.
pub fn find_line_in_file(file: &Path, pattern: &Regex) -> Option<usize> {
    let content = fs::read_to_string(file).ok()?;
    content
        .lines()
        .enumerate()
        .find_map(|(index, line)| pattern.is_match(line).then_some(index + 1))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn write(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("file.php");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_find_array_key_line() {
        let (_dir, path) = write("<?php\n\n$capabilities = [\n    'mod/demo:view' => [\n    ],\n];\n");
        assert_eq!(find_array_key_line(&path, "mod/demo:view"), Some(4));
        assert_eq!(find_array_key_line(&path, "mod/demo:edit"), None);
    }

    #[test]
    fn test_find_array_key_line_either_quote_style() {
        let (_dir, path) = write("<?php\n$x = [\"doublequoted\" => 1];\n");
        assert_eq!(find_array_key_line(&path, "doublequoted"), Some(2));
    }

    #[test]
    fn test_find_array_key_line_handles_slashes() {
        // Keys with / must not need caller-side escaping.
        let (_dir, path) = write("<?php\n$x = ['a/b/c:d' => 1];\n");
        assert_eq!(find_array_key_line(&path, "a/b/c:d"), Some(2));
    }

    #[test]
    fn test_find_array_key_line_returns_first_match() {
        let (_dir, path) = write("<?php\n$x = ['dup' => 1];\n$y = ['dup' => 2];\n");
        assert_eq!(find_array_key_line(&path, "dup"), Some(2));
    }

    #[test]
    fn test_find_string_literal_line_arity_tolerant() {
        let (_dir, path) = write(concat!(
            "<?php\n",
            "echo get_string('two', 'mod_demo');\n",
            "echo get_string( 'three' , 'mod_demo' , $a );\n",
            "echo get_string(\"four\", \"mod_demo\", $a, true);\n",
            "$s = new lang_string('lazy', 'mod_demo');\n",
            "$mform->addHelpButton('element', 'helped', 'mod_demo');\n",
        ));
        assert_eq!(find_string_literal_line(&path, "two"), Some(2));
        assert_eq!(find_string_literal_line(&path, "three"), Some(3));
        assert_eq!(find_string_literal_line(&path, "four"), Some(4));
        assert_eq!(find_string_literal_line(&path, "lazy"), Some(5));
        assert_eq!(find_string_literal_line(&path, "helped"), Some(6));
    }

    #[test]
    fn test_find_string_literal_line_ignores_unrelated_calls() {
        let (_dir, path) = write("<?php\necho other_call('nope', 'mod_demo');\n");
        assert_eq!(find_string_literal_line(&path, "nope"), None);
    }

    #[test]
    fn test_find_line_in_file_custom_pattern() {
        let (_dir, path) = write("<?php\n\nclass post extends \\core_search\\base_mod {\n}\n");
        let pattern = Regex::new(r"extends\s+\\core_search").unwrap();
        assert_eq!(find_line_in_file(&path, &pattern), Some(3));
    }

    #[test]
    fn test_missing_file_returns_none() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("gone.php");
        assert_eq!(find_array_key_line(&missing, "key"), None);
        assert_eq!(find_string_literal_line(&missing, "key"), None);
    }
}
