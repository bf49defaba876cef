//! Declared language file loading.
//!
//! Language files are PHP scripts containing only `$string['key'] = '...';`
//! assignments. They are read line by line, never executed.

use std::{collections::BTreeMap, fs, path::Path, sync::LazyLock};

use regex::Regex;

use crate::error::CheckError;

static STRING_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*\$string\[\s*['"]([^'"]+)['"]\s*\]\s*=\s*(.*?);?\s*$"#)
        .expect("static pattern compiles")
});

/// One declared string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LangString {
    pub value: String,
    pub line: usize,
}

/// All strings declared by a component for one language.
#[derive(Debug, Clone)]
pub struct LangFile {
    pub language: String,
    pub strings: BTreeMap<String, LangString>,
}

impl LangFile {
    pub fn contains_key(&self, key: &str) -> bool {
        self.strings.contains_key(key)
    }
}

/// Parse a language file.
///
/// Fails when the file is absent, unreadable, or not a PHP script; malformed
/// individual lines are skipped (values are display text, only keys matter).
pub fn parse_lang_file(path: &Path, language: &str) -> Result<LangFile, CheckError> {
    if !path.is_file() {
        return Err(CheckError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path).map_err(|source| CheckError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    if !content.trim_start().starts_with("<?php") {
        return Err(CheckError::malformed(path, "missing PHP open tag"));
    }

    let mut strings = BTreeMap::new();
    for (index, line) in content.lines().enumerate() {
        if let Some(captures) = STRING_ASSIGNMENT.captures(line) {
            let key = captures[1].to_string();
            let value = unquote(captures[2].trim());
            strings.insert(
                key,
                LangString {
                    value,
                    line: index + 1,
                },
            );
        }
    }

    Ok(LangFile {
        language: language.to_string(),
        strings,
    })
}

/// Strip one layer of matching quotes, best effort.
fn unquote(raw: &str) -> String {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'\'' || bytes[0] == b'"')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        raw[1..raw.len() - 1].to_string()
    } else {
        raw.to_string()
    }
}
