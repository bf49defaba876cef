//! Source file discovery and language file resolution.

use std::path::PathBuf;

use walkdir::WalkDir;

use crate::component::Component;

/// Third-party library subpaths skipped during source scans.
pub const THIRD_PARTY_PATHS: &[&str] = &["vendor", "node_modules", "amd/build", "thirdparty"];

/// The component's own PHP source files, minus third-party subpaths, in
/// deterministic (sorted) order.
pub fn source_files(component: &Component) -> Vec<PathBuf> {
    let root = component.root();
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .is_ok_and(|rel| !is_third_party(&rel.to_string_lossy()))
        })
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().and_then(|e| e.to_str()) == Some("php"))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

fn is_third_party(relative: &str) -> bool {
    THIRD_PARTY_PATHS
        .iter()
        .any(|prefix| relative == *prefix || relative.starts_with(&format!("{prefix}/")))
}

/// Path of the declared language file for a language code.
///
/// Activity modules declare strings under the bare module name
/// (`lang/en/forum.php`); every other plugin type uses the full frankenstyle
/// name (`lang/en/local_demo.php`).
pub fn lang_file_path(component: &Component, language: &str) -> PathBuf {
    let filename = if component.plugin_type() == "mod" {
        format!("{}.php", component.name())
    } else {
        format!("{}.php", component.component())
    };
    component.path(&format!("lang/{language}/{filename}"))
}

/// Root-relative display form of the language file path.
pub fn lang_file_relative(component: &Component, language: &str) -> String {
    component.relative(&lang_file_path(component, language))
}
