//! The plugin component under validation.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use glob::{MatchOptions, Pattern};
use walkdir::WalkDir;

/// A Moodle-style plugin: a frankenstyle identity plus a root directory.
///
/// Immutable for the duration of a validation run.
#[derive(Debug, Clone)]
pub struct Component {
    component: String,
    plugin_type: String,
    name: String,
    root: PathBuf,
}

impl Component {
    pub fn new(component: &str, root: impl Into<PathBuf>) -> Result<Self> {
        let (plugin_type, name) = Self::normalize_component(component)?;
        Ok(Self {
            component: component.to_string(),
            plugin_type,
            name,
            root: root.into(),
        })
    }

    /// Split a frankenstyle name into (type, short name).
    ///
    /// Only the first underscore separates the type: `local_my_plugin` is
    /// `("local", "my_plugin")`.
    pub fn normalize_component(raw: &str) -> Result<(String, String)> {
        match raw.split_once('_') {
            Some((plugin_type, name)) if !plugin_type.is_empty() && !name.is_empty() => {
                Ok((plugin_type.to_string(), name.to_string()))
            }
            _ => bail!("Invalid component name: \"{raw}\" (expected {{type}}_{{name}})"),
        }
    }

    /// Full frankenstyle identity, e.g. `mod_forum`.
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Plugin type, e.g. `mod`.
    pub fn plugin_type(&self) -> &str {
        &self.plugin_type
    }

    /// Short name, e.g. `forum`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a root-relative file.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn has_file(&self, relative: &str) -> bool {
        self.path(relative).is_file()
    }

    /// Files under the root whose root-relative path matches a glob pattern,
    /// in deterministic (sorted) order.
    ///
    /// `*` does not cross directory separators, so `classes/search/*.php`
    /// stays within that directory.
    pub fn files_matching(&self, pattern: &str) -> Vec<PathBuf> {
        let Ok(pattern) = Pattern::new(pattern) else {
            return Vec::new();
        };
        let options = MatchOptions {
            require_literal_separator: true,
            ..MatchOptions::new()
        };

        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .path()
                    .strip_prefix(&self.root)
                    .is_ok_and(|rel| pattern.matches_with(&rel.to_string_lossy(), options))
            })
            .map(|entry| entry.into_path())
            .collect();
        files.sort();
        files
    }

    /// Root-relative display form of a path under this component.
    pub fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_normalize_component() {
        assert_eq!(
            Component::normalize_component("mod_forum").unwrap(),
            ("mod".to_string(), "forum".to_string())
        );
        assert_eq!(
            Component::normalize_component("local_my_plugin").unwrap(),
            ("local".to_string(), "my_plugin".to_string())
        );
        assert!(Component::normalize_component("forum").is_err());
        assert!(Component::normalize_component("_forum").is_err());
        assert!(Component::normalize_component("mod_").is_err());
    }

    #[test]
    fn test_has_file_and_path() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("db")).unwrap();
        File::create(dir.path().join("db").join("access.php")).unwrap();

        let component = Component::new("mod_demo", dir.path()).unwrap();
        assert!(component.has_file("db/access.php"));
        assert!(!component.has_file("db/caches.php"));
        assert_eq!(
            component.path("db/access.php"),
            dir.path().join("db/access.php")
        );
    }

    #[test]
    fn test_files_matching() {
        let dir = tempdir().unwrap();
        let search = dir.path().join("classes").join("search");
        fs::create_dir_all(&search).unwrap();
        File::create(search.join("post.php")).unwrap();
        File::create(search.join("activity.php")).unwrap();
        File::create(dir.path().join("lib.php")).unwrap();

        let component = Component::new("mod_demo", dir.path()).unwrap();
        let matches = component.files_matching("classes/search/*.php");
        assert_eq!(matches.len(), 2);
        assert!(matches[0].ends_with("classes/search/activity.php"));
        assert!(matches[1].ends_with("classes/search/post.php"));
    }

    #[test]
    fn test_files_matching_star_stays_in_directory() {
        let dir = tempdir().unwrap();
        let search = dir.path().join("classes").join("search");
        fs::create_dir_all(search.join("nested")).unwrap();
        File::create(search.join("post.php")).unwrap();
        File::create(search.join("nested").join("deep.php")).unwrap();

        let component = Component::new("mod_demo", dir.path()).unwrap();
        let matches = component.files_matching("classes/search/*.php");
        assert_eq!(matches.len(), 1);
        assert!(matches[0].ends_with("classes/search/post.php"));
    }

    #[test]
    fn test_relative() {
        let dir = tempdir().unwrap();
        let component = Component::new("local_demo", dir.path()).unwrap();
        assert_eq!(
            component.relative(&dir.path().join("db/access.php")),
            "db/access.php"
        );
    }
}
