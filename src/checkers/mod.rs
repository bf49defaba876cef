//! String requirement checkers.
//!
//! Each checker inspects one declaration surface of a component and reports
//! the language strings that surface obligates the component to declare.
//! Checkers are independent: they never see each other's results, and a
//! parse problem with a checker's own target file is recorded inside its own
//! result rather than raised to the orchestrator.
//!
//! ## Module Structure
//!
//! - `capabilities`: permission declarations (`db/access.php`)
//! - `caches`: cache definitions (`db/caches.php`)
//! - `exception`: exception/error-raising calls in source text
//! - `gradeitem`: grade item mappings (`classes/grades/gradeitems.php`)
//! - `messages`: message providers (`db/messages.php`)
//! - `mobile`: mobile app addons (`db/mobile.php`)
//! - `privacy`: privacy providers (`classes/privacy/provider.php`)
//! - `search`: search areas (`classes/search/`)
//! - `subplugins`: subplugin types (`db/subplugins.json` / `.php`)
//! - `tags`: tag areas (`db/tag.php`)

pub mod capabilities;
pub mod caches;
pub mod exception;
pub mod gradeitem;
pub mod messages;
pub mod mobile;
pub mod privacy;
pub mod search;
pub mod subplugins;
pub mod tags;

use std::fs;

use anyhow::Result;

use crate::{bridge::HostBridge, component::Component, result::ValidationResult};

pub use capabilities::CapabilitiesChecker;
pub use caches::CachesChecker;
pub use exception::ExceptionChecker;
pub use gradeitem::GradeItemChecker;
pub use messages::MessagesChecker;
pub use mobile::MobileChecker;
pub use privacy::PrivacyProviderChecker;
pub use search::SearchAreaChecker;
pub use subplugins::SubpluginsChecker;
pub use tags::TagsChecker;

/// One independent scanning strategy over a component.
pub trait Checker {
    /// Human-readable label used in diagnostics.
    fn name(&self) -> &str;

    /// Whether this component has anything for this checker to inspect.
    /// A pure existence/content probe; no side effects.
    fn applies_to(&self, component: &Component) -> bool;

    /// Scan the target files and report the strings they require.
    ///
    /// Parse failures of the checker's own files are recorded inside the
    /// returned result; `Err` is reserved for unexpected internal failures,
    /// which the orchestrator isolates.
    fn check(&self, component: &Component) -> Result<ValidationResult>;
}

/// The built-in checkers, in their fixed execution order.
pub fn builtin_checkers(bridge: &dyn HostBridge) -> Vec<Box<dyn Checker>> {
    vec![
        Box::new(CapabilitiesChecker),
        Box::new(CachesChecker),
        Box::new(MessagesChecker),
        Box::new(MobileChecker::new(bridge.branch())),
        Box::new(SubpluginsChecker),
        Box::new(TagsChecker),
        Box::new(ExceptionChecker),
        Box::new(GradeItemChecker),
        Box::new(PrivacyProviderChecker),
        Box::new(SearchAreaChecker),
    ]
}

/// Look up a single checker by its registry identifier.
pub fn checker_by_name(name: &str, bridge: &dyn HostBridge) -> Option<Box<dyn Checker>> {
    match name {
        "capabilities" => Some(Box::new(CapabilitiesChecker)),
        "caches" => Some(Box::new(CachesChecker)),
        "messages" => Some(Box::new(MessagesChecker)),
        "mobile" => Some(Box::new(MobileChecker::new(bridge.branch()))),
        "subplugins" => Some(Box::new(SubpluginsChecker)),
        "tags" => Some(Box::new(TagsChecker)),
        "exception" => Some(Box::new(ExceptionChecker)),
        "gradeitem" => Some(Box::new(GradeItemChecker)),
        "privacyprovider" => Some(Box::new(PrivacyProviderChecker)),
        "searcharea" => Some(Box::new(SearchAreaChecker)),
        _ => None,
    }
}

/// Read a checker's target file, recording a read failure as a warning in
/// the checker's own result.
pub(crate) fn read_target(
    component: &Component,
    relative: &str,
    result: &mut ValidationResult,
) -> Option<String> {
    match fs::read_to_string(component.path(relative)) {
        Ok(content) => Some(content),
        Err(err) => {
            result.add_warning(format!("Unable to read {relative}: {err}"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::bridge::StaticBridge;

    use super::*;

    #[test]
    fn test_builtin_checker_names_are_registered() {
        let bridge = StaticBridge::default();
        for checker in builtin_checkers(&bridge) {
            let found = checker_by_name(checker.name(), &bridge);
            assert!(found.is_some(), "unregistered checker: {}", checker.name());
            assert_eq!(found.unwrap().name(), checker.name());
        }
    }

    #[test]
    fn test_unknown_checker_name() {
        assert!(checker_by_name("nonsense", &StaticBridge::default()).is_none());
    }
}
