//! Moodlint - language string validation for Moodle plugins
//!
//! Moodlint statically analyses a plugin directory and reconciles the string
//! keys its declaration files and source code require against the keys its
//! language file declares. It reports missing strings as errors and, on
//! request, unused strings as warnings, without executing any plugin code.
//!
//! ## Module Structure
//!
//! - `bridge`: Host environment facts (target Moodle branch)
//! - `checkers`: Per-surface string requirement checkers
//! - `component`: The plugin component under validation
//! - `config`: Per-run configuration
//! - `context`: Location metadata attached to discovered requirements
//! - `discovery`: Source file discovery and language file resolution
//! - `error`: File-level error types
//! - `error_handler`: Translation of failures into result entries
//! - `finder`: Line lookup helpers for diagnostics
//! - `lang`: Language file parsing
//! - `php`: Lightweight PHP text scanning helpers
//! - `result`: Accumulated outcome of a validation run
//! - `validator`: Orchestration of a full run

pub mod bridge;
pub mod checkers;
pub mod component;
pub mod config;
pub mod context;
pub mod discovery;
pub mod error;
pub mod error_handler;
pub mod finder;
pub mod lang;
pub mod php;
pub mod result;
pub mod validator;

pub use bridge::{HostBridge, StaticBridge};
pub use component::Component;
pub use config::ValidationConfig;
pub use context::StringContext;
pub use result::{Summary, ValidationResult};
pub use validator::{StringValidator, validate};
