//! Bridge to the host application the component installs into.
//!
//! Checkers whose applicability depends on host capability consult the
//! bridge instead of probing an installation themselves. Production callers
//! wrap their installation resolver in the trait; tests use [`StaticBridge`].

/// Facts about the host application.
pub trait HostBridge {
    /// Host branch number (two-digit scheme: 31 is 3.1, 45 is 4.5).
    fn branch(&self) -> u32;
}

/// Fixed-branch bridge for tests and offline runs.
#[derive(Debug, Clone, Copy)]
pub struct StaticBridge {
    branch: u32,
}

impl StaticBridge {
    pub fn new(branch: u32) -> Self {
        Self { branch }
    }
}

impl Default for StaticBridge {
    fn default() -> Self {
        // Current stable branch.
        Self::new(45)
    }
}

impl HostBridge for StaticBridge {
    fn branch(&self) -> u32 {
        self.branch
    }
}
