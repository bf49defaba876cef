//! Translation of raised failures into result entries.
//!
//! Failures are caught at the narrowest boundary that can describe them and
//! converted into [`ValidationResult`] entries; they never propagate as
//! errors past the orchestrator loop. Each call site picks the severity and
//! whether the run continues.

use anyhow::Error;

use crate::result::ValidationResult;

#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorHandler {
    debug: bool,
}

impl ErrorHandler {
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    /// Record a file-level failure.
    ///
    /// Fatal failures become errors, non-fatal ones warnings. The `message`
    /// describes the site ("Unable to load language file ..."); the cause is
    /// appended, with the full chain in debug mode.
    pub fn handle_file_error(
        &self,
        result: &mut ValidationResult,
        message: &str,
        err: &Error,
        fatal: bool,
    ) {
        let text = self.describe(message, err);
        if fatal {
            result.add_error(text);
        } else {
            result.add_warning(text);
        }
    }

    /// Record a checker failure.
    ///
    /// With `continue_run` the failure is downgraded to a warning and the
    /// orchestrator moves on to the next checker; otherwise it is an error
    /// and the checker's contribution is dropped.
    pub fn handle_checker_error(
        &self,
        result: &mut ValidationResult,
        checker: &str,
        err: &Error,
        continue_run: bool,
    ) {
        if continue_run {
            let text = self.describe(
                &format!("Checker {checker} failed, validation continues"),
                err,
            );
            result.add_warning(text);
        } else {
            let text = self.describe(&format!("Checker {checker} failed"), err);
            result.add_error(text);
        }
    }

    fn describe(&self, message: &str, err: &Error) -> String {
        if self.debug {
            // Chain format surfaces the root cause for diagnosis.
            format!("{message}: {err:#}")
        } else {
            format!("{message}: {err}")
        }
    }
}
