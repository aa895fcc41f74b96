// Rust guideline compliant 2026-10-17

//! Process-wide output mode of the CLI.
//!
//! Set once from the command line before dispatch; workflows never read it.

use std::sync::atomic::{AtomicBool, Ordering};

static JSON_OUTPUT: AtomicBool = AtomicBool::new(false);

/// Selects JSON envelopes instead of text output.
pub fn set_json_output(enabled: bool) {
    JSON_OUTPUT.store(enabled, Ordering::Relaxed);
}

/// Returns whether JSON envelopes are printed.
pub fn is_json_output() -> bool {
    JSON_OUTPUT.load(Ordering::Relaxed)
}
