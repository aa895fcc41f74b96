// Rust guideline compliant 2026-10-17

//! `clean` command.

use super::print_envelope;
use crate::output::render_clean;
use crate::output_mode::is_json_output;
use crate::terminal;
use modrel_app::{clean_prereleases, CleanOptions, ModuleOptions, Result};
use modrel_core::HostingApi;

/// Deletes the pre-releases of a stable release.
///
/// # Errors
///
/// Returns an error if the releases cannot be resolved or output cannot be written.
pub fn execute(
    host: &dyn HostingApi,
    module: &ModuleOptions,
    options: &CleanOptions,
    use_color: bool,
) -> Result<()> {
    let outcome = clean_prereleases(host, module, options)?;
    if is_json_output() {
        return print_envelope(&outcome);
    }

    if !outcome.failures.is_empty() {
        let message = format!("{} pre-release deletion(s) failed", outcome.failures.len());
        terminal::print_warning(&message, use_color);
    }

    let mut out = terminal::stdout(use_color);
    render_clean(&mut out, &outcome)?;
    Ok(())
}
