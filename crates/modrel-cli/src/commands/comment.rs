// Rust guideline compliant 2026-10-17

//! `comment` command.

use super::print_envelope;
use crate::output::render_comment;
use crate::output_mode::is_json_output;
use crate::terminal;
use modrel_app::{comment_release, CommentOptions, ModuleOptions, Result};
use modrel_core::HostingApi;

/// Announces a release on its linked issues.
///
/// # Errors
///
/// Returns an error if the release range cannot be resolved or output cannot be written.
pub fn execute(
    host: &dyn HostingApi,
    module: &ModuleOptions,
    options: &CommentOptions,
    use_color: bool,
) -> Result<()> {
    let outcome = comment_release(host, module, options)?;
    if is_json_output() {
        return print_envelope(&outcome);
    }

    if !outcome.failures.is_empty() {
        let message = format!("{} comment(s) could not be posted", outcome.failures.len());
        terminal::print_warning(&message, use_color);
    }

    let mut out = terminal::stdout(use_color);
    render_comment(&mut out, &outcome, &module.issues_repo)?;
    Ok(())
}
