// Rust guideline compliant 2026-10-17

//! `check` command.

use super::print_envelope;
use crate::output::render_check;
use crate::output_mode::is_json_output;
use crate::terminal;
use modrel_app::{run_check, ModuleOptions, Result};
use modrel_core::HostingApi;

/// Reports whether the module is ready to be released.
///
/// # Errors
///
/// Returns an error if the check fails or output cannot be written.
pub fn execute(host: &dyn HostingApi, module: &ModuleOptions, use_color: bool) -> Result<()> {
    let response = run_check(host, module)?;
    if is_json_output() {
        return print_envelope(&response);
    }

    let mut out = terminal::stdout(use_color);
    render_check(&mut out, &response, &module.links())?;
    Ok(())
}
