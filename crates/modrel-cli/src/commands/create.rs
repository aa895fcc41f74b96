// Rust guideline compliant 2026-10-17

//! `create` command.

use super::print_envelope;
use crate::output::render_create;
use crate::output_mode::is_json_output;
use crate::terminal;
use modrel_app::{create_release, CreateOptions, ModuleOptions, Result};
use modrel_core::HostingApi;

/// Creates a release of the module.
///
/// # Arguments
///
/// * `host` - Hosting platform
/// * `module` - Shared module options
/// * `options` - Flags of the command
/// * `use_color` - Whether text output is colored
///
/// # Errors
///
/// Returns an error if the release cannot be created or output cannot be written.
pub fn execute(
    host: &dyn HostingApi,
    module: &ModuleOptions,
    options: &CreateOptions,
    use_color: bool,
) -> Result<()> {
    let outcome = create_release(host, module, options)?;
    if is_json_output() {
        return print_envelope(&outcome);
    }

    let mut out = terminal::stdout(use_color);
    render_create(&mut out, &outcome)?;
    Ok(())
}
