// Rust guideline compliant 2026-10-17

//! Command implementations for the modrel CLI.

pub mod check;
pub mod clean;
pub mod comment;
pub mod create;

use crate::output::print_json;
use modrel_app::{Result, SuccessEnvelope};
use modrel_core::Error as CoreError;
use serde::Serialize;

/// Prints a workflow result inside the success envelope.
pub(crate) fn print_envelope<T: Serialize>(result: T) -> Result<()> {
    print_json(&SuccessEnvelope::new(result)).map_err(CoreError::from)?;
    Ok(())
}
