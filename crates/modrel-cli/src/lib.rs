// Rust guideline compliant 2026-10-17

//! modrel CLI library.
//!
//! Exposes the command implementations, the `gh`-backed hosting adapter and
//! the terminal rendering for use by the binary and its tests.

pub mod commands;
pub mod gh;
pub mod logging;
pub mod output;
pub mod output_mode;
pub mod terminal;

pub use gh::GhCli;
pub use terminal::should_use_color;
