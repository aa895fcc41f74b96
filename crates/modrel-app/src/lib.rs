// Rust guideline compliant 2026-10-16

//! Release workflows for modrel.
//!
//! This crate provides the non-CLI-specific command workflows (create,
//! check, comment, clean) over an injected hosting platform, explicit option
//! structs, stable error codes and standardized response envelopes.

pub mod check;
pub mod clean;
pub mod comment;
pub mod create;
pub mod error;
pub mod options;
pub mod response;

pub use check::{run_check, CheckResponse};
pub use clean::{clean_prereleases, CleanOutcome, DeleteFailure};
pub use comment::{comment_release, CommentFailure, CommentOutcome, PostedComment};
pub use create::{create_release, CreateOutcome};
pub use error::{AppError, ErrorCode, Result};
pub use options::{CleanOptions, CommentOptions, CreateOptions, ModuleOptions};
pub use response::{ErrorEnvelope, SuccessEnvelope};
