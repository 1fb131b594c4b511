//! Library components of the refund triage CLI.

pub mod logging;
pub mod pipeline;
pub mod summary;
