//! CLI command implementations

pub mod analyze;
pub mod clusters;
pub mod history;
