//! CLI command implementations.

pub mod selection;
pub mod watch;
