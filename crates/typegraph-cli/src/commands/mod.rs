//! CLI command implementations

pub mod analyze;
pub mod completions;
pub mod config;
pub mod edge;
pub mod io;
pub mod node;
pub mod path;
pub mod query;
