//! Configuration loading and schema definitions
//!
//! Shared configuration types used across all tools.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
