//! Category providers for loading rules from various sources.

pub mod file;

pub use file::{CategoryFormat, FileProvider};
