//! shtidy-core
//!
//! Core library for refactoring and auditing the shell-script tree of a
//! ServerSentry checkout.
//!
//! This crate holds the text-level scanners (`scan`), the pure rewrites
//! (`transform`), the file-level drivers with backup handling (`services`),
//! and the read-only tree audit (`audit`).
//!
//! All substantive logic lives here so it is fully testable and reusable
//! from multiple frontends; the CLI only parses arguments and prints.

pub mod audit;
pub mod config;
pub mod discovery;
pub mod error;
pub mod model;
pub mod scan;
pub mod services;
pub mod transform;

pub use error::{TidyError, TidyResult};

/// Returns the library version as encoded at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
