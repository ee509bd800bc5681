//! Echo Agent
//!
//! A minimal A2A agent exposing a single echo skill behind an optional
//! shared-secret API key.

pub mod a2a;
pub mod config;
pub mod logging;

#[cfg(test)]
mod tests;

/// Crate version, advertised on the agent card.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
