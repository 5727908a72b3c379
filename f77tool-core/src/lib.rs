//! Embeddable core library for the f77 tool.
//!
//! Provides a clap-free entry point suitable for linking into a build
//! orchestrator or other host process.
//!
//! # Ports
//!
//! The domain reaches its collaborators through the traits in
//! [`f77tool_domain::ports`]. This crate supplies default implementations:
//! - [`Environment`](env::Environment): construction variables plus the two
//!   object builders ([`BuilderTable`](env::BuilderTable))
//! - [`WhichDetector`](adapters::WhichDetector) /
//!   [`StaticDetector`](adapters::StaticDetector): compiler probes
//! - [`PlatformCaseSensitivity`](adapters::PlatformCaseSensitivity),
//!   [`ProbeCaseSensitivity`](adapters::ProbeCaseSensitivity),
//!   [`FixedCaseSensitivity`](adapters::FixedCaseSensitivity)
//!
//! # Entry points
//!
//! - [`run_generate`](pipeline::run_generate): configure a fresh environment and report on it
//! - [`run_exists`](pipeline::run_exists): applicability probe
//! - [`run_suffixes`](pipeline::run_suffixes): classification only

pub mod adapters;
pub mod env;
pub mod pipeline;
pub mod settings;
mod subst;

pub use env::{BuilderTable, Environment};

// Re-export the domain entry points so embedders don't need f77tool-domain directly.
pub use f77tool_domain::{F77Tool, GenerateOutcome, ToolError};
