//! Mock infrastructure for testing external services
//!
//! This module provides mock servers and test helpers for external
//! dependencies:
//! - Identity service (credential verification)
//! - Upstream generation API (generateContent)
//!
//! All mocks are designed to be reusable across different test files and
//! support various response scenarios (success, errors, edge cases).

pub mod upstream;

pub use identity::*;
pub use upstream::*;
