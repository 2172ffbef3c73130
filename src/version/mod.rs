//! Version selection layer
//!
//! This module picks, from an ordered list of candidate versions, the one
//! version that satisfies a user-declared rule.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Filter    │────▶│  Strategy   │────▶│  Matchers   │
//! │ (validate)  │     │ (dispatch)  │     │(latest,regex│
//! └─────────────┘     └─────────────┘     │   semver)   │
//!                                         └─────────────┘
//!                                                │
//!                                                ▼
//!                                         ┌─────────────┐
//!                                         │   Semver    │
//!                                         │(constraints)│
//!                                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`filter`]: User-facing filter configuration and search entry point
//! - [`matcher`]: Matching trait and the closed set of strategies
//! - [`matchers`]: Latest, regex and semver implementations
//! - [`semver`]: Lenient version parsing and constraint evaluation
//! - [`error`]: Error types for filter operations
//! - [`types`]: Common types like `FoundVersion` and `VersionKind`

pub mod error;
pub mod filter;
pub mod matcher;
pub mod matchers;
pub mod semver;
pub mod types;
