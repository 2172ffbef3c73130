pub mod config;
pub mod logging;
pub mod version;

pub use version::error::FilterError;
pub use version::filter::Filter;
pub use version::types::{CandidateOrder, FoundVersion, VersionKind};
