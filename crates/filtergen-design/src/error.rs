//! Error types for section synthesis and candidate realization.

use thiserror::Error;

/// Errors raised while turning a candidate into sections and component values.
///
/// Each error ends the realization of one candidate only; sibling candidates
/// own independent graphs and are unaffected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DesignError {
    /// A stage asks for a family, topology, or order the synthesizer cannot realize.
    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(String),

    /// The pole source returned data that cannot be paired into sections.
    #[error("pole data inconsistent: {0}")]
    PoleDataInconsistent(String),
}

impl DesignError {
    /// Create an unsupported-configuration error.
    pub fn unsupported(reason: impl Into<String>) -> Self {
        DesignError::UnsupportedConfiguration(reason.into())
    }

    /// Create a pole-data error.
    pub fn inconsistent(reason: impl Into<String>) -> Self {
        DesignError::PoleDataInconsistent(reason.into())
    }
}
