//! Configuration validation.
//!
//! Checks a [`GeneratorConfig`] before any search runs: tag sets must parse
//! and be free of duplicates, the cascade must stay within [`MAX_STAGES`], the
//! pre-filter candidate count ([`search_size`]) must stay within
//! [`MAX_SEARCH_SIZE`], the load name must not shadow a stage name, and every
//! physical quantity must be positive.
//!
//! The candidate count grows as
//! `|families| * |topologies| * (1 + (|families| - 1) * |topologies|)^(stages - 1)`,
//! so two families with two topologies triple it with every stage.
//!
//! All problems are collected; a single problem is returned as-is, several
//! are wrapped in [`ValidationError::Multiple`].
//!
//! # Example
//!
//! ```rust
//! use filtergen_config::{GeneratorConfig, validate_config};
//!
//! let mut config = GeneratorConfig::default();
//! assert!(validate_config(&config).is_ok());
//!
//! config.families.push("bessel".to_string());
//! assert!(validate_config(&config).is_err());
//! ```

use std::str::FromStr;

use filtergen_core::{FilterFamily, ParseTagError, Topology, search_size};
use thiserror::Error;

use crate::config::GeneratorConfig;

/// Largest cascade the search accepts.
pub const MAX_STAGES: usize = 16;

/// Largest number of topology candidates (before validity filtering) a search may visit.
pub const MAX_SEARCH_SIZE: usize = 1 << 22;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A family or topology tag that is not recognized.
    #[error("unsupported {what} tag '{tag}'")]
    UnsupportedTag {
        /// `"family"` or `"topology"`.
        what: &'static str,
        /// The rejected tag.
        tag: String,
    },

    /// The same tag listed twice (after alias resolution).
    #[error("duplicate {what} '{tag}'")]
    DuplicateTag {
        /// `"family"` or `"topology"`.
        what: &'static str,
        /// The repeated tag as written.
        tag: String,
    },

    /// An empty tag set.
    #[error("no {0} configured")]
    EmptySet(&'static str),

    /// Cascade longer than [`MAX_STAGES`].
    #[error("stages = {stages} exceeds the maximum of {max}")]
    TooManyStages {
        /// Requested stage count.
        stages: usize,
        /// Allowed maximum.
        max: usize,
    },

    /// Family and topology sets that make the search too large.
    #[error("search would visit {candidates} candidates, more than the maximum of {max}")]
    SearchTooLarge {
        /// Candidates before validity filtering.
        candidates: usize,
        /// Allowed maximum.
        max: usize,
    },

    /// Unusable load node name.
    #[error("invalid load name '{name}': {reason}")]
    InvalidLoadName {
        /// The configured name.
        name: String,
        /// Why it cannot be used.
        reason: &'static str,
    },

    /// A physical quantity that is zero, negative, or not finite.
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive {
        /// Field name.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

impl From<ParseTagError> for ValidationError {
    fn from(err: ParseTagError) -> Self {
        ValidationError::UnsupportedTag {
            what: err.what,
            tag: err.tag,
        }
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Parses a tag list, reporting every unknown or repeated entry.
fn parse_tags<T>(tags: &[String], what: &'static str, errors: &mut Vec<ValidationError>) -> Vec<T>
where
    T: FromStr<Err = ParseTagError> + PartialEq,
{
    if tags.is_empty() {
        errors.push(ValidationError::EmptySet(what));
    }
    let mut out: Vec<T> = Vec::with_capacity(tags.len());
    for tag in tags {
        match tag.parse::<T>() {
            Ok(value) if out.contains(&value) => errors.push(ValidationError::DuplicateTag {
                what,
                tag: tag.clone(),
            }),
            Ok(value) => out.push(value),
            Err(e) => errors.push(e.into()),
        }
    }
    out
}

fn finish(mut errors: Vec<ValidationError>) -> ValidationResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

/// Parses and checks the family set.
pub fn parse_families(tags: &[String]) -> ValidationResult<Vec<FilterFamily>> {
    let mut errors = Vec::new();
    let families = parse_tags(tags, "family", &mut errors);
    finish(errors).map(|()| families)
}

/// Parses and checks the topology set.
pub fn parse_topologies(tags: &[String]) -> ValidationResult<Vec<Topology>> {
    let mut errors = Vec::new();
    let topologies = parse_tags(tags, "topology", &mut errors);
    finish(errors).map(|()| topologies)
}

/// Returns `true` if `name` has the `Stage<digits>` shape of a generated stage.
fn is_stage_name(name: &str) -> bool {
    name.strip_prefix("Stage")
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// Validates a whole configuration.
pub fn validate_config(config: &GeneratorConfig) -> ValidationResult<()> {
    let mut errors = Vec::new();

    if config.stages > MAX_STAGES {
        errors.push(ValidationError::TooManyStages {
            stages: config.stages,
            max: MAX_STAGES,
        });
    }

    let name = config.load_name.trim();
    if name.is_empty() {
        errors.push(ValidationError::InvalidLoadName {
            name: config.load_name.clone(),
            reason: "must not be empty",
        });
    } else if is_stage_name(name) {
        errors.push(ValidationError::InvalidLoadName {
            name: config.load_name.clone(),
            reason: "collides with a stage name",
        });
    }

    let families = parse_tags::<FilterFamily>(&config.families, "family", &mut errors);
    let topologies = parse_tags::<Topology>(&config.topologies, "topology", &mut errors);
    if config.stages <= MAX_STAGES {
        let candidates = search_size(families.len(), topologies.len(), config.stages);
        if candidates > MAX_SEARCH_SIZE {
            errors.push(ValidationError::SearchTooLarge {
                candidates,
                max: MAX_SEARCH_SIZE,
            });
        }
    }
    if let Err(e) = config.preferred_family.parse::<FilterFamily>() {
        errors.push(e.into());
    }

    for (field, value) in [
        ("cutoff_hz", config.cutoff_hz),
        ("capacitance", config.capacitance),
        ("feedback_resistance", config.feedback_resistance),
        ("ripple_db", config.ripple_db),
    ] {
        if !(value.is_finite() && value > 0.0) {
            errors.push(ValidationError::NotPositive { field, value });
        }
    }

    finish(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&GeneratorConfig::default()), Ok(()));
    }

    #[test]
    fn unknown_family_is_reported() {
        let result = parse_families(&tags(&["butterworth", "elliptic"]));
        assert_eq!(
            result,
            Err(ValidationError::UnsupportedTag {
                what: "family",
                tag: "elliptic".to_string()
            })
        );
    }

    #[test]
    fn aliases_count_as_duplicates() {
        let result = parse_families(&tags(&["chebyshev", "3dbCheb"]));
        assert!(matches!(result, Err(ValidationError::DuplicateTag { what: "family", .. })));
    }

    #[test]
    fn topology_aliases_parse() {
        assert_eq!(
            parse_topologies(&tags(&["Sallen-Key_LP", "rc"])),
            Ok(vec![Topology::SallenKey, Topology::Rc])
        );
        assert_eq!(parse_topologies(&[]), Err(ValidationError::EmptySet("topology")));
    }

    #[test]
    fn load_name_rules() {
        assert!(is_stage_name("Stage3"));
        assert!(is_stage_name("Stage12"));
        assert!(!is_stage_name("Stage"));
        assert!(!is_stage_name("Stagehand"));
        assert!(!is_stage_name("load"));

        let config = GeneratorConfig {
            load_name: "Stage2".to_string(),
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidLoadName { .. })
        ));
    }

    #[test]
    fn search_size_accounts_for_topologies() {
        let both = GeneratorConfig {
            stages: MAX_STAGES,
            topologies: tags(&["sallen-key", "rc"]),
            ..GeneratorConfig::default()
        };
        assert_eq!(
            validate_config(&both),
            Err(ValidationError::SearchTooLarge {
                candidates: 57_395_628,
                max: MAX_SEARCH_SIZE
            })
        );

        let one = GeneratorConfig {
            stages: MAX_STAGES,
            ..GeneratorConfig::default()
        };
        assert_eq!(validate_config(&one), Ok(()));

        let shorter = GeneratorConfig {
            stages: 12,
            ..both
        };
        assert_eq!(validate_config(&shorter), Ok(()));
    }

    #[test]
    fn several_problems_are_aggregated() {
        let config = GeneratorConfig {
            stages: 40,
            cutoff_hz: -1.0,
            topologies: Vec::new(),
            ..GeneratorConfig::default()
        };
        match validate_config(&config) {
            Err(ValidationError::Multiple(errors)) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.contains(&ValidationError::EmptySet("topology")));
            }
            other => panic!("expected Multiple, got {other:?}"),
        }
    }

    #[test]
    fn multiple_display_joins_messages() {
        let err = ValidationError::Multiple(vec![
            ValidationError::EmptySet("family"),
            ValidationError::NotPositive {
                field: "ripple_db",
                value: 0.0,
            },
        ]);
        assert_eq!(
            err.to_string(),
            "multiple validation errors: no family configured; ripple_db must be positive and finite, got 0"
        );
    }
}
