//! Configuration for the filtergen candidate search.
//!
//! A single TOML file describes the search (cascade length, family and
//! topology sets, validity rule) and the design parameters used to compute
//! component values (cutoff, capacitance, gain resistor, Chebyshev ripple).
//!
//! # Example
//!
//! ```rust
//! use filtergen_config::GeneratorConfig;
//!
//! let config = GeneratorConfig::from_toml(r#"
//!     stages = 3
//!     families = ["butterworth"]
//! "#).unwrap();
//!
//! let spec = config.generator_spec().unwrap();
//! assert_eq!(spec.stages, 3);
//! assert_eq!(config.design_params().cutoff_hz, 1000.0);
//! ```

mod config;
mod error;

/// Platform-specific paths for configuration files.
pub mod paths;

/// Configuration validation.
pub mod validation;

pub use config::GeneratorConfig;
pub use error::ConfigError;
pub use paths::{
    CONFIG_FILE_NAME, default_config_path, ensure_user_config_dir, find_config, user_config_dir,
};
pub use validation::{
    MAX_SEARCH_SIZE, MAX_STAGES, ValidationError, ValidationResult, validate_config,
};
