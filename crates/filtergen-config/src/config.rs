//! Generator configuration file format.

use serde::{Deserialize, Serialize};
use std::path::Path;

use filtergen_core::{DEFAULT_LOAD_NAME, FilterFamily, GeneratorSpec, Topology, ValidityRule};
use filtergen_design::{
    AnalyticPoles, DEFAULT_CAPACITANCE, DEFAULT_CUTOFF_HZ, DEFAULT_FEEDBACK_RESISTANCE,
    DEFAULT_RIPPLE_DB, DesignParams,
};

use crate::error::ConfigError;
use crate::validation::{parse_families, parse_topologies, validate_config};

/// Search and design settings.
///
/// Tags are kept as written so that validation can report unknown or repeated
/// entries by their original spelling. Every field has a default, so an empty
/// file is a valid configuration.
///
/// # TOML Format
///
/// ```toml
/// stages = 8
/// load_name = "load"
/// families = ["butterworth", "chebyshev"]
/// topologies = ["sallen-key"]
/// preferred_family = "butterworth"
/// min_order_non_preferred = 2
/// cutoff_hz = 1000.0
/// capacitance = 1e-8
/// feedback_resistance = 1000.0
/// ripple_db = 3.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// First-order stages in the initial cascade.
    pub stages: usize,
    /// Name of the load node.
    pub load_name: String,
    /// Family tags, in enumeration order.
    pub families: Vec<String>,
    /// Topology tags, in enumeration order.
    pub topologies: Vec<String>,
    /// Family accepted at any order by the validity filter.
    pub preferred_family: String,
    /// Minimum order for stages of any other family.
    pub min_order_non_preferred: u32,
    /// Design cutoff in Hz.
    pub cutoff_hz: f64,
    /// Baseline capacitance in farads.
    pub capacitance: f64,
    /// Sallen-Key gain resistor R4 in ohms.
    pub feedback_resistance: f64,
    /// Chebyshev passband ripple in dB.
    pub ripple_db: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            stages: 8,
            load_name: DEFAULT_LOAD_NAME.to_string(),
            families: FilterFamily::ALL.iter().map(|f| f.tag().to_string()).collect(),
            topologies: vec![Topology::SallenKey.tag().to_string()],
            preferred_family: FilterFamily::Butterworth.tag().to_string(),
            min_order_non_preferred: filtergen_core::DEFAULT_MIN_ORDER_NON_PREFERRED,
            cutoff_hz: DEFAULT_CUTOFF_HZ,
            capacitance: DEFAULT_CAPACITANCE,
            feedback_resistance: DEFAULT_FEEDBACK_RESISTANCE,
            ripple_db: DEFAULT_RIPPLE_DB,
        }
    }
}

impl GeneratorConfig {
    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the configuration to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field; see [`validate_config`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        Ok(validate_config(self)?)
    }

    /// Search parameters for `filtergen_core::generate`.
    pub fn generator_spec(&self) -> Result<GeneratorSpec, ConfigError> {
        self.validate()?;
        let preferred = self
            .preferred_family
            .parse::<FilterFamily>()
            .map_err(crate::ValidationError::from)?;
        Ok(GeneratorSpec::new(self.stages)
            .with_load_name(self.load_name.trim())
            .with_families(parse_families(&self.families)?)
            .with_topologies(parse_topologies(&self.topologies)?)
            .with_validity(ValidityRule::new(preferred, self.min_order_non_preferred)))
    }

    /// Component-value parameters.
    pub fn design_params(&self) -> DesignParams {
        DesignParams {
            cutoff_hz: self.cutoff_hz,
            capacitance: self.capacitance,
            feedback_resistance: self.feedback_resistance,
        }
    }

    /// Closed-form pole source using the configured ripple.
    pub fn pole_source(&self) -> AnalyticPoles {
        AnalyticPoles::with_ripple(self.ripple_db)
    }
}
