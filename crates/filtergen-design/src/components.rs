//! Component value formulas for the supported section circuits.
//!
//! All formulas are pure functions of a section's frequency scale, the global
//! cutoff, its quality factor, and the baseline capacitance.
//!
//! # Buffered RC low-pass (first order)
//!
//! ```text
//! f0 = scale * fc
//! R1 = 1 / (2π C f0),  C1 = C
//! ```
//!
//! # Equal-capacitor Sallen-Key low-pass (second order)
//!
//! ```text
//! f0 = scale * fc
//! R1 = R2 = 1 / (2π C f0),  C1 = C2 = C
//! K  = 3 - 1/Q  = 1 + R3/R4
//! R4 = feedback resistance,  R3 = R4 / (K - 1)
//! ```
//!
//! The equal-C form needs `K > 1`, i.e. `Q > 0.5`.

use std::f64::consts::PI;
use std::fmt;

use crate::error::DesignError;

/// Default design cutoff in Hz.
pub const DEFAULT_CUTOFF_HZ: f64 = 1000.0;

/// Default baseline capacitance in farads (10 nF).
pub const DEFAULT_CAPACITANCE: f64 = 10e-9;

/// Default Sallen-Key gain-setting resistor R4 in ohms.
pub const DEFAULT_FEEDBACK_RESISTANCE: f64 = 1000.0;

/// Global design parameters shared by every section of every candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DesignParams {
    /// Cutoff frequency in Hz.
    pub cutoff_hz: f64,
    /// Baseline capacitance in farads.
    pub capacitance: f64,
    /// Sallen-Key R4 in ohms.
    pub feedback_resistance: f64,
}

impl Default for DesignParams {
    fn default() -> Self {
        Self {
            cutoff_hz: DEFAULT_CUTOFF_HZ,
            capacitance: DEFAULT_CAPACITANCE,
            feedback_resistance: DEFAULT_FEEDBACK_RESISTANCE,
        }
    }
}

impl DesignParams {
    /// Creates parameters with the default feedback resistance.
    pub fn new(cutoff_hz: f64, capacitance: f64) -> Self {
        Self {
            cutoff_hz,
            capacitance,
            ..Self::default()
        }
    }

    /// Checks that every parameter is finite and positive.
    pub fn validate(&self) -> Result<(), DesignError> {
        for (name, value) in [
            ("cutoff_hz", self.cutoff_hz),
            ("capacitance", self.capacitance),
            ("feedback_resistance", self.feedback_resistance),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(DesignError::unsupported(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Component role → value, in the order the circuit declares them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComponentValues {
    entries: Vec<(&'static str, f64)>,
}

impl ComponentValues {
    /// Creates an empty value set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a role's value, replacing an existing entry in place.
    pub fn set(&mut self, role: &'static str, value: f64) {
        match self.entries.iter_mut().find(|(r, _)| *r == role) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((role, value)),
        }
    }

    /// Value of a role.
    pub fn get(&self, role: &str) -> Option<f64> {
        self.entries.iter().find(|(r, _)| *r == role).map(|(_, v)| *v)
    }

    /// Roles and values in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no component is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for ComponentValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (role, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{role}={value:.6e}")?;
        }
        Ok(())
    }
}

/// Resistance that puts an RC corner at `f0` with capacitance `c`.
#[inline]
fn rc_resistance(f0: f64, c: f64) -> f64 {
    1.0 / (2.0 * PI * c * f0)
}

/// Buffered single-pole RC values for a section at `scale × cutoff_hz`.
pub fn rc_lowpass(scale: f64, params: &DesignParams) -> ComponentValues {
    let f0 = scale * params.cutoff_hz;
    let mut values = ComponentValues::new();
    values.set("R1", rc_resistance(f0, params.capacitance));
    values.set("C1", params.capacitance);
    values
}

/// Equal-capacitor Sallen-Key values for a biquad at `scale × cutoff_hz` with quality `q`.
///
/// # Errors
///
/// [`DesignError::UnsupportedConfiguration`] if `q <= 0.5` or is not finite
/// (the equal-C form would need a gain of 1 or less).
pub fn sallen_key_equal_c(
    scale: f64,
    q: f64,
    params: &DesignParams,
) -> Result<ComponentValues, DesignError> {
    if !(q.is_finite() && q > 0.5) {
        return Err(DesignError::unsupported(format!(
            "equal-capacitor sallen-key needs Q > 0.5, got {q}"
        )));
    }
    let f0 = scale * params.cutoff_hz;
    let r = rc_resistance(f0, params.capacitance);
    let k = 3.0 - 1.0 / q;
    let r4 = params.feedback_resistance;
    let r3 = r4 / (k - 1.0);

    let mut values = ComponentValues::new();
    values.set("R1", r);
    values.set("R2", r);
    values.set("R3", r3);
    values.set("R4", r4);
    values.set("C1", params.capacitance);
    values.set("C2", params.capacitance);
    Ok(values)
}
