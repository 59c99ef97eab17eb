//! Pole sources: where a family/order pair gets its pole locations.
//!
//! Section synthesis only needs a capability that, given a family and an
//! order, returns exactly `order` poles in the open left half-plane. All poles
//! are normalized to a 1 rad/s cutoff; the physical cutoff is applied later
//! when component values are computed.
//!
//! Two implementations are provided:
//!
//! - [`AnalyticPoles`] - closed-form Butterworth and Chebyshev type I poles
//! - [`PoleTable`] - explicit per-(family, order) pole lists, for tabulated
//!   designs and tests

use std::collections::HashMap;
use std::f64::consts::PI;

use filtergen_core::FilterFamily;
use num_complex::Complex64;

use crate::error::DesignError;

/// Default passband ripple for equal-ripple designs, in dB.
pub const DEFAULT_RIPPLE_DB: f64 = 3.0;

/// Capability returning normalized low-pass poles for a family and order.
pub trait PoleSource: Send + Sync {
    /// Returns exactly `order` poles with negative real part.
    fn poles(&self, family: FilterFamily, order: u32) -> Result<Vec<Complex64>, DesignError>;
}

/// Closed-form analog prototype poles.
///
/// With `θ_k = π(2k-1)/(2N)` for `k = 1..=N`:
///
/// - Butterworth: `p_k = -sin θ_k + j cos θ_k` (all on the unit circle)
/// - Chebyshev I: `p_k = -sinh μ sin θ_k + j cosh μ cos θ_k`, with
///   `ε = sqrt(10^(ripple/10) - 1)` and `μ = asinh(1/ε) / N`
///
/// The Chebyshev passband edge (gain `-ripple` dB) sits at 1 rad/s.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalyticPoles {
    /// Chebyshev passband ripple in dB.
    pub ripple_db: f64,
}

impl Default for AnalyticPoles {
    fn default() -> Self {
        Self {
            ripple_db: DEFAULT_RIPPLE_DB,
        }
    }
}

impl AnalyticPoles {
    /// Creates a source with the given Chebyshev ripple.
    pub fn with_ripple(ripple_db: f64) -> Self {
        Self { ripple_db }
    }
}

impl PoleSource for AnalyticPoles {
    fn poles(&self, family: FilterFamily, order: u32) -> Result<Vec<Complex64>, DesignError> {
        if order == 0 {
            return Err(DesignError::unsupported(format!(
                "{family} stage of order 0"
            )));
        }
        let n = f64::from(order);
        let angles = (1..=order).map(move |k| PI * (2.0 * f64::from(k) - 1.0) / (2.0 * n));

        let poles = match family {
            FilterFamily::Butterworth => angles
                .map(|theta| Complex64::new(-theta.sin(), theta.cos()))
                .collect(),
            FilterFamily::Chebyshev => {
                if !(self.ripple_db.is_finite() && self.ripple_db > 0.0) {
                    return Err(DesignError::unsupported(format!(
                        "chebyshev ripple must be positive, got {} dB",
                        self.ripple_db
                    )));
                }
                let eps = (10f64.powf(self.ripple_db / 10.0) - 1.0).sqrt();
                let mu = (1.0 / eps).asinh() / n;
                angles
                    .map(|theta| Complex64::new(-mu.sinh() * theta.sin(), mu.cosh() * theta.cos()))
                    .collect()
            }
        };
        Ok(poles)
    }
}

/// Tabulated poles keyed by family and order.
#[derive(Clone, Debug, Default)]
pub struct PoleTable {
    entries: HashMap<(FilterFamily, u32), Vec<Complex64>>,
}

impl PoleTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the poles for a family/order pair.
    pub fn insert(&mut self, family: FilterFamily, order: u32, poles: Vec<Complex64>) {
        self.entries.insert((family, order), poles);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, family: FilterFamily, order: u32, poles: Vec<Complex64>) -> Self {
        self.insert(family, order, poles);
        self
    }
}

impl PoleSource for PoleTable {
    fn poles(&self, family: FilterFamily, order: u32) -> Result<Vec<Complex64>, DesignError> {
        let poles = self.entries.get(&(family, order)).ok_or_else(|| {
            DesignError::unsupported(format!("no tabulated poles for {family} order {order}"))
        })?;
        if poles.len() != order as usize {
            return Err(DesignError::inconsistent(format!(
                "{family} order {order} table holds {} poles",
                poles.len()
            )));
        }
        Ok(poles.clone())
    }
}
