//! Section synthesis: pairs poles into first- and second-order sections.
//!
//! A stage of order `N` is realized as a cascade of biquads (one per
//! complex-conjugate pole pair) and at most one first-order section (the real
//! pole of an odd-order design). Each section carries a normalized frequency
//! scale and, for biquads, a quality factor:
//!
//! ```text
//! real pole p:        scale = |Re(p)|,  Q = None
//! conjugate pair p:   scale = |p|,      Q = |p| / (-2 Re(p))
//! ```
//!
//! Sections are returned biquads first in ascending Q, then the first-order
//! remainder. That order fixes the stage order of the emitted circuit.

use filtergen_core::FilterFamily;
use num_complex::Complex64;

use crate::error::DesignError;
use crate::poles::PoleSource;

/// Imaginary parts below this magnitude mark a pole as real.
pub const REAL_POLE_TOLERANCE: f64 = 1e-12;

/// One factor of a stage's transfer function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Section {
    /// Natural frequency relative to the design cutoff (1.0 = at cutoff).
    pub scale: f64,
    /// Quality factor; `None` for a first-order (real-pole) section.
    pub q: Option<f64>,
}

impl Section {
    /// A first-order section at `scale`.
    pub fn first_order(scale: f64) -> Self {
        Self { scale, q: None }
    }

    /// A biquad at `scale` with quality factor `q`.
    pub fn biquad(scale: f64, q: f64) -> Self {
        Self { scale, q: Some(q) }
    }

    /// Returns `true` for a second-order section.
    #[inline]
    pub fn is_biquad(&self) -> bool {
        self.q.is_some()
    }

    /// Poles contributed by this section (1 or 2).
    #[inline]
    pub fn order(&self) -> u32 {
        if self.is_biquad() { 2 } else { 1 }
    }

    /// Physical natural frequency in Hz for a design cutoff of `cutoff_hz`.
    #[inline]
    pub fn frequency_hz(&self, cutoff_hz: f64) -> f64 {
        self.scale * cutoff_hz
    }
}

/// Pairs `poles` into sections and orders them.
///
/// Every unconsumed pole is visited in input order. A pole whose imaginary
/// part is within [`REAL_POLE_TOLERANCE`] becomes a first-order section.
/// Otherwise its partner is the unconsumed pole nearest to its conjugate,
/// which tolerates pole-finder noise that breaks exact symmetry.
///
/// # Errors
///
/// [`DesignError::PoleDataInconsistent`] if a pole is not strictly in the left
/// half-plane or is not finite, if a complex pole has no unconsumed partner,
/// or if the nearest partner is itself real or on the same side of the real
/// axis.
pub fn sections_from_poles(poles: &[Complex64]) -> Result<Vec<Section>, DesignError> {
    if let Some(p) = poles.iter().find(|p| !(p.re.is_finite() && p.im.is_finite())) {
        return Err(DesignError::inconsistent(format!("non-finite pole {p}")));
    }
    if let Some(p) = poles.iter().find(|p| p.re >= 0.0) {
        return Err(DesignError::inconsistent(format!(
            "pole {p} is not in the left half-plane"
        )));
    }

    let mut used = vec![false; poles.len()];
    let mut biquads = Vec::new();
    let mut first_order = Vec::new();

    for (i, &pole) in poles.iter().enumerate() {
        if used[i] {
            continue;
        }
        used[i] = true;

        if pole.im.abs() < REAL_POLE_TOLERANCE {
            first_order.push(Section::first_order(pole.re.abs()));
            continue;
        }

        let target = pole.conj();
        let partner = (0..poles.len())
            .filter(|&j| !used[j])
            .min_by(|&a, &b| {
                let da = (poles[a] - target).norm();
                let db = (poles[b] - target).norm();
                da.total_cmp(&db)
            })
            .ok_or_else(|| DesignError::inconsistent(format!("complex pole {pole} has no conjugate partner")))?;

        let q_pole = poles[partner];
        if q_pole.im.abs() < REAL_POLE_TOLERANCE || q_pole.im.signum() == pole.im.signum() {
            return Err(DesignError::inconsistent(format!(
                "nearest partner {q_pole} of {pole} is not a conjugate"
            )));
        }
        used[partner] = true;

        let w0 = pole.norm();
        let q = w0 / (-2.0 * pole.re);
        biquads.push(Section::biquad(w0, q));
    }

    if first_order.len() > 1 {
        tracing::debug!(
            real_poles = first_order.len(),
            "more than one real pole; emitting each as a first-order section"
        );
    }

    biquads.sort_by(|a, b| {
        let qa = a.q.unwrap_or(f64::INFINITY);
        let qb = b.q.unwrap_or(f64::INFINITY);
        qa.total_cmp(&qb)
    });
    biquads.extend(first_order);
    Ok(biquads)
}

/// Obtains the poles for `family`/`order` from `source` and pairs them into sections.
///
/// # Errors
///
/// Propagates the source's errors, rejects a source that returns the wrong
/// number of poles, and propagates pairing failures from [`sections_from_poles`].
pub fn synthesize_sections(
    source: &dyn PoleSource,
    family: FilterFamily,
    order: u32,
) -> Result<Vec<Section>, DesignError> {
    let poles = source.poles(family, order)?;
    if poles.len() != order as usize {
        return Err(DesignError::inconsistent(format!(
            "{family} order {order}: source returned {} poles",
            poles.len()
        )));
    }
    let sections = sections_from_poles(&poles)?;
    tracing::trace!(%family, order, sections = sections.len(), "synthesized sections");
    Ok(sections)
}
