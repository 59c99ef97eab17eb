//! Family/order compatibility filter.
//!
//! A merged equal-ripple block of order 1 is not considered a meaningful
//! design, while the preferred family is usable at any order. The rule is
//! expressed as a [`ValidityRule`]: a candidate is rejected when any filter
//! stage is not of the preferred family and has an order below the minimum.
//! Rejected candidates are dropped, not repaired.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::graph::StageGraph;
use crate::stage::{FilterFamily, StageAttrs};

/// Default minimum order for stages outside the preferred family.
pub const DEFAULT_MIN_ORDER_NON_PREFERRED: u32 = 2;

/// Acceptance rule applied to fully assigned candidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidityRule {
    /// Family accepted at every order.
    pub preferred: FilterFamily,
    /// Minimum order a stage of any other family must reach.
    pub min_order_non_preferred: u32,
}

impl Default for ValidityRule {
    fn default() -> Self {
        Self {
            preferred: FilterFamily::Butterworth,
            min_order_non_preferred: DEFAULT_MIN_ORDER_NON_PREFERRED,
        }
    }
}

impl ValidityRule {
    /// Creates a rule.
    pub fn new(preferred: FilterFamily, min_order_non_preferred: u32) -> Self {
        Self {
            preferred,
            min_order_non_preferred,
        }
    }

    /// Returns `true` if this single stage satisfies the rule.
    ///
    /// The load always passes. A filter stage with no family counts as
    /// non-preferred.
    pub fn accepts_stage(&self, attrs: &StageAttrs) -> bool {
        if attrs.is_load() {
            return true;
        }
        attrs.family == Some(self.preferred) || attrs.order >= self.min_order_non_preferred
    }

    /// Returns `true` if every stage of `graph` satisfies the rule.
    pub fn accepts(&self, graph: &StageGraph) -> bool {
        graph.nodes().all(|(_, attrs)| self.accepts_stage(attrs))
    }

    /// Keeps the accepted candidates, preserving their order.
    pub fn filter_valid(&self, candidates: Vec<StageGraph>) -> Vec<StageGraph> {
        #[cfg(feature = "tracing")]
        let before = candidates.len();
        let kept: Vec<StageGraph> = candidates.into_iter().filter(|g| self.accepts(g)).collect();
        #[cfg(feature = "tracing")]
        tracing::debug!("validity: kept {} of {before} candidates", kept.len());
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::FilterFamily::{Butterworth as B, Chebyshev as C};

    fn single(family: Option<FilterFamily>, order: u32) -> StageGraph {
        let mut g = StageGraph::new();
        g.add_node("load", StageAttrs::load());
        let mut attrs = StageAttrs::filter().with_order(order);
        attrs.family = family;
        g.add_node("Stage1", attrs);
        g.connect("Stage1", "load");
        g
    }

    #[test]
    fn preferred_family_passes_at_order_one() {
        assert!(ValidityRule::default().accepts(&single(Some(B), 1)));
    }

    #[test]
    fn non_preferred_needs_minimum_order() {
        let rule = ValidityRule::default();
        assert!(!rule.accepts(&single(Some(C), 1)));
        assert!(rule.accepts(&single(Some(C), 2)));
        assert!(rule.accepts(&single(Some(C), 5)));
    }

    #[test]
    fn unassigned_stage_is_non_preferred() {
        let rule = ValidityRule::default();
        assert!(!rule.accepts(&single(None, 1)));
    }

    #[test]
    fn load_is_never_rejected() {
        let rule = ValidityRule::new(C, 10);
        assert!(rule.accepts_stage(&StageAttrs::load()));
    }

    #[test]
    fn filter_preserves_order() {
        let rule = ValidityRule::default();
        let kept = rule.filter_valid(vec![
            single(Some(B), 1),
            single(Some(C), 1),
            single(Some(C), 3),
        ]);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].node("Stage1").unwrap().order, 3);
    }
}
