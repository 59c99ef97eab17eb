//! Stage attribute types: filter family, circuit topology, and node kind.
//!
//! A stage node carries a fixed-shape [`StageAttrs`] record rather than a free
//! attribute map. Family and topology are closed enums parsed from short text
//! tags, so every consumer (the merge rule, the validity filter, section
//! synthesis) matches on them exhaustively.

#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};

use core::fmt;
use core::str::FromStr;

/// Pole-placement design family of a stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterFamily {
    /// Maximally-flat passband.
    Butterworth,
    /// Equal-ripple passband (Chebyshev type I).
    Chebyshev,
}

impl FilterFamily {
    /// Every supported family, in canonical enumeration order.
    pub const ALL: [FilterFamily; 2] = [FilterFamily::Butterworth, FilterFamily::Chebyshev];

    /// Canonical lowercase tag used in configuration files.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Butterworth => "butterworth",
            Self::Chebyshev => "chebyshev",
        }
    }
}

impl fmt::Display for FilterFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for FilterFamily {
    type Err = ParseTagError;

    /// Accepts the canonical tag plus the legacy spellings `Butterworth`,
    /// `3dbCheb` and `cheby1` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "butterworth" | "butter" => Ok(Self::Butterworth),
            "chebyshev" | "cheby1" | "3dbcheb" => Ok(Self::Chebyshev),
            _ => Err(ParseTagError::family(s)),
        }
    }
}

/// Circuit structure realizing a stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Topology {
    /// Equal-capacitor unity-buffered Sallen-Key low-pass (two poles per block).
    SallenKey,
    /// Buffered single-pole RC low-pass.
    Rc,
}

impl Topology {
    /// Every supported topology, in canonical enumeration order.
    pub const ALL: [Topology; 2] = [Topology::SallenKey, Topology::Rc];

    /// Canonical lowercase tag used in configuration files.
    pub fn tag(self) -> &'static str {
        match self {
            Self::SallenKey => "sallen-key",
            Self::Rc => "rc",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Topology {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "sallen-key" | "sallenkey" | "sallen-key_lp" | "sk" => Ok(Self::SallenKey),
            "rc" | "rc_lp" | "rc-lp" => Ok(Self::Rc),
            _ => Err(ParseTagError::topology(s)),
        }
    }
}

/// Role of a node in the stage graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageKind {
    /// A block of filtering.
    Filter,
    /// Terminal sink. Exactly one per graph, never merged or removed by the rewrite rule.
    Load,
}

/// Attribute record of a stage node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StageAttrs {
    /// Filter or load.
    pub kind: StageKind,
    /// Assigned design family, `None` until the family assigner runs.
    pub family: Option<FilterFamily>,
    /// Number of poles contributed by this stage (always >= 1 for filters).
    pub order: u32,
    /// Assigned circuit topology, `None` until the topology assigner runs.
    pub topology: Option<Topology>,
}

impl StageAttrs {
    /// A fresh single-order filter stage with no family or topology yet.
    pub fn filter() -> Self {
        Self {
            kind: StageKind::Filter,
            family: None,
            order: 1,
            topology: None,
        }
    }

    /// The terminal load node.
    pub fn load() -> Self {
        Self {
            kind: StageKind::Load,
            family: None,
            order: 0,
            topology: None,
        }
    }

    /// Returns `true` for the load node.
    #[inline]
    pub fn is_load(&self) -> bool {
        self.kind == StageKind::Load
    }

    /// Sets the family (builder style).
    pub fn with_family(mut self, family: FilterFamily) -> Self {
        self.family = Some(family);
        self
    }

    /// Sets the order (builder style).
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    /// Sets the topology (builder style).
    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = Some(topology);
        self
    }
}

/// Failure to parse a family or topology tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseTagError {
    /// Which tag space was being parsed (`"family"` or `"topology"`).
    pub what: &'static str,
    /// The rejected input.
    pub tag: String,
}

impl ParseTagError {
    fn family(tag: &str) -> Self {
        Self {
            what: "family",
            tag: tag.to_string(),
        }
    }

    fn topology(tag: &str) -> Self {
        Self {
            what: "topology",
            tag: tag.to_string(),
        }
    }
}

impl fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported {} tag '{}'", self.what, self.tag)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseTagError {}
