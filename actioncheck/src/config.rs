//! Assertion configuration.
//!
//! The two orthogonal switches of an assertion, negation and the matching
//! discipline, are passed explicitly to every entry point rather than read
//! from shared state.

use serde::{Deserialize, Serialize};

/// How expectations are matched against the recorded sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Expectations account for the whole sequence, in order, one-to-one.
    #[default]
    Exact,
    /// Expectations appear in order as a subsequence.
    Contains,
}

/// Flags controlling a single assertion.
///
/// # Example
///
/// ```rust
/// use actioncheck::{AssertionFlags, Mode};
///
/// let flags = AssertionFlags::containing().negated();
/// assert!(flags.negate);
/// assert_eq!(flags.mode(), Mode::Contains);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct AssertionFlags {
    /// Invert the verdict of the comparison.
    pub negate: bool,
    /// Use subsequence matching instead of exact matching.
    pub contains: bool,
}

impl AssertionFlags {
    /// Exact, non-negated matching.
    pub const fn exact() -> Self {
        Self {
            negate: false,
            contains: false,
        }
    }

    /// Subsequence, non-negated matching.
    pub const fn containing() -> Self {
        Self {
            negate: false,
            contains: true,
        }
    }

    /// Returns a copy with negation toggled on.
    #[must_use]
    pub const fn negated(self) -> Self {
        Self {
            negate: true,
            ..self
        }
    }

    /// The matching discipline selected by `contains`.
    pub const fn mode(self) -> Mode {
        if self.contains {
            Mode::Contains
        } else {
            Mode::Exact
        }
    }
}

impl From<Mode> for AssertionFlags {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Exact => Self::exact(),
            Mode::Contains => Self::containing(),
        }
    }
}
