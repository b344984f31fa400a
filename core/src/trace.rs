//! Match trace types for debugging rule sets.
//!
//! [`RuleReplacer::trace`](crate::RuleReplacer::trace) returns a [`MatchTrace`]
//! that records, for every rule tried, why it matched or why it was rejected.
//! Useful when an operator asks "why is this path not reduced?".
//!
//! # Example
//!
//! ```
//! use cardinal::{RuleOutcome, RuleReplacer};
//!
//! let rules = RuleReplacer::new(["/:AA/b01/:DD/e01", "a01/:X"]).unwrap();
//! let trace = rules.trace("/a01/b01/c01/d01");
//!
//! assert_eq!(trace.steps[0].outcome, RuleOutcome::LiteralMismatch { position: 3 });
//! assert_eq!(trace.steps[1].outcome, RuleOutcome::Partial { anchor: 0, offset: 0 });
//! assert_eq!(trace.output, "/a01/:X/c01/d01");
//! ```

use std::fmt;

/// Why a single rule matched or was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// Same segment count; every literal matched.
    Exact,
    /// The rule matched a window of a longer path.
    Partial {
        /// Rule part used as the anchor.
        anchor: usize,
        /// Path index of the rule's first part.
        offset: usize,
    },
    /// The path has fewer segments than the rule.
    TooShort {
        /// Segment count of the path.
        segments: usize,
        /// Part count of the rule.
        parts: usize,
    },
    /// Same segment count, but a literal differed.
    LiteralMismatch {
        /// Rule part that failed.
        position: usize,
    },
    /// No path segment equals a candidate anchor.
    NoAnchor,
    /// An anchor was found but the rest of the rule does not line up around it.
    Misaligned {
        /// Rule part used as the anchor.
        anchor: usize,
        /// Rule part that failed.
        position: usize,
    },
}

impl RuleOutcome {
    /// Returns `true` for [`Exact`](Self::Exact) and [`Partial`](Self::Partial).
    #[must_use]
    pub fn matched(&self) -> bool {
        matches!(self, Self::Exact | Self::Partial { .. })
    }
}

impl fmt::Display for RuleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => f.write_str("exact match"),
            Self::Partial { anchor, offset } => {
                write!(f, "partial match (anchor part {anchor}, path offset {offset})")
            }
            Self::TooShort { segments, parts } => {
                write!(f, "path has {segments} segments, rule needs {parts}")
            }
            Self::LiteralMismatch { position } => {
                write!(f, "literal at part {position} differs")
            }
            Self::NoAnchor => f.write_str("no anchor literal found in path"),
            Self::Misaligned { anchor, position } => {
                write!(f, "anchored at part {anchor}, but part {position} does not line up")
            }
        }
    }
}

/// One rule evaluated during a trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleStep {
    /// Index of the rule in declaration order.
    pub index: usize,
    /// The rule template.
    pub rule: String,
    /// What happened.
    pub outcome: RuleOutcome,
}

/// Trace of a full [`RuleReplacer`](crate::RuleReplacer) call.
///
/// # INV: `output` == `replace()` result
///
/// The `output` field always equals what
/// [`Replacer::replace`](crate::Replacer::replace) returns for the same input.
/// `steps` stops after the first matching rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTrace {
    /// The path as given.
    pub input: String,
    /// The reduced path.
    pub output: String,
    /// Every rule tried, in order.
    pub steps: Vec<RuleStep>,
}

impl MatchTrace {
    /// The rule that produced the output, if any.
    #[must_use]
    pub fn matched_rule(&self) -> Option<&RuleStep> {
        self.steps.last().filter(|step| step.outcome.matched())
    }
}
