//! cardinal - cardinality reduction for request paths and message subjects
//!
//! Metrics and tracing labels keyed by raw paths (`/user/8812/orders/77`)
//! explode in cardinality. This crate rewrites such paths into stable
//! templates (`/user/:id/orders/:id`) before they become labels.
//!
//! # Architecture
//!
//! - [`SegmentConfig`] - How a path is split and how placeholders look
//!   (`/` + `:name` for HTTP, `.` + `{name}` for message buses)
//! - [`Replacer`] - The single seam: `&str` in, reduced `String` out
//! - [`AutoReplacer`] - Heuristic classifier (numeric ids, file resources,
//!   UUIDs, inbox and URL subjects)
//! - [`RuleReplacer`] - Operator templates compiled into [`Pattern`]s,
//!   first match wins
//! - [`ReplacerList`] - Ordered pipeline of replacers
//!
//! Every replacer is built once, then shared immutably (`Send + Sync`).
//! Construction validates everything; `replace` never fails and never panics.
//!
//! # Example
//!
//! ```
//! use cardinal::prelude::*;
//!
//! let pipeline = ReplacerList::new()
//!     .with(AutoReplacer::http())
//!     .with(RuleReplacer::new(["/user/:id/orders/:orderId"]).unwrap());
//!
//! assert_eq!(pipeline.apply("/user/42/orders/7"), "/user/:id/orders/:orderId");
//! assert_eq!(pipeline.apply("/static/logo.png"), "/static/:resource");
//! assert_eq!(pipeline.apply("/health"), "/health");
//! ```
//!
//! # Features
//!
//! - `serde` - [`CardinalityConfig`] for building pipelines from JSON/YAML

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod auto;
pub mod pattern;
mod replacer;
mod rules;
mod segment;
mod trace;

#[cfg(feature = "serde")]
mod config;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use pattern::{Part, Pattern, RuleLimits};
pub use replacer::{FnReplacer, Replacer, ReplacerList};
pub use segment::{PlaceholderFormatter, PlaceholderSyntax, SegmentConfig};

// Replacers
pub use auto::{AutoReplacer, AutoReplacerBuilder, Classification, INBOX_PREFIX};
pub use rules::{RuleReplacer, RuleReplacerBuilder};

// Trace types
pub use trace::{MatchTrace, RuleOutcome, RuleStep};

// Config (feature-gated)
#[cfg(feature = "serde")]
pub use config::{
    CardinalityConfig, PlaceholderSpec, SegmentPreset, SegmentSpec, Stage, StageConfig,
};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use cardinal::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Replacers
        AutoReplacer,
        // Errors
        CardinalityError,
        Classification,
        // Trace types
        MatchTrace,
        // Traits
        Replacer,
        ReplacerList,
        RuleOutcome,
        RuleReplacer,
        // Core types
        SegmentConfig,
    };

    #[cfg(feature = "serde")]
    pub use crate::CardinalityConfig;
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Default bound on rule list length. A list must have fewer rules than this.
///
/// Each rule is tried in order on every call, so the list length is the
/// worst-case per-call cost.
pub const DEFAULT_MAX_RULE_COUNT: usize = 100;

/// Default bound on segments per rule. A rule must have fewer segments than this.
pub const DEFAULT_MAX_SEPARATOR_COUNT: usize = 10;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from replacer construction.
///
/// All of these surface when a replacer or config is built, never from
/// [`Replacer::replace`]. Fix the rules and rebuild.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardinalityError {
    /// The rule list reached the rule count limit.
    #[error("rule list has {count} rules, but it must have fewer than {max}")]
    TooManyRules {
        /// Number of rules supplied.
        count: usize,
        /// Configured limit.
        max: usize,
    },

    /// A rule reached the segment count limit.
    #[error("rule \"{rule}\" has {segments} segments, but it must have fewer than {max}")]
    RuleTooLong {
        /// The offending template.
        rule: String,
        /// Its segment count.
        segments: usize,
        /// Configured limit.
        max: usize,
    },

    /// A rule has no placeholder segment, so it could never reduce anything.
    #[error("rule \"{rule}\" has no placeholder segment")]
    RuleWithoutPlaceholder {
        /// The offending template.
        rule: String,
    },

    /// The segment separator is empty.
    #[error("segment separator must not be empty")]
    EmptySeparator,

    /// A custom placeholder convention could not be compiled.
    #[error("invalid placeholder pattern \"{pattern}\": {reason}")]
    InvalidPlaceholder {
        /// The recognizer pattern that was attempted.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },
}
