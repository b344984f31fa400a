//! Rule template compilation.
//!
//! A rule template such as `"/orders/:orderId/items"` is split once, at
//! construction time, into [`Part`]s. All validation happens here so that the
//! matching engine never has to re-check a rule on the hot path.

use crate::{CardinalityError, SegmentConfig, DEFAULT_MAX_RULE_COUNT, DEFAULT_MAX_SEPARATOR_COUNT};

/// Bounds that keep the per-call matching cost predictable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleLimits {
    /// A rule list must have strictly fewer rules than this.
    pub max_rule_count: usize,
    /// A single rule must have strictly fewer segments than this.
    pub max_separator_count: usize,
}

impl Default for RuleLimits {
    fn default() -> Self {
        Self {
            max_rule_count: DEFAULT_MAX_RULE_COUNT,
            max_separator_count: DEFAULT_MAX_SEPARATOR_COUNT,
        }
    }
}

/// One segment of a compiled rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    placeholder: bool,
    value: String,
}

impl Part {
    /// A literal segment that must match byte-for-byte.
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            placeholder: false,
            value: value.into(),
        }
    }

    /// A placeholder token substituted into the output.
    pub fn placeholder(value: impl Into<String>) -> Self {
        Self {
            placeholder: true,
            value: value.into(),
        }
    }

    /// Returns `true` for placeholder parts.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// The literal text, or the placeholder token.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A compiled rule.
///
/// # INV: at least one placeholder
///
/// Every `Pattern` has at least one placeholder part; [`Pattern::compile`]
/// rejects templates without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    rooted: bool,
    parts: Vec<Part>,
    first_literal: Option<usize>,
    first_placeholder: usize,
}

impl Pattern {
    /// Compile a single rule template.
    ///
    /// # Errors
    ///
    /// - [`CardinalityError::RuleTooLong`] if the template has
    ///   `limits.max_separator_count` segments or more.
    /// - [`CardinalityError::RuleWithoutPlaceholder`] if no segment is a placeholder.
    pub fn compile(
        rule: &str,
        limits: RuleLimits,
        config: &SegmentConfig,
    ) -> Result<Self, CardinalityError> {
        let rooted = rule.starts_with(config.separator());
        let segments = config.split(rule);

        if segments.len() >= limits.max_separator_count {
            return Err(CardinalityError::RuleTooLong {
                rule: rule.to_owned(),
                segments: segments.len(),
                max: limits.max_separator_count,
            });
        }

        let parts: Vec<Part> = segments
            .into_iter()
            .map(|segment| {
                if config.is_placeholder(segment) {
                    Part::placeholder(segment)
                } else {
                    Part::literal(segment)
                }
            })
            .collect();

        let first_literal = parts.iter().position(|p| !p.is_placeholder());
        let first_placeholder = parts.iter().position(Part::is_placeholder).ok_or_else(|| {
            CardinalityError::RuleWithoutPlaceholder {
                rule: rule.to_owned(),
            }
        })?;

        Ok(Self {
            source: rule.to_owned(),
            rooted,
            parts,
            first_literal,
            first_placeholder,
        })
    }

    /// The template as written by the operator.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the template started with the separator.
    ///
    /// Informational only: rooted and unrooted rules match the same way.
    #[must_use]
    pub fn is_rooted(&self) -> bool {
        self.rooted
    }

    /// The compiled parts, in template order.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Number of parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Always `false`: a compiled pattern has at least one part.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Index of the first literal part, the origin of partial-match anchoring.
    ///
    /// `None` for placeholder-only patterns.
    #[must_use]
    pub fn first_literal(&self) -> Option<usize> {
        self.first_literal
    }

    /// Index of the first placeholder part.
    #[must_use]
    pub fn first_placeholder(&self) -> usize {
        self.first_placeholder
    }
}

/// Compile a rule list, preserving order (declaration order is match priority).
///
/// # Errors
///
/// - [`CardinalityError::TooManyRules`] if `rules` has `limits.max_rule_count`
///   entries or more. Checked before any rule is parsed.
/// - Any error from [`Pattern::compile`], for the first offending rule.
pub fn compile<S: AsRef<str>>(
    rules: &[S],
    limits: RuleLimits,
    config: &SegmentConfig,
) -> Result<Vec<Pattern>, CardinalityError> {
    if rules.len() >= limits.max_rule_count {
        return Err(CardinalityError::TooManyRules {
            count: rules.len(),
            max: limits.max_rule_count,
        });
    }

    rules
        .iter()
        .map(|rule| Pattern::compile(rule.as_ref(), limits, config))
        .collect()
}
