//! `RuleReplacer`: operator-supplied templates, first match wins
//!
//! Rules are compiled once by [`pattern::compile`](crate::pattern::compile)
//! and then evaluated in declaration order against every path.
//!
//! # Matching modes
//!
//! - **Exact-length**: rule and path have the same segment count. Positions
//!   line up 1:1; every literal must match, every placeholder is substituted.
//! - **Anchored partial**: the path is longer than the rule. The rule's first
//!   literal is searched for in the path; the first occurrence fixes the
//!   alignment and the whole rule is replayed at that offset. Every other
//!   part must be a placeholder; a second literal rejects the rule. There is
//!   no backtracking to later occurrences.
//! - A path shorter than the rule never matches.
//!
//! Any disagreement rejects the rule and evaluation moves on to the next one.
//! When no rule matches, the path is returned unchanged.

use crate::pattern::{self, Pattern, RuleLimits};
use crate::trace::{MatchTrace, RuleOutcome, RuleStep};
use crate::{CardinalityError, Replacer, SegmentConfig};
use std::cmp::Ordering;

/// Builder for [`RuleReplacer`]. Later calls override earlier ones.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct RuleReplacerBuilder {
    config: SegmentConfig,
    limits: RuleLimits,
}

impl RuleReplacerBuilder {
    /// Separator and placeholder convention used to parse rules and paths.
    pub fn segment_config(mut self, config: SegmentConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace both limits at once.
    pub fn limits(mut self, limits: RuleLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Rule lists must have fewer entries than `max`.
    pub fn max_rule_count(mut self, max: usize) -> Self {
        self.limits.max_rule_count = max;
        self
    }

    /// Each rule must have fewer segments than `max`.
    pub fn max_separator_count(mut self, max: usize) -> Self {
        self.limits.max_separator_count = max;
        self
    }

    /// Compile `rules` into a replacer.
    ///
    /// # Errors
    ///
    /// See [`pattern::compile`].
    pub fn build<I, S>(self, rules: I) -> Result<RuleReplacer, CardinalityError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules: Vec<S> = rules.into_iter().collect();
        let patterns = pattern::compile(&rules, self.limits, &self.config).inspect_err(|e| {
            tracing::debug!(error = %e, "rejected cardinality rules");
        })?;

        tracing::debug!(
            rules = patterns.len(),
            max_rule_count = self.limits.max_rule_count,
            max_separator_count = self.limits.max_separator_count,
            "compiled cardinality rules"
        );

        Ok(RuleReplacer {
            config: self.config,
            patterns,
        })
    }
}

/// Replaces paths according to operator-supplied templates.
///
/// # INV (Dijkstra): first-match-wins
///
/// Rules are evaluated in declaration order. The first matching rule
/// produces the output, even if a later rule would also match.
///
/// # Example
///
/// ```
/// use cardinal::{Replacer, RuleReplacer};
///
/// let rules = RuleReplacer::new(["/:AA/b01/c01/:DD", "a20/:XX"]).unwrap();
///
/// // exact-length match
/// assert_eq!(rules.replace("/a01/b01/c01/d01"), "/:AA/b01/c01/:DD");
/// // anchored partial match
/// assert_eq!(rules.replace("/a20/b20/c20"), "/a20/:XX/c20");
/// // no rule matches
/// assert_eq!(rules.replace("/a01/b01/x01/d01/e01"), "/a01/b01/x01/d01/e01");
/// ```
#[derive(Debug, Clone)]
pub struct RuleReplacer {
    config: SegmentConfig,
    patterns: Vec<Pattern>,
}

impl RuleReplacer {
    /// Compile `rules` with the HTTP config and default limits.
    ///
    /// # Errors
    ///
    /// See [`pattern::compile`].
    pub fn new<I, S>(rules: I) -> Result<Self, CardinalityError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::builder().build(rules)
    }

    /// Start building with the HTTP config and default limits.
    pub fn builder() -> RuleReplacerBuilder {
        RuleReplacerBuilder::default()
    }

    /// The config this replacer was built with.
    #[must_use]
    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }

    /// Compiled rules in priority order.
    #[must_use]
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Replace `path` and record how every rule was evaluated.
    #[must_use]
    pub fn trace(&self, path: &str) -> MatchTrace {
        let segments = self.config.split(path);
        let mut steps = Vec::new();
        let mut output = None;

        for (index, pattern) in self.patterns.iter().enumerate() {
            let (outcome, candidate) = self.attempt(pattern, &segments);
            steps.push(RuleStep {
                index,
                rule: pattern.source().to_owned(),
                outcome,
            });
            if candidate.is_some() {
                output = candidate;
                break;
            }
        }

        MatchTrace {
            input: path.to_owned(),
            output: output.unwrap_or_else(|| path.to_owned()),
            steps,
        }
    }

    fn attempt<'a>(&self, pattern: &'a Pattern, segments: &[&'a str]) -> (RuleOutcome, Option<String>) {
        match segments.len().cmp(&pattern.len()) {
            Ordering::Less => (
                RuleOutcome::TooShort {
                    segments: segments.len(),
                    parts: pattern.len(),
                },
                None,
            ),
            Ordering::Equal => self.match_exact(pattern, segments),
            Ordering::Greater => self.match_partial(pattern, segments),
        }
    }

    fn match_exact<'a>(&self, pattern: &'a Pattern, segments: &[&'a str]) -> (RuleOutcome, Option<String>) {
        let mut out = segments.to_vec();

        for (position, part) in pattern.parts().iter().enumerate() {
            if part.is_placeholder() {
                out[position] = part.value();
            } else if segments[position] != part.value() {
                return (RuleOutcome::LiteralMismatch { position }, None);
            }
        }

        (RuleOutcome::Exact, Some(self.config.join(&out)))
    }

    /// Find an anchor, then commit to it.
    ///
    /// Candidate anchors are the rule parts from the first literal onwards,
    /// searched for in the path from the same index onwards. The first hit is
    /// final: if it does not line up, the rule is rejected.
    fn match_partial<'a>(&self, pattern: &'a Pattern, segments: &[&'a str]) -> (RuleOutcome, Option<String>) {
        let Some(first) = pattern.first_literal() else {
            return (RuleOutcome::NoAnchor, None);
        };

        for (anchor, part) in pattern.parts().iter().enumerate().skip(first) {
            let found = segments
                .iter()
                .enumerate()
                .skip(first)
                .find(|(_, segment)| **segment == part.value());

            if let Some((at, _)) = found {
                return self.realign(pattern, segments, anchor, at);
            }
        }

        (RuleOutcome::NoAnchor, None)
    }

    /// Replay the whole rule with part `anchor` pinned to path index `at`.
    ///
    /// Part `k` lands on path index `at - anchor + k`. Only the anchor may be
    /// a literal: any other literal part, before or after it, rejects the
    /// rule. Positions outside the path reject the rule too.
    fn realign<'a>(
        &self,
        pattern: &'a Pattern,
        segments: &[&'a str],
        anchor: usize,
        at: usize,
    ) -> (RuleOutcome, Option<String>) {
        let misaligned = |position| (RuleOutcome::Misaligned { anchor, position }, None);

        let Some(offset) = at.checked_sub(anchor) else {
            return misaligned(0);
        };

        let mut out = segments.to_vec();

        for (k, part) in pattern.parts().iter().enumerate() {
            if k == anchor {
                continue;
            }

            let Some(slot) = out.get_mut(offset + k) else {
                return misaligned(k);
            };

            if !part.is_placeholder() {
                return misaligned(k);
            }
            *slot = part.value();
        }

        (
            RuleOutcome::Partial { anchor, offset },
            Some(self.config.join(&out)),
        )
    }
}

impl Replacer for RuleReplacer {
    fn replace(&self, path: &str) -> String {
        let segments = self.config.split(path);

        for pattern in &self.patterns {
            if let (outcome, Some(output)) = self.attempt(pattern, &segments) {
                tracing::trace!(rule = pattern.source(), %outcome, "cardinality rule matched");
                return output;
            }
        }

        path.to_owned()
    }
}
