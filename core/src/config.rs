//! Config types for building a replacer pipeline from JSON/YAML.
//!
//! These types mirror the runtime replacers but are serde-deserializable, so
//! the surrounding middleware can keep its rule list in a config file.
//!
//! # Relationship to runtime types
//!
//! | Config type | Runtime type | Built by |
//! |-------------|--------------|----------|
//! | [`CardinalityConfig`] | [`ReplacerList`] | [`CardinalityConfig::build()`] |
//! | [`SegmentSpec`] | [`SegmentConfig`] | [`SegmentSpec::build()`] |
//! | [`StageConfig::Auto`] | [`AutoReplacer`] | [`CardinalityConfig::build_stages()`] |
//! | [`StageConfig::Rules`] | [`RuleReplacer`] | [`CardinalityConfig::build_stages()`] |
//!
//! # Example
//!
//! ```json
//! {
//!   "segment": { "preset": "http" },
//!   "stages": [
//!     { "type": "auto", "disable": ["uuid"] },
//!     { "type": "rules", "rules": ["/user/:id/orders/:orderId"], "max_rule_count": 50 }
//!   ]
//! }
//! ```

use crate::{
    AutoReplacer, AutoReplacerBuilder, CardinalityError, Classification, PlaceholderSyntax,
    Replacer, ReplacerList, RuleReplacer, SegmentConfig,
};
use serde::Deserialize;

/// A whole pipeline: one segment convention, stages applied in order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CardinalityConfig {
    /// Separator and placeholder convention shared by every stage.
    #[serde(default)]
    pub segment: SegmentSpec,

    /// Replacers, applied in declaration order.
    #[serde(default)]
    pub stages: Vec<StageConfig>,
}

/// Named segment conventions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentPreset {
    /// `/`, leading separator, `:name`.
    #[default]
    Http,
    /// `.`, no leading separator, `{name}`.
    Bus,
}

/// Configuration for a [`SegmentConfig`]: a preset plus optional overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SegmentSpec {
    /// Starting point. Defaults to `http`.
    #[serde(default)]
    pub preset: SegmentPreset,

    /// Overrides the preset's separator.
    #[serde(default)]
    pub separator: Option<String>,

    /// Overrides whether output starts with the separator.
    #[serde(default)]
    pub leading_separator: Option<bool>,

    /// Overrides the placeholder convention.
    #[serde(default)]
    pub placeholder: Option<PlaceholderSpec>,
}

/// Placeholder convention `<open>name<close>`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaceholderSpec {
    /// Text before the name, e.g. `:` or `{`.
    pub open: String,

    /// Text after the name, e.g. `}`. Empty by default.
    #[serde(default)]
    pub close: String,
}

/// One replacer in the pipeline.
///
/// Uses `#[serde(tag = "type")]`:
///
/// ```json
/// { "type": "auto", "preset": "bus", "disable": ["inbox"] }
/// { "type": "rules", "rules": ["b/:queue/:topic"] }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum StageConfig {
    /// An [`AutoReplacer`].
    Auto {
        /// Classification table. Defaults to the segment preset.
        #[serde(default)]
        preset: Option<SegmentPreset>,

        /// Classifications to switch off.
        #[serde(default)]
        disable: Vec<Classification>,
    },

    /// A [`RuleReplacer`].
    Rules {
        /// Rule templates, highest priority first.
        rules: Vec<String>,

        /// Overrides [`DEFAULT_MAX_RULE_COUNT`](crate::DEFAULT_MAX_RULE_COUNT).
        #[serde(default)]
        max_rule_count: Option<usize>,

        /// Overrides [`DEFAULT_MAX_SEPARATOR_COUNT`](crate::DEFAULT_MAX_SEPARATOR_COUNT).
        #[serde(default)]
        max_separator_count: Option<usize>,
    },
}

/// A built pipeline stage, kept concrete so callers can inspect it.
#[derive(Debug, Clone)]
pub enum Stage {
    /// Built from [`StageConfig::Auto`].
    Auto(AutoReplacer),
    /// Built from [`StageConfig::Rules`].
    Rules(RuleReplacer),
}

impl Stage {
    /// Short name for diagnostics: `auto` or `rules`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Auto(_) => "auto",
            Self::Rules(_) => "rules",
        }
    }
}

impl Replacer for Stage {
    fn replace(&self, path: &str) -> String {
        match self {
            Self::Auto(r) => r.replace(path),
            Self::Rules(r) => r.replace(path),
        }
    }
}

impl SegmentSpec {
    /// Build the runtime config.
    ///
    /// # Errors
    ///
    /// Returns [`CardinalityError::EmptySeparator`] or
    /// [`CardinalityError::InvalidPlaceholder`] for bad overrides.
    pub fn build(&self) -> Result<SegmentConfig, CardinalityError> {
        let base = match self.preset {
            SegmentPreset::Http => SegmentConfig::http(),
            SegmentPreset::Bus => SegmentConfig::bus(),
        };

        if self.separator.is_none() && self.leading_separator.is_none() && self.placeholder.is_none() {
            return Ok(base);
        }

        let placeholder = match &self.placeholder {
            Some(spec) => PlaceholderSyntax::delimited(&spec.open, &spec.close)?,
            None => base.placeholder().clone(),
        };

        SegmentConfig::new(
            self.separator.as_deref().unwrap_or(base.separator()),
            self.leading_separator.unwrap_or(base.has_leading_separator()),
            placeholder,
        )
    }
}

impl CardinalityConfig {
    /// Build every stage in declaration order.
    ///
    /// # Errors
    ///
    /// Returns the first construction error, from [`SegmentSpec`] or any stage.
    pub fn build_stages(&self) -> Result<Vec<Stage>, CardinalityError> {
        let segment = self.segment.build()?;

        self.stages
            .iter()
            .map(|stage| match stage {
                StageConfig::Auto { preset, disable } => {
                    let builder = match preset.unwrap_or(self.segment.preset) {
                        SegmentPreset::Http => AutoReplacerBuilder::http(),
                        SegmentPreset::Bus => AutoReplacerBuilder::bus(),
                    };
                    let builder = disable
                        .iter()
                        .fold(builder.segment_config(segment.clone()), |b, c| b.without(*c));
                    Ok(Stage::Auto(builder.build()))
                }
                StageConfig::Rules {
                    rules,
                    max_rule_count,
                    max_separator_count,
                } => {
                    let mut builder = RuleReplacer::builder().segment_config(segment.clone());
                    if let Some(max) = max_rule_count {
                        builder = builder.max_rule_count(*max);
                    }
                    if let Some(max) = max_separator_count {
                        builder = builder.max_separator_count(*max);
                    }
                    builder.build(rules).map(Stage::Rules)
                }
            })
            .collect()
    }

    /// Build the pipeline as a [`ReplacerList`].
    ///
    /// # Errors
    ///
    /// See [`build_stages`](Self::build_stages).
    pub fn build(&self) -> Result<ReplacerList, CardinalityError> {
        Ok(self
            .build_stages()?
            .into_iter()
            .fold(ReplacerList::new(), |list, stage| list.with(stage)))
    }
}
