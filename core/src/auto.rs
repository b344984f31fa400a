//! `AutoReplacer`: configuration-free classification of dynamic segments
//!
//! Recognizes the common shapes of high-cardinality segments and swaps them
//! for placeholders:
//!
//! | Classification | Shape | Table |
//! |----------------|-------|-------|
//! | [`Id`](Classification::Id) | decimal digits only | HTTP |
//! | [`Resource`](Classification::Resource) | `name.ext`, ext of 2-4 word chars | HTTP |
//! | [`Uuid`](Classification::Uuid) | 8-4-4-4-12 hex | HTTP |
//! | [`Partition`](Classification::Partition) | decimal digits only | bus |
//! | [`Inbox`](Classification::Inbox) | subject starts with `_INBOX` | bus (prefix) |
//! | [`Url`](Classification::Url) | subject starts with `/` | bus (prefix) |
//!
//! Prefix classifications replace the *whole* path and are only consulted when
//! the [`SegmentConfig`] has no leading separator. Segment classifications are
//! tried in table order; the first one that matches wins.

use crate::{Replacer, SegmentConfig};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("numeric pattern is valid"));

// .css, .js, .png, .jpeg, ...
static RESOURCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9\-]+\.\w{2,4}$").expect("resource pattern is valid")
});

static UUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("uuid pattern is valid")
});

/// Conventional prefix of NATS reply inboxes.
pub const INBOX_PREFIX: &str = "_INBOX";

/// A built-in shape the [`AutoReplacer`] knows how to recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Classification {
    /// Numeric identifier segment.
    Id,
    /// File-like segment (`favicon.ico`).
    Resource,
    /// UUID segment.
    Uuid,
    /// Numeric bus partition segment.
    Partition,
    /// Reply inbox subject.
    Inbox,
    /// Subject carrying a raw URL.
    Url,
}

impl Classification {
    /// Logical name fed to the placeholder formatter.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Resource => "resource",
            Self::Uuid => "uuid",
            Self::Partition => "partition",
            Self::Inbox => "inbox",
            Self::Url => "url",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
struct SegmentRule {
    classification: Classification,
    recognizer: &'static Regex,
    enabled: bool,
}

#[derive(Debug, Clone)]
struct PrefixRule {
    classification: Classification,
    prefix: &'static str,
    enabled: bool,
}

/// Builder for [`AutoReplacer`].
///
/// Starts from one of two default tables and lets callers switch individual
/// classifications off (or back on). Toggles are independent of order; when
/// the same classification is toggled twice, the last call wins. Toggling a
/// classification that is not in the table is a no-op.
///
/// # Example
///
/// ```
/// use cardinal::{AutoReplacer, Classification, Replacer};
///
/// let replacer = AutoReplacer::builder()
///     .without(Classification::Id)
///     .build();
///
/// assert_eq!(replacer.replace("/users/42/avatar.png"), "/users/42/:resource");
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct AutoReplacerBuilder {
    config: SegmentConfig,
    segments: Vec<SegmentRule>,
    prefixes: Vec<PrefixRule>,
}

impl AutoReplacerBuilder {
    /// HTTP table: `id`, `resource`, `uuid` on `/`-separated paths.
    pub fn http() -> Self {
        let segment = |classification, recognizer| SegmentRule {
            classification,
            recognizer,
            enabled: true,
        };

        Self {
            config: SegmentConfig::http(),
            segments: vec![
                segment(Classification::Id, &*NUMERIC),
                segment(Classification::Resource, &*RESOURCE),
                segment(Classification::Uuid, &*UUID),
            ],
            prefixes: Vec::new(),
        }
    }

    /// Bus table: `inbox` and `url` prefixes, `partition` segments on `.`-separated subjects.
    pub fn bus() -> Self {
        let prefix = |classification, prefix| PrefixRule {
            classification,
            prefix,
            enabled: true,
        };

        Self {
            config: SegmentConfig::bus(),
            segments: vec![SegmentRule {
                classification: Classification::Partition,
                recognizer: &*NUMERIC,
                enabled: true,
            }],
            prefixes: vec![
                prefix(Classification::Inbox, INBOX_PREFIX),
                prefix(Classification::Url, "/"),
            ],
        }
    }

    /// Use a different separator and placeholder convention.
    ///
    /// The classification table is kept as is.
    pub fn segment_config(mut self, config: SegmentConfig) -> Self {
        self.config = config;
        self
    }

    /// Disable a classification.
    pub fn without(self, classification: Classification) -> Self {
        self.toggle(classification, false)
    }

    /// Re-enable a classification previously disabled.
    pub fn with(self, classification: Classification) -> Self {
        self.toggle(classification, true)
    }

    fn toggle(mut self, classification: Classification, enabled: bool) -> Self {
        for rule in &mut self.segments {
            if rule.classification == classification {
                rule.enabled = enabled;
            }
        }
        for rule in &mut self.prefixes {
            if rule.classification == classification {
                rule.enabled = enabled;
            }
        }
        self
    }

    /// Freeze the table and pre-format every placeholder.
    #[must_use]
    pub fn build(self) -> AutoReplacer {
        let segments: Vec<_> = self
            .segments
            .iter()
            .filter(|r| r.enabled)
            .map(|r| CompiledSegment {
                classification: r.classification,
                recognizer: r.recognizer,
                placeholder: self.config.format_placeholder(r.classification.name()),
            })
            .collect();

        let prefixes: Vec<_> = self
            .prefixes
            .iter()
            .filter(|r| r.enabled)
            .map(|r| CompiledPrefix {
                classification: r.classification,
                prefix: r.prefix,
                placeholder: self.config.format_placeholder(r.classification.name()),
            })
            .collect();

        tracing::debug!(
            separator = self.config.separator(),
            segments = ?segments.iter().map(|s| s.classification).collect::<Vec<_>>(),
            prefixes = ?prefixes.iter().map(|p| p.classification).collect::<Vec<_>>(),
            "built auto replacer"
        );

        AutoReplacer {
            config: self.config,
            segments,
            prefixes,
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledSegment {
    classification: Classification,
    recognizer: &'static Regex,
    placeholder: String,
}

#[derive(Debug, Clone)]
struct CompiledPrefix {
    classification: Classification,
    prefix: &'static str,
    placeholder: String,
}

/// Replaces well-known dynamic segment shapes with placeholders.
///
/// # Example
///
/// ```
/// use cardinal::{AutoReplacer, Replacer};
///
/// let http = AutoReplacer::http();
/// assert_eq!(
///     http.replace("/player/update/123/file/favicon.ico/550e8400-e29b-41d4-a716-446655440000"),
///     "/player/update/:id/file/:resource/:uuid",
/// );
///
/// let bus = AutoReplacer::bus();
/// assert_eq!(bus.replace("orders.7.created"), "orders.{partition}.created");
/// assert_eq!(bus.replace("_INBOX.abc.def"), "{inbox}");
/// ```
#[derive(Debug, Clone)]
pub struct AutoReplacer {
    config: SegmentConfig,
    segments: Vec<CompiledSegment>,
    prefixes: Vec<CompiledPrefix>,
}

impl AutoReplacer {
    /// HTTP defaults, every classification enabled.
    #[must_use]
    pub fn http() -> Self {
        AutoReplacerBuilder::http().build()
    }

    /// Bus defaults, every classification enabled.
    #[must_use]
    pub fn bus() -> Self {
        AutoReplacerBuilder::bus().build()
    }

    /// Start from the HTTP table.
    pub fn builder() -> AutoReplacerBuilder {
        AutoReplacerBuilder::http()
    }

    /// The config this replacer was built with.
    #[must_use]
    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }

    /// Enabled classifications, prefix rules first, each in evaluation order.
    #[must_use]
    pub fn classifications(&self) -> Vec<Classification> {
        self.prefixes
            .iter()
            .map(|p| p.classification)
            .chain(self.segments.iter().map(|s| s.classification))
            .collect()
    }

    fn classify<'a>(&'a self, segment: &'a str) -> &'a str {
        self.segments
            .iter()
            .find(|rule| rule.recognizer.is_match(segment))
            .map_or(segment, |rule| rule.placeholder.as_str())
    }
}

impl Default for AutoReplacer {
    fn default() -> Self {
        Self::http()
    }
}

impl Replacer for AutoReplacer {
    fn replace(&self, path: &str) -> String {
        if !self.config.has_leading_separator() {
            if let Some(rule) = self.prefixes.iter().find(|r| path.starts_with(r.prefix)) {
                return rule.placeholder.clone();
            }
        }

        let segments: Vec<&str> = self
            .config
            .split(path)
            .into_iter()
            .map(|segment| self.classify(segment))
            .collect();

        self.config.join(&segments)
    }
}
