//! `SegmentConfig`: how a path is cut into segments and how placeholders look
//!
//! Every replacer in this crate is built from a [`SegmentConfig`]. The config
//! answers four questions:
//!
//! - Which separator splits a path into segments? (`/` for HTTP, `.` for bus subjects)
//! - Is the separator re-emitted in front of the first segment?
//! - Is a given segment already a placeholder? (used when compiling rule templates)
//! - How does a logical name like `id` become a placeholder token like `:id`?
//!
//! The config is immutable once built. Replacers keep their own clone, so a
//! config can never change underneath a replacer that is already serving traffic.

use crate::CardinalityError;
use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};

static COLON_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:[-\w]+$").expect("colon placeholder pattern is valid"));

static BRACE_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{[-\w]+\}$").expect("brace placeholder pattern is valid"));

/// Turns a logical name (`id`) into a placeholder token (`:id`).
pub type PlaceholderFormatter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Placeholder convention: a recognizer plus a formatter.
///
/// The two halves must agree: whatever the formatter emits has to satisfy the
/// recognizer. This is the caller's responsibility and is not checked.
///
/// # Example
///
/// ```
/// use cardinal::PlaceholderSyntax;
///
/// let syntax = PlaceholderSyntax::delimited("<", ">").unwrap();
/// assert_eq!(syntax.format("id"), "<id>");
/// assert!(syntax.is_placeholder("<user-id>"));
/// assert!(!syntax.is_placeholder("user"));
/// ```
#[derive(Clone)]
pub struct PlaceholderSyntax {
    recognizer: Regex,
    formatter: PlaceholderFormatter,
}

impl PlaceholderSyntax {
    /// Create a syntax from an arbitrary recognizer and formatter.
    pub fn new(recognizer: Regex, formatter: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self {
            recognizer,
            formatter: Arc::new(formatter),
        }
    }

    /// `:name` placeholders, the HTTP router convention.
    #[must_use]
    pub fn colon() -> Self {
        Self::new(COLON_PLACEHOLDER.clone(), |name| format!(":{name}"))
    }

    /// `{name}` placeholders, used for bus subjects.
    #[must_use]
    pub fn braces() -> Self {
        Self::new(BRACE_PLACEHOLDER.clone(), |name| format!("{{{name}}}"))
    }

    /// Placeholders of the form `<open>name<close>`, where `name` is one or
    /// more word or hyphen characters.
    ///
    /// # Errors
    ///
    /// Returns [`CardinalityError::InvalidPlaceholder`] if both delimiters are
    /// empty (every word would be a placeholder) or the recognizer fails to compile.
    pub fn delimited(open: &str, close: &str) -> Result<Self, CardinalityError> {
        let pattern = format!(r"^{}[-\w]+{}$", regex::escape(open), regex::escape(close));

        if open.is_empty() && close.is_empty() {
            return Err(CardinalityError::InvalidPlaceholder {
                pattern,
                reason: "placeholder needs an opening or closing delimiter".into(),
            });
        }

        let recognizer = Regex::new(&pattern).map_err(|e| CardinalityError::InvalidPlaceholder {
            pattern: pattern.clone(),
            reason: e.to_string(),
        })?;

        let (open, close) = (open.to_owned(), close.to_owned());
        Ok(Self::new(recognizer, move |name| format!("{open}{name}{close}")))
    }

    /// Returns `true` if `segment` is already a placeholder token.
    #[must_use]
    pub fn is_placeholder(&self, segment: &str) -> bool {
        self.recognizer.is_match(segment)
    }

    /// Format a logical name as a placeholder token.
    #[must_use]
    pub fn format(&self, name: &str) -> String {
        (self.formatter)(name)
    }

    /// The recognizer regex.
    #[must_use]
    pub fn recognizer(&self) -> &Regex {
        &self.recognizer
    }
}

impl fmt::Debug for PlaceholderSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaceholderSyntax")
            .field("recognizer", &self.recognizer.as_str())
            .field("example", &self.format("name"))
            .finish()
    }
}

/// Separator and placeholder convention shared by all replacers.
///
/// # Example
///
/// ```
/// use cardinal::SegmentConfig;
///
/// let http = SegmentConfig::http();
/// assert_eq!(http.separator(), "/");
/// assert!(http.has_leading_separator());
/// assert_eq!(http.format_placeholder("id"), ":id");
///
/// let bus = SegmentConfig::bus();
/// assert_eq!(bus.separator(), ".");
/// assert!(!bus.has_leading_separator());
/// assert_eq!(bus.format_placeholder("id"), "{id}");
/// ```
#[derive(Debug, Clone)]
pub struct SegmentConfig {
    separator: String,
    leading_separator: bool,
    placeholder: PlaceholderSyntax,
}

impl SegmentConfig {
    /// Create a config.
    ///
    /// # Errors
    ///
    /// Returns [`CardinalityError::EmptySeparator`] if `separator` is empty.
    pub fn new(
        separator: impl Into<String>,
        leading_separator: bool,
        placeholder: PlaceholderSyntax,
    ) -> Result<Self, CardinalityError> {
        let separator = separator.into();
        if separator.is_empty() {
            return Err(CardinalityError::EmptySeparator);
        }

        Ok(Self {
            separator,
            leading_separator,
            placeholder,
        })
    }

    /// HTTP paths: `/` separator, leading separator, `:name` placeholders.
    #[must_use]
    pub fn http() -> Self {
        Self {
            separator: "/".into(),
            leading_separator: true,
            placeholder: PlaceholderSyntax::colon(),
        }
    }

    /// Bus subjects: `.` separator, no leading separator, `{name}` placeholders.
    #[must_use]
    pub fn bus() -> Self {
        Self {
            separator: ".".into(),
            leading_separator: false,
            placeholder: PlaceholderSyntax::braces(),
        }
    }

    /// The segment separator.
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Whether serialized output starts with the separator.
    #[must_use]
    pub fn has_leading_separator(&self) -> bool {
        self.leading_separator
    }

    /// The placeholder convention.
    #[must_use]
    pub fn placeholder(&self) -> &PlaceholderSyntax {
        &self.placeholder
    }

    /// Returns `true` if `segment` is a placeholder token.
    #[must_use]
    pub fn is_placeholder(&self, segment: &str) -> bool {
        self.placeholder.is_placeholder(segment)
    }

    /// Format a logical name as a placeholder token.
    #[must_use]
    pub fn format_placeholder(&self, name: &str) -> String {
        self.placeholder.format(name)
    }

    /// Split a path into segments after trimming one leading separator.
    ///
    /// An empty path yields a single empty segment.
    pub(crate) fn split<'a>(&self, path: &'a str) -> Vec<&'a str> {
        let path = path.strip_prefix(self.separator.as_str()).unwrap_or(path);
        path.split(self.separator.as_str()).collect()
    }

    /// Join segments, prefixing one separator iff the config has a leading separator.
    pub(crate) fn join<S: AsRef<str>>(&self, segments: &[S]) -> String {
        let capacity = segments.iter().map(|s| s.as_ref().len() + self.separator.len()).sum();
        let mut out = String::with_capacity(capacity);

        for (i, segment) in segments.iter().enumerate() {
            if i > 0 || self.leading_separator {
                out.push_str(&self.separator);
            }
            out.push_str(segment.as_ref());
        }

        out
    }
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self::http()
    }
}
