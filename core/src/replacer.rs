//! `Replacer`: the uniform path → path contract
//!
//! Both the [`AutoReplacer`](crate::AutoReplacer) and the
//! [`RuleReplacer`](crate::RuleReplacer) implement [`Replacer`]. A
//! [`ReplacerList`] chains several of them, feeding the output of one into the next.

use std::fmt;
use std::sync::Arc;

/// Rewrites a path into its low-cardinality form.
///
/// Implementations are total: they never fail and never block. A path that
/// cannot be classified is returned unchanged.
///
/// # Thread Safety
///
/// Replacers are built once and shared by every request handler, so all
/// implementations must be `Send + Sync`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Replacer`",
    label = "this type cannot rewrite paths",
    note = "implement `replace(&self, path: &str) -> String`, or wrap a closure in `FnReplacer`"
)]
pub trait Replacer: Send + Sync + fmt::Debug {
    /// Rewrite `path`.
    fn replace(&self, path: &str) -> String;
}

impl<R: Replacer + ?Sized> Replacer for Box<R> {
    fn replace(&self, path: &str) -> String {
        (**self).replace(path)
    }
}

impl<R: Replacer + ?Sized> Replacer for Arc<R> {
    fn replace(&self, path: &str) -> String {
        (**self).replace(path)
    }
}

/// A [`Replacer`] backed by a closure.
///
/// The name only shows up in `Debug` output.
///
/// # Example
///
/// ```
/// use cardinal::{FnReplacer, Replacer};
///
/// let lower = FnReplacer::new("lowercase", |path| path.to_lowercase());
/// assert_eq!(lower.replace("/Users/ME"), "/users/me");
/// ```
pub struct FnReplacer<F> {
    name: &'static str,
    f: F,
}

impl<F> FnReplacer<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    /// Wrap `f` under the given name.
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<F> Replacer for FnReplacer<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn replace(&self, path: &str) -> String {
        (self.f)(path)
    }
}

impl<F> fmt::Debug for FnReplacer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnReplacer").field(&self.name).finish()
    }
}

/// Ordered chain of replacers.
///
/// [`apply`](Self::apply) folds the path through every member in declaration
/// order. There is no early exit: every member always runs.
///
/// # Example
///
/// ```
/// use cardinal::{AutoReplacer, ReplacerList, RuleReplacer};
///
/// let list = ReplacerList::new()
///     .with(AutoReplacer::http())
///     .with(RuleReplacer::new(["/:service/:action/:id"]).unwrap());
///
/// assert_eq!(list.apply("/player/update/123"), "/:service/:action/:id");
/// ```
#[derive(Debug, Default)]
pub struct ReplacerList {
    replacers: Vec<Box<dyn Replacer>>,
}

impl ReplacerList {
    /// Create an empty list. Applying it returns the input unchanged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a replacer (builder style).
    #[must_use]
    pub fn with(mut self, replacer: impl Replacer + 'static) -> Self {
        self.push(replacer);
        self
    }

    /// Append a replacer.
    pub fn push(&mut self, replacer: impl Replacer + 'static) {
        self.replacers.push(Box::new(replacer));
    }

    /// Thread `path` through every replacer in order.
    #[must_use]
    pub fn apply(&self, path: &str) -> String {
        let mut current = path.to_owned();
        for replacer in &self.replacers {
            current = replacer.replace(&current);
        }
        current
    }

    /// Number of replacers in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.replacers.len()
    }

    /// Returns `true` if the chain is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.replacers.is_empty()
    }
}

impl Replacer for ReplacerList {
    fn replace(&self, path: &str) -> String {
        self.apply(path)
    }
}

impl FromIterator<Box<dyn Replacer>> for ReplacerList {
    fn from_iter<I: IntoIterator<Item = Box<dyn Replacer>>>(iter: I) -> Self {
        Self {
            replacers: iter.into_iter().collect(),
        }
    }
}
