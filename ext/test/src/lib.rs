//! cardinal-test: conformance fixtures for the cardinal replacers
//!
//! Fixtures are YAML documents that pair a [`CardinalityConfig`] with input
//! paths and the reduced output each one must produce. The same files can be
//! fed to any implementation of the reduction rules.
//!
//! # Example
//!
//! ```
//! use cardinal_test::Fixture;
//!
//! let fixture = Fixture::from_yaml(r#"
//! name: numeric ids
//! config:
//!   stages:
//!     - type: auto
//! cases:
//!   - name: id segment
//!     input: /user/42
//!     expect: /user/:id
//! "#).unwrap();
//!
//! fixture.run_and_assert();
//! ```

pub mod fixture;

pub use fixture::{Case, CaseResult, Fixture};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{Case, CaseResult, Fixture};
    pub use cardinal::prelude::*;
}
