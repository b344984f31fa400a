//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs them against the cardinal pipeline.

use cardinal::{CardinalityConfig, CardinalityError, Replacer};
use serde::Deserialize;

/// A complete test fixture
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub config: CardinalityConfig,
    #[serde(default)]
    pub cases: Vec<Case>,
    /// When set, building `config` must fail with a message containing this text.
    #[serde(default)]
    pub expect_error: Option<String>,
}

/// Test case: one input path and its expected reduction
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Case {
    pub name: String,
    pub input: String,
    pub expect: String,
}

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: String,
    pub actual: String,
    /// `actual` reduced once more. Differs from `actual` when the pipeline is not idempotent.
    pub reapplied: String,
}

impl CaseResult {
    /// Whether reducing the output again leaves it unchanged.
    pub fn is_stable(&self) -> bool {
        self.reapplied == self.actual
    }

    fn failure_message(&self, fixture: &str) -> String {
        let mut message = format!(
            "Fixture '{fixture}' case '{}' failed: expected {:?}, got {:?}",
            self.case_name, self.expected, self.actual
        );
        if !self.is_stable() {
            message.push_str(&format!(", which reduces again to {:?}", self.reapplied));
        }
        message
    }
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Build the pipeline and run all test cases.
    ///
    /// Every case also checks idempotence: reducing the output again must
    /// give the same output.
    pub fn run(&self) -> Result<Vec<CaseResult>, CardinalityError> {
        let pipeline = self.config.build()?;
        Ok(self
            .cases
            .iter()
            .map(|case| {
                let actual = pipeline.replace(&case.input);
                let reapplied = pipeline.replace(&actual);
                CaseResult {
                    case_name: case.name.clone(),
                    passed: actual == case.expect && reapplied == actual,
                    expected: case.expect.clone(),
                    actual,
                    reapplied,
                }
            })
            .collect())
    }

    /// Run all test cases and panic on first failure
    pub fn run_and_assert(&self) {
        match (self.run(), &self.expect_error) {
            (Ok(results), None) => {
                for result in results {
                    assert!(result.passed, "{}", result.failure_message(&self.name));
                }
            }
            (Err(err), Some(expected)) => {
                let message = err.to_string();
                assert!(
                    message.contains(expected.as_str()),
                    "Fixture '{}' failed with {message:?}, expected an error containing {expected:?}",
                    self.name
                );
            }
            (Ok(_), Some(expected)) => {
                panic!(
                    "Fixture '{}' built successfully, expected an error containing {expected:?}",
                    self.name
                );
            }
            (Err(err), None) => {
                panic!("Fixture '{}' failed to build: {err}", self.name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_multi() {
        let yaml = r"
name: first
cases:
  - name: untouched
    input: /a
    expect: /a
---
name: second
config:
  stages:
    - type: rules
      rules: ['/main']
expect_error: no placeholder
";
        let fixtures = Fixture::from_yaml_multi(yaml).unwrap();
        assert_eq!(fixtures.len(), 2);
        assert_eq!(fixtures[1].expect_error.as_deref(), Some("no placeholder"));
        for fixture in &fixtures {
            fixture.run_and_assert();
        }
    }

    #[test]
    fn failing_case_reported() {
        let fixture = Fixture::from_yaml(
            r"
name: wrong expectation
config:
  stages:
    - type: auto
cases:
  - name: id
    input: /user/1
    expect: /user/1
",
        )
        .unwrap();
        let results = fixture.run().unwrap();
        assert!(!results[0].passed);
        assert_eq!(results[0].actual, "/user/:id");
    }

    // Bus subjects starting with `/` are URL-classified, and the custom
    // placeholder `/name` starts with `/`, so the rule output reduces again.
    const UNSTABLE: &str = r"
name: unstable pipeline
config:
  segment:
    preset: bus
    placeholder: { open: /, close: '' }
  stages:
    - type: auto
    - type: rules
      rules: ['/kind.created']
cases:
  - name: rule output is a url subject
    input: a.created
    expect: /kind.created
";

    #[test]
    fn unstable_case_reports_reapplied_output() {
        let fixture = Fixture::from_yaml(UNSTABLE).unwrap();
        let results = fixture.run().unwrap();
        let result = &results[0];
        assert_eq!(result.actual, result.expected);
        assert_eq!(result.reapplied, "/url");
        assert!(!result.is_stable());
        assert!(!result.passed);
        assert_eq!(
            result.failure_message(&fixture.name),
            "Fixture 'unstable pipeline' case 'rule output is a url subject' failed: \
             expected \"/kind.created\", got \"/kind.created\", which reduces again to \"/url\""
        );
    }

    #[test]
    #[should_panic(expected = "which reduces again to")]
    fn unstable_case_panics() {
        Fixture::from_yaml(UNSTABLE).unwrap().run_and_assert();
    }

    #[test]
    fn stable_failure_message_has_no_reapplied_output() {
        let fixture = Fixture::from_yaml(
            "name: f\nconfig:\n  stages:\n    - type: auto\ncases:\n  - { name: id, input: /u/1, expect: /u/1 }\n",
        )
        .unwrap();
        let result = &fixture.run().unwrap()[0];
        assert!(result.is_stable());
        assert_eq!(
            result.failure_message(&fixture.name),
            "Fixture 'f' case 'id' failed: expected \"/u/1\", got \"/u/:id\""
        );
    }

    #[test]
    #[should_panic(expected = "built successfully")]
    fn missing_error_panics() {
        Fixture::from_yaml("name: ok\nexpect_error: boom\n")
            .unwrap()
            .run_and_assert();
    }

    #[test]
    fn unknown_case_field_rejected() {
        let yaml = "name: x\ncases:\n  - name: a\n    input: /a\n    output: /a\n";
        assert!(Fixture::from_yaml(yaml).is_err());
    }
}
