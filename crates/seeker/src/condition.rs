//! Condition combinators for element search.
//!
//! A [`Condition`] is an explicit expression tree: leaves test one property
//! of a node, `And`/`Or` nodes combine sub-conditions. Each sub-condition's
//! combination semantics is fixed at the point it was added; reusing a
//! condition value never mutates it, combinators return new values.
//!
//! The `Display` rendering is the human-readable description embedded in
//! not-found diagnostics. It is never parsed back.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::errors::AutomationError;
use crate::node::UiNode;

/// String comparison modes for property tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StringMatch {
    #[default]
    Exact,
    ExactIgnoreCase,
    Contains,
    ContainsIgnoreCase,
    StartsWith,
    StartsWithIgnoreCase,
    EndsWith,
    EndsWithIgnoreCase,
}

impl StringMatch {
    /// Does `candidate` match `expected` under this mode?
    pub fn matches(&self, candidate: &str, expected: &str) -> bool {
        match self {
            StringMatch::Exact => candidate == expected,
            StringMatch::ExactIgnoreCase => candidate.to_lowercase() == expected.to_lowercase(),
            StringMatch::Contains => candidate.contains(expected),
            StringMatch::ContainsIgnoreCase => candidate
                .to_lowercase()
                .contains(&expected.to_lowercase()),
            StringMatch::StartsWith => candidate.starts_with(expected),
            StringMatch::StartsWithIgnoreCase => candidate
                .to_lowercase()
                .starts_with(&expected.to_lowercase()),
            StringMatch::EndsWith => candidate.ends_with(expected),
            StringMatch::EndsWithIgnoreCase => candidate
                .to_lowercase()
                .ends_with(&expected.to_lowercase()),
        }
    }
}

impl fmt::Display for StringMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            StringMatch::Exact => "equals",
            StringMatch::ExactIgnoreCase => "equals (ignore case)",
            StringMatch::Contains => "contains",
            StringMatch::ContainsIgnoreCase => "contains (ignore case)",
            StringMatch::StartsWith => "starts with",
            StringMatch::StartsWithIgnoreCase => "starts with (ignore case)",
            StringMatch::EndsWith => "ends with",
            StringMatch::EndsWithIgnoreCase => "ends with (ignore case)",
        };
        f.write_str(text)
    }
}

type PredicateFn = Arc<dyn Fn(&UiNode) -> bool + Send + Sync>;

/// A composed boolean test over a node, with a human-readable description.
#[derive(Clone)]
pub enum Condition {
    Name {
        expected: String,
        mode: StringMatch,
    },
    AutomationId {
        expected: String,
        mode: StringMatch,
    },
    ClassName {
        expected: String,
        mode: StringMatch,
    },
    /// An arbitrary caller-supplied test with a description for diagnostics.
    Predicate {
        description: String,
        test: PredicateFn,
    },
    /// All sub-conditions must match.
    And(Vec<Condition>),
    /// At least one sub-condition must match.
    Or(Vec<Condition>),
    /// A condition built from unusable input, with the reason. Searching
    /// with it fails immediately with `InvalidCondition`.
    Invalid(String),
}

impl Condition {
    /// Test the element name for exact equality.
    pub fn by_name(expected: impl Into<String>) -> Self {
        Self::by_name_matching(StringMatch::Exact, expected)
    }

    pub fn by_name_matching(mode: StringMatch, expected: impl Into<String>) -> Self {
        match non_blank(expected.into(), "name") {
            Ok(expected) => Condition::Name { expected, mode },
            Err(reason) => Condition::Invalid(reason),
        }
    }

    /// Test the automation id for exact equality.
    pub fn by_automation_id(expected: impl Into<String>) -> Self {
        Self::by_automation_id_matching(StringMatch::Exact, expected)
    }

    pub fn by_automation_id_matching(mode: StringMatch, expected: impl Into<String>) -> Self {
        match non_blank(expected.into(), "automation id") {
            Ok(expected) => Condition::AutomationId { expected, mode },
            Err(reason) => Condition::Invalid(reason),
        }
    }

    /// Test the class name for exact equality.
    pub fn by_class_name(expected: impl Into<String>) -> Self {
        Self::by_class_name_matching(StringMatch::Exact, expected)
    }

    pub fn by_class_name_matching(mode: StringMatch, expected: impl Into<String>) -> Self {
        match non_blank(expected.into(), "class name") {
            Ok(expected) => Condition::ClassName { expected, mode },
            Err(reason) => Condition::Invalid(reason),
        }
    }

    /// Test with an arbitrary function over the node. The description is
    /// only used in diagnostics.
    pub fn by_predicate(
        description: impl Into<String>,
        test: impl Fn(&UiNode) -> bool + Send + Sync + 'static,
    ) -> Self {
        let description = description.into();
        let description = if description.trim().is_empty() {
            "<predicate>".to_string()
        } else {
            description
        };
        Condition::Predicate {
            description,
            test: Arc::new(test),
        }
    }

    /// Combine with another condition; both must match. Same-operator
    /// operands are flattened so `a.and(b).and(c)` is one three-way `And`.
    pub fn and(self, other: Condition) -> Condition {
        match (self, other) {
            (Condition::And(mut left), Condition::And(right)) => {
                left.extend(right);
                Condition::And(left)
            }
            (Condition::And(mut left), right) => {
                left.push(right);
                Condition::And(left)
            }
            (left, Condition::And(mut right)) => {
                right.insert(0, left);
                Condition::And(right)
            }
            (left, right) => Condition::And(vec![left, right]),
        }
    }

    /// Combine with another condition; either may match.
    pub fn or(self, other: Condition) -> Condition {
        match (self, other) {
            (Condition::Or(mut left), Condition::Or(right)) => {
                left.extend(right);
                Condition::Or(left)
            }
            (Condition::Or(mut left), right) => {
                left.push(right);
                Condition::Or(left)
            }
            (left, Condition::Or(mut right)) => {
                right.insert(0, left);
                Condition::Or(right)
            }
            (left, right) => Condition::Or(vec![left, right]),
        }
    }

    /// Fail fast if any part of the expression was built from bad input.
    /// Called at the top of every search, before the polling loop starts.
    pub(crate) fn validate(&self) -> Result<(), AutomationError> {
        match self {
            Condition::Invalid(reason) => {
                Err(AutomationError::InvalidCondition(reason.clone()))
            }
            Condition::And(parts) | Condition::Or(parts) => {
                for part in parts {
                    part.validate()?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Evaluate against a live node. Property reads on a dying node
    /// propagate `ElementNotAvailable`; the search engine treats that as
    /// no-match for the node.
    pub fn evaluate(&self, node: &UiNode) -> Result<bool, AutomationError> {
        match self {
            Condition::Name { expected, mode } => Ok(mode.matches(&node.name()?, expected)),
            Condition::AutomationId { expected, mode } => {
                Ok(mode.matches(&node.automation_id()?, expected))
            }
            Condition::ClassName { expected, mode } => {
                Ok(mode.matches(&node.class_name()?, expected))
            }
            Condition::Predicate { test, .. } => Ok(test(node)),
            Condition::And(parts) => {
                for part in parts {
                    if !part.evaluate(node)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Condition::Or(parts) => {
                for part in parts {
                    if part.evaluate(node)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Condition::Invalid(reason) => {
                Err(AutomationError::InvalidCondition(reason.clone()))
            }
        }
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>, nested: bool) -> fmt::Result {
        match self {
            Condition::Name { expected, mode } => write!(f, "name {mode} \"{expected}\""),
            Condition::AutomationId { expected, mode } => {
                write!(f, "automation id {mode} \"{expected}\"")
            }
            Condition::ClassName { expected, mode } => {
                write!(f, "class name {mode} \"{expected}\"")
            }
            Condition::Predicate { description, .. } => f.write_str(description),
            Condition::And(parts) => describe_group(f, parts, " AND ", nested),
            Condition::Or(parts) => describe_group(f, parts, " OR ", nested),
            Condition::Invalid(reason) => write!(f, "<invalid: {reason}>"),
        }
    }
}

fn describe_group(
    f: &mut fmt::Formatter<'_>,
    parts: &[Condition],
    joiner: &str,
    nested: bool,
) -> fmt::Result {
    if nested {
        f.write_str("(")?;
    }
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            f.write_str(joiner)?;
        }
        part.describe(f, true)?;
    }
    if nested {
        f.write_str(")")?;
    }
    Ok(())
}

fn non_blank(value: String, what: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        Err(format!("{what} condition built from a blank string"))
    } else {
        Ok(value)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.describe(f, false)
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Condition({self})")
    }
}
