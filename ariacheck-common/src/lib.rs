//! Common types and utilities shared across ariacheck crates.
//!
//! This crate defines the error taxonomy of a verification run and the
//! observability helpers used by the binary and by integration tests. It stays
//! dependency‑light so every other crate can depend on it.
//!
//! # Overview
//!
//! - [`CheckError`] and [`Result`]: shared error handling
//! - [`AssertionFailure`]: one attribute that did not match its expected literal
//! - [`WaitState`]: the element states a run can suspend on
//! - [`observability`]: centralised tracing/logging initialisation
//!
//! # Examples
//!
//! ```rust
//! use ariacheck_common::{AssertionFailure, CheckError};
//!
//! let err = CheckError::Assertion(AssertionFailure {
//!     check: "do-not-disturb toggle".into(),
//!     selector: "#dnd-toggle".into(),
//!     attribute: "aria-label".into(),
//!     expected: "Activar modo No Molestar".into(),
//!     actual: Some("activar modo no molestar".into()),
//! });
//! assert!(err.to_string().contains("#dnd-toggle"));
//! ```
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub mod observability;

/// Element state a run waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitState {
    /// Attached to the document and rendered with a non-empty box.
    Visible,
    /// Not rendered, or no longer attached to the document.
    Hidden,
}

impl fmt::Display for WaitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitState::Visible => f.write_str("visible"),
            WaitState::Hidden => f.write_str("hidden"),
        }
    }
}

/// An observed attribute value that differs from the expected literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionFailure {
    /// Human name of the check the attribute belongs to.
    pub check: String,
    pub selector: String,
    pub attribute: String,
    pub expected: String,
    /// `None` when the element or the attribute was absent.
    pub actual: Option<String>,
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.actual {
            Some(actual) => write!(
                f,
                "{}: `{}` [{}] expected {:?}, found {:?}",
                self.check, self.selector, self.attribute, self.expected, actual
            ),
            None => write!(
                f,
                "{}: `{}` [{}] expected {:?}, attribute absent",
                self.check, self.selector, self.attribute, self.expected
            ),
        }
    }
}

/// Error types raised by a verification run.
#[derive(thiserror::Error, Debug)]
pub enum CheckError {
    /// An element never reached the required state within the wait budget.
    #[error("Timed out after {waited:?} waiting for `{selector}` to become {state}")]
    Readiness {
        selector: String,
        state: WaitState,
        waited: Duration,
    },

    /// An attribute did not match its expected literal.
    #[error("Assertion failed: {0}")]
    Assertion(AssertionFailure),

    /// Several checks failed; only produced when failures are collected.
    #[error("{} assertions failed: {}", .0.len(), join_failures(.0))]
    Assertions(Vec<AssertionFailure>),

    /// A strict selector resolved to more than one element.
    #[error("Selector `{selector}` is ambiguous: {matches} elements matched")]
    Ambiguous { selector: String, matches: usize },

    /// The browser, WebDriver server or file system reported an error.
    #[error("Driver error: {0}")]
    Driver(#[from] anyhow::Error),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The run was aborted by an external shutdown signal.
    #[error("Run interrupted")]
    Interrupted,
}

fn join_failures(failures: &[AssertionFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenient alias for results that use [`CheckError`].
pub type Result<T> = std::result::Result<T, CheckError>;
