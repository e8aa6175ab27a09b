//! Accessibility verification of the call screen.
//!
//! A run drives one [`PageSession`](ariacheck_drivers::PageSession) through a
//! fixed sequence: navigate, wait for the onboarding overlay, assert the ARIA
//! attributes in [`checklist::CHECKLIST`], screenshot, dismiss the overlay and
//! screenshot again. [`runner::Checker`] owns that sequence and guarantees the
//! session is closed on every exit path.
//!
//! - [`checklist`]: the declarative attribute checks and fixed selectors
//! - [`wait`]: polling for element visibility transitions
//! - [`assertion`]: exact-match attribute assertions
//! - [`runner`]: the guarded procedure
//! - [`report`]: summary of a passing run
pub mod assertion;
pub mod checklist;
pub mod report;
pub mod runner;
pub mod wait;

pub use report::RunReport;
pub use runner::Checker;
