//! Driver layer for browser automation.
//!
//! This crate owns the WebDriver session used by a verification run and the
//! page helpers the checker drives it through.
//!
//! - [`aria_browser::driver::AriaDriver`]: launches a headless Chrome session
//! - [`aria_browser::page::AriaPage`]: fantoccini-backed [`PageSession`]
//! - [`aria_browser::session::PageSession`]: the seam the checker is written against
//! - [`aria_browser::launch`]: Chrome arguments and capabilities
//! - [`aria_browser::probe`]: in-page scripts and their decoded results
pub mod aria_browser;

pub use aria_browser::session::{ElementVisibility, PageSession};
