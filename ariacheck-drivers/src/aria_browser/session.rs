use anyhow::Result;
use ariacheck_common::WaitState;
use async_trait::async_trait;

/// Rendering state of the first element matching a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementVisibility {
    /// Attached and rendered with a non-empty box.
    Visible,
    /// Attached but not rendered.
    Hidden,
    /// No element matches the selector.
    Detached,
}

impl ElementVisibility {
    /// Whether this observation satisfies a wait for `state`.
    ///
    /// A detached element counts as hidden.
    pub fn satisfies(self, state: WaitState) -> bool {
        match state {
            WaitState::Visible => self == ElementVisibility::Visible,
            WaitState::Hidden => self != ElementVisibility::Visible,
        }
    }
}

/// One browser page exclusively owned by a verification run.
///
/// Every method is a single round trip; waiting and retrying belong to the
/// caller. [`PageSession::close`] consumes the session so it can only be
/// released once.
#[async_trait]
pub trait PageSession: Send + Sync + Sized {
    /// Navigate and wait for the document to load.
    async fn goto(&self, url: &str) -> Result<()>;

    /// Probe the first element matching `selector`.
    async fn visibility(&self, selector: &str) -> Result<ElementVisibility>;

    /// Read `attribute` from every element matching `selector`, in document
    /// order. An empty vector means nothing matched.
    async fn attribute_values(&self, selector: &str, attribute: &str)
        -> Result<Vec<Option<String>>>;

    /// Click the first element matching `selector`.
    async fn click(&self, selector: &str) -> Result<()>;

    /// Capture the whole document as PNG bytes.
    async fn screenshot(&self) -> Result<Vec<u8>>;

    /// End the browser session.
    async fn close(self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_elements_count_as_hidden() {
        assert!(ElementVisibility::Detached.satisfies(WaitState::Hidden));
        assert!(ElementVisibility::Hidden.satisfies(WaitState::Hidden));
        assert!(!ElementVisibility::Visible.satisfies(WaitState::Hidden));
    }

    #[test]
    fn only_rendered_elements_count_as_visible() {
        assert!(ElementVisibility::Visible.satisfies(WaitState::Visible));
        assert!(!ElementVisibility::Hidden.satisfies(WaitState::Visible));
        assert!(!ElementVisibility::Detached.satisfies(WaitState::Visible));
    }
}
