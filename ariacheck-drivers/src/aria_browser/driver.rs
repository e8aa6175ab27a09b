use crate::aria_browser::{
    launch::{build_capabilities, LaunchProfile},
    page::AriaPage,
};
use anyhow::{Context, Result};
use fantoccini::ClientBuilder;
use tracing::info;

/// Launches browser sessions against a running WebDriver service.
pub struct AriaDriver {
    webdriver_url: String,
    profile: LaunchProfile,
}

impl AriaDriver {
    /// Describe a driver for the WebDriver service at `webdriver_url`
    /// (chromedriver listens on `http://localhost:9515` by default).
    pub fn new(webdriver_url: impl Into<String>, profile: LaunchProfile) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
            profile,
        }
    }

    /// Start a fresh browser session and return its page.
    ///
    /// The caller owns the page and must [`close`](crate::PageSession::close) it.
    pub async fn launch(&self) -> Result<AriaPage> {
        let caps = build_capabilities(&self.profile);

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&self.webdriver_url)
            .await
            .with_context(|| {
                format!(
                    "failed to start a browser session via {}",
                    self.webdriver_url
                )
            })?;

        info!(
            target: "ariacheck.browser",
            webdriver = %self.webdriver_url,
            headless = self.profile.headless,
            locale = %self.profile.locale,
            "browser session started"
        );
        Ok(AriaPage::new(client))
    }
}
