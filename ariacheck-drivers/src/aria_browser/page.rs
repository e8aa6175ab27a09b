use crate::aria_browser::{
    probe::{parse_document_size, parse_visibility, DomScripts},
    session::{ElementVisibility, PageSession},
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use fantoccini::{Client, Locator};
use serde_json::json;
use tracing::{debug, warn};

/// Browser page backed by a `fantoccini` WebDriver client.
pub struct AriaPage {
    pub(crate) client: Client,
}

impl AriaPage {
    /// Construct a page wrapper around an existing WebDriver client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageSession for AriaPage {
    async fn goto(&self, url: &str) -> Result<()> {
        self.client
            .goto(url)
            .await
            .with_context(|| format!("failed to navigate to {url}"))?;
        debug!(target: "ariacheck.browser", %url, "navigation complete");
        Ok(())
    }

    async fn visibility(&self, selector: &str) -> Result<ElementVisibility> {
        let value = self
            .client
            .execute(DomScripts::visibility_probe(), vec![json!(selector)])
            .await
            .with_context(|| format!("visibility probe failed for `{selector}`"))?;
        parse_visibility(&value)
    }

    async fn attribute_values(
        &self,
        selector: &str,
        attribute: &str,
    ) -> Result<Vec<Option<String>>> {
        let elements = self
            .client
            .find_all(Locator::Css(selector))
            .await
            .with_context(|| format!("failed to query `{selector}`"))?;

        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            let value = element
                .attr(attribute)
                .await
                .with_context(|| format!("failed to read {attribute} of `{selector}`"))?;
            values.push(value);
        }
        Ok(values)
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let element = self
            .client
            .find(Locator::Css(selector))
            .await
            .with_context(|| format!("no element to click for `{selector}`"))?;
        element
            .click()
            .await
            .with_context(|| format!("click on `{selector}` failed"))?;
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        let (orig_w, orig_h) = self
            .client
            .get_window_size()
            .await
            .context("failed to read window size")?;
        let size = self
            .client
            .execute(DomScripts::document_size(), vec![])
            .await
            .context("failed to measure document")?;
        let (width, height) = parse_document_size(&size)?;

        self.client
            .set_window_size(width, height)
            .await
            .context("failed to resize window for full-page capture")?;
        let png = self.client.screenshot().await.context("screenshot failed");

        if let Err(e) = self
            .client
            .set_window_size(orig_w as u32, orig_h as u32)
            .await
        {
            warn!(target: "ariacheck.browser", error = %e, "failed to restore window size");
        }
        png
    }

    async fn close(self) -> Result<()> {
        self.client
            .close()
            .await
            .context("failed to close WebDriver session")?;
        Ok(())
    }
}
