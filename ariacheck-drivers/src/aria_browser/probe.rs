use crate::aria_browser::session::ElementVisibility;
use anyhow::{anyhow, Result};
use serde_json::Value;

/// Largest dimension a full-page capture resizes the window to.
pub const MAX_CAPTURE_DIMENSION: u32 = 16_384;

/// JavaScript executed in the page to observe DOM state.
pub struct DomScripts;

impl DomScripts {
    /// Returns `null` when nothing matches `arguments[0]`, otherwise whether
    /// the first match is rendered. Opacity is ignored.
    pub fn visibility_probe() -> &'static str {
        r#"
            const el = document.querySelector(arguments[0]);
            if (!el) return null;
            const style = window.getComputedStyle(el);
            if (style.visibility === 'hidden' || style.visibility === 'collapse') return false;
            const rect = el.getBoundingClientRect();
            return rect.width > 0 && rect.height > 0;
        "#
    }

    /// Returns `[width, height]` of the scrollable document.
    pub fn document_size() -> &'static str {
        r#"
            const d = document.documentElement;
            const b = document.body || d;
            return [
                Math.max(d.scrollWidth, b.scrollWidth, d.clientWidth),
                Math.max(d.scrollHeight, b.scrollHeight, d.clientHeight)
            ];
        "#
    }
}

/// Decode the result of [`DomScripts::visibility_probe`].
pub fn parse_visibility(value: &Value) -> Result<ElementVisibility> {
    match value {
        Value::Null => Ok(ElementVisibility::Detached),
        Value::Bool(true) => Ok(ElementVisibility::Visible),
        Value::Bool(false) => Ok(ElementVisibility::Hidden),
        other => Err(anyhow!("unexpected visibility probe result: {other}")),
    }
}

/// Decode the result of [`DomScripts::document_size`], clamped to
/// `1..=MAX_CAPTURE_DIMENSION` on both axes.
pub fn parse_document_size(value: &Value) -> Result<(u32, u32)> {
    let dims = value
        .as_array()
        .filter(|a| a.len() == 2)
        .ok_or_else(|| anyhow!("unexpected document size result: {value}"))?;
    let dim = |v: &Value| -> Result<u32> {
        let n = v
            .as_f64()
            .ok_or_else(|| anyhow!("document dimension is not a number: {v}"))?;
        Ok(n.ceil().clamp(1.0, MAX_CAPTURE_DIMENSION as f64) as u32)
    };
    Ok((dim(&dims[0])?, dim(&dims[1])?))
}
