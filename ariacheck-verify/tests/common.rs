#![allow(dead_code)]

use anyhow::{Result, anyhow};
use ariacheck_config::{CheckerConfig, Timeouts};
use ariacheck_drivers::{ElementVisibility, PageSession};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake";

/// In-memory stand-in for the call screen's DOM.
#[derive(Debug, Clone)]
pub struct FakeDom {
    /// selector -> one attribute map per matching element
    pub elements: HashMap<String, Vec<HashMap<String, String>>>,
    pub onboarding: ElementVisibility,
    /// `.btn-start` is shown while the overlay is; clear to hide it alone.
    pub start_visible: bool,
    pub start_hides_onboarding: bool,
    pub screenshots_fail: bool,
}

impl FakeDom {
    /// A page exposing every label the checklist expects.
    pub fn instrumented() -> Self {
        let mut dom = Self {
            elements: HashMap::new(),
            onboarding: ElementVisibility::Visible,
            start_visible: true,
            start_hides_onboarding: true,
            screenshots_fail: false,
        };
        dom.set("#ringtone-type", "aria-label", "Seleccionar tono de llamada");
        dom.set("#dnd-toggle", "aria-label", "Activar modo No Molestar");
        dom.set("#battery-opt-wrapper", "role", "button");
        dom.set("#battery-opt-wrapper", "tabindex", "0");
        dom.set(
            "#battery-opt-wrapper",
            "aria-label",
            "Solicitar optimización de batería",
        );
        dom.set("#controls-incoming .btn-hangup", "aria-label", "Rechazar llamada");
        dom.set(".btn-answer", "aria-label", "Contestar llamada");
        dom.set("#btn-mute", "aria-label", "Silenciar micrófono");
        dom
    }

    /// Set an attribute on the first element matching `selector`, creating it.
    pub fn set(&mut self, selector: &str, attribute: &str, value: &str) {
        let matches = self.elements.entry(selector.to_string()).or_default();
        if matches.is_empty() {
            matches.push(HashMap::new());
        }
        matches[0].insert(attribute.to_string(), value.to_string());
    }

    pub fn remove(&mut self, selector: &str, attribute: &str) {
        if let Some(matches) = self.elements.get_mut(selector) {
            for element in matches {
                element.remove(attribute);
            }
        }
    }

    /// Add another element matching `selector`, cloned from the first.
    pub fn duplicate(&mut self, selector: &str) {
        let matches = self.elements.entry(selector.to_string()).or_default();
        let copy = matches.first().cloned().unwrap_or_default();
        matches.push(copy);
    }
}

/// Shared view of a [`FakePage`] that outlives the page itself.
#[derive(Clone)]
pub struct FakeHandle {
    pub dom: Arc<Mutex<FakeDom>>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub closes: Arc<AtomicUsize>,
}

impl FakeHandle {
    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn attribute_reads(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.starts_with("attr "))
            .count()
    }
}

pub struct FakePage {
    handle: FakeHandle,
}

impl FakePage {
    pub fn new(dom: FakeDom) -> (Self, FakeHandle) {
        let handle = FakeHandle {
            dom: Arc::new(Mutex::new(dom)),
            calls: Arc::new(Mutex::new(Vec::new())),
            closes: Arc::new(AtomicUsize::new(0)),
        };
        (
            Self {
                handle: handle.clone(),
            },
            handle,
        )
    }

    fn record(&self, call: String) {
        self.handle.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PageSession for FakePage {
    async fn goto(&self, url: &str) -> Result<()> {
        self.record(format!("goto {url}"));
        Ok(())
    }

    async fn visibility(&self, selector: &str) -> Result<ElementVisibility> {
        self.record(format!("visibility {selector}"));
        let dom = self.handle.dom.lock().unwrap();
        Ok(match selector {
            "#onboarding" => dom.onboarding,
            // The start control lives inside the overlay.
            ".btn-start" if dom.start_visible => dom.onboarding,
            ".btn-start" => match dom.onboarding {
                ElementVisibility::Detached => ElementVisibility::Detached,
                _ => ElementVisibility::Hidden,
            },
            other if dom.elements.contains_key(other) => ElementVisibility::Visible,
            _ => ElementVisibility::Detached,
        })
    }

    async fn attribute_values(
        &self,
        selector: &str,
        attribute: &str,
    ) -> Result<Vec<Option<String>>> {
        self.record(format!("attr {selector} {attribute}"));
        let dom = self.handle.dom.lock().unwrap();
        Ok(dom
            .elements
            .get(selector)
            .map(|matches| {
                matches
                    .iter()
                    .map(|element| element.get(attribute).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.record(format!("click {selector}"));
        let mut dom = self.handle.dom.lock().unwrap();
        if selector == ".btn-start" && dom.start_hides_onboarding {
            dom.onboarding = ElementVisibility::Detached;
        }
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        self.record("screenshot".to_string());
        if self.handle.dom.lock().unwrap().screenshots_fail {
            return Err(anyhow!("renderer crashed"));
        }
        Ok(PNG_BYTES.to_vec())
    }

    async fn close(self) -> Result<()> {
        self.record("close".to_string());
        self.handle.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Configuration with short budgets writing screenshots under `dir`.
pub fn test_config(dir: &Path) -> CheckerConfig {
    CheckerConfig {
        screenshot_dir: dir.join("verification"),
        timeouts: Timeouts {
            wait_ms: 200,
            expect_ms: 40,
            poll_ms: 5,
        },
        ..CheckerConfig::default()
    }
}

/// Log sink for [`capture_logs`].
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock().unwrap())
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route `info` and above on the current thread into a buffer until the
/// returned guard drops. Works with the current-thread `#[tokio::test]`.
pub fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    (buffer, tracing::subscriber::set_default(subscriber))
}
