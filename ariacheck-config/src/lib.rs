//! Loader for run configuration with YAML + environment overlays.
//!
//! Every field has a default, so an empty configuration reproduces the fixed
//! verification run: `http://localhost:5173` through chromedriver on
//! `http://localhost:9515`, screenshots under `verification/`.
//!
//! Precedence, lowest first: built-in defaults, YAML file or inline YAML,
//! `ARIACHECK__`-prefixed environment variables (`__` separates nested keys,
//! e.g. `ARIACHECK__TIMEOUTS__WAIT_MS=10000`). `${VAR}` placeholders in string
//! values are expanded after merging.
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "ARIACHECK";

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error(transparent)]
    Source(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Page under verification.
    pub target_url: String,
    /// WebDriver endpoint (chromedriver).
    pub webdriver_url: String,
    pub headless: bool,
    /// Browser UI language; the expected labels are Spanish.
    pub locale: String,
    pub window: WindowSize,
    /// Directory receiving the onboarding, main UI and error screenshots.
    pub screenshot_dir: PathBuf,
    pub failure_mode: FailureMode,
    pub timeouts: Timeouts,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            target_url: "http://localhost:5173".into(),
            webdriver_url: "http://localhost:9515".into(),
            headless: true,
            locale: "es-ES".into(),
            window: WindowSize::default(),
            screenshot_dir: PathBuf::from("verification"),
            failure_mode: FailureMode::default(),
            timeouts: Timeouts::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// What happens after the first failing check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Abort the run on the first mismatch.
    #[default]
    FailFast,
    /// Evaluate every check, then fail once with all mismatches.
    CollectAll,
}

/// Wait budgets, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    /// Budget for visibility transitions and navigation readiness.
    pub wait_ms: u64,
    /// Budget for an attribute to reach its expected value.
    pub expect_ms: u64,
    /// Interval between DOM probes.
    pub poll_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            wait_ms: 30_000,
            expect_ms: 5_000,
            poll_ms: 100,
        }
    }
}

impl Timeouts {
    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }

    pub fn expect(&self) -> Duration {
        Duration::from_millis(self.expect_ms)
    }

    pub fn poll(&self) -> Duration {
        Duration::from_millis(self.poll_ms)
    }
}

impl CheckerConfig {
    /// Reject values the run cannot work with.
    ///
    /// ```
    /// use ariacheck_config::CheckerConfig;
    ///
    /// let mut cfg = CheckerConfig::default();
    /// assert!(cfg.validate().is_ok());
    ///
    /// cfg.target_url = "file:///tmp/index.html".into();
    /// assert!(cfg.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        check_http_url("target_url", &self.target_url)?;
        check_http_url("webdriver_url", &self.webdriver_url)?;
        if self.timeouts.poll_ms == 0 {
            return Err(ConfigLoadError::Invalid(
                "timeouts.poll_ms must be greater than zero".into(),
            ));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigLoadError::Invalid(format!(
                "window must be non-empty, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if self.locale.trim().is_empty() {
            return Err(ConfigLoadError::Invalid("locale must not be empty".into()));
        }
        Ok(())
    }
}

fn check_http_url(field: &str, raw: &str) -> Result<(), ConfigLoadError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigLoadError::Invalid(format!("{field} `{raw}` is not a URL: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigLoadError::Invalid(format!(
            "{field} must use http or https, got `{other}`"
        ))),
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (YAML + env overrides).
pub struct CheckerConfigLoader {
    files: Vec<(PathBuf, bool)>,
    inline: Vec<String>,
}

impl Default for CheckerConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckerConfigLoader {
    /// Start from defaults with `ARIACHECK__` env overrides.
    ///
    /// ```
    /// use ariacheck_config::{CheckerConfig, CheckerConfigLoader};
    ///
    /// let cfg = CheckerConfigLoader::new().load().expect("defaults load");
    /// assert_eq!(cfg.screenshot_dir, CheckerConfig::default().screenshot_dir);
    /// ```
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            inline: Vec::new(),
        }
    }

    /// Attach a YAML file that must exist.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.files.push((path.as_ref().to_path_buf(), true));
        self
    }

    /// Attach a YAML file that is skipped when missing.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.files.push((path.as_ref().to_path_buf(), false));
        self
    }

    /// Merge an inline YAML snippet.
    ///
    /// ```
    /// use ariacheck_config::{CheckerConfigLoader, FailureMode};
    ///
    /// let cfg = CheckerConfigLoader::new()
    ///     .with_yaml_str("failure_mode: collect_all\ntimeouts:\n  expect_ms: 250\n")
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.failure_mode, FailureMode::CollectAll);
    /// assert_eq!(cfg.timeouts.expect_ms, 250);
    /// assert_eq!(cfg.timeouts.wait_ms, 30_000);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.inline.push(yaml.to_string());
        self
    }

    /// Merge all sources, expand `${VAR}` placeholders, deserialize and validate.
    pub fn load(self) -> Result<CheckerConfig, ConfigLoadError> {
        let mut builder = Config::builder();
        for (path, required) in &self.files {
            builder = builder.add_source(File::from(path.as_path()).required(*required));
        }
        for yaml in &self.inline {
            builder = builder.add_source(File::from_str(yaml, config::FileFormat::Yaml));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let mut v: Value = builder.build()?.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: CheckerConfig = serde_json::from_value(v)
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        typed.validate()?;
        Ok(typed)
    }
}
