use serde::{Deserialize, Serialize};
use serde_json::json;
use webdriver::capabilities::Capabilities;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// How the browser for a run is started.
pub struct LaunchProfile {
    pub headless: bool,
    /// BCP 47 tag used for the UI language and `Accept-Language`.
    pub locale: String,
    pub window: (u32, u32),
}

impl Default for LaunchProfile {
    fn default() -> Self {
        Self {
            headless: true,
            locale: "es-ES".to_string(),
            window: (1280, 720),
        }
    }
}

/// Construct Chrome command‑line arguments for a launch profile.
pub fn build_chrome_arguments(profile: &LaunchProfile) -> Vec<String> {
    let mut args = vec![
        "--disable-dev-shm-usage".to_string(),
        "--no-sandbox".to_string(),
        "--disable-extensions".to_string(),
        "--disable-infobars".to_string(),
        "--hide-scrollbars".to_string(),
        format!("--window-size={},{}", profile.window.0, profile.window.1),
        format!("--lang={}", profile.locale),
    ];
    if profile.headless {
        args.push("--headless=new".to_string());
        args.push("--disable-gpu".to_string());
    }
    args
}

/// WebDriver capabilities requesting Chrome with [`build_chrome_arguments`].
pub fn build_capabilities(profile: &LaunchProfile) -> Capabilities {
    let mut caps = Capabilities::new();
    caps.insert("browserName".to_string(), json!("chrome"));
    caps.insert(
        "goog:chromeOptions".to_string(),
        json!({
            "args": build_chrome_arguments(profile),
            "prefs": { "intl.accept_languages": profile.locale },
        }),
    );
    caps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_profile_adds_headless_flags() {
        let args = build_chrome_arguments(&LaunchProfile::default());
        assert!(args.contains(&"--headless=new".to_string()));
        assert!(args.contains(&"--lang=es-ES".to_string()));
        assert!(args.contains(&"--window-size=1280,720".to_string()));
    }

    #[test]
    fn headed_profile_omits_headless_flags() {
        let profile = LaunchProfile {
            headless: false,
            ..LaunchProfile::default()
        };
        let args = build_chrome_arguments(&profile);
        assert!(!args.iter().any(|a| a.starts_with("--headless")));
    }

    #[test]
    fn capabilities_carry_locale_preference() {
        let caps = build_capabilities(&LaunchProfile::default());
        let opts = caps.get("goog:chromeOptions").expect("chrome options");
        assert_eq!(opts["prefs"]["intl.accept_languages"], json!("es-ES"));
        assert!(opts["args"].as_array().is_some_and(|a| !a.is_empty()));
    }
}
