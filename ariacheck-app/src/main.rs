use anyhow::{Context, Result};
use ariacheck_common::CheckError;
use ariacheck_common::observability::{LogConfig, LogFormat, init_logging};
use ariacheck_config::{CheckerConfig, CheckerConfigLoader};
use ariacheck_drivers::aria_browser::{driver::AriaDriver, launch::LaunchProfile};
use ariacheck_verify::Checker;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::info;

/// Verify the ARIA contract of the call screen in a headless browser.
#[derive(Debug, Parser)]
#[command(name = "ariacheck", version)]
struct Cli {
    /// YAML configuration file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a JSON summary of a passing run to this path.
    #[arg(long)]
    report: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogFormatArg::Text)]
    log_format: LogFormatArg,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormatArg {
    Text,
    Json,
}

fn launch_profile(cfg: &CheckerConfig) -> LaunchProfile {
    LaunchProfile {
        headless: cfg.headless,
        locale: cfg.locale.clone(),
        window: (cfg.window.width, cfg.window.height),
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available: never interrupt.
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Held until exit; dropping it flushes the file sink.
    let _logging = init_logging(LogConfig {
        format: match cli.log_format {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        },
        default_filter: if cli.verbose { "debug" } else { "info" },
        ..LogConfig::default()
    })?;

    let mut loader = CheckerConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    let cfg = loader
        .load()
        .map_err(|e| CheckError::Config(e.to_string()))?;

    let driver = AriaDriver::new(cfg.webdriver_url.clone(), launch_profile(&cfg));
    let page = driver.launch().await.map_err(CheckError::Driver)?;

    let checker = Checker::new(cfg);
    let report = checker.run_until(page, shutdown_signal()).await?;

    if let Some(path) = &cli.report {
        tokio::fs::write(path, report.to_json_pretty()?)
            .await
            .with_context(|| format!("failed to write report {}", path.display()))?;
    }

    info!(
        target: "ariacheck.run",
        passed = report.passed.len(),
        screenshots = report.screenshots.len(),
        "accessibility verification passed"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_means_defaults() {
        let cli = Cli::try_parse_from(["ariacheck"]).unwrap();
        assert!(cli.report.is_none());
        assert_eq!(cli.log_format, LogFormatArg::Text);
        assert!(!cli.verbose);
    }

    #[test]
    fn flags_are_parsed() {
        let cli = Cli::try_parse_from([
            "ariacheck",
            "--config",
            "ci/ariacheck.yaml",
            "--report",
            "verification/report.json",
            "--log-format",
            "json",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("ci/ariacheck.yaml")));
        assert_eq!(cli.report, Some(PathBuf::from("verification/report.json")));
        assert_eq!(cli.log_format, LogFormatArg::Json);
        assert!(cli.verbose);
    }

    #[test]
    fn launch_profile_follows_config() {
        let mut cfg = CheckerConfig::default();
        cfg.headless = false;
        cfg.window.width = 390;
        let profile = launch_profile(&cfg);
        assert!(!profile.headless);
        assert_eq!(profile.locale, "es-ES");
        assert_eq!(profile.window, (390, 720));
    }

    #[test]
    fn config_path_only_comes_from_the_flag() {
        temp_env::with_var("ARIACHECK_CONFIG", Some("ci/ariacheck.yaml"), || {
            let cli = Cli::try_parse_from(["ariacheck"]).unwrap();
            assert!(cli.config.is_none());
        });
    }
}
