use crate::assertion::evaluate_check;
use crate::checklist::{
    CHECKLIST, ERROR_SCREENSHOT, MAIN_UI_SCREENSHOT, ONBOARDING_SCREENSHOT, ONBOARDING_SELECTOR,
    START_SELECTOR,
};
use crate::report::RunReport;
use crate::wait::wait_for_state;
use anyhow::Context;
use ariacheck_common::{CheckError, Result, WaitState};
use ariacheck_config::{CheckerConfig, FailureMode};
use ariacheck_drivers::PageSession;
use std::future::Future;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

/// Runs the accessibility checklist against one page session.
pub struct Checker {
    config: CheckerConfig,
}

impl Checker {
    pub fn new(config: CheckerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Where a screenshot named `file_name` is written.
    pub fn screenshot_path(&self, file_name: &str) -> PathBuf {
        self.config.screenshot_dir.join(file_name)
    }

    /// Run the full procedure and close `session` afterwards.
    pub async fn run<S: PageSession>(&self, session: S) -> Result<RunReport> {
        self.run_until(session, std::future::pending::<()>()).await
    }

    /// Like [`Checker::run`], but abort with [`CheckError::Interrupted`] as soon
    /// as `shutdown` completes.
    ///
    /// Any failure triggers a diagnostic screenshot before the session is
    /// closed; the original error is returned unchanged.
    pub async fn run_until<S, F>(&self, session: S, shutdown: F) -> Result<RunReport>
    where
        S: PageSession,
        F: Future<Output = ()>,
    {
        let mut report = RunReport::new(self.config.target_url.clone());

        let outcome = tokio::select! {
            result = self.procedure(&session, &mut report) => result,
            _ = shutdown => Err(CheckError::Interrupted),
        };

        if let Err(err) = &outcome {
            error!(target: "ariacheck.run", error = %err, "❌ verification failed");
            self.capture_error_screenshot(&session).await;
        }

        // FIXME: a panic inside the procedure skips this close; the WebDriver
        // session then lingers until chromedriver reaps it.
        match session.close().await {
            Ok(()) => debug!(target: "ariacheck.run", "browser session closed"),
            Err(e) => warn!(target: "ariacheck.run", error = %e, "failed to close browser session"),
        }

        outcome.map(|()| report.finish())
    }

    async fn procedure<S: PageSession>(&self, session: &S, report: &mut RunReport) -> Result<()> {
        let timeouts = &self.config.timeouts;

        info!(target: "ariacheck.run", url = %self.config.target_url, "navigating");
        session.goto(&self.config.target_url).await?;
        wait_for_state(session, ONBOARDING_SELECTOR, WaitState::Visible, timeouts).await?;

        self.run_checklist(session, report).await?;

        let path = self.capture(session, ONBOARDING_SCREENSHOT).await?;
        report.screenshots.push(path);

        wait_for_state(session, START_SELECTOR, WaitState::Visible, timeouts).await?;
        session.click(START_SELECTOR).await?;
        wait_for_state(session, ONBOARDING_SELECTOR, WaitState::Hidden, timeouts).await?;

        let path = self.capture(session, MAIN_UI_SCREENSHOT).await?;
        report.screenshots.push(path);

        info!(target: "ariacheck.run", "📸 Screenshots taken");
        Ok(())
    }

    async fn run_checklist<S: PageSession>(
        &self,
        session: &S,
        report: &mut RunReport,
    ) -> Result<()> {
        let fail_fast = self.config.failure_mode == FailureMode::FailFast;
        let mut failures = Vec::new();

        for check in CHECKLIST {
            let mut found =
                evaluate_check(session, check, &self.config.timeouts, fail_fast).await?;
            if found.is_empty() {
                info!(
                    target: "ariacheck.check",
                    check = check.name,
                    selector = check.selector,
                    "✅ {}",
                    check.success
                );
                report.passed.push(check.name.to_string());
                continue;
            }

            for failure in &found {
                warn!(target: "ariacheck.check", %failure, "check failed");
            }
            if fail_fast {
                return Err(CheckError::Assertion(found.remove(0)));
            }
            failures.append(&mut found);
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(CheckError::Assertions(failures))
        }
    }

    async fn capture<S: PageSession>(&self, session: &S, file_name: &str) -> Result<PathBuf> {
        let png = session.screenshot().await?;
        let dir = &self.config.screenshot_dir;
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to create screenshot directory {}", dir.display()))?;

        let path = self.screenshot_path(file_name);
        tokio::fs::write(&path, png)
            .await
            .with_context(|| format!("failed to write screenshot {}", path.display()))?;
        info!(target: "ariacheck.run", path = %path.display(), "screenshot saved");
        Ok(path)
    }

    async fn capture_error_screenshot<S: PageSession>(&self, session: &S) {
        if let Err(e) = self.capture(session, ERROR_SCREENSHOT).await {
            warn!(target: "ariacheck.run", error = %e, "failed to capture error screenshot");
        }
    }
}
