use ariacheck_common::{CheckError, Result, WaitState};
use ariacheck_config::Timeouts;
use ariacheck_drivers::PageSession;
use tokio::time::{Instant, sleep};
use tracing::debug;

/// Suspend until the first element matching `selector` reaches `state`.
///
/// Probes every `timeouts.poll()` and gives up after `timeouts.wait()` with
/// [`CheckError::Readiness`]. Probe failures are returned immediately.
pub async fn wait_for_state<S: PageSession>(
    session: &S,
    selector: &str,
    state: WaitState,
    timeouts: &Timeouts,
) -> Result<()> {
    let budget = timeouts.wait();
    let started = Instant::now();
    let deadline = started + budget;

    loop {
        let seen = session.visibility(selector).await?;
        if seen.satisfies(state) {
            debug!(
                target: "ariacheck.wait",
                %selector,
                %state,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "element reached state"
            );
            return Ok(());
        }

        let now = Instant::now();
        if now >= deadline {
            return Err(CheckError::Readiness {
                selector: selector.to_string(),
                state,
                waited: budget,
            });
        }
        sleep(timeouts.poll().min(deadline - now)).await;
    }
}
