use crate::checklist::{AttributeCheck, Expectation};
use ariacheck_common::{AssertionFailure, CheckError, Result};
use ariacheck_config::Timeouts;
use ariacheck_drivers::PageSession;
use tokio::time::{Instant, sleep};
use tracing::debug;

/// Read `attribute` from the single element matching `selector`.
///
/// `Ok(None)` when nothing matches or the attribute is absent; several
/// matches are a [`CheckError::Ambiguous`] error.
pub async fn read_unique_attribute<S: PageSession>(
    session: &S,
    selector: &str,
    attribute: &str,
) -> Result<Option<String>> {
    let mut values = session.attribute_values(selector, attribute).await?;
    match values.len() {
        0 => Ok(None),
        1 => Ok(values.pop().flatten()),
        matches => Err(CheckError::Ambiguous {
            selector: selector.to_string(),
            matches,
        }),
    }
}

/// Re-read an attribute until it equals the expected literal or the expect
/// budget runs out; the failure carries the last value observed.
pub async fn assert_attribute<S: PageSession>(
    session: &S,
    check: &AttributeCheck,
    expectation: &Expectation,
    timeouts: &Timeouts,
) -> Result<Option<AssertionFailure>> {
    let deadline = Instant::now() + timeouts.expect();

    loop {
        let actual = read_unique_attribute(session, check.selector, expectation.attribute).await?;
        if actual.as_deref() == Some(expectation.expected) {
            return Ok(None);
        }

        let now = Instant::now();
        if now >= deadline {
            return Ok(Some(AssertionFailure {
                check: check.name.to_string(),
                selector: check.selector.to_string(),
                attribute: expectation.attribute.to_string(),
                expected: expectation.expected.to_string(),
                actual,
            }));
        }
        debug!(
            target: "ariacheck.check",
            selector = check.selector,
            attribute = expectation.attribute,
            ?actual,
            "attribute not yet matching"
        );
        sleep(timeouts.poll().min(deadline - now)).await;
    }
}

/// Evaluate every expectation of `check` in order.
///
/// With `stop_at_first` the first mismatch ends the evaluation, otherwise all
/// mismatches are returned. An empty vector means the check passed.
pub async fn evaluate_check<S: PageSession>(
    session: &S,
    check: &AttributeCheck,
    timeouts: &Timeouts,
    stop_at_first: bool,
) -> Result<Vec<AssertionFailure>> {
    let mut failures = Vec::new();
    for expectation in check.expectations {
        if let Some(failure) = assert_attribute(session, check, expectation, timeouts).await? {
            failures.push(failure);
            if stop_at_first {
                break;
            }
        }
    }
    Ok(failures)
}
