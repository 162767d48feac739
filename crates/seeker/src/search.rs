//! Bounded polling search over the accessibility tree.
//!
//! One attempt is a full pre-order depth-first traversal (or one upward
//! parent walk, or one fresh window enumeration). The polling loop repeats
//! attempts until a match is found or the wall-clock timeout elapses,
//! sleeping the configured interval between attempts. There is no backoff,
//! no jitter, and no attempt cap other than the timeout.

use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::condition::Condition;
use crate::errors::AutomationError;
use crate::node::UiNode;
use crate::policy::ResolvedPolicy;

/// Sleep slice for the cancellable wait. Short enough that cancellation is
/// observed promptly without changing the interval contract.
const WAIT_SLICE: Duration = Duration::from_millis(10);

/// Block the calling thread for `total`, waking early only if `cancel`
/// fires. The wait is the only suspension point of a search; attempts
/// themselves run to completion.
pub(crate) fn bounded_wait(
    total: Duration,
    cancel: &CancellationToken,
) -> Result<(), AutomationError> {
    let deadline = Instant::now() + total;
    loop {
        if cancel.is_cancelled() {
            return Err(AutomationError::OperationCancelled(
                "search cancelled while waiting between attempts".to_string(),
            ));
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(());
        }
        std::thread::sleep(WAIT_SLICE.min(deadline - now));
    }
}

/// Drive `attempt` under the policy's timeout/interval contract.
///
/// Returns `Ok(Some(_))` on the first attempt that yields a result,
/// `Ok(None)` once the budget is exhausted. The timeout is checked at the
/// top of every iteration, so the total runtime overshoots the timeout by
/// at most one attempt plus one interval.
pub(crate) fn run_polling<T>(
    policy: &ResolvedPolicy,
    cancel: &CancellationToken,
    mut attempt: impl FnMut() -> Result<Option<T>, AutomationError>,
) -> Result<Option<T>, AutomationError> {
    let started = Instant::now();
    let mut attempts = 0u32;
    loop {
        if cancel.is_cancelled() {
            return Err(AutomationError::OperationCancelled(
                "search cancelled".to_string(),
            ));
        }
        attempts += 1;
        if let Some(found) = attempt()? {
            trace!(attempts, elapsed = ?started.elapsed(), "search succeeded");
            return Ok(Some(found));
        }
        let expired = match policy.timeout {
            None => true,
            Some(timeout) => started.elapsed() >= timeout,
        };
        if expired {
            debug!(attempts, elapsed = ?started.elapsed(), "search exhausted its budget");
            return Ok(None);
        }
        if let Some(interval) = policy.interval {
            bounded_wait(interval, cancel)?;
        }
    }
}

/// One pre-order depth-first traversal of the subtree under `source`.
///
/// The source node itself is not a candidate. Children are retrieved
/// through the first-child/next-sibling accessors; a sibling scan stops at
/// the first unavailable sibling and an unavailable node's branch is
/// skipped entirely (see [`UiNode::children`]). A predicate evaluation that
/// fails because the node vanished mid-visit counts as no-match.
///
/// `skip` implements the 1-based instance filter: the first `skip` matches
/// in traversal order are passed over.
pub(crate) fn traverse(
    source: &UiNode,
    condition: &Condition,
    first_only: bool,
    skip: u32,
) -> Result<Vec<UiNode>, AutomationError> {
    let mut matches = Vec::new();
    let mut remaining_skip = skip;

    let mut stack: Vec<UiNode> = source.children();
    stack.reverse();

    while let Some(node) = stack.pop() {
        match condition.evaluate(&node) {
            Ok(true) => {
                if remaining_skip > 0 {
                    remaining_skip -= 1;
                } else {
                    matches.push(node.clone());
                    if first_only {
                        return Ok(matches);
                    }
                }
            }
            Ok(false) => {}
            // Vanished between the sibling scan and the visit; its subtree
            // is unreachable anyway.
            Err(AutomationError::ElementNotAvailable(_)) => continue,
            Err(e) => return Err(e),
        }
        let mut children = node.children();
        children.reverse();
        stack.extend(children);
    }
    Ok(matches)
}

/// One upward walk from `source`: the immediate parent first, then one
/// ancestor at a time, stopping at the tree root.
pub(crate) fn walk_parents(
    source: &UiNode,
    condition: &Condition,
) -> Result<Option<UiNode>, AutomationError> {
    let mut current = match source.parent() {
        Ok(parent) => parent,
        Err(AutomationError::ElementNotAvailable(_)) => None,
        Err(e) => return Err(e),
    };
    while let Some(ancestor) = current {
        match condition.evaluate(&ancestor) {
            Ok(true) => return Ok(Some(ancestor)),
            Ok(false) => {}
            Err(AutomationError::ElementNotAvailable(_)) => return Ok(None),
            Err(e) => return Err(e),
        }
        current = match ancestor.parent() {
            Ok(parent) => parent,
            Err(AutomationError::ElementNotAvailable(_)) => None,
            Err(e) => return Err(e),
        };
    }
    Ok(None)
}

/// What a failed search was looking for; selects the error variant and the
/// message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchTarget {
    Element,
    Elements,
    Parent,
    Window,
}

/// Build the not-found diagnostic. Called only at the moment of raising,
/// never on the success path.
pub(crate) fn not_found_error(
    target: SearchTarget,
    condition: &Condition,
    policy: &ResolvedPolicy,
) -> AutomationError {
    let what = match target {
        SearchTarget::Element => "no element matching",
        SearchTarget::Elements => "no elements matching",
        SearchTarget::Parent => "no ancestor matching",
        SearchTarget::Window => "no top-level window matching",
    };
    let message = format!("{what} [{condition}] ({})", policy.describe());
    match target {
        SearchTarget::Window => AutomationError::WindowNotFound(message),
        _ => AutomationError::ElementNotFound(message),
    }
}
