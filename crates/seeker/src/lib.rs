//! Desktop UI test automation through accessibility APIs
//!
//! This crate provides a fluent API for locating, querying and interacting
//! with desktop application controls in automated tests: compose a
//! [`Condition`] describing the element, optionally tune the
//! [`SearchPolicy`] bounding the search, and let the [`Desktop`] engine walk
//! the accessibility tree until the element shows up or the budget runs out.
//!
//! ```no_run
//! use std::sync::Arc;
//! use seeker::{Condition, Desktop, SearchDefaults, SearchPolicy, UiControl, UiWrapper};
//! use seeker::platforms::sim::SimDesktop;
//!
//! # fn main() -> Result<(), seeker::AutomationError> {
//! let desktop = Desktop::new(Arc::new(SimDesktop::new()), SearchDefaults::default());
//! let window = desktop
//!     .find_window(&Condition::by_name("Calculator"), None)?
//!     .expect("window");
//! let button: Option<UiControl> = desktop.find_child(
//!     &Condition::by_automation_id("equalButton").and(Condition::by_name("Equals")),
//!     window.node(),
//!     Some(SearchPolicy::new().timeout(5_000).interval(200)),
//! )?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use tracing::{debug, instrument};

pub mod condition;
pub mod controls;
pub mod errors;
pub mod node;
pub mod platforms;
pub mod policy;
pub mod position;
mod search;
#[cfg(test)]
mod tests;
pub mod tree_format;
pub mod window;

pub use condition::{Condition, StringMatch};
pub use controls::{UiControl, UiWrapper, Window};
pub use errors::AutomationError;
pub use node::{Capability, ControlType, NodeAttributes, NodeBackend, Point, Rect, UiNode};
pub use platforms::AccessibilityBackend;
pub use policy::{ResolvedPolicy, SearchDefaults, SearchPolicy};
pub use position::RelativePosition;
pub use tokio_util::sync::CancellationToken;
pub use tree_format::{format_tree_as_compact_yaml, snapshot, TreeFormattingResult, UiTreeNode};
pub use window::WindowContext;

use search::SearchTarget;

/// The main entry point for UI automation.
///
/// Holds the accessibility backend, the search defaults (injected at
/// construction, read-only afterwards) and a cancellation token checked
/// between polling attempts. Every search call runs on the calling thread
/// and blocks through its waits; there is no background worker.
pub struct Desktop {
    backend: Arc<dyn AccessibilityBackend>,
    defaults: SearchDefaults,
    cancellation_token: CancellationToken,
}

impl Desktop {
    pub fn new(backend: Arc<dyn AccessibilityBackend>, defaults: SearchDefaults) -> Self {
        Self {
            backend,
            defaults,
            cancellation_token: CancellationToken::new(),
        }
    }

    /// The root of the accessibility tree.
    pub fn root(&self) -> UiNode {
        self.backend.root()
    }

    pub fn defaults(&self) -> &SearchDefaults {
        &self.defaults
    }

    /// Token checked between polling attempts; cancelling it makes every
    /// in-flight search fail with `OperationCancelled`.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    /// Find the first descendant of `source` matching `condition`.
    ///
    /// Returns `Ok(None)` when the budget ran out and the resolved policy
    /// has assertion disabled; raises `ElementNotFound` otherwise. The
    /// wrapper type is the one the caller statically requested.
    #[instrument(level = "debug", skip(self, source, policy))]
    pub fn find_child<W: UiWrapper>(
        &self,
        condition: &Condition,
        source: &UiNode,
        policy: Option<SearchPolicy>,
    ) -> Result<Option<W>, AutomationError> {
        condition.validate()?;
        let resolved = policy.unwrap_or_default().resolve(&self.defaults);
        debug!("Searching for child matching [{}]", condition);
        let skip = resolved.instance.map(|n| n - 1).unwrap_or(0);
        let found = search::run_polling(&resolved, &self.cancellation_token, || {
            search::traverse(source, condition, true, skip).map(|v| v.into_iter().next())
        })?;
        match found {
            Some(node) => Ok(Some(W::from_node(node))),
            None if resolved.assert_found => Err(search::not_found_error(
                SearchTarget::Element,
                condition,
                &resolved,
            )),
            None => Ok(None),
        }
    }

    /// Find all descendants of `source` matching `condition`.
    ///
    /// Polls until an attempt yields a non-empty set or the budget runs
    /// out; the returned list is the full traversal of that one attempt.
    #[instrument(level = "debug", skip(self, source, policy))]
    pub fn find_children<W: UiWrapper>(
        &self,
        condition: &Condition,
        source: &UiNode,
        policy: Option<SearchPolicy>,
    ) -> Result<Vec<W>, AutomationError> {
        condition.validate()?;
        let resolved = policy.unwrap_or_default().resolve(&self.defaults);
        debug!("Searching for children matching [{}]", condition);
        let found = search::run_polling(&resolved, &self.cancellation_token, || {
            let matches = search::traverse(source, condition, false, 0)?;
            Ok(if matches.is_empty() {
                None
            } else {
                Some(matches)
            })
        })?;
        match found {
            Some(nodes) => Ok(nodes.into_iter().map(W::from_node).collect()),
            None if resolved.assert_found => Err(search::not_found_error(
                SearchTarget::Elements,
                condition,
                &resolved,
            )),
            None => Ok(Vec::new()),
        }
    }

    /// Find the nearest ancestor of `source` matching `condition`, walking
    /// strictly upward one ancestor at a time and stopping at the tree
    /// root.
    #[instrument(level = "debug", skip(self, source, policy))]
    pub fn find_parent<W: UiWrapper>(
        &self,
        condition: &Condition,
        source: &UiNode,
        policy: Option<SearchPolicy>,
    ) -> Result<Option<W>, AutomationError> {
        condition.validate()?;
        let resolved = policy.unwrap_or_default().resolve(&self.defaults);
        debug!("Searching for ancestor matching [{}]", condition);
        let found = search::run_polling(&resolved, &self.cancellation_token, || {
            search::walk_parents(source, condition)
        })?;
        match found {
            Some(node) => Ok(Some(W::from_node(node))),
            None if resolved.assert_found => Err(search::not_found_error(
                SearchTarget::Parent,
                condition,
                &resolved,
            )),
            None => Ok(None),
        }
    }

    /// Find a visible top-level window matching `condition`.
    ///
    /// The window set is enumerated fresh on every attempt, not cached
    /// across retries. The instance filter skips to the n-th match in
    /// enumeration order.
    #[instrument(level = "debug", skip(self, policy))]
    pub fn find_window(
        &self,
        condition: &Condition,
        policy: Option<SearchPolicy>,
    ) -> Result<Option<Window>, AutomationError> {
        condition.validate()?;
        let resolved = policy.unwrap_or_default().resolve(&self.defaults);
        debug!("Searching for window matching [{}]", condition);
        let found = search::run_polling(&resolved, &self.cancellation_token, || {
            let windows = self.backend.top_level_windows()?;
            let mut skip = resolved.instance.map(|n| n - 1).unwrap_or(0);
            for window in windows {
                match condition.evaluate(&window) {
                    Ok(true) => {
                        if skip > 0 {
                            skip -= 1;
                        } else {
                            return Ok(Some(window));
                        }
                    }
                    Ok(false) => {}
                    // Window closed between enumeration and evaluation.
                    Err(AutomationError::ElementNotAvailable(_)) => {}
                    Err(e) => return Err(e),
                }
            }
            Ok(None)
        })?;
        match found {
            Some(node) => Ok(Some(Window::from_node(node))),
            None if resolved.assert_found => Err(search::not_found_error(
                SearchTarget::Window,
                condition,
                &resolved,
            )),
            None => Ok(None),
        }
    }

    /// One-shot enumeration of all currently visible top-level windows.
    pub fn windows(&self) -> Result<Vec<Window>, AutomationError> {
        Ok(self
            .backend
            .top_level_windows()?
            .into_iter()
            .map(Window::from_node)
            .collect())
    }
}
