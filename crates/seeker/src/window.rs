//! Caller-owned window search context.
//!
//! There is no ambient "last found window" in this crate: a test that wants
//! to search relative to the most recent window owns a [`WindowContext`]
//! and threads it through its calls.

use crate::condition::Condition;
use crate::controls::{UiWrapper, Window};
use crate::errors::AutomationError;
use crate::policy::SearchPolicy;
use crate::Desktop;

/// Records the last window a search through it found.
#[derive(Default)]
pub struct WindowContext {
    last_window: Option<Window>,
}

impl WindowContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a top-level window and remember it as the current one.
    pub fn find_window(
        &mut self,
        desktop: &Desktop,
        condition: &Condition,
        policy: Option<SearchPolicy>,
    ) -> Result<Option<Window>, AutomationError> {
        let window = desktop.find_window(condition, policy)?;
        if let Some(window) = &window {
            self.last_window = Some(window.clone());
        }
        Ok(window)
    }

    /// The window the last successful [`find_window`](Self::find_window)
    /// call produced.
    pub fn current_window(&self) -> Result<&Window, AutomationError> {
        self.last_window.as_ref().ok_or_else(|| {
            AutomationError::MissingRoot(
                "no window has been located through this context yet".to_string(),
            )
        })
    }

    /// Use an already-found window as the current one.
    pub fn set_current_window(&mut self, window: Window) {
        self.last_window = Some(window);
    }

    pub fn clear(&mut self) {
        self.last_window = None;
    }

    /// Convenience: search for a child under the current window.
    pub fn find_child<W: UiWrapper>(
        &self,
        desktop: &Desktop,
        condition: &Condition,
        policy: Option<SearchPolicy>,
    ) -> Result<Option<W>, AutomationError> {
        let window = self.current_window()?;
        desktop.find_child(condition, window.node(), policy)
    }
}
