//! Accessibility backend seam.
//!
//! The engine talks to the platform through [`AccessibilityBackend`]; real
//! providers (UI Automation, AT-SPI, AX) live outside this crate and plug in
//! here. The [`sim`] module ships an in-memory implementation used by the
//! test-suite and the inspector's demo mode.

use crate::errors::AutomationError;
use crate::node::UiNode;

pub mod sim;

/// Entry points a platform accessibility provider implements.
pub trait AccessibilityBackend: Send + Sync {
    /// The root of the accessibility tree (the desktop itself).
    fn root(&self) -> UiNode;

    /// All currently visible top-level windows, enumerated fresh on every
    /// call; window searches never reuse a previous enumeration.
    fn top_level_windows(&self) -> Result<Vec<UiNode>, AutomationError>;
}
