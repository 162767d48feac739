//! Typed wrappers over nodes.
//!
//! A wrapper is a façade constructed on demand around a found node; wrappers
//! are never pooled or cached, and two wrappers over the same node carry no
//! identity guarantee. The search engine instantiates whichever wrapper type
//! the caller statically requested through [`UiWrapper::from_node`];
//! requesting a wrapper that does not fit the control is a caller error, not
//! a no-match.

use crate::errors::AutomationError;
use crate::node::{Capability, ControlType, Point, Rect, UiNode};
use crate::position::RelativePosition;
use crate::tree_format::{snapshot, UiTreeNode};

/// Typed façade constructible from a found node.
pub trait UiWrapper: Sized {
    fn from_node(node: UiNode) -> Self;
    fn node(&self) -> &UiNode;
}

/// The base wrapper: property accessors and capability forwarding shared by
/// every control type.
#[derive(Debug, Clone)]
pub struct UiControl {
    node: UiNode,
}

impl UiWrapper for UiControl {
    fn from_node(node: UiNode) -> Self {
        Self { node }
    }

    fn node(&self) -> &UiNode {
        &self.node
    }
}

impl UiControl {
    pub fn name(&self) -> Result<String, AutomationError> {
        self.node.name()
    }

    pub fn automation_id(&self) -> Result<String, AutomationError> {
        self.node.automation_id()
    }

    pub fn class_name(&self) -> Result<String, AutomationError> {
        self.node.class_name()
    }

    pub fn control_type(&self) -> Result<ControlType, AutomationError> {
        self.node.control_type()
    }

    pub fn bounds(&self) -> Result<Rect, AutomationError> {
        self.node.bounds()
    }

    pub fn is_enabled(&self) -> Result<bool, AutomationError> {
        self.node.is_enabled()
    }

    pub fn is_offscreen(&self) -> Result<bool, AutomationError> {
        self.node.is_offscreen()
    }

    pub fn supports(&self, capability: Capability) -> Result<bool, AutomationError> {
        self.node.supports(capability)
    }

    /// Fail with `ElementNotReady` unless the control is enabled and on
    /// screen. The message embeds the flags actually observed.
    pub fn ensure_ready(&self) -> Result<(), AutomationError> {
        let enabled = self.node.is_enabled()?;
        let offscreen = self.node.is_offscreen()?;
        if enabled && !offscreen {
            return Ok(());
        }
        let name = self.node.name().unwrap_or_default();
        Err(AutomationError::ElementNotReady(format!(
            "\"{name}\" is not ready for interaction (enabled: {enabled}, offscreen: {offscreen})"
        )))
    }

    /// Absolute screen point at `position` within the control's bounding
    /// rectangle, resolved at the moment of the call.
    pub fn click_point(&self, position: RelativePosition) -> Result<Point, AutomationError> {
        self.ensure_ready()?;
        Ok(position.resolve(self.node.bounds()?))
    }

    pub fn invoke(&self) -> Result<(), AutomationError> {
        self.ensure_ready()?;
        self.node.invoke()
    }

    pub fn toggle(&self) -> Result<bool, AutomationError> {
        self.ensure_ready()?;
        self.node.toggle()
    }

    pub fn value(&self) -> Result<String, AutomationError> {
        self.node.value()
    }

    pub fn set_value(&self, value: &str) -> Result<(), AutomationError> {
        self.ensure_ready()?;
        self.node.set_value(value)
    }

    pub fn grid_dimensions(&self) -> Result<(usize, usize), AutomationError> {
        self.node.grid_dimensions()
    }
}

/// A top-level window.
#[derive(Debug, Clone)]
pub struct Window {
    control: UiControl,
}

impl UiWrapper for Window {
    fn from_node(node: UiNode) -> Self {
        Self {
            control: UiControl::from_node(node),
        }
    }

    fn node(&self) -> &UiNode {
        self.control.node()
    }
}

impl Window {
    pub fn title(&self) -> Result<String, AutomationError> {
        self.control.name()
    }

    pub fn as_control(&self) -> &UiControl {
        &self.control
    }

    /// Snapshot the window's subtree for formatting or serialization.
    pub fn snapshot(&self, max_depth: Option<usize>) -> UiTreeNode {
        snapshot(self.node(), max_depth)
    }
}
