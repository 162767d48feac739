//! Node handles over the live accessibility tree.
//!
//! A [`UiNode`] is an opaque, cloneable handle to a single element in the
//! tree. Nodes are ephemeral: once the underlying UI element is destroyed the
//! handle is stale and every accessor fails with
//! [`AutomationError::ElementNotAvailable`]. Validity is re-checked by the
//! backend on every access and never cached across calls.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::errors::AutomationError;

/// A point in absolute screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A bounding rectangle in absolute screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// An element that reports no rectangle at all.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x < self.left + self.width
            && point.y >= self.top
            && point.y < self.top + self.height
    }
}

/// Control type reported by the accessibility tree for an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlType {
    Button,
    CheckBox,
    ComboBox,
    DataGrid,
    Edit,
    Group,
    List,
    ListItem,
    Menu,
    MenuItem,
    Pane,
    ProgressBar,
    RadioButton,
    Tab,
    TabItem,
    Text,
    ToolBar,
    Tree,
    TreeItem,
    Window,
    Custom(String),
}

impl ControlType {
    pub fn as_str(&self) -> &str {
        match self {
            ControlType::Button => "Button",
            ControlType::CheckBox => "CheckBox",
            ControlType::ComboBox => "ComboBox",
            ControlType::DataGrid => "DataGrid",
            ControlType::Edit => "Edit",
            ControlType::Group => "Group",
            ControlType::List => "List",
            ControlType::ListItem => "ListItem",
            ControlType::Menu => "Menu",
            ControlType::MenuItem => "MenuItem",
            ControlType::Pane => "Pane",
            ControlType::ProgressBar => "ProgressBar",
            ControlType::RadioButton => "RadioButton",
            ControlType::Tab => "Tab",
            ControlType::TabItem => "TabItem",
            ControlType::Text => "Text",
            ControlType::ToolBar => "ToolBar",
            ControlType::Tree => "Tree",
            ControlType::TreeItem => "TreeItem",
            ControlType::Window => "Window",
            ControlType::Custom(name) => name,
        }
    }
}

impl fmt::Display for ControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional capability patterns a node may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    Invoke,
    Toggle,
    Value,
    SelectionItem,
    Scroll,
    ExpandCollapse,
    Grid,
    Table,
    Text,
}

/// A point-in-time snapshot of a node's queryable properties.
///
/// Best-effort: properties the element failed to report are `None`. Never
/// used for matching, only for diagnostics and tree snapshots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeAttributes {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Rect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offscreen: Option<bool>,
}

/// Contract a platform accessibility provider implements per element.
///
/// Every accessor must re-check that the underlying element still exists and
/// fail with [`AutomationError::ElementNotAvailable`] once it is gone.
/// Capability operations on a node that does not support the pattern fail
/// with [`AutomationError::UnsupportedOperation`]; that is a caller error,
/// never a retry or not-found situation.
pub trait NodeBackend: Send + Sync {
    fn name(&self) -> Result<String, AutomationError>;
    fn automation_id(&self) -> Result<String, AutomationError>;
    fn class_name(&self) -> Result<String, AutomationError>;
    fn control_type(&self) -> Result<ControlType, AutomationError>;
    fn bounds(&self) -> Result<Rect, AutomationError>;
    fn is_enabled(&self) -> Result<bool, AutomationError>;
    fn is_offscreen(&self) -> Result<bool, AutomationError>;

    /// Cheap liveness probe used by traversal to truncate dead branches.
    fn is_available(&self) -> bool;

    fn parent(&self) -> Result<Option<UiNode>, AutomationError>;
    fn first_child(&self) -> Result<Option<UiNode>, AutomationError>;
    fn next_sibling(&self) -> Result<Option<UiNode>, AutomationError>;

    fn supports(&self, capability: Capability) -> Result<bool, AutomationError>;

    fn invoke(&self) -> Result<(), AutomationError> {
        Err(AutomationError::UnsupportedOperation(
            "control does not support the Invoke pattern".to_string(),
        ))
    }

    /// Flip the toggle state, returning the new state.
    fn toggle(&self) -> Result<bool, AutomationError> {
        Err(AutomationError::UnsupportedOperation(
            "control does not support the Toggle pattern".to_string(),
        ))
    }

    fn value(&self) -> Result<String, AutomationError> {
        Err(AutomationError::UnsupportedOperation(
            "control does not support the Value pattern".to_string(),
        ))
    }

    fn set_value(&self, _value: &str) -> Result<(), AutomationError> {
        Err(AutomationError::UnsupportedOperation(
            "control does not support the Value pattern".to_string(),
        ))
    }

    /// (rows, columns) of a grid-patterned control.
    fn grid_dimensions(&self) -> Result<(usize, usize), AutomationError> {
        Err(AutomationError::UnsupportedOperation(
            "control does not support the Grid pattern".to_string(),
        ))
    }
}

/// A cloneable handle to one element in the live accessibility tree.
#[derive(Clone)]
pub struct UiNode {
    backend: Arc<dyn NodeBackend>,
}

impl UiNode {
    pub fn new(backend: Arc<dyn NodeBackend>) -> Self {
        Self { backend }
    }

    pub fn name(&self) -> Result<String, AutomationError> {
        self.backend.name()
    }

    pub fn automation_id(&self) -> Result<String, AutomationError> {
        self.backend.automation_id()
    }

    pub fn class_name(&self) -> Result<String, AutomationError> {
        self.backend.class_name()
    }

    pub fn control_type(&self) -> Result<ControlType, AutomationError> {
        self.backend.control_type()
    }

    pub fn bounds(&self) -> Result<Rect, AutomationError> {
        self.backend.bounds()
    }

    pub fn is_enabled(&self) -> Result<bool, AutomationError> {
        self.backend.is_enabled()
    }

    pub fn is_offscreen(&self) -> Result<bool, AutomationError> {
        self.backend.is_offscreen()
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_available()
    }

    pub fn parent(&self) -> Result<Option<UiNode>, AutomationError> {
        self.backend.parent()
    }

    pub fn first_child(&self) -> Result<Option<UiNode>, AutomationError> {
        self.backend.first_child()
    }

    pub fn next_sibling(&self) -> Result<Option<UiNode>, AutomationError> {
        self.backend.next_sibling()
    }

    pub fn supports(&self, capability: Capability) -> Result<bool, AutomationError> {
        self.backend.supports(capability)
    }

    pub fn invoke(&self) -> Result<(), AutomationError> {
        self.backend.invoke()
    }

    pub fn toggle(&self) -> Result<bool, AutomationError> {
        self.backend.toggle()
    }

    pub fn value(&self) -> Result<String, AutomationError> {
        self.backend.value()
    }

    pub fn set_value(&self, value: &str) -> Result<(), AutomationError> {
        self.backend.set_value(value)
    }

    pub fn grid_dimensions(&self) -> Result<(usize, usize), AutomationError> {
        self.backend.grid_dimensions()
    }

    /// Children of this node in sibling order.
    ///
    /// The scan stops at the first sibling that is no longer available, not
    /// just past it: windows are destroyed depth-outward, so a dead sibling
    /// means the rest of the list cannot be trusted either. Nodes after the
    /// dead one are not returned.
    pub fn children(&self) -> Vec<UiNode> {
        let mut out = Vec::new();
        let mut current = match self.backend.first_child() {
            Ok(first) => first,
            Err(_) => return out,
        };
        while let Some(child) = current {
            if !child.is_available() {
                break;
            }
            current = match child.next_sibling() {
                Ok(next) => next,
                Err(_) => {
                    out.push(child);
                    break;
                }
            };
            out.push(child);
        }
        out
    }

    /// Best-effort property snapshot for diagnostics and tree dumps.
    pub fn attributes(&self) -> NodeAttributes {
        let non_blank = |s: String| if s.is_empty() { None } else { Some(s) };
        NodeAttributes {
            role: self
                .control_type()
                .map(|t| t.as_str().to_string())
                .unwrap_or_default(),
            name: self.name().ok().and_then(non_blank),
            automation_id: self.automation_id().ok().and_then(non_blank),
            class_name: self.class_name().ok().and_then(non_blank),
            bounds: self.bounds().ok().filter(|b| !b.is_empty()),
            enabled: self.is_enabled().ok(),
            offscreen: self.is_offscreen().ok(),
        }
    }
}

impl fmt::Debug for UiNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role = self
            .control_type()
            .map(|t| t.as_str().to_string())
            .unwrap_or_else(|_| "<gone>".to_string());
        let name = self.name().unwrap_or_default();
        write!(f, "UiNode {{ role: {role:?}, name: {name:?} }}")
    }
}
