//! In-memory simulated desktop.
//!
//! Implements the backend seam over a mutable tree of plain structs. Nodes
//! can be destroyed (subtree first, the way real windows go away) or added
//! while a search is polling, which is exactly what the engine tests need.
//! The inspector's demo mode renders this tree.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, Weak};

use crate::errors::AutomationError;
use crate::node::{Capability, ControlType, NodeBackend, Rect, UiNode};
use crate::platforms::AccessibilityBackend;

struct SimNodeData {
    control_type: ControlType,
    name: String,
    automation_id: String,
    class_name: String,
    bounds: Rect,
    enabled: bool,
    offscreen: bool,
    capabilities: HashSet<Capability>,
    value: String,
    toggled: bool,
    grid: Option<(usize, usize)>,
    invoke_count: u32,
    alive: bool,
    parent: Weak<Mutex<SimNodeData>>,
    children: Vec<Arc<Mutex<SimNodeData>>>,
}

impl SimNodeData {
    fn new(control_type: ControlType, name: &str) -> Self {
        Self {
            control_type,
            name: name.to_string(),
            automation_id: String::new(),
            class_name: String::new(),
            bounds: Rect::default(),
            enabled: true,
            offscreen: false,
            capabilities: HashSet::new(),
            value: String::new(),
            toggled: false,
            grid: None,
            invoke_count: 0,
            alive: true,
            parent: Weak::new(),
            children: Vec::new(),
        }
    }
}

/// Handle used to build and mutate the simulated tree. Cloneable; all
/// clones see the same underlying node.
#[derive(Clone)]
pub struct SimElement {
    data: Arc<Mutex<SimNodeData>>,
}

impl SimElement {
    fn new(control_type: ControlType, name: &str) -> Self {
        Self {
            data: Arc::new(Mutex::new(SimNodeData::new(control_type, name))),
        }
    }

    /// Append a child and return its handle.
    pub fn add_child(&self, control_type: ControlType, name: &str) -> SimElement {
        let child = SimElement::new(control_type, name);
        child.data.lock().unwrap().parent = Arc::downgrade(&self.data);
        self.data.lock().unwrap().children.push(child.data.clone());
        child
    }

    pub fn set_automation_id(&self, id: &str) -> &Self {
        self.data.lock().unwrap().automation_id = id.to_string();
        self
    }

    pub fn set_class_name(&self, class_name: &str) -> &Self {
        self.data.lock().unwrap().class_name = class_name.to_string();
        self
    }

    pub fn set_bounds(&self, bounds: Rect) -> &Self {
        self.data.lock().unwrap().bounds = bounds;
        self
    }

    pub fn set_enabled(&self, enabled: bool) -> &Self {
        self.data.lock().unwrap().enabled = enabled;
        self
    }

    pub fn set_offscreen(&self, offscreen: bool) -> &Self {
        self.data.lock().unwrap().offscreen = offscreen;
        self
    }

    pub fn add_capability(&self, capability: Capability) -> &Self {
        self.data.lock().unwrap().capabilities.insert(capability);
        self
    }

    pub fn set_value(&self, value: &str) -> &Self {
        let mut data = self.data.lock().unwrap();
        data.capabilities.insert(Capability::Value);
        data.value = value.to_string();
        self
    }

    pub fn set_grid(&self, rows: usize, columns: usize) -> &Self {
        let mut data = self.data.lock().unwrap();
        data.capabilities.insert(Capability::Grid);
        data.grid = Some((rows, columns));
        self
    }

    /// Destroy this element, children first, the way a closing window takes
    /// its content down. Handles stay around but every access fails.
    pub fn destroy(&self) {
        fn kill(data: &Arc<Mutex<SimNodeData>>) {
            let children: Vec<_> = data.lock().unwrap().children.clone();
            for child in &children {
                kill(child);
            }
            data.lock().unwrap().alive = false;
        }
        kill(&self.data);
    }

    /// How many times `invoke` ran against this element.
    pub fn invoke_count(&self) -> u32 {
        self.data.lock().unwrap().invoke_count
    }

    pub fn is_toggled(&self) -> bool {
        self.data.lock().unwrap().toggled
    }

    /// A live-tree handle over this element.
    pub fn node(&self) -> UiNode {
        UiNode::new(Arc::new(SimNode {
            data: self.data.clone(),
        }))
    }
}

struct SimNode {
    data: Arc<Mutex<SimNodeData>>,
}

impl SimNode {
    fn read<T>(
        &self,
        get: impl FnOnce(&SimNodeData) -> T,
    ) -> Result<T, AutomationError> {
        let data = self.data.lock().unwrap();
        if !data.alive {
            return Err(AutomationError::ElementNotAvailable(format!(
                "\"{}\" was destroyed",
                data.name
            )));
        }
        Ok(get(&data))
    }

    fn write<T>(
        &self,
        change: impl FnOnce(&mut SimNodeData) -> T,
    ) -> Result<T, AutomationError> {
        let mut data = self.data.lock().unwrap();
        if !data.alive {
            return Err(AutomationError::ElementNotAvailable(format!(
                "\"{}\" was destroyed",
                data.name
            )));
        }
        Ok(change(&mut data))
    }

    fn require(&self, capability: Capability, pattern: &str) -> Result<(), AutomationError> {
        if self.read(|d| d.capabilities.contains(&capability))? {
            Ok(())
        } else {
            let (role, name) = self.read(|d| (d.control_type.clone(), d.name.clone()))?;
            Err(AutomationError::UnsupportedOperation(format!(
                "{role} \"{name}\" does not support the {pattern} pattern"
            )))
        }
    }

    fn wrap(data: Arc<Mutex<SimNodeData>>) -> UiNode {
        UiNode::new(Arc::new(SimNode { data }))
    }
}

impl NodeBackend for SimNode {
    fn name(&self) -> Result<String, AutomationError> {
        self.read(|d| d.name.clone())
    }

    fn automation_id(&self) -> Result<String, AutomationError> {
        self.read(|d| d.automation_id.clone())
    }

    fn class_name(&self) -> Result<String, AutomationError> {
        self.read(|d| d.class_name.clone())
    }

    fn control_type(&self) -> Result<ControlType, AutomationError> {
        self.read(|d| d.control_type.clone())
    }

    fn bounds(&self) -> Result<Rect, AutomationError> {
        self.read(|d| d.bounds)
    }

    fn is_enabled(&self) -> Result<bool, AutomationError> {
        self.read(|d| d.enabled)
    }

    fn is_offscreen(&self) -> Result<bool, AutomationError> {
        self.read(|d| d.offscreen)
    }

    fn is_available(&self) -> bool {
        self.data.lock().unwrap().alive
    }

    fn parent(&self) -> Result<Option<UiNode>, AutomationError> {
        self.read(|d| d.parent.upgrade())
            .map(|parent| parent.map(SimNode::wrap))
    }

    fn first_child(&self) -> Result<Option<UiNode>, AutomationError> {
        self.read(|d| d.children.first().cloned())
            .map(|child| child.map(SimNode::wrap))
    }

    fn next_sibling(&self) -> Result<Option<UiNode>, AutomationError> {
        let parent = self.read(|d| d.parent.upgrade())?;
        let Some(parent) = parent else {
            return Ok(None);
        };
        let siblings = parent.lock().unwrap().children.clone();
        let position = siblings
            .iter()
            .position(|sibling| Arc::ptr_eq(sibling, &self.data));
        Ok(position
            .and_then(|i| siblings.get(i + 1).cloned())
            .map(SimNode::wrap))
    }

    fn supports(&self, capability: Capability) -> Result<bool, AutomationError> {
        self.read(|d| d.capabilities.contains(&capability))
    }

    fn invoke(&self) -> Result<(), AutomationError> {
        self.require(Capability::Invoke, "Invoke")?;
        self.write(|d| d.invoke_count += 1)
    }

    fn toggle(&self) -> Result<bool, AutomationError> {
        self.require(Capability::Toggle, "Toggle")?;
        self.write(|d| {
            d.toggled = !d.toggled;
            d.toggled
        })
    }

    fn value(&self) -> Result<String, AutomationError> {
        self.require(Capability::Value, "Value")?;
        self.read(|d| d.value.clone())
    }

    fn set_value(&self, value: &str) -> Result<(), AutomationError> {
        self.require(Capability::Value, "Value")?;
        self.write(|d| d.value = value.to_string())
    }

    fn grid_dimensions(&self) -> Result<(usize, usize), AutomationError> {
        self.require(Capability::Grid, "Grid")?;
        self.read(|d| d.grid.unwrap_or((0, 0)))
    }
}

/// The simulated desktop: the tree root plus the backend implementation.
#[derive(Clone)]
pub struct SimDesktop {
    root: SimElement,
}

impl SimDesktop {
    pub fn new() -> Self {
        Self {
            root: SimElement::new(ControlType::Pane, "Desktop"),
        }
    }

    /// Add a visible top-level window.
    pub fn add_window(&self, title: &str) -> SimElement {
        let window = self.root.add_child(ControlType::Window, title);
        window.set_bounds(Rect::new(0.0, 0.0, 800.0, 600.0));
        window
    }

    pub fn root_element(&self) -> &SimElement {
        &self.root
    }
}

impl Default for SimDesktop {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessibilityBackend for SimDesktop {
    fn root(&self) -> UiNode {
        self.root.node()
    }

    fn top_level_windows(&self) -> Result<Vec<UiNode>, AutomationError> {
        let windows = self
            .root
            .node()
            .children()
            .into_iter()
            .filter(|node| {
                matches!(node.control_type(), Ok(ControlType::Window))
                    && matches!(node.is_offscreen(), Ok(false))
            })
            .collect();
        Ok(windows)
    }
}
