//! Snapshots of UI trees and their compact textual rendering.
//!
//! A [`UiTreeNode`] is a detached, serializable copy of a subtree, taken at
//! one instant. The formatter renders it as an indented `#index [ROLE] name`
//! listing; only elements with a bounding rectangle receive an index, and
//! the index-to-bounds map lets a caller turn an index back into a clickable
//! point.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::node::{NodeAttributes, Rect, UiNode};

/// A detached snapshot of one node and its children.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiTreeNode {
    pub attributes: NodeAttributes,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<UiTreeNode>,
}

impl UiTreeNode {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Total node count, this node included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(UiTreeNode::node_count).sum::<usize>()
    }
}

/// Copy the live subtree under `node` into a detached snapshot.
///
/// Branches that vanish while the snapshot is being taken are truncated the
/// same way the search traversal truncates them.
pub fn snapshot(node: &UiNode, max_depth: Option<usize>) -> UiTreeNode {
    fn build(node: &UiNode, depth: usize, max_depth: Option<usize>) -> UiTreeNode {
        let descend = max_depth.map(|limit| depth < limit).unwrap_or(true);
        UiTreeNode {
            attributes: node.attributes(),
            children: if descend {
                node.children()
                    .iter()
                    .map(|child| build(child, depth + 1, max_depth))
                    .collect()
            } else {
                Vec::new()
            },
        }
    }
    build(node, 0, max_depth)
}

/// Result of tree formatting: the rendered listing plus the index mapping
/// for point targeting.
#[derive(Debug, Clone)]
pub struct TreeFormattingResult {
    pub formatted: String,
    /// 1-based index to (role, name, bounds).
    pub index_to_bounds: HashMap<u32, (String, String, Rect)>,
    pub element_count: u32,
}

/// Format a snapshot as a compact YAML-like listing.
///
/// Output format:
/// ```text
/// #1 [Window] Calculator (bounds: [0, 0, 800, 600])
///   #2 [Button] Seven (bounds: [10, 40, 32, 32])
///   - [Group] History
/// ```
pub fn format_tree_as_compact_yaml(tree: &UiTreeNode) -> TreeFormattingResult {
    let mut output = String::new();
    let mut index_to_bounds = HashMap::new();
    let mut next_index = 1u32;
    format_node(tree, 0, &mut output, &mut index_to_bounds, &mut next_index);
    TreeFormattingResult {
        formatted: output,
        index_to_bounds,
        element_count: next_index - 1,
    }
}

fn format_node(
    node: &UiTreeNode,
    indent: usize,
    output: &mut String,
    index_to_bounds: &mut HashMap<u32, (String, String, Rect)>,
    next_index: &mut u32,
) {
    let attrs = &node.attributes;
    output.push_str(&"  ".repeat(indent));

    if let Some(bounds) = attrs.bounds {
        let idx = *next_index;
        *next_index += 1;
        output.push_str(&format!("#{idx} [{}]", attrs.role));
        index_to_bounds.insert(
            idx,
            (
                attrs.role.clone(),
                attrs.name.clone().unwrap_or_default(),
                bounds,
            ),
        );
        if let Some(name) = &attrs.name {
            output.push_str(&format!(" {name}"));
        }
        output.push_str(&format!(
            " (bounds: [{:.0}, {:.0}, {:.0}, {:.0}]",
            bounds.left, bounds.top, bounds.width, bounds.height
        ));
        if attrs.enabled == Some(false) {
            output.push_str(", disabled");
        }
        if attrs.offscreen == Some(true) {
            output.push_str(", offscreen");
        }
        output.push(')');
    } else {
        // No rectangle to click; dash prefix, no index.
        output.push_str(&format!("- [{}]", attrs.role));
        if let Some(name) = &attrs.name {
            output.push_str(&format!(" {name}"));
        }
    }
    if let Some(id) = &attrs.automation_id {
        output.push_str(&format!(" #{id}"));
    }
    output.push('\n');

    for child in &node.children {
        format_node(child, indent + 1, output, index_to_bounds, next_index);
    }
}
