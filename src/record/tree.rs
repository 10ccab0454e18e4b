use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dom::dom_model::{Document, NodeId, Property};
use crate::engine::error::LocatorError;
use crate::identity::deriver::{component_type, derive_base};
use crate::identity::ordinal::ordinal_id;

pub const DEFAULT_MAX_ID_LEN: usize = 25;

const SKIPPED_TAGS: &[&str] = &["script", "head"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentNode {
    #[serde(rename = "ComponentType")]
    pub component_type: String,
    #[serde(rename = "monkeyId")]
    pub monkey_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ordinal: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub identifiers: Vec<String>,
    #[serde(rename = "className")]
    pub class_name: String,
    #[serde(default)]
    pub children: Vec<ComponentNode>,
}

impl ComponentNode {
    pub fn to_json(&self) -> Result<String, LocatorError> {
        serde_json::to_string(self).map_err(|source| LocatorError::JsonSerialize {
            context: "component tree".into(),
            source,
        })
    }

    /// Count of entries in this subtree, excluding `self`.
    pub fn descendant_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&ComponentNode> = self.children.iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

/// Component tree of the whole document, `script` and `head` excluded.
pub fn component_tree(doc: &Document, max_id_len: usize) -> ComponentNode {
    // Pre-order list of (node, tree parent); `None` parent means the root entry.
    let mut order: Vec<(NodeId, Option<NodeId>)> = Vec::new();
    let mut stack: Vec<(NodeId, Option<NodeId>)> = doc
        .element_children(doc.root())
        .into_iter()
        .rev()
        .map(|c| (c, None))
        .collect();

    while let Some((node, parent)) = stack.pop() {
        if SKIPPED_TAGS.contains(&doc.tag(node)) {
            continue;
        }
        order.push((node, parent));
        stack.extend(
            doc.element_children(node)
                .into_iter()
                .rev()
                .map(|c| (c, Some(node))),
        );
    }

    // Assemble bottom-up so deep trees never recurse.
    let mut pending: HashMap<NodeId, Vec<ComponentNode>> = HashMap::new();
    let mut top = Vec::new();
    for (node, parent) in order.into_iter().rev() {
        let mut children = pending.remove(&node).unwrap_or_default();
        children.reverse();
        let entry = tree_entry(doc, node, children, max_id_len);
        match parent {
            Some(p) => pending.entry(p).or_default().push(entry),
            None => top.push(entry),
        }
    }
    top.reverse();

    ComponentNode {
        component_type: "HTMLDocument".into(),
        monkey_id: String::new(),
        ordinal: None,
        identifiers: Vec::new(),
        class_name: "HTMLDocument".into(),
        children: top,
    }
}

fn tree_entry(doc: &Document, node: NodeId, children: Vec<ComponentNode>, max_id_len: usize) -> ComponentNode {
    let ordinal = ordinal_id(doc, node);
    let monkey_id = derive_base(doc, node)
        .map(|d| truncate(&d.identifier, max_id_len))
        .unwrap_or_else(|| ordinal.clone());

    ComponentNode {
        component_type: component_type(doc, node).to_string(),
        monkey_id,
        ordinal: Some(ordinal),
        identifiers: identifying_values(doc, node),
        class_name: doc.tag(node).to_ascii_uppercase(),
        children,
    }
}

/// Non-empty id, name, value, title and class, in that order.
pub fn identifying_values(doc: &Document, node: NodeId) -> Vec<String> {
    [
        Property::Id,
        Property::Name,
        Property::Value,
        Property::Title,
        Property::ClassName,
    ]
    .iter()
    .filter_map(|p| doc.property(node, *p))
    .filter(|v| !v.is_empty())
    .collect()
}

fn truncate(id: &str, max_len: usize) -> String {
    if id.chars().count() > max_len {
        let head: String = id.chars().take(max_len).collect();
        format!("{}...", head)
    } else {
        id.to_string()
    }
}
