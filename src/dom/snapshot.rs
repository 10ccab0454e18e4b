use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dom::dom_model::{Document, Layout, NodeId};
use crate::engine::error::LocatorError;

/// Page dump produced by the browser-side extraction script:
/// `{ "url": ..., "title": ..., "dom": [ <node>, ... ] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub dom: Vec<SnapshotNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotNode {
    Element(SnapshotElement),
    Text { text: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotElement {
    pub tag: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub layout: Layout,

    /// Live `value` when it differs from the markup (typed text, etc.)
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub checked: Option<bool>,
    #[serde(default)]
    pub selected_index: Option<usize>,

    #[serde(default)]
    pub children: Vec<SnapshotNode>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self, LocatorError> {
        serde_json::from_str(json).map_err(|source| LocatorError::JsonParse {
            context: "DOM snapshot".into(),
            source,
        })
    }

    /// Materialise the snapshot as a document arena.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        let root = doc.root();

        let mut stack: Vec<(&SnapshotNode, NodeId)> = self.dom.iter().rev().map(|n| (n, root)).collect();

        while let Some((node, parent)) = stack.pop() {
            match node {
                SnapshotNode::Text { text } => {
                    doc.append_text(parent, text);
                }
                SnapshotNode::Element(el) => {
                    let attrs: Vec<(&str, &str)> = el
                        .attributes
                        .iter()
                        .map(|(k, v)| (k.as_str(), v.as_str()))
                        .collect();
                    let id = doc.append_element(parent, &el.tag, &attrs);
                    doc.set_layout(id, el.layout);
                    if let Some(value) = &el.value {
                        doc.set_value(id, value);
                    }
                    if let Some(checked) = el.checked {
                        doc.set_checked(id, checked);
                    }
                    if let Some(index) = el.selected_index {
                        doc.set_selected_index(id, index);
                    }
                    stack.extend(el.children.iter().rev().map(|c| (c, id)));
                }
            }
        }

        doc.resolve_offset_parents();
        doc
    }
}

/// Parse a JSON snapshot straight into a document.
pub fn document_from_json(json: &str) -> Result<Document, LocatorError> {
    Ok(Snapshot::from_json(json)?.to_document())
}
