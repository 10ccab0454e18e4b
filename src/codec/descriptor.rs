use serde::{Deserialize, Serialize};

use crate::adapter::component::ComponentType;
use crate::dom::dom_model::{Document, NodeId, Property};
use crate::engine::error::LocatorError;
use crate::identity::deriver::{component_type, monkey_id};
use crate::record::recorder::{build_command, RecordEvent};

/// JSON element descriptor. Every key is always present; absent values are
/// `null`. `x`/`y` are the bounding-box centre, not the offset-chain sum
/// used by the delimited encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDescriptor {
    #[serde(rename = "monkeyId", default)]
    pub monkey_id: Option<String>,
    #[serde(default)]
    pub component: Option<ComponentType>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "tagName", default)]
    pub tag_name: Option<String>,
    #[serde(rename = "className", default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(rename = "textContent", default)]
    pub text_content: Option<String>,
    #[serde(rename = "type", default)]
    pub element_type: Option<String>,
    #[serde(default)]
    pub x: Option<i64>,
    #[serde(default)]
    pub y: Option<i64>,
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub height: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl ElementDescriptor {
    /// `monkeyId` and `component` are the ones a tap on the element records,
    /// so cells name their table and input buttons their value.
    pub fn from_node(doc: &Document, node: NodeId) -> Self {
        let (x, y) = doc.bounding_center(node);
        let layout = doc.layout(node);
        let (monkey_id, component) = match build_command(doc, node, RecordEvent::Tap) {
            Some(command) => (command.monkey_id, command.component_type),
            None => (monkey_id(doc, node), component_type(doc, node)),
        };

        ElementDescriptor {
            monkey_id: Some(monkey_id),
            component: Some(component),
            id: present(doc.property(node, Property::Id)),
            name: present(doc.property(node, Property::Name)),
            tag_name: Some(doc.tag(node).to_ascii_uppercase()),
            class_name: present(doc.property(node, Property::ClassName)),
            value: present(doc.property(node, Property::Value)),
            text_content: present(doc.property(node, Property::TextContent)),
            element_type: present(doc.property(node, Property::Type)),
            x: Some(x),
            y: Some(y),
            width: Some(layout.client_width),
            height: Some(layout.client_height),
            title: present(doc.property(node, Property::Title)),
        }
    }

    pub fn to_json(&self) -> Result<String, LocatorError> {
        serde_json::to_string(self).map_err(|source| LocatorError::JsonSerialize {
            context: "element descriptor".into(),
            source,
        })
    }

    /// Missing keys decode as `null`.
    pub fn from_json(json: &str) -> Result<Self, LocatorError> {
        serde_json::from_str(json).map_err(|source| LocatorError::JsonParse {
            context: "element descriptor".into(),
            source,
        })
    }

    /// Same predicate the native side uses to confirm a decoded element.
    pub fn matches(&self, monkey_id: &str) -> bool {
        if monkey_id == "*" {
            return true;
        }
        [
            &self.id,
            &self.name,
            &self.value,
            &self.title,
            &self.class_name,
            &self.text_content,
        ]
        .iter()
        .any(|field| field.as_deref() == Some(monkey_id))
    }
}
