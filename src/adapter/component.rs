use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Automation-facing category of an element, independent of its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentType {
    Link,
    Button,
    Input,
    CheckBox,
    RadioButtons,
    ItemSelector,
    Table,
    TextArea,
    Image,
    Label,
    View,
}

impl ComponentType {
    pub const ALL: [ComponentType; 11] = [
        ComponentType::Link,
        ComponentType::Button,
        ComponentType::Input,
        ComponentType::CheckBox,
        ComponentType::RadioButtons,
        ComponentType::ItemSelector,
        ComponentType::Table,
        ComponentType::TextArea,
        ComponentType::Image,
        ComponentType::Label,
        ComponentType::View,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Link => "Link",
            ComponentType::Button => "Button",
            ComponentType::Input => "Input",
            ComponentType::CheckBox => "CheckBox",
            ComponentType::RadioButtons => "RadioButtons",
            ComponentType::ItemSelector => "ItemSelector",
            ComponentType::Table => "Table",
            ComponentType::TextArea => "TextArea",
            ComponentType::Image => "Image",
            ComponentType::Label => "Label",
            ComponentType::View => "View",
        }
    }

    /// Lenient lookup used at the text boundary: unknown names become `View`.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or(ComponentType::View)
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ComponentType::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .copied()
            .ok_or_else(|| format!("unknown component type '{}'", s))
    }
}

impl From<String> for ComponentType {
    fn from(s: String) -> Self {
        ComponentType::from_name(&s)
    }
}

impl From<ComponentType> for String {
    fn from(c: ComponentType) -> Self {
        c.as_str().to_string()
    }
}
