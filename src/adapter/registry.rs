use crate::adapter::component::ComponentType;
use crate::dom::dom_model::{Document, NodeId, Property};

/// Behaviour variant selected by tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterVariant {
    Default,
    Input,
    Select,
    TextArea,
    Table,
    Row,
    Cell,
}

/// An identifying key read from an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKey {
    Id,
    Name,
    Value,
    Title,
    Class,
    Alt,
    TextContent,
    Src,
    Href,
}

/// How cascade keys are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// `getAttribute`, so non-standard attributes on any tag are honoured
    Attribute,
    /// DOM property, so live values (typed text, selection) are seen
    Property,
}

/// Ordered attribute priority list; the first non-empty value wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cascade {
    pub name: &'static str,
    pub access: Access,
    pub keys: &'static [IdKey],
}

pub const GENERIC_CASCADE: Cascade = Cascade {
    name: "generic",
    access: Access::Attribute,
    keys: &[
        IdKey::Id,
        IdKey::Name,
        IdKey::Value,
        IdKey::Title,
        IdKey::Class,
        IdKey::Alt,
        IdKey::TextContent,
        IdKey::Src,
        IdKey::Href,
    ],
};

/// Text-like inputs, select and textarea. Value and text are left out so
/// whatever the user typed never becomes the identity.
pub const FORM_CONTROL_CASCADE: Cascade = Cascade {
    name: "form-control",
    access: Access::Property,
    keys: &[IdKey::Id, IdKey::Name, IdKey::Title, IdKey::Class],
};

pub const SUBMIT_CASCADE: Cascade = Cascade {
    name: "submit",
    access: Access::Property,
    keys: &[
        IdKey::Id,
        IdKey::Name,
        IdKey::Value,
        IdKey::TextContent,
        IdKey::Title,
        IdKey::Class,
    ],
};

pub const TABLE_CASCADE: Cascade = Cascade {
    name: "table",
    access: Access::Attribute,
    keys: &[IdKey::Id, IdKey::Name, IdKey::Value, IdKey::Title, IdKey::Class],
};

/// Radio buttons are identified by their group.
pub const RADIO_CASCADE: Cascade = Cascade {
    name: "radio",
    access: Access::Property,
    keys: &[IdKey::Name],
};

pub fn adapter_for(tag: &str) -> AdapterVariant {
    match tag.to_ascii_lowercase().as_str() {
        "input" => AdapterVariant::Input,
        "select" => AdapterVariant::Select,
        "textarea" => AdapterVariant::TextArea,
        "table" => AdapterVariant::Table,
        "tr" => AdapterVariant::Row,
        "td" | "th" => AdapterVariant::Cell,
        _ => AdapterVariant::Default,
    }
}

/// Adapter for a node in a document.
pub fn adapter_for_node(doc: &Document, node: NodeId) -> AdapterVariant {
    adapter_for(doc.tag(node))
}

/// Component type by tag, for tags not handled by a specialised variant.
pub fn component_for_tag(tag: &str) -> ComponentType {
    match tag.to_ascii_lowercase().as_str() {
        "a" => ComponentType::Link,
        "button" => ComponentType::Button,
        "select" => ComponentType::ItemSelector,
        "table" | "tr" | "td" | "th" => ComponentType::Table,
        "textarea" => ComponentType::TextArea,
        "input" => ComponentType::Input,
        "img" => ComponentType::Image,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "p" => ComponentType::Label,
        _ => ComponentType::View,
    }
}

/// Component type of an `<input>` by its `type`.
pub fn component_for_input_type(input_type: &str) -> ComponentType {
    match input_type {
        "checkbox" => ComponentType::CheckBox,
        "radio" => ComponentType::RadioButtons,
        "button" | "submit" | "reset" => ComponentType::Button,
        _ => ComponentType::Input,
    }
}

/// Action recorded for a plain tap on a tag.
pub fn default_action(tag: &str) -> &'static str {
    if tag.eq_ignore_ascii_case("select") {
        "select"
    } else {
        "tap"
    }
}

impl AdapterVariant {
    pub fn component_type(&self, doc: &Document, node: NodeId) -> ComponentType {
        match self {
            AdapterVariant::Input => {
                let input_type = doc.property(node, Property::Type).unwrap_or_default();
                component_for_input_type(&input_type)
            }
            AdapterVariant::Select => ComponentType::ItemSelector,
            AdapterVariant::TextArea => ComponentType::TextArea,
            AdapterVariant::Table | AdapterVariant::Row | AdapterVariant::Cell => ComponentType::Table,
            AdapterVariant::Default => component_for_tag(doc.tag(node)),
        }
    }

    /// Cascade used to derive this element's own identifier.
    pub fn cascade(&self, doc: &Document, node: NodeId) -> &'static Cascade {
        match self {
            AdapterVariant::Input => match doc.property(node, Property::Type).as_deref() {
                Some("radio") => &RADIO_CASCADE,
                Some("submit") | Some("reset") => &SUBMIT_CASCADE,
                _ => &FORM_CONTROL_CASCADE,
            },
            AdapterVariant::Select | AdapterVariant::TextArea => &FORM_CONTROL_CASCADE,
            AdapterVariant::Table => &TABLE_CASCADE,
            // Rows and cells are addressed through their table; their own
            // identifier only shows up in the component tree.
            AdapterVariant::Row | AdapterVariant::Cell | AdapterVariant::Default => &GENERIC_CASCADE,
        }
    }

    /// Whether commands for this variant name the enclosing table.
    pub fn is_table_family(&self) -> bool {
        matches!(self, AdapterVariant::Table | AdapterVariant::Row | AdapterVariant::Cell)
    }
}

impl IdKey {
    /// Read this key from an element; empty strings count as absent.
    pub fn read(&self, doc: &Document, node: NodeId, access: Access) -> Option<String> {
        let value = match access {
            Access::Attribute => match self {
                IdKey::TextContent => Some(doc.text_content(node)),
                _ => doc.attribute(node, self.attribute_name()).map(str::to_string),
            },
            Access::Property => match self {
                IdKey::Id => doc.property(node, Property::Id),
                IdKey::Name => doc.property(node, Property::Name),
                IdKey::Value => doc.property(node, Property::Value),
                IdKey::Title => doc.property(node, Property::Title),
                IdKey::Class => doc.property(node, Property::ClassName),
                IdKey::TextContent => doc.property(node, Property::TextContent),
                IdKey::Alt | IdKey::Src | IdKey::Href => {
                    doc.attribute(node, self.attribute_name()).map(str::to_string)
                }
            },
        };
        value.filter(|v| !v.is_empty())
    }

    pub fn attribute_name(&self) -> &'static str {
        match self {
            IdKey::Id => "id",
            IdKey::Name => "name",
            IdKey::Value => "value",
            IdKey::Title => "title",
            IdKey::Class => "class",
            IdKey::Alt => "alt",
            IdKey::TextContent => "textContent",
            IdKey::Src => "src",
            IdKey::Href => "href",
        }
    }
}
