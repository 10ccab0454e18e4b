use std::fmt;

use crate::adapter::component::ComponentType;
use crate::dom::dom_model::NodeId;

/// Which elements count as "of the expected tag".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagConstraint {
    Any,
    Tag(String),
    /// Element's adapter must report this component type
    Component(ComponentType),
}

/// Where candidates come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Document,
    /// Descendants of a node, excluding the node itself
    Subtree(NodeId),
    /// An explicit list, in the caller's order
    Nodes(Vec<NodeId>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementQuery {
    pub monkey_id: String,
    pub tag: TagConstraint,
    /// Expected `type`; candidates carrying a different type are skipped in the scan tiers
    pub element_type: Option<String>,
}

impl ElementQuery {
    pub fn new(monkey_id: &str) -> Self {
        ElementQuery {
            monkey_id: monkey_id.to_string(),
            tag: TagConstraint::Any,
            element_type: None,
        }
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = TagConstraint::Tag(tag.to_ascii_lowercase());
        self
    }

    pub fn with_component(mut self, component: ComponentType) -> Self {
        self.tag = TagConstraint::Component(component);
        self
    }

    pub fn with_type(mut self, element_type: &str) -> Self {
        self.element_type = Some(element_type.to_ascii_lowercase());
        self
    }

    /// Query shaped the way playback addresses a component type.
    pub fn for_component(monkey_id: &str, component: ComponentType) -> Self {
        let query = ElementQuery::new(monkey_id);
        match component {
            ComponentType::Link => query.with_tag("a"),
            ComponentType::ItemSelector => query.with_tag("select"),
            ComponentType::Table => query.with_tag("table"),
            ComponentType::TextArea => query.with_tag("textarea"),
            ComponentType::Image => query.with_tag("img"),
            ComponentType::CheckBox => query.with_tag("input").with_type("checkbox"),
            ComponentType::RadioButtons => query.with_tag("input").with_type("radio"),
            ComponentType::Input | ComponentType::Button | ComponentType::Label => {
                query.with_component(component)
            }
            ComponentType::View => query,
        }
    }
}

/// Tier that produced a match, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    Id,
    Name,
    ClassName,
    Scan,
    DerivedIdentity,
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchTier::Id => "id",
            MatchTier::Name => "name",
            MatchTier::ClassName => "className",
            MatchTier::Scan => "scan",
            MatchTier::DerivedIdentity => "derived",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub node: NodeId,
    pub tier: MatchTier,
}
