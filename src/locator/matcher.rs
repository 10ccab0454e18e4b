use crate::adapter::component::ComponentType;
use crate::dom::dom_model::{Document, NodeId, Property};
use crate::identity::deriver::component_type;
use crate::identity::monkey_id::MonkeyId;
use crate::identity::ordinal::IdentityIndex;
use crate::locator::locator_model::{ElementQuery, Match, MatchTier, Scope, TagConstraint};

/// Resolve a query to the first element it names. Tiers are tried in order
/// and the first tier with a hit wins; within a tier, document order decides.
/// `None` is the not-found sentinel.
pub fn find_element(doc: &Document, query: &ElementQuery, scope: &Scope) -> Option<Match> {
    let id = query.monkey_id.as_str();
    if id.is_empty() {
        return None;
    }

    let candidates = scope_candidates(doc, scope);
    let tagged: Vec<NodeId> = candidates
        .iter()
        .copied()
        .filter(|c| tag_matches(doc, *c, &query.tag))
        .collect();

    // 1. id: the first holder of the id decides, and must be of the right tag
    if let Some(holder) = candidates.iter().copied().find(|c| doc.attribute(*c, "id") == Some(id)) {
        if tag_matches(doc, holder, &query.tag) {
            return Some(Match { node: holder, tier: MatchTier::Id });
        }
    }

    // 2. name
    if let Some(node) = tagged.iter().copied().find(|c| doc.attribute(*c, "name") == Some(id)) {
        return Some(Match { node, tier: MatchTier::Name });
    }

    // 3. class
    if let Some(node) = tagged.iter().copied().find(|c| doc.attribute(*c, "class") == Some(id)) {
        return Some(Match { node, tier: MatchTier::ClassName });
    }

    let typed: Vec<NodeId> = tagged
        .into_iter()
        .filter(|c| type_matches(doc, *c, query.element_type.as_deref()))
        .collect();

    // 4. loose scan
    let parsed = MonkeyId::parse(id);
    if let Some(node) = typed
        .iter()
        .copied()
        .find(|c| parsed.is_wildcard() || loosely_matches(doc, *c, id))
    {
        return Some(Match { node, tier: MatchTier::Scan });
    }

    // 5. identifier the recorder would have emitted (suffixed or ordinal)
    if typed.is_empty() {
        return None;
    }
    let index = IdentityIndex::build(doc);
    typed
        .into_iter()
        .find(|c| index.identifies(*c, id, &parsed))
        .map(|node| Match {
            node,
            tier: MatchTier::DerivedIdentity,
        })
}

/// Convenience wrapper returning only the node.
pub fn locate(doc: &Document, query: &ElementQuery, scope: &Scope) -> Option<NodeId> {
    find_element(doc, query, scope).map(|m| m.node)
}

/// True when `value` equals one of the element's identifying properties
/// (id, name, value, text, title).
pub fn is_match(doc: &Document, node: NodeId, value: &str) -> bool {
    [
        Property::Id,
        Property::Name,
        Property::Value,
        Property::TextContent,
        Property::Title,
    ]
    .iter()
    .any(|p| doc.property(node, *p).as_deref() == Some(value))
}

/// The n-th (1-based) non-hidden element of `candidates`, accepted only if
/// it is of the expected component type.
pub fn find_nth_element(
    doc: &Document,
    candidates: &[NodeId],
    n: usize,
    expected: ComponentType,
) -> Option<NodeId> {
    let offset = n.saturating_sub(1);
    let element = candidates
        .iter()
        .copied()
        .filter(|c| doc.is_element(*c))
        .filter(|c| doc.property(*c, Property::Type).as_deref() != Some("hidden"))
        .nth(offset)?;

    (component_type(doc, element) == expected).then_some(element)
}

pub fn scope_candidates(doc: &Document, scope: &Scope) -> Vec<NodeId> {
    match scope {
        Scope::Document => doc.elements(),
        Scope::Subtree(root) => doc.descendants(*root),
        Scope::Nodes(nodes) => nodes.iter().copied().filter(|n| doc.is_element(*n)).collect(),
    }
}

fn tag_matches(doc: &Document, node: NodeId, constraint: &TagConstraint) -> bool {
    match constraint {
        TagConstraint::Any => true,
        TagConstraint::Tag(tag) => doc.tag(node).eq_ignore_ascii_case(tag),
        TagConstraint::Component(expected) => component_type(doc, node) == *expected,
    }
}

/// A candidate with a non-empty `type` different from the expected one is
/// skipped. Without an expected type nothing is filtered.
fn type_matches(doc: &Document, node: NodeId, expected: Option<&str>) -> bool {
    let Some(expected) = expected else {
        return true;
    };
    match doc.property(node, Property::Type) {
        Some(actual) if !actual.is_empty() => actual.eq_ignore_ascii_case(expected),
        _ => true,
    }
}

fn loosely_matches(doc: &Document, node: NodeId, id: &str) -> bool {
    [
        Property::Value,
        Property::TextContent,
        Property::Title,
        Property::ClassName,
    ]
    .iter()
    .any(|p| doc.property(node, *p).as_deref() == Some(id))
}
