use crate::adapter::component::ComponentType;
use crate::adapter::registry::{adapter_for_node, IdKey};
use crate::dom::dom_model::{Document, NodeId};
use crate::identity::ordinal::{ordinal_id, with_ordinal_suffix};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdQuality {
    Stable,
    /// Taken from text content that is padded with whitespace or wraps
    /// nested markup; likely to drift between page loads.
    LowQuality,
}

/// Unsuffixed identifier picked by the cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    pub identifier: String,
    pub source: IdKey,
    pub quality: IdQuality,
}

impl Derivation {
    pub fn is_low_quality(&self) -> bool {
        self.quality == IdQuality::LowQuality
    }
}

/// Walk the element's cascade and return the first non-empty value.
pub fn derive_base(doc: &Document, node: NodeId) -> Option<Derivation> {
    if !doc.is_element(node) {
        return None;
    }

    let cascade = adapter_for_node(doc, node).cascade(doc, node);
    let (source, identifier) = cascade
        .keys
        .iter()
        .find_map(|key| key.read(doc, node, cascade.access).map(|v| (*key, v)))?;

    let quality = assess_quality(doc, node, &identifier);
    Some(Derivation {
        identifier,
        source,
        quality,
    })
}

fn assess_quality(doc: &Document, node: NodeId, identifier: &str) -> IdQuality {
    let text = doc.text_content(node);
    if identifier != text {
        return IdQuality::Stable;
    }

    let padded = text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace);
    if padded || doc.has_nested_markup(node) {
        IdQuality::LowQuality
    } else {
        IdQuality::Stable
    }
}

/// Attribute-derived identifier, suffixed with `(n)` when an earlier element
/// of the same tag shares it. Radio groups are never suffixed.
pub fn derive_identifier(doc: &Document, node: NodeId) -> Option<String> {
    let base = derive_base(doc, node)?;
    if is_radio_group(doc, node) {
        return Some(base.identifier);
    }
    Some(with_ordinal_suffix(doc, node, &base.identifier))
}

/// Identifier emitted on the record path: the suffixed attribute identifier,
/// or the pure ordinal when there is none or it is low quality.
pub fn monkey_id(doc: &Document, node: NodeId) -> String {
    match derive_base(doc, node) {
        Some(base) if !base.is_low_quality() => {
            if is_radio_group(doc, node) {
                base.identifier
            } else {
                with_ordinal_suffix(doc, node, &base.identifier)
            }
        }
        _ => ordinal_id(doc, node),
    }
}

pub fn component_type(doc: &Document, node: NodeId) -> ComponentType {
    adapter_for_node(doc, node).component_type(doc, node)
}

fn is_radio_group(doc: &Document, node: NodeId) -> bool {
    component_type(doc, node) == ComponentType::RadioButtons
}
