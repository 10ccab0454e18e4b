use std::collections::HashMap;

use crate::adapter::component::ComponentType;
use crate::dom::dom_model::{Document, NodeId, Property};
use crate::identity::deriver::{component_type, derive_base, Derivation};
use crate::identity::monkey_id::MonkeyId;

/// Rank of `node` among same-tag elements whose unsuffixed identifier is
/// `base`, counted in document order (1-based).
pub fn suffix_rank(doc: &Document, node: NodeId, base: &str) -> usize {
    let mut preceding = 0;
    for candidate in doc.elements_by_tag(doc.tag(node)) {
        if candidate == node {
            break;
        }
        let shares_base = derive_base(doc, candidate)
            .map(|d| d.identifier == base)
            .unwrap_or(false);
        if shares_base {
            preceding += 1;
        }
    }
    preceding + 1
}

/// `base` unchanged for the first holder, `base(n)` for later ones.
pub fn with_ordinal_suffix(doc: &Document, node: NodeId, base: &str) -> String {
    match suffix_rank(doc, node, base) {
        1 => base.to_string(),
        rank => format!("{}({})", base, rank),
    }
}

/// Type used to group elements for pure-ordinal ranking. Inputs use their
/// `type` property, so a bare `<input>` ranks together with `type="text"`
/// while checkboxes and radios each rank among their own kind.
fn ordinal_type(doc: &Document, node: NodeId) -> Option<String> {
    doc.property(node, Property::Type)
}

/// Rank of `node` among all elements with the same tag and type (1-based).
pub fn ordinal_rank(doc: &Document, node: NodeId) -> usize {
    let tag = doc.tag(node);
    let node_type = ordinal_type(doc, node);

    let mut preceding = 0;
    for candidate in doc.elements() {
        if candidate == node {
            break;
        }
        if doc.tag(candidate) == tag && ordinal_type(doc, candidate) == node_type {
            preceding += 1;
        }
    }
    preceding + 1
}

/// `"*"` for the only (or first) element of its tag and type, `"#n"` otherwise.
pub fn ordinal_id(doc: &Document, node: NodeId) -> String {
    match ordinal_rank(doc, node) {
        1 => "*".to_string(),
        rank => format!("#{}", rank),
    }
}

// ============================================================================
// Whole-document ranks
// ============================================================================

struct RankEntry {
    base: Option<Derivation>,
    suffix_rank: usize,
    ordinal_rank: usize,
    radio: bool,
}

/// Suffix and ordinal ranks of every element, computed in one document pass.
/// Answers "does this identifier name that element" without rescanning the
/// element's same-tag siblings per lookup.
pub struct IdentityIndex {
    entries: HashMap<NodeId, RankEntry>,
}

impl IdentityIndex {
    pub fn build(doc: &Document) -> Self {
        let mut suffix_counts: HashMap<(String, String), usize> = HashMap::new();
        let mut ordinal_counts: HashMap<(String, Option<String>), usize> = HashMap::new();
        let mut entries = HashMap::new();

        for node in doc.elements() {
            let tag = doc.tag(node).to_string();
            let base = derive_base(doc, node);

            let suffix_rank = match &base {
                Some(b) => {
                    let count = suffix_counts.entry((tag.clone(), b.identifier.clone())).or_insert(0);
                    *count += 1;
                    *count
                }
                None => 0,
            };

            let ordinal = ordinal_counts.entry((tag, ordinal_type(doc, node))).or_insert(0);
            *ordinal += 1;

            entries.insert(
                node,
                RankEntry {
                    base,
                    suffix_rank,
                    ordinal_rank: *ordinal,
                    radio: component_type(doc, node) == ComponentType::RadioButtons,
                },
            );
        }

        IdentityIndex { entries }
    }

    /// True when `raw` (parsed as `id`) is the identifier the recorder emits for `node`:
    /// the ordinal for elements without a stable base, the plain base for
    /// its first holder and for radios, `base(n)` for the n-th holder.
    pub fn identifies(&self, node: NodeId, raw: &str, id: &MonkeyId) -> bool {
        let Some(entry) = self.entries.get(&node) else {
            return false;
        };

        let stable = entry.base.as_ref().filter(|b| !b.is_low_quality());
        match (stable, id) {
            (None, MonkeyId::Wildcard) => entry.ordinal_rank == 1,
            (None, MonkeyId::Ordinal(n)) => entry.ordinal_rank == *n,
            (None, _) => false,
            (Some(base), _) if entry.radio => base.identifier == raw,
            (Some(base), MonkeyId::Suffixed { base: wanted, ordinal })
                if base.identifier == *wanted && entry.suffix_rank == *ordinal =>
            {
                true
            }
            // A base that itself looks like `#n` or `x(n)` is emitted verbatim by its first holder
            (Some(base), _) => entry.suffix_rank == 1 && base.identifier == raw,
        }
    }
}
