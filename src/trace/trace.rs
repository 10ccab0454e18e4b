use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::adapter::component::ComponentType;
use crate::dom::dom_model::Document;
use crate::locator::locator_model::MatchTier;

/// Engine operation a trace event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Derive,
    Locate,
    Resolve,
    Encode,
    Decode,
    Record,
}

#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub step: u64,

    pub operation: Operation,

    pub component_type: Option<String>,
    pub monkey_id: Option<String>,
    pub tier: Option<String>,

    pub outcome: Option<String>,
    pub detail: Option<String>,

    /// SHA-1 of the document the operation ran against
    pub document: Option<String>,
}

impl TraceEvent {
    pub fn now(step: u64, operation: Operation) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            step,
            operation,
            component_type: None,
            monkey_id: None,
            tier: None,
            outcome: None,
            detail: None,
            document: None,
        }
    }

    pub fn with_component(mut self, component_type: ComponentType) -> Self {
        self.component_type = Some(component_type.to_string());
        self
    }

    pub fn with_monkey_id(mut self, monkey_id: &str) -> Self {
        self.monkey_id = Some(monkey_id.to_string());
        self
    }

    pub fn with_tier(mut self, tier: MatchTier) -> Self {
        self.tier = Some(tier.to_string());
        self
    }

    pub fn with_outcome(mut self, outcome: impl ToString) -> Self {
        self.outcome = Some(outcome.to_string());
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }

    pub fn with_document(mut self, fingerprint: &str) -> Self {
        self.document = Some(fingerprint.to_string());
        self
    }
}

/// Stable fingerprint over tags, attributes and text, in document order.
pub fn document_fingerprint(doc: &Document) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    for node in doc.elements() {
        hasher.update(doc.tag(node).as_bytes());
        if let Some(el) = doc.element(node) {
            for (name, value) in &el.attributes {
                hasher.update(name.as_bytes());
                hasher.update(b"=");
                hasher.update(value.as_bytes());
            }
        }
        hasher.update(b";");
    }
    hasher.update(doc.text_content(doc.root()).as_bytes());
    format!("{:x}", hasher.finalize())
}
