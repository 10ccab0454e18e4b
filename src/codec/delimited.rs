use crate::dom::dom_model::{Document, NodeId, Property};
use crate::engine::error::LocatorError;

pub const DEFAULT_FIELD_SEPARATOR: &str = "<-mtf->";
pub const DEFAULT_ELEMENT_SEPARATOR: &str = "<-mte->";

/// Base field names, in wire order.
pub const BASE_FIELDS: [&str; 12] = [
    "tagName",
    "id",
    "name",
    "className",
    "value",
    "textContent",
    "type",
    "x",
    "y",
    "width",
    "height",
    "title",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separators {
    pub field: String,
    pub element: String,
}

impl Default for Separators {
    fn default() -> Self {
        Separators {
            field: DEFAULT_FIELD_SEPARATOR.to_string(),
            element: DEFAULT_ELEMENT_SEPARATOR.to_string(),
        }
    }
}

/// One element in the flat-text encoding. Empty strings are folded into
/// `None` so an element survives encode/decode unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedElement {
    pub tag_name: String,
    pub id: Option<String>,
    pub name: Option<String>,
    pub class_name: Option<String>,
    pub value: Option<String>,
    pub text_content: Option<String>,
    pub element_type: Option<String>,
    /// Offset-chain sum; ignores scrolling and transforms
    pub absolute_x: i64,
    pub absolute_y: i64,
    pub client_width: i64,
    pub client_height: i64,
    pub title: Option<String>,
    /// Requested extra attributes, in request order
    pub extras: Vec<(String, Option<String>)>,
}

/// Decoded elements plus the descriptors that had to be patched up.
#[derive(Debug, Default)]
pub struct DecodeReport {
    pub elements: Vec<DelimitedElement>,
    pub warnings: Vec<LocatorError>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl DelimitedElement {
    pub fn from_node(doc: &Document, node: NodeId, extra_attributes: &[String]) -> Self {
        let (absolute_x, absolute_y) = doc.absolute_position(node);
        let layout = doc.layout(node);

        DelimitedElement {
            tag_name: doc.tag(node).to_ascii_uppercase(),
            id: present(doc.property(node, Property::Id)),
            name: present(doc.property(node, Property::Name)),
            class_name: present(doc.property(node, Property::ClassName)),
            value: present(doc.property(node, Property::Value)),
            text_content: present(doc.property(node, Property::TextContent)),
            element_type: present(doc.property(node, Property::Type)),
            absolute_x,
            absolute_y,
            client_width: layout.client_width,
            client_height: layout.client_height,
            title: present(doc.property(node, Property::Title)),
            extras: extra_attributes
                .iter()
                .map(|a| (a.clone(), present(doc.attribute(node, a).map(str::to_string))))
                .collect(),
        }
    }

    pub fn encode(&self, separators: &Separators) -> String {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();

        let mut fields = vec![
            self.tag_name.clone(),
            text(&self.id),
            text(&self.name),
            text(&self.class_name),
            text(&self.value),
            text(&self.text_content),
            text(&self.element_type),
            self.absolute_x.to_string(),
            self.absolute_y.to_string(),
            self.client_width.to_string(),
            self.client_height.to_string(),
            text(&self.title),
        ];
        fields.extend(self.extras.iter().map(|(_, v)| text(v)));
        fields.join(&separators.field)
    }

    /// Decode one element. Missing trailing fields and unparsable numbers are
    /// substituted with empty/zero and reported through `warnings`.
    pub fn decode(
        encoded: &str,
        index: usize,
        extra_attributes: &[String],
        separators: &Separators,
        warnings: &mut Vec<LocatorError>,
    ) -> Self {
        let expected = BASE_FIELDS.len() + extra_attributes.len();
        let parts: Vec<&str> = encoded.splitn(expected, separators.field.as_str()).collect();

        if parts.len() < expected {
            warnings.push(LocatorError::MalformedDescriptor {
                index,
                detail: format!("expected {} fields, found {}", expected, parts.len()),
            });
        }

        let field = |i: usize| -> Option<String> {
            parts.get(i).map(|s| s.to_string()).filter(|s| !s.is_empty())
        };
        let mut number = |i: usize| -> i64 {
            let Some(raw) = parts.get(i).filter(|s| !s.is_empty()) else {
                return 0;
            };
            match raw.trim().parse::<f64>() {
                Ok(n) => n.trunc() as i64,
                Err(_) => {
                    warnings.push(LocatorError::MalformedDescriptor {
                        index,
                        detail: format!("field '{}' is not numeric: '{}'", BASE_FIELDS[i], raw),
                    });
                    0
                }
            }
        };

        let absolute_x = number(7);
        let absolute_y = number(8);
        let client_width = number(9);
        let client_height = number(10);

        DelimitedElement {
            tag_name: field(0).unwrap_or_default(),
            id: field(1),
            name: field(2),
            class_name: field(3),
            value: field(4),
            text_content: field(5),
            element_type: field(6),
            absolute_x,
            absolute_y,
            client_width,
            client_height,
            title: field(11),
            extras: extra_attributes
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), field(BASE_FIELDS.len() + i)))
                .collect(),
        }
    }
}

pub fn encode_element(doc: &Document, node: NodeId, extra_attributes: &[String], separators: &Separators) -> String {
    DelimitedElement::from_node(doc, node, extra_attributes).encode(separators)
}

pub fn encode_elements(doc: &Document, nodes: &[NodeId], extra_attributes: &[String], separators: &Separators) -> String {
    nodes
        .iter()
        .map(|n| encode_element(doc, *n, extra_attributes, separators))
        .collect::<Vec<_>>()
        .join(&separators.element)
}

/// Decode a list of elements. An empty payload is an empty list.
pub fn decode_elements(encoded: &str, extra_attributes: &[String], separators: &Separators) -> DecodeReport {
    let mut report = DecodeReport::default();
    if encoded.is_empty() {
        return report;
    }

    for (index, chunk) in encoded.split(separators.element.as_str()).enumerate() {
        let element = DelimitedElement::decode(chunk, index, extra_attributes, separators, &mut report.warnings);
        report.elements.push(element);
    }
    report
}
