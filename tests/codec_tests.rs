use monkey_id::adapter::component::ComponentType;
use monkey_id::codec::command::Command;
use monkey_id::codec::delimited::{
    decode_elements, encode_element, encode_elements, DelimitedElement, Separators, BASE_FIELDS,
};
use monkey_id::codec::descriptor::ElementDescriptor;
use monkey_id::dom::dom_model::{Document, Layout, NodeId};
use monkey_id::engine::engine::Engine;
use monkey_id::engine::error::LocatorError;

mod common;
use crate::common::utils::{by_id, cell, element_table, empty_body, layout, load_fixture, nth, page};

/// `<div positioned> <span id="price" data-row="7" aria-label="Price">9.99</span> </div>`
fn price_doc() -> (Document, NodeId) {
    let (mut doc, body) = empty_body();
    let panel = doc.append_element(body, "div", &[]);
    let span = doc.append_element(
        panel,
        "span",
        &[("id", "price"), ("data-row", "7"), ("aria-label", "Price")],
    );
    doc.append_text(span, "9.99");

    doc.set_layout(
        panel,
        Layout {
            positioned: true,
            ..layout(10, 20, 200, 100)
        },
    );
    doc.set_layout(span, layout(5, 7, 40, 12));
    doc.resolve_offset_parents();
    (doc, span)
}

fn sep() -> Separators {
    Separators::default()
}

// =========================================================================
// Delimited encoding
// =========================================================================

#[test]
fn encode_emits_every_base_field_in_order() {
    let (doc, span) = price_doc();
    let encoded = encode_element(&doc, span, &[], &sep());

    let expected = ["SPAN", "price", "", "", "", "9.99", "", "15", "27", "40", "12", ""].join("<-mtf->");
    assert_eq!(encoded, expected);
    assert_eq!(encoded.split("<-mtf->").count(), BASE_FIELDS.len());
}

#[test]
fn extra_attributes_follow_in_request_order() {
    let (doc, span) = price_doc();
    let extras = vec!["aria-label".to_string(), "data-missing".to_string(), "data-row".to_string()];
    let encoded = encode_element(&doc, span, &extras, &sep());

    let fields: Vec<&str> = encoded.split("<-mtf->").collect();
    assert_eq!(fields.len(), BASE_FIELDS.len() + 3);
    assert_eq!(&fields[12..], &["Price", "", "7"]);
}

#[test]
fn decode_restores_encoded_fields() {
    let (doc, span) = price_doc();
    let extras = vec!["data-row".to_string()];
    let original = DelimitedElement::from_node(&doc, span, &extras);

    let report = decode_elements(&original.encode(&sep()), &extras, &sep());
    assert!(report.warnings.is_empty(), "Warnings: {:?}", report.warnings);
    assert_eq!(report.elements, vec![original]);
}

#[test]
fn decode_element_fields() {
    let encoded = ["INPUT", "", "q", "search", "rust", "", "text", "4", "8", "120", "20", "Search"].join("<-mtf->");
    let report = decode_elements(&encoded, &[], &sep());
    let element = &report.elements[0];

    assert_eq!(element.tag_name, "INPUT");
    assert_eq!(element.id, None, "Empty fields decode as absent");
    assert_eq!(element.name.as_deref(), Some("q"));
    assert_eq!(element.value.as_deref(), Some("rust"));
    assert_eq!(element.element_type.as_deref(), Some("text"));
    assert_eq!((element.absolute_x, element.absolute_y), (4, 8));
    assert_eq!((element.client_width, element.client_height), (120, 20));
    assert_eq!(element.title.as_deref(), Some("Search"));
}

#[test]
fn multiple_elements_use_the_element_separator() {
    let doc = load_fixture("signup.html");
    let inputs = doc.elements_by_tag("input");
    let encoded = encode_elements(&doc, &inputs, &[], &sep());

    assert_eq!(encoded.matches("<-mte->").count(), inputs.len() - 1);

    let report = decode_elements(&encoded, &[], &sep());
    assert_eq!(report.elements.len(), inputs.len());
    assert_eq!(report.elements[0].id.as_deref(), Some("user"));
    assert_eq!(report.elements[5].value.as_deref(), Some("Join"));
}

#[test]
fn custom_separators() {
    let (doc, span) = price_doc();
    let separators = Separators {
        field: "|".into(),
        element: "\n".into(),
    };
    let encoded = encode_elements(&doc, &[span, span], &[], &separators);

    assert_eq!(encoded.lines().count(), 2);
    assert!(encoded.starts_with("SPAN|price|"));
}

#[test]
fn empty_payload_decodes_to_nothing() {
    let report = decode_elements("", &[], &sep());
    assert!(report.elements.is_empty());
    assert!(report.warnings.is_empty());
}

#[test]
fn short_descriptor_is_patched_and_reported() {
    let report = decode_elements("A<-mtf->home", &[], &sep());

    assert_eq!(report.elements.len(), 1);
    let element = &report.elements[0];
    assert_eq!(element.tag_name, "A");
    assert_eq!(element.id.as_deref(), Some("home"));
    assert_eq!(element.title, None);
    assert_eq!(element.absolute_x, 0);

    assert_eq!(report.warnings.len(), 1);
    let warning = &report.warnings[0];
    assert!(matches!(warning, LocatorError::MalformedDescriptor { index: 0, .. }));
    assert!(!warning.is_fatal(), "Malformed descriptors are warnings");
}

#[test]
fn non_numeric_geometry_is_zeroed_and_reported() {
    let good = ["A", "", "", "", "", "", "", "1", "2", "3", "4", ""].join("<-mtf->");
    let bad = ["B", "", "", "", "", "", "", "left", "2", "3", "4", ""].join("<-mtf->");
    let report = decode_elements(&format!("{}<-mte->{}", good, bad), &[], &sep());

    assert_eq!(report.elements[1].absolute_x, 0);
    assert_eq!(report.elements[1].absolute_y, 2);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].to_string().contains("#1"), "Warning names the element index");
}

#[test]
fn engine_decode_returns_warnings() {
    let mut engine = Engine::new();
    let (elements, warnings) = engine.decode("DIV");
    assert_eq!(elements.len(), 1);
    assert_eq!(warnings.len(), 1);
}

// =========================================================================
// JSON descriptor
// =========================================================================

#[test]
fn descriptor_uses_bounding_center_and_nulls() {
    let doc = load_fixture("cart.json");
    let qty = nth(&doc, "input", 0);
    let descriptor = ElementDescriptor::from_node(&doc, qty);

    assert_eq!(descriptor.monkey_id.as_deref(), Some("qty"));
    assert_eq!(descriptor.component, Some(ComponentType::Input));
    assert_eq!(descriptor.tag_name.as_deref(), Some("INPUT"));
    assert_eq!((descriptor.x, descriptor.y), (Some(140), Some(82)));
    assert_eq!((descriptor.width, descriptor.height), (Some(60), Some(24)));

    let panel = ElementDescriptor::from_node(&doc, by_id(&doc, "panel"));
    let json = panel.to_json().unwrap();
    assert!(json.contains(r#""monkeyId":"panel""#), "JSON: {}", json);
    assert!(json.contains(r#""component":"View""#));
    assert!(json.contains(r#""name":null"#), "div has no name property");
    assert!(json.contains(r#""value":null"#));
    assert!(json.contains(r#""type":null"#));
}

#[test]
fn descriptor_names_what_a_tap_records() {
    let (doc, table) = element_table(&[["H", "1"], ["Hydrogen", ""]]);
    let descriptor = ElementDescriptor::from_node(&doc, cell(&doc, table, 1, 0));

    assert_eq!(descriptor.monkey_id.as_deref(), Some("elements"), "Cells name their table");
    assert_eq!(descriptor.component, Some(ComponentType::Table));
    assert_eq!(descriptor.text_content.as_deref(), Some("Hydrogen"));

    let doc = page(r#"<input type="button" value="Go" class="btn">"#);
    let descriptor = ElementDescriptor::from_node(&doc, nth(&doc, "input", 0));
    assert_eq!(descriptor.monkey_id.as_deref(), Some("Go"));
    assert_eq!(descriptor.component, Some(ComponentType::Button));
}

#[test]
fn descriptor_of_untapped_kinds_keeps_derived_identity() {
    let doc = load_fixture("signup.html");
    let descriptor = ElementDescriptor::from_node(&doc, by_id(&doc, "country"));

    assert_eq!(descriptor.monkey_id.as_deref(), Some("country"));
    assert_eq!(descriptor.component, Some(ComponentType::ItemSelector));
}

#[test]
fn descriptor_missing_attributes_are_null() {
    let doc = page("<p>Plain</p>");
    let json = ElementDescriptor::from_node(&doc, nth(&doc, "p", 0)).to_json().unwrap();

    assert!(json.contains(r#""id":null"#), "JSON: {}", json);
    assert!(json.contains(r#""className":null"#));
    assert!(json.contains(r#""title":null"#));
    assert!(json.contains(r#""textContent":"Plain""#));
}

#[test]
fn descriptor_from_partial_json() {
    let descriptor = ElementDescriptor::from_json(r#"{"monkeyId":"save","tagName":"BUTTON","value":"Save"}"#).unwrap();

    assert_eq!(descriptor.monkey_id.as_deref(), Some("save"));
    assert_eq!(descriptor.component, None);
    assert_eq!(descriptor.x, None);
    assert!(descriptor.matches("Save"));
    assert!(descriptor.matches("*"));
    assert!(!descriptor.matches("BUTTON"), "Tag name is not an identifying field");
}

#[test]
fn descriptor_rejects_malformed_json() {
    let err = ElementDescriptor::from_json("{not json").unwrap_err();
    assert!(matches!(err, LocatorError::JsonParse { .. }));
}

// =========================================================================
// Command protocol
// =========================================================================

#[test]
fn command_wire_format_emits_every_key() {
    let command = Command::new(ComponentType::Button, "save", "tap", "");
    assert_eq!(command.to_string(), "ComponentType*Button;MonkeyId*save;Action*tap;Args*");
}

#[test]
fn command_parse_reads_wire_format() {
    let command = Command::parse("ComponentType*Table;MonkeyId*elements;Action*selectIndex;Args*3','2");

    assert_eq!(command.component_type, ComponentType::Table);
    assert_eq!(command.monkey_id, "elements");
    assert_eq!(command.action, "selectIndex");
    assert_eq!(command.arg_list(), vec!["3", "2"]);
}

#[test]
fn command_parse_keeps_semicolons_inside_args() {
    let command = Command::parse("ComponentType*Input;MonkeyId*q;Action*enterText;Args*a;b*c");
    assert_eq!(command.args, "a;b*c");
}

#[test]
fn command_parse_is_tolerant() {
    let command = Command::parse("MonkeyId*x;Action*tap;Extra*1");

    assert_eq!(command.component_type, ComponentType::View, "Missing type becomes View");
    assert_eq!(command.monkey_id, "x");
    assert_eq!(command.args, "");
    assert!(command.arg_list().is_empty());

    let unknown = Command::parse("ComponentType*Slider;MonkeyId*vol;Action*drag;Args*");
    assert_eq!(unknown.component_type, ComponentType::View);
}

#[test]
fn command_json_shape() {
    let command = Command::new(ComponentType::CheckBox, "terms", "on", "");
    let json = command.to_json().unwrap();
    assert_eq!(json, r#"{"component":"CheckBox","monkeyId":"terms","action":"on","args":""}"#);

    let back: Command = serde_json::from_str(&json).unwrap();
    assert_eq!(back, command);
}
