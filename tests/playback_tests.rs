use monkey_id::adapter::component::ComponentType;
use monkey_id::codec::command::Command;
use monkey_id::dom::dom_model::Property;
use monkey_id::engine::engine::Engine;
use monkey_id::engine::error::LocatorError;
use monkey_id::engine::playback::resolve_command;
use monkey_id::locator::locator_model::MatchTier;
use monkey_id::trace::logger::TraceLogger;

mod common;
use crate::common::utils::{by_id, cell, element_table, load_fixture, nth, radio_group_doc};

// =========================================================================
// resolve_command
// =========================================================================

#[test]
fn table_select_resolves_the_matching_cell() {
    let (mut doc, table) = element_table(&[["H", "1"], ["Hydrogen", ""]]);
    let command = Command::parse("ComponentType*Table;MonkeyId*elements;Action*select;Args*Hydrogen");

    let resolution = resolve_command(&mut doc, &command).unwrap();
    assert_eq!(resolution.component, table);
    assert_eq!(resolution.tier, MatchTier::Id);
    assert_eq!(resolution.target, Some(cell(&doc, table, 1, 0)));
}

#[test]
fn table_select_index_resolves_row_and_column() {
    let (mut doc, table) = element_table(&[["", ""], ["", ""], ["", ""]]);
    let command = Command::parse("ComponentType*Table;MonkeyId*elements;Action*selectIndex;Args*3','2");

    let resolution = resolve_command(&mut doc, &command).unwrap();
    assert_eq!(resolution.target, Some(cell(&doc, table, 2, 1)));
}

#[test]
fn table_select_index_with_row_only_takes_first_cell() {
    let (mut doc, table) = element_table(&[["", ""], ["", ""]]);
    let command = Command::new(ComponentType::Table, "elements", "selectIndex", "2");

    let resolution = resolve_command(&mut doc, &command).unwrap();
    assert_eq!(resolution.target, Some(cell(&doc, table, 1, 0)));
}

#[test]
fn radio_select_checks_the_matching_radio() {
    let mut doc = radio_group_doc("power", &["On", "Off", "Standby"]);
    let command = Command::new(ComponentType::RadioButtons, "power", "select", "Off");

    let resolution = resolve_command(&mut doc, &command).unwrap();
    let off = nth(&doc, "input", 1);
    assert_eq!(resolution.target, Some(off));
    assert!(doc.is_checked(off));
    assert!(!doc.is_checked(nth(&doc, "input", 0)));
}

#[test]
fn radio_miss_is_not_an_error() {
    let mut doc = radio_group_doc("power", &["On", "Off"]);
    let command = Command::new(ComponentType::RadioButtons, "power", "select", "Dimmed");

    let resolution = resolve_command(&mut doc, &command).unwrap();
    assert_eq!(resolution.target, None, "Missing radio is reported without raising");
}

#[test]
fn radio_select_index_counts_visible_radios() {
    let mut doc = radio_group_doc("size", &["S", "M", "L"]);
    let command = Command::new(ComponentType::RadioButtons, "size", "selectIndex", "3");

    let resolution = resolve_command(&mut doc, &command).unwrap();
    assert_eq!(resolution.target, Some(nth(&doc, "input", 2)));
}

#[test]
fn item_selector_select_sets_selection() {
    let mut doc = load_fixture("signup.html");
    let command = Command::new(ComponentType::ItemSelector, "country", "select", "New Zealand");

    let resolution = resolve_command(&mut doc, &command).unwrap();
    assert_eq!(resolution.selected_index, Some(0));
    assert_eq!(doc.property(by_id(&doc, "country"), Property::Value).as_deref(), Some("nz"));
}

#[test]
fn item_selector_miss_is_fatal() {
    let mut doc = load_fixture("signup.html");
    let command = Command::new(ComponentType::ItemSelector, "country", "select", "Atlantis");

    let err = resolve_command(&mut doc, &command).unwrap_err();
    assert!(matches!(err, LocatorError::ResolutionFailure { .. }), "Got {:?}", err);
    assert!(err.is_fatal());
}

#[test]
fn item_selector_select_index_needs_a_number() {
    let mut doc = load_fixture("signup.html");
    let command = Command::new(ComponentType::ItemSelector, "country", "selectIndex", "first");

    let err = resolve_command(&mut doc, &command).unwrap_err();
    assert!(matches!(err, LocatorError::InvalidArgument(_)), "Got {:?}", err);
}

#[test]
fn checkbox_on_off_sets_checked_state() {
    let mut doc = load_fixture("signup.html");
    let terms = nth(&doc, "input", 2);

    resolve_command(&mut doc, &Command::new(ComponentType::CheckBox, "terms", "on", "")).unwrap();
    assert!(doc.is_checked(terms));

    resolve_command(&mut doc, &Command::new(ComponentType::CheckBox, "terms", "off", "")).unwrap();
    assert!(!doc.is_checked(terms));
}

#[test]
fn plain_command_resolves_to_the_component() {
    let mut doc = load_fixture("signup.html");
    let command = Command::new(ComponentType::Button, "Join", "tap", "");

    let resolution = resolve_command(&mut doc, &command).unwrap();
    assert_eq!(resolution.component, nth(&doc, "input", 5));
    assert_eq!(resolution.target, Some(resolution.component));
}

#[test]
fn unknown_component_is_element_not_found() {
    let mut doc = load_fixture("signup.html");
    let command = Command::new(ComponentType::Link, "Careers", "tap", "");

    let err = resolve_command(&mut doc, &command).unwrap_err();
    assert_eq!(err.to_string(), "Unable to find Link \"Careers\"");
}

// =========================================================================
// Engine tracing
// =========================================================================

fn trace_file(name: &str) -> String {
    let path = std::env::temp_dir().join(format!("monkey-id-{}-{}.jsonl", name, std::process::id()));
    let _ = std::fs::remove_file(&path);
    path.display().to_string()
}

#[test]
fn engine_traces_resolutions_and_misses() {
    let path = trace_file("resolve");
    let mut doc = radio_group_doc("power", &["On", "Off"]);

    {
        let mut engine = Engine::new().with_tracer(TraceLogger::new(&path));
        engine
            .resolve(&mut doc, &Command::new(ComponentType::RadioButtons, "power", "select", "On"))
            .unwrap();
        engine
            .resolve(&mut doc, &Command::new(ComponentType::RadioButtons, "power", "select", "Dimmed"))
            .unwrap();
        assert_eq!(engine.step, 2);
    }

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["operation"], "resolve");
    assert_eq!(lines[0]["outcome"], "resolved");
    assert_eq!(lines[0]["monkey_id"], "power");
    assert_eq!(lines[1]["outcome"], "target_not_found");
    assert_eq!(lines[1]["step"], 1);
    assert_eq!(
        lines[0]["document"], lines[1]["document"],
        "Events on the same document share a fingerprint"
    );

    let _ = std::fs::remove_file(&path);
}

#[test]
fn engine_traces_fatal_failures() {
    let path = trace_file("fatal");
    let mut doc = load_fixture("signup.html");

    {
        let mut engine = Engine::new().with_tracer(TraceLogger::new(&path));
        let result = engine.resolve(&mut doc, &Command::new(ComponentType::ItemSelector, "country", "select", "Mars"));
        assert!(result.is_err());
    }

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"outcome\":\"failed\""), "Trace: {}", content);
    assert!(content.contains("Mars"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn disabled_engine_still_counts_steps() {
    let mut doc = load_fixture("signup.html");
    let mut engine = Engine::new();

    let _ = engine.resolve(&mut doc, &Command::new(ComponentType::Input, "user", "enterText", "bob"));
    let _ = engine.tree(&doc);
    assert_eq!(engine.step, 2);
}
