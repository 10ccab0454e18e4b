use monkey_id::adapter::component::ComponentType;
use monkey_id::codec::command::Command;
use monkey_id::dom::dom_model::Property;
use monkey_id::engine::error::LocatorError;
use monkey_id::locator::resolvers::{
    cell_at, find_cell, find_radio, find_row_by_text, radio_group, select_index, select_option, table_command,
};

mod common;
use crate::common::utils::{by_id, cell, element_table, load_fixture, nth, page, radio_group_doc};

// =========================================================================
// Tables
// =========================================================================

#[test]
fn row_with_text_is_selected_by_text() {
    let (doc, table) = element_table(&[["H", "1"], ["Hydrogen", ""], ["He", "2"]]);
    let target = cell(&doc, table, 1, 0);

    let command = table_command(&doc, target).unwrap();
    assert_eq!(command, Command::new(ComponentType::Table, "elements", "select", "Hydrogen"));
}

#[test]
fn blank_row_is_selected_by_position() {
    let (doc, table) = element_table(&[["", ""], ["", ""], ["", ""]]);
    let target = cell(&doc, table, 2, 1);

    let command = table_command(&doc, target).unwrap();
    assert_eq!(command.action, "selectIndex");
    assert_eq!(command.args, "3','2");
    assert_eq!(command.arg_list(), vec!["3", "2"]);
}

#[test]
fn blank_row_without_cell_gives_row_only() {
    let (doc, table) = element_table(&[["", ""], ["", ""]]);
    let row = doc.rows(table)[1];

    let command = table_command(&doc, row).unwrap();
    assert_eq!(command.args, "2");
}

#[test]
fn row_text_is_trimmed() {
    let doc = page(r#"<table id="t"><tr><td>  Neon </td></tr></table>"#);
    let td = nth(&doc, "td", 0);
    assert_eq!(table_command(&doc, td).unwrap().args, "Neon");
}

#[test]
fn content_inside_a_cell_names_the_table() {
    let doc = page(r#"<table title="Periodic"><tr><td><span id="s"></span></td><td></td></tr></table>"#);
    let command = table_command(&doc, by_id(&doc, "s")).unwrap();

    assert_eq!(command.monkey_id, "Periodic");
    assert_eq!(command.action, "selectIndex");
    assert_eq!(command.args, "1','1");
}

#[test]
fn table_without_identifier_uses_ordinal() {
    let doc = page(r#"<table><tr><td>a</td></tr></table><table><tr><td>b</td></tr></table>"#);
    let command = table_command(&doc, nth(&doc, "td", 1)).unwrap();
    assert_eq!(command.monkey_id, "#2");
}

#[test]
fn element_outside_a_row_has_no_table_command() {
    let (doc, table) = element_table(&[["a", "b"]]);
    assert_eq!(table_command(&doc, table), None);

    let doc = page("<p>x</p>");
    assert_eq!(table_command(&doc, nth(&doc, "p", 0)), None);
}

#[test]
fn find_cell_scans_rows_then_cells() {
    let (doc, table) = element_table(&[["H", "1"], ["He", "2"]]);

    assert_eq!(find_cell(&doc, table, "2"), Some(cell(&doc, table, 1, 1)));
    assert_eq!(find_cell(&doc, table, "Li"), None);
}

#[test]
fn find_row_by_text_compares_trimmed_text() {
    let doc = load_fixture("signup.html");
    let table = by_id(&doc, "elements");

    let row = find_row_by_text(&doc, table, "Hydrogen").unwrap();
    assert_eq!(row, doc.rows(table)[1]);
}

#[test]
fn cell_at_is_one_based_with_column_floor() {
    let (doc, table) = element_table(&[["a", "b"], ["c", "d"]]);

    assert_eq!(cell_at(&doc, table, 2, 2), Some(cell(&doc, table, 1, 1)));
    assert_eq!(cell_at(&doc, table, 2, 0), Some(cell(&doc, table, 1, 0)), "Column 0 means 1");
    assert_eq!(cell_at(&doc, table, 0, 1), None);
    assert_eq!(cell_at(&doc, table, 3, 1), None);
    assert_eq!(cell_at(&doc, table, 1, 3), None);
}

// =========================================================================
// Radio groups
// =========================================================================

#[test]
fn radio_is_found_by_value() {
    let doc = radio_group_doc("power", &["On", "Off", "Standby"]);
    let group = radio_group(&doc, "power");

    assert_eq!(group.len(), 3);
    assert_eq!(find_radio(&doc, &group, "Off"), Some(nth(&doc, "input", 1)));
}

#[test]
fn missing_radio_is_none() {
    let doc = radio_group_doc("power", &["On", "Off"]);
    let group = radio_group(&doc, "power");
    assert_eq!(find_radio(&doc, &group, "Dimmed"), None);
}

#[test]
fn radio_group_ignores_other_controls_with_the_name() {
    let doc = page(r#"<input type="radio" name="plan" value="a"><input type="hidden" name="plan" value="b">"#);
    assert_eq!(radio_group(&doc, "plan").len(), 1);
}

// =========================================================================
// Selects
// =========================================================================

#[test]
fn select_option_by_text_sets_selection() {
    let mut doc = page(
        r#"<select id="colour"><option value="r">Red</option><option>Green</option><option value="b">Blue</option></select>"#,
    );
    let select = by_id(&doc, "colour");

    assert_eq!(select_option(&mut doc, select, "Green").unwrap(), 1);
    assert_eq!(doc.property(select, Property::Value).as_deref(), Some("Green"));

    assert_eq!(select_option(&mut doc, select, "b").unwrap(), 2, "Matches option value too");
    assert_eq!(doc.selected_index(select), Some(2));
}

#[test]
fn missing_option_is_a_fatal_resolution_failure() {
    let mut doc = page(r#"<select id="colour"><option>Red</option></select>"#);
    let select = by_id(&doc, "colour");

    let err = select_option(&mut doc, select, "Purple").unwrap_err();
    assert!(err.is_fatal());
    match &err {
        LocatorError::ResolutionFailure {
            component_type,
            monkey_id,
            value,
        } => {
            assert_eq!(*component_type, ComponentType::ItemSelector);
            assert_eq!(monkey_id, "colour");
            assert_eq!(value, "Purple");
        }
        other => panic!("Expected ResolutionFailure, got {:?}", other),
    }
    assert_eq!(err.to_string(), "Unable to find 'Purple' in ItemSelector \"colour\"");
    assert_eq!(doc.selected_index(select), Some(0), "Selection is untouched on failure");
}

#[test]
fn select_index_is_one_based() {
    let mut doc = page(r#"<select id="s"><option>a</option><option>b</option></select>"#);
    let select = by_id(&doc, "s");

    assert_eq!(select_index(&mut doc, select, 2).unwrap(), 1);
    assert_eq!(doc.property(select, Property::Value).as_deref(), Some("b"));

    assert!(select_index(&mut doc, select, 0).is_err());
    assert!(select_index(&mut doc, select, 3).is_err());
}
