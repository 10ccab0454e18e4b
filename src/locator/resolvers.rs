use crate::adapter::component::ComponentType;
use crate::codec::command::{Command, ARG_SEPARATOR};
use crate::dom::dom_model::{Document, NodeId};
use crate::engine::error::LocatorError;
use crate::identity::deriver::derive_identifier;
use crate::identity::ordinal::ordinal_id;
use crate::locator::matcher::is_match;

// =========================================================================
// Tables
// =========================================================================

/// First cell, scanning rows then cells, whose identifying values include `value`.
pub fn find_cell(doc: &Document, table: NodeId, value: &str) -> Option<NodeId> {
    doc.rows(table)
        .into_iter()
        .flat_map(|row| doc.cells(row))
        .find(|cell| is_match(doc, *cell, value))
}

/// First row whose trimmed text equals `text`.
pub fn find_row_by_text(doc: &Document, table: NodeId, text: &str) -> Option<NodeId> {
    doc.rows(table)
        .into_iter()
        .find(|row| doc.text_content(*row).trim() == text.trim())
}

/// Cell at 1-based `row`, `column`. Column 0 is treated as 1.
pub fn cell_at(doc: &Document, table: NodeId, row: usize, column: usize) -> Option<NodeId> {
    let row = doc.rows(table).get(row.checked_sub(1)?).copied()?;
    let column = column.max(1);
    doc.cells(row).get(column - 1).copied()
}

/// Command for an interaction inside a table. The monkeyId always names the
/// table; rows with text are selected by text, blank rows by position.
/// `None` when `target` is not inside a table row.
pub fn table_command(doc: &Document, target: NodeId) -> Option<Command> {
    let mut row = None;
    let mut cell = None;
    let mut table = None;

    let mut cursor = Some(target);
    let mut steps = 0;
    while let Some(current) = cursor {
        match doc.tag(current) {
            "table" => {
                table = Some(current);
                break;
            }
            "tr" if row.is_none() => row = Some(current),
            "td" | "th" if cell.is_none() => cell = Some(current),
            _ => {}
        }
        steps += 1;
        if steps > doc.len() {
            break;
        }
        cursor = doc.parent_element(current);
    }

    let table = table?;
    let row = row?;

    let monkey_id = derive_identifier(doc, table).unwrap_or_else(|| ordinal_id(doc, table));

    let row_text = doc.text_content(row);
    let row_text = row_text.trim();
    if !row_text.is_empty() {
        return Some(Command::new(ComponentType::Table, &monkey_id, "select", row_text));
    }

    let row_index = doc.rows(table).iter().position(|r| *r == row).unwrap_or(0) + 1;
    let args = match cell {
        Some(cell) => {
            let column = doc
                .cells(row)
                .iter()
                .position(|c| *c == cell)
                .map(|i| i + 1)
                .unwrap_or(0)
                .max(1);
            format!("{}{}{}", row_index, ARG_SEPARATOR, column)
        }
        None => row_index.to_string(),
    };

    Some(Command::new(ComponentType::Table, &monkey_id, "selectIndex", &args))
}

// =========================================================================
// Radio groups
// =========================================================================

/// First radio in a caller-assembled group whose identifying values include `value`.
pub fn find_radio(doc: &Document, group: &[NodeId], value: &str) -> Option<NodeId> {
    group.iter().copied().find(|radio| is_match(doc, *radio, value))
}

/// Radios sharing `name`, in document order.
pub fn radio_group(doc: &Document, name: &str) -> Vec<NodeId> {
    doc.elements_by_name(name)
        .into_iter()
        .filter(|n| doc.tag(*n) == "input")
        .filter(|n| doc.attribute(*n, "type").map_or(false, |t| t.eq_ignore_ascii_case("radio")))
        .collect()
}

// =========================================================================
// Selects
// =========================================================================

/// Select the first option matching `value`. A miss is fatal for the step.
pub fn select_option(doc: &mut Document, select: NodeId, value: &str) -> Result<usize, LocatorError> {
    let index = {
        let view: &Document = doc;
        view.options(select)
            .into_iter()
            .position(|opt| is_match(view, opt, value))
    };

    match index {
        Some(index) => {
            doc.set_selected_index(select, index);
            Ok(index)
        }
        None => Err(resolution_failure(doc, select, value)),
    }
}

/// Select by 1-based position.
pub fn select_index(doc: &mut Document, select: NodeId, index: usize) -> Result<usize, LocatorError> {
    let count = doc.options(select).len();
    if index == 0 || index > count {
        return Err(resolution_failure(doc, select, &index.to_string()));
    }
    doc.set_selected_index(select, index - 1);
    Ok(index - 1)
}

fn resolution_failure(doc: &Document, select: NodeId, value: &str) -> LocatorError {
    LocatorError::ResolutionFailure {
        component_type: ComponentType::ItemSelector,
        monkey_id: derive_identifier(doc, select).unwrap_or_else(|| ordinal_id(doc, select)),
        value: value.to_string(),
    }
}
