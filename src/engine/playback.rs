use crate::adapter::component::ComponentType;
use crate::codec::command::Command;
use crate::dom::dom_model::{Document, NodeId};
use crate::engine::error::LocatorError;
use crate::locator::locator_model::{ElementQuery, MatchTier, Scope};
use crate::locator::matcher::{find_element, find_nth_element};
use crate::locator::resolvers::{cell_at, find_cell, find_row_by_text, find_radio, radio_group, select_index, select_option};

/// Outcome of resolving one command against a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The element the command's monkeyId names
    pub component: NodeId,
    pub tier: MatchTier,
    /// Composite target (cell, radio item, option owner). `None` when the
    /// command has no sub-target or the sub-target was not found.
    pub target: Option<NodeId>,
    /// 0-based option index set on a select
    pub selected_index: Option<usize>,
}

impl Resolution {
    fn component_only(component: NodeId, tier: MatchTier) -> Self {
        Resolution {
            component,
            tier,
            target: Some(component),
            selected_index: None,
        }
    }
}

/// Locate the command's component and resolve its composite target.
///
/// A missing component is `ElementNotFound`. A select whose option cannot be
/// found is a fatal `ResolutionFailure`. A radio or table item that cannot be
/// found leaves `target` empty; the caller decides whether to log it.
pub fn resolve_command(doc: &mut Document, command: &Command) -> Result<Resolution, LocatorError> {
    let query = ElementQuery::for_component(&command.monkey_id, command.component_type);
    let found = find_element(doc, &query, &Scope::Document).ok_or_else(|| LocatorError::ElementNotFound {
        component_type: command.component_type,
        monkey_id: command.monkey_id.clone(),
    })?;
    let component = found.node;
    let tier = found.tier;

    match (command.component_type, command.action.as_str()) {
        (ComponentType::ItemSelector, "select") => {
            let index = select_option(doc, component, &command.args)?;
            Ok(Resolution {
                selected_index: Some(index),
                ..Resolution::component_only(component, tier)
            })
        }
        (ComponentType::ItemSelector, "selectIndex") => {
            let index = select_index(doc, component, first_index(command)?)?;
            Ok(Resolution {
                selected_index: Some(index),
                ..Resolution::component_only(component, tier)
            })
        }
        (ComponentType::RadioButtons, "select") => {
            let group = group_of(doc, component, &command.monkey_id);
            let target = find_radio(doc, &group, &command.args);
            if let Some(radio) = target {
                check_radio(doc, &group, radio);
            }
            Ok(Resolution {
                component,
                tier,
                target,
                selected_index: None,
            })
        }
        (ComponentType::RadioButtons, "selectIndex") => {
            let group = group_of(doc, component, &command.monkey_id);
            let target = find_nth_element(doc, &group, first_index(command)?, ComponentType::RadioButtons);
            if let Some(radio) = target {
                check_radio(doc, &group, radio);
            }
            Ok(Resolution {
                component,
                tier,
                target,
                selected_index: None,
            })
        }
        (ComponentType::CheckBox, action @ ("on" | "off")) => {
            doc.set_checked(component, action == "on");
            Ok(Resolution::component_only(component, tier))
        }
        (ComponentType::Table, "select") => {
            let view: &Document = doc;
            let target = find_cell(view, component, &command.args).or_else(|| {
                find_row_by_text(view, component, &command.args)
                    .map(|row| view.cells(row).first().copied().unwrap_or(row))
            });
            Ok(Resolution {
                component,
                tier,
                target,
                selected_index: None,
            })
        }
        (ComponentType::Table, "selectIndex") => {
            let indices = parse_indices(command)?;
            let row = indices.first().copied().unwrap_or(1);
            let column = indices.get(1).copied().unwrap_or(1);
            Ok(Resolution {
                component,
                tier,
                target: cell_at(doc, component, row, column),
                selected_index: None,
            })
        }
        _ => Ok(Resolution::component_only(component, tier)),
    }
}

/// Radios sharing the located radio's name. Unnamed radios form a group of one.
fn group_of(doc: &Document, radio: NodeId, monkey_id: &str) -> Vec<NodeId> {
    let name = doc.attribute(radio, "name").unwrap_or(monkey_id);
    let group = radio_group(doc, name);
    if group.is_empty() { vec![radio] } else { group }
}

fn check_radio(doc: &mut Document, group: &[NodeId], selected: NodeId) {
    for radio in group {
        doc.set_checked(*radio, *radio == selected);
    }
}

fn parse_indices(command: &Command) -> Result<Vec<usize>, LocatorError> {
    command
        .arg_list()
        .iter()
        .map(|a| {
            a.trim().parse::<usize>().map_err(|_| {
                LocatorError::InvalidArgument(format!(
                    "{} \"{}\": '{}' is not an index",
                    command.component_type, command.monkey_id, a
                ))
            })
        })
        .collect()
}

fn first_index(command: &Command) -> Result<usize, LocatorError> {
    parse_indices(command)?.first().copied().ok_or_else(|| {
        LocatorError::InvalidArgument(format!(
            "{} \"{}\": selectIndex needs an index",
            command.component_type, command.monkey_id
        ))
    })
}
