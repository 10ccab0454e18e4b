use std::fmt;
use std::str::FromStr;

use crate::adapter::component::ComponentType;
use crate::adapter::registry::{adapter_for_node, default_action, AdapterVariant};
use crate::codec::command::Command;
use crate::dom::dom_model::{Document, NodeId, Property};
use crate::identity::deriver::{derive_base, monkey_id};
use crate::locator::resolvers::table_command;

/// User interaction that triggered a recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordEvent {
    /// pointer-up / click
    Tap,
    /// key-up
    EnterText,
    /// change
    Change,
}

impl RecordEvent {
    pub fn action(&self) -> &'static str {
        match self {
            RecordEvent::Tap => "tap",
            RecordEvent::EnterText => "enterText",
            RecordEvent::Change => "change",
        }
    }
}

impl fmt::Display for RecordEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action())
    }
}

impl FromStr for RecordEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "tap" | "click" => Ok(RecordEvent::Tap),
            "entertext" | "keyup" => Ok(RecordEvent::EnterText),
            "change" => Ok(RecordEvent::Change),
            other => Err(format!("unknown record event '{}'", other)),
        }
    }
}

/// Element that should be recorded for an event on `node`: content nested
/// in a `<button>` is recorded as the button.
pub fn record_target(doc: &Document, node: NodeId) -> NodeId {
    match doc.parent_element(node) {
        Some(parent) if doc.tag(parent) == "button" => parent,
        _ => node,
    }
}

/// Build the command for `event` on `node`, or `None` when the event is not
/// recorded for that kind of element.
pub fn build_command(doc: &Document, node: NodeId, event: RecordEvent) -> Option<Command> {
    if !doc.is_element(node) {
        return None;
    }

    match adapter_for_node(doc, node) {
        AdapterVariant::Input => input_command(doc, node, event),
        AdapterVariant::Select => {
            if event != RecordEvent::Change {
                return None;
            }
            let mut command = default_command(doc, node);
            command.args = doc.property(node, Property::Value).unwrap_or_default();
            Some(command)
        }
        AdapterVariant::TextArea => text_entry_command(doc, node, event),
        variant if variant.is_table_family() => {
            Some(table_command(doc, node).unwrap_or_else(|| default_command(doc, node)))
        }
        _ => Some(default_command(doc, node)),
    }
}

fn default_command(doc: &Document, node: NodeId) -> Command {
    let component = adapter_for_node(doc, node).component_type(doc, node);
    Command::new(component, &monkey_id(doc, node), default_action(doc.tag(node)), "")
}

fn input_command(doc: &Document, node: NodeId, event: RecordEvent) -> Option<Command> {
    let input_type = doc.property(node, Property::Type).unwrap_or_default();
    let value = doc.property(node, Property::Value).unwrap_or_default();

    match input_type.as_str() {
        "radio" => {
            if event != RecordEvent::Change {
                return None;
            }
            // Group name, never suffixed; ordinal only when the group is unnamed
            let id = derive_base(doc, node)
                .map(|d| d.identifier)
                .unwrap_or_else(|| monkey_id(doc, node));
            Some(Command::new(ComponentType::RadioButtons, &id, "select", &value))
        }
        "checkbox" => {
            if event != RecordEvent::Change {
                return None;
            }
            let action = if doc.is_checked(node) { "on" } else { "off" };
            Some(Command::new(ComponentType::CheckBox, &monkey_id(doc, node), action, ""))
        }
        "button" | "submit" | "reset" => {
            if event == RecordEvent::Change {
                return None;
            }
            let id = if input_type == "button" && !value.is_empty() {
                value
            } else {
                monkey_id(doc, node)
            };
            Some(Command::new(ComponentType::Button, &id, "tap", ""))
        }
        _ => text_entry_command(doc, node, event),
    }
}

/// Text inputs and textareas: `change` is dropped because the key-up stream
/// already carries the text.
fn text_entry_command(doc: &Document, node: NodeId, event: RecordEvent) -> Option<Command> {
    if event == RecordEvent::Change {
        return None;
    }
    let component = adapter_for_node(doc, node).component_type(doc, node);
    let value = doc.property(node, Property::Value).unwrap_or_default();
    Some(Command::new(component, &monkey_id(doc, node), event.action(), &value))
}
