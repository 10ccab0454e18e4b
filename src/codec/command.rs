use std::fmt;

use serde::{Deserialize, Serialize};

use crate::adapter::component::ComponentType;

/// Separator placed between multiple arguments inside `Args`, e.g. `3','2`.
pub const ARG_SEPARATOR: &str = "','";

/// A recorded (or to-be-played) step: `ComponentType*..;MonkeyId*..;Action*..;Args*..`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    #[serde(rename = "component")]
    pub component_type: ComponentType,
    #[serde(rename = "monkeyId")]
    pub monkey_id: String,
    pub action: String,
    #[serde(default)]
    pub args: String,
}

impl Command {
    pub fn new(component_type: ComponentType, monkey_id: &str, action: &str, args: &str) -> Self {
        Command {
            component_type,
            monkey_id: monkey_id.to_string(),
            action: action.to_string(),
            args: args.to_string(),
        }
    }

    /// Individual arguments, split on `','`. Empty args give an empty list.
    pub fn arg_list(&self) -> Vec<&str> {
        if self.args.is_empty() {
            return Vec::new();
        }
        self.args.split(ARG_SEPARATOR).collect()
    }

    /// Tolerant parser for the wire form. Unknown keys are ignored, missing
    /// keys are left empty, and an unknown component type becomes `View`.
    pub fn parse(wire: &str) -> Self {
        let mut component_type = ComponentType::View;
        let mut monkey_id = String::new();
        let mut action = String::new();
        let mut args = String::new();

        for pair in split_pairs(wire) {
            let Some((key, value)) = pair.split_once('*') else {
                continue;
            };
            match key.trim() {
                "ComponentType" => component_type = ComponentType::from_name(value),
                "MonkeyId" => monkey_id = value.to_string(),
                "Action" => action = value.to_string(),
                "Args" => args = value.to_string(),
                _ => {}
            }
        }

        Command {
            component_type,
            monkey_id,
            action,
            args,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Split on `;` that introduce a known key, so a `;` inside `Args` survives.
fn split_pairs(wire: &str) -> Vec<&str> {
    const KEYS: [&str; 4] = ["ComponentType*", "MonkeyId*", "Action*", "Args*"];

    let mut pairs = Vec::new();
    let mut start = 0;
    for (i, _) in wire.match_indices(';') {
        let rest = &wire[i + 1..];
        if KEYS.iter().any(|k| rest.starts_with(k)) {
            pairs.push(&wire[start..i]);
            start = i + 1;
        }
    }
    pairs.push(&wire[start..]);
    pairs
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ComponentType*{};MonkeyId*{};Action*{};Args*{}",
            self.component_type, self.monkey_id, self.action, self.args
        )
    }
}
