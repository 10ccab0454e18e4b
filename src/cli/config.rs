use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::codec::delimited::{Separators, DEFAULT_ELEMENT_SEPARATOR, DEFAULT_FIELD_SEPARATOR};
use crate::record::tree::DEFAULT_MAX_ID_LEN;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "monkey-id",
    version,
    about = "Derive, encode and resolve element identifiers for recorded UI scripts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: monkey-id.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Append JSON-lines trace events to this file
    #[arg(long, global = true)]
    pub trace: Option<String>,
}

/// Where the document comes from. Exactly one of the two is required.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct Source {
    /// HTML file, or a `.json` DOM snapshot
    #[arg(long)]
    pub input: Option<String>,

    /// Page to fetch
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the descriptor and monkeyId of every element (or of one tag)
    Identify {
        #[command(flatten)]
        source: Source,

        /// Only elements with this tag name
        #[arg(long)]
        tag: Option<String>,
    },

    /// Print the component tree as JSON
    Tree {
        #[command(flatten)]
        source: Source,

        /// Truncate derived identifiers longer than this
        #[arg(long)]
        max_id_len: Option<usize>,
    },

    /// Find the element a monkeyId names
    Locate {
        #[command(flatten)]
        source: Source,

        /// Identifier to look up
        #[arg(long)]
        monkey_id: String,

        /// Component type the identifier belongs to (Button, Link, ...)
        #[arg(long)]
        component: Option<String>,
    },

    /// Encode elements in the delimited cross-boundary format
    Encode {
        #[command(flatten)]
        source: Source,

        /// Tag name to encode; `*` for every element
        #[arg(long, default_value = "*")]
        tag: String,

        /// Extra attributes appended after the base fields
        #[arg(long = "extra", value_delimiter = ',')]
        extra_attributes: Vec<String>,
    },

    /// Build the command recorded for an event on an element
    Record {
        #[command(flatten)]
        source: Source,

        /// Identifier of the element the event happened on
        #[arg(long)]
        monkey_id: String,

        /// tap, enterText or change
        #[arg(long, default_value = "tap")]
        event: String,
    },

    /// Resolve recorded commands (one per line) against the document
    Play {
        #[command(flatten)]
        source: Source,

        /// File of commands in `ComponentType*..;MonkeyId*..;Action*..;Args*..` form
        #[arg(long)]
        script: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `monkey-id.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub codec: CodecConfig,
    #[serde(default)]
    pub tree: TreeConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodecConfig {
    #[serde(default = "default_field_separator")]
    pub field_separator: String,

    #[serde(default = "default_element_separator")]
    pub element_separator: String,

    #[serde(default)]
    pub extra_attributes: Vec<String>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            field_separator: default_field_separator(),
            element_separator: default_element_separator(),
            extra_attributes: Vec::new(),
        }
    }
}

impl CodecConfig {
    pub fn separators(&self) -> Separators {
        Separators {
            field: self.field_separator.clone(),
            element: self.element_separator.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    #[serde(default = "default_max_id_len")]
    pub max_id_len: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_id_len: default_max_id_len(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TraceConfig {
    pub path: Option<String>,
}

// Serde default helpers
fn default_field_separator() -> String { DEFAULT_FIELD_SEPARATOR.to_string() }
fn default_element_separator() -> String { DEFAULT_ELEMENT_SEPARATOR.to_string() }
fn default_max_id_len() -> usize { DEFAULT_MAX_ID_LEN }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("monkey-id.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Trace path: CLI flag, then config file, else tracing stays off.
pub fn resolve_trace_path<'a>(cli: Option<&'a str>, config: &'a AppConfig) -> Option<&'a str> {
    cli.or(config.trace.path.as_deref())
}

/// Extra attributes: CLI list when given, else the config list.
pub fn resolve_extra_attributes(cli: &[String], config: &AppConfig) -> Vec<String> {
    if cli.is_empty() {
        config.codec.extra_attributes.clone()
    } else {
        cli.to_vec()
    }
}
