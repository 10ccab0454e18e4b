use crate::adapter::component::ComponentType;
use crate::cli::config::{AppConfig, Source};
use crate::codec::command::Command;
use crate::codec::descriptor::ElementDescriptor;
use crate::dom::dom_model::Document;
use crate::dom::loader::{fetch_document, load_document};
use crate::engine::engine::Engine;
use crate::engine::error::LocatorError;
use crate::locator::locator_model::{ElementQuery, Scope};
use crate::record::recorder::RecordEvent;
use crate::trace::logger::TraceLogger;

// ============================================================================
// Setup
// ============================================================================

pub fn load_source(source: &Source, verbose: u8) -> Result<Document, Box<dyn std::error::Error>> {
    let doc = match (&source.input, &source.url) {
        (Some(path), _) => {
            if verbose > 0 {
                eprintln!("Loading {}...", path);
            }
            load_document(path)?
        }
        (None, Some(url)) => {
            if verbose > 0 {
                eprintln!("Fetching {}...", url);
            }
            fetch_document(url)?
        }
        (None, None) => {
            return Err(LocatorError::InvalidArgument("either --input or --url is required".into()).into());
        }
    };

    if verbose > 1 {
        eprintln!("  {} nodes", doc.len());
    }
    Ok(doc)
}

pub fn build_engine(config: &AppConfig, trace_path: Option<&str>, extra_attributes: Vec<String>) -> Engine {
    let tracer = match trace_path {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };

    Engine::new()
        .with_tracer(tracer)
        .with_separators(config.codec.separators())
        .with_extra_attributes(extra_attributes)
        .with_max_id_len(config.tree.max_id_len)
}

// ============================================================================
// identify subcommand
// ============================================================================

pub fn cmd_identify(
    engine: &mut Engine,
    doc: &Document,
    tag: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    for node in doc.elements_by_tag(tag.unwrap_or("*")) {
        let descriptor = engine.identify(doc, node);
        println!("{}", descriptor.to_json()?);
    }
    Ok(())
}

// ============================================================================
// tree subcommand
// ============================================================================

pub fn cmd_tree(engine: &mut Engine, doc: &Document) -> Result<(), Box<dyn std::error::Error>> {
    let tree = engine.tree(doc);
    println!("{}", tree.to_json()?);
    Ok(())
}

// ============================================================================
// locate subcommand
// ============================================================================

/// Print the located element. Returns whether it was found.
pub fn cmd_locate(
    engine: &mut Engine,
    doc: &Document,
    monkey_id: &str,
    component: Option<&str>,
    verbose: u8,
) -> Result<bool, Box<dyn std::error::Error>> {
    let query = match component {
        Some(name) => {
            let component: ComponentType = name.parse().map_err(LocatorError::InvalidArgument)?;
            ElementQuery::for_component(monkey_id, component)
        }
        None => ElementQuery::new(monkey_id),
    };

    match engine.locate(doc, &query, &Scope::Document) {
        Some(found) => {
            if verbose > 0 {
                eprintln!("Matched by {}", found.tier);
            }
            println!("{}", ElementDescriptor::from_node(doc, found.node).to_json()?);
            Ok(true)
        }
        None => {
            eprintln!("No element matches '{}'", monkey_id);
            Ok(false)
        }
    }
}

// ============================================================================
// encode subcommand
// ============================================================================

pub fn cmd_encode(engine: &mut Engine, doc: &Document, tag: &str) -> Result<(), Box<dyn std::error::Error>> {
    let nodes = doc.elements_by_tag(tag);
    println!("{}", engine.encode(doc, &nodes));
    Ok(())
}

// ============================================================================
// record subcommand
// ============================================================================

/// Print the command recorded for `event` on the element named by
/// `monkey_id`. Returns whether the element was found.
pub fn cmd_record(
    engine: &mut Engine,
    doc: &Document,
    monkey_id: &str,
    event: &str,
) -> Result<bool, Box<dyn std::error::Error>> {
    let event: RecordEvent = event.parse().map_err(LocatorError::InvalidArgument)?;

    let Some(found) = engine.locate(doc, &ElementQuery::new(monkey_id), &Scope::Document) else {
        eprintln!("No element matches '{}'", monkey_id);
        return Ok(false);
    };

    match engine.record(doc, found.node, event) {
        Some(command) => println!("{}", command),
        None => eprintln!("Event '{}' is not recorded for this element", event),
    }
    Ok(true)
}

// ============================================================================
// play subcommand
// ============================================================================

/// Resolve every command of a script in order. Stops at the first fatal
/// failure and returns whether the whole script resolved.
pub fn cmd_play(
    engine: &mut Engine,
    doc: &mut Document,
    script_path: &str,
    verbose: u8,
) -> Result<bool, Box<dyn std::error::Error>> {
    let script = std::fs::read_to_string(script_path).map_err(|source| LocatorError::Io {
        path: script_path.to_string(),
        source,
    })?;

    let commands = parse_script(&script);
    if verbose > 0 {
        eprintln!("Playing {} commands...", commands.len());
    }

    for (i, command) in commands.iter().enumerate() {
        match engine.resolve(doc, command) {
            Ok(resolution) => match resolution.target {
                Some(_) => println!("[{}] ok   {}", i + 1, command),
                None => println!("[{}] miss {} (target not found)", i + 1, command),
            },
            Err(e) => {
                println!("[{}] FAIL {}", i + 1, command);
                eprintln!("  {}", e);
                return Ok(false);
            }
        }
    }

    Ok(true)
}

/// One command per line; blank lines and `#` comments are skipped.
pub fn parse_script(script: &str) -> Vec<Command> {
    script
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(Command::parse)
        .collect()
}
