use clap::Parser;
use monkey_id::cli::commands::{
    build_engine, cmd_encode, cmd_identify, cmd_locate, cmd_play, cmd_record, cmd_tree, load_source,
};
use monkey_id::cli::config::{Cli, Commands, load_config, resolve_extra_attributes, resolve_trace_path};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref());

    // Resolve settings: CLI > config > defaults
    let trace_path = resolve_trace_path(cli.trace.as_deref(), &config).map(str::to_string);
    let extra_attributes = match &cli.command {
        Commands::Encode { extra_attributes, .. } => resolve_extra_attributes(extra_attributes, &config),
        _ => config.codec.extra_attributes.clone(),
    };
    if let Commands::Tree { max_id_len: Some(max), .. } = &cli.command {
        config.tree.max_id_len = *max;
    }
    let mut engine = build_engine(&config, trace_path.as_deref(), extra_attributes);

    match cli.command {
        Commands::Identify { source, tag } => {
            let doc = load_source(&source, cli.verbose)?;
            cmd_identify(&mut engine, &doc, tag.as_deref())?;
        }
        Commands::Tree { source, .. } => {
            let doc = load_source(&source, cli.verbose)?;
            cmd_tree(&mut engine, &doc)?;
        }
        Commands::Locate {
            source,
            monkey_id,
            component,
        } => {
            let doc = load_source(&source, cli.verbose)?;
            let found = cmd_locate(&mut engine, &doc, &monkey_id, component.as_deref(), cli.verbose)?;
            if !found {
                std::process::exit(1);
            }
        }
        Commands::Encode { source, tag, .. } => {
            let doc = load_source(&source, cli.verbose)?;
            cmd_encode(&mut engine, &doc, &tag)?;
        }
        Commands::Record {
            source,
            monkey_id,
            event,
        } => {
            let doc = load_source(&source, cli.verbose)?;
            let found = cmd_record(&mut engine, &doc, &monkey_id, &event)?;
            if !found {
                std::process::exit(1);
            }
        }
        Commands::Play { source, script } => {
            let mut doc = load_source(&source, cli.verbose)?;
            let all_resolved = cmd_play(&mut engine, &mut doc, &script, cli.verbose)?;
            if !all_resolved {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
