//! Command-line interface for kusari
//! Rewrites serialized Nunjucks template trees into Twig source.
//!
//! Usage:
//!   kusari `<path>`... [--format `<format>`] [--input `<input>`] [--config `<file>`]
//!   kusari --list-formats
//!
//! Configuration is layered: built-in defaults, then `kusari.toml` in the
//! working directory when present, then `--config`, then `--format`.
mod logging;

use clap::{Arg, ArgAction, Command};
use kusari::formats::FormatRegistry;
use kusari::loader::InputFormat;
use kusari::processor::{check_paths, process_file, ProcessingSpec};
use kusari_config::{KusariConfig, Loader};

/// Picked up from the working directory when present
const LOCAL_CONFIG: &str = "kusari.toml";

fn main() {
    let matches = Command::new("kusari")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rewrite parsed Nunjucks templates as Twig")
        .arg_required_else_help(true)
        .arg(
            Arg::new("paths")
                .help("Serialized template trees (.json, .yaml)")
                .required_unless_present("list-formats")
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format, overriding `output.format` from config"),
        )
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .help("Input document format: auto, json or yaml")
                .default_value("auto"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log rewrite decisions to stderr")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    logging::init_standard_tracing(matches.get_flag("verbose"));

    let config = load_config(
        matches.get_one::<String>("config"),
        matches.get_one::<String>("format"),
    );
    let registry = FormatRegistry::with_options(config.transform.clone());

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&registry);
        return;
    }

    let paths: Vec<String> = matches
        .get_many::<String>("paths")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let input = match matches.get_one::<String>("input").map(String::as_str) {
        None | Some("auto") => None,
        Some(name) => Some(InputFormat::from_name(name).unwrap_or_else(|e| {
            eprintln!("{}", e);
            std::process::exit(1);
        })),
    };

    let spec = ProcessingSpec {
        input,
        format: config.output.format,
    };
    handle_transform_command(&paths, spec, &registry);
}

fn load_config(path: Option<&String>, format: Option<&String>) -> KusariConfig {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    let loader = match format {
        Some(format) => loader.set_override("output.format", format.as_str()),
        None => Ok(loader),
    };
    loader.and_then(Loader::build).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    })
}

/// Transform every file, reporting failures without stopping
fn handle_transform_command(paths: &[String], spec: ProcessingSpec, registry: &FormatRegistry) {
    if let Err(e) = check_paths(paths) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let mut failed = false;
    for path in paths {
        tracing::debug!(path = path.as_str(), format = spec.format.as_str(), "transforming");
        match process_file(path, &spec, registry) {
            Ok(output) if output.ends_with('\n') => print!("{}", output),
            Ok(output) => println!("{}", output),
            Err(e) => {
                tracing::warn!(path = path.as_str(), error = %e, "transform failed");
                eprintln!("{}: {}", path, e);
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}

/// Handle the list-formats command
fn handle_list_formats_command(registry: &FormatRegistry) {
    println!("Available output formats:\n");
    for name in registry.list_formats() {
        println!("  {}", name);
        if let Some(formatter) = registry.get(&name) {
            println!("    {}", formatter.description());
        }
        println!();
    }
}
