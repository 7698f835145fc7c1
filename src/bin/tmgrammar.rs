//! Command-line interface for tmgrammar
//! This binary converts the YAML grammar source of an editor extension into the JSON grammar the
//! extension ships.
//!
//! Usage:
//!   tmgrammar                                   - Convert src/sht.tmLanguage.yaml to syntaxes/sht.tmLanguage.json
//!   tmgrammar -i `<input>` -o `<output>`        - Convert between explicit paths
//!   tmgrammar --config `<file>`                 - Layer a TOML config over the defaults
//!   tmgrammar --list-formats                    - List the formats that can be read or written
//!
//! Both outcomes are reported on stdout and the process exits with status 0.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tmgrammar::config::{Loader, PROJECT_CONFIG};
use tmgrammar::{logging, ConvertError, Converter, ConverterConfig, FormatRegistry};

fn main() {
    let matches = Command::new("tmgrammar")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Converts a YAML TextMate grammar into the JSON grammar editors load")
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .help("Grammar source (default: src/sht.tmLanguage.yaml)"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Converted grammar (default: syntaxes/sht.tmLanguage.json)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("from")
                .long("from")
                .help("Source format name, or 'auto' to use the input extension"),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .help("Target format name, or 'auto' to use the output extension"),
        )
        .arg(
            Arg::new("indent")
                .long("indent")
                .help("Spaces per nesting level; 0 writes compact output")
                .value_parser(value_parser!(u16)),
        )
        .arg(
            Arg::new("no-atomic")
                .long("no-atomic")
                .help("Write the output in place instead of through a temporary file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log more (repeat for more detail)")
                .action(ArgAction::Count),
        )
        .get_matches();

    let verbosity = matches.get_count("verbose");
    if let Err(e) = logging::init_tracing(Some(logging::level_for_verbosity(verbosity))) {
        eprintln!("Could not initialise logging: {}", e);
    }

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    match load_config(&matches) {
        Ok(config) => handle_convert_command(config),
        Err(e) => println!("An error occurred: {}", e),
    }
}

/// Build the effective configuration: defaults, project file, --config, then flags
fn load_config(matches: &ArgMatches) -> Result<ConverterConfig, ConvertError> {
    let mut loader = Loader::new().with_optional_file(PROJECT_CONFIG);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }

    let overrides = [
        ("input", "input_path"),
        ("output", "output_path"),
        ("from", "source_format"),
        ("to", "target_format"),
    ];
    for (arg, key) in overrides {
        if let Some(value) = matches.get_one::<String>(arg) {
            loader = loader.set_override(key, value.as_str())?;
        }
    }
    if let Some(indent) = matches.get_one::<u16>("indent") {
        loader = loader.set_override("indent", i64::from(*indent))?;
    }
    if matches.get_flag("no-atomic") {
        loader = loader.set_override("atomic_write", false)?;
    }

    Ok(loader.build()?)
}

/// Handle the convert command
fn handle_convert_command(config: ConverterConfig) {
    let converter = Converter::new(config);
    match converter.run() {
        Ok(conversion) => println!("{}", conversion),
        Err(e) => println!("An error occurred: {}", e),
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available formats:\n");

    for format in registry.formats() {
        let mut modes = Vec::new();
        if format.supports_parsing() {
            modes.push("read");
        }
        if format.supports_serialization() {
            modes.push("write");
        }
        println!("  {} ({})", format.name(), modes.join(", "));
        println!("    {}", format.description());
        println!("    extensions: {}", format.extensions().join(", "));
        println!();
    }
}
