//! Quicksilver Objects CLI
//!
//! Loads a JSON document into a realm, applies integrity levels and prints
//! the resulting property descriptors.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use quicksilver_objects::config::RealmConfig;
use quicksilver_objects::runtime::builtins::object::{
    set_integrity_level, test_integrity_level, IntegrityLevel,
};
use quicksilver_objects::runtime::json;
use quicksilver_objects::{ObjectRef, PropertyDescriptor, Realm, Value, WellKnownSymbol, VERSION};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qsobj")]
#[command(author, version, about = "Inspect ECMAScript object-model semantics on JSON documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a JSON document and print its top-level property descriptors
    Inspect {
        /// JSON file to load, or `-` for stdin
        #[arg(value_name = "FILE")]
        input: String,

        /// Freeze the root object before printing
        #[arg(long, conflicts_with = "seal")]
        freeze: bool,

        /// Seal the root object before printing
        #[arg(long)]
        seal: bool,

        /// Make the root object non-extensible before printing
        #[arg(long)]
        prevent_extensions: bool,

        /// Realm configuration file
        #[arg(short, long, value_name = "CONFIG")]
        config: Option<PathBuf>,
    },

    /// List the well-known symbols
    Symbols,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Inspect {
            input,
            freeze,
            seal,
            prevent_extensions,
            config,
        } => {
            let level = if freeze {
                Some(IntegrityLevel::Frozen)
            } else if seal {
                Some(IntegrityLevel::Sealed)
            } else {
                None
            };
            inspect(&input, config, level, prevent_extensions)
        }
        Commands::Symbols => {
            list_symbols();
            Ok(())
        }
    }
}

fn setup_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("reading stdin")?;
        Ok(source)
    } else {
        fs::read_to_string(input).with_context(|| format!("reading '{}'", input))
    }
}

fn inspect(
    input: &str,
    config: Option<PathBuf>,
    level: Option<IntegrityLevel>,
    prevent_extensions: bool,
) -> anyhow::Result<()> {
    let config = match config {
        Some(path) => RealmConfig::from_file(&path)
            .with_context(|| format!("loading config '{}'", path.display()))?,
        None => RealmConfig::default(),
    };
    let realm = Realm::with_config(config)?;

    let source = read_input(input)?;
    let document: serde_json::Value =
        serde_json::from_str(&source).with_context(|| format!("parsing '{}'", input))?;
    let root = match json::materialize(&realm, &document)? {
        Value::Object(obj) => obj,
        other => bail!("expected a JSON object or array, got {}", other.type_of()),
    };
    tracing::info!(kind = %root.kind(), "document loaded");

    if let Some(level) = level {
        set_integrity_level(&root, level)?;
    }
    if prevent_extensions {
        root.prevent_extensions();
    }

    println!("qsobj {} ({})", VERSION, root.kind());
    println!("  extensible: {}", root.is_extensible());
    println!("  sealed:     {}", test_integrity_level(&root, IntegrityLevel::Sealed));
    println!("  frozen:     {}", test_integrity_level(&root, IntegrityLevel::Frozen));
    println!();
    print_descriptors(&root);

    if let Some(rendered) = json::stringify(&realm, &Value::Object(root))? {
        println!();
        println!("{}", rendered);
    }
    Ok(())
}

fn print_descriptors(obj: &ObjectRef) {
    for key in obj.properties().keys() {
        let Some(desc) = obj.get_own_property(&key) else {
            continue;
        };
        let flags = format!(
            "{}{}{}",
            if desc.is_writable() { 'w' } else { '-' },
            if desc.is_enumerable() { 'e' } else { '-' },
            if desc.is_configurable() { 'c' } else { '-' },
        );
        match &desc {
            PropertyDescriptor::Data { value, .. } => {
                println!("  {:<20} {} {}", key.to_string(), flags, value.to_js_string())
            }
            PropertyDescriptor::Accessor { get, set, .. } => println!(
                "  {:<20} {} [get: {}, set: {}]",
                key.to_string(),
                flags,
                get.is_some(),
                set.is_some()
            ),
        }
    }
}

fn list_symbols() {
    for wk in WellKnownSymbol::ALL {
        println!("Symbol.{:<20} {}", wk.name(), wk.symbol().descriptive_string());
    }
}
