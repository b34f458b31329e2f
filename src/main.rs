//! Server configuration loader.
//!
//! # Architecture Overview
//!
//! ```text
//!   config file ──┐
//!                 ├─▶ lifecycle::startup ─▶ config (parse → lookup → validate)
//!   -o overrides ─┘                                   │
//!                                                     ▼
//!                                   ConfigContext { registry, settings }
//!                                        │                 │
//!                                        ▼                 ▼
//!                               admin (describe,    observability
//!                               JSON snapshot)      (logging setup)
//! ```
//!
//! Any configuration error prints a diagnostic to stderr and exits with
//! status 1 before anything else starts.

use std::path::PathBuf;

use clap::Parser;

use serverconf::admin::{describe, snapshot, ConfigQuery};
use serverconf::lifecycle::{load_or_exit, log_configuration, StartupOptions};
use serverconf::observability::logging;

#[derive(Parser)]
#[command(name = "serverconf")]
#[command(about = "Load, validate and inspect server configuration", long_about = None)]
struct Cli {
    /// Configuration file to read.
    config: Option<PathBuf>,

    /// Extra `<name> <value>` line applied after the file (repeatable).
    #[arg(short = 'o', long = "option", value_name = "LINE")]
    options: Vec<String>,

    /// Test the configuration: log it at info level and exit.
    #[arg(short, long)]
    test: bool,

    /// Print the current value of one setting.
    #[arg(long, value_name = "NAME")]
    show: Option<String>,

    /// Print all loaded settings as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let options = StartupOptions {
        config_file: cli.config,
        overrides: cli.options,
        test: cli.test,
    };
    let context = load_or_exit(&options);

    logging::init(&context.settings)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_file = ?options.config_file,
        overrides = options.overrides.len(),
        "Configuration loaded"
    );
    log_configuration(&context.registry, options.test);

    if let Some(name) = cli.show {
        let reply = describe(&context.registry, &ConfigQuery::new(name));
        println!("{}", reply.line);
    }

    if cli.json {
        let json = snapshot(&context.settings)?;
        println!("{}", serde_json::to_string_pretty(&json)?);
    }

    if options.test {
        tracing::info!("Configuration test successful");
    }
    Ok(())
}
