//! Notes Tags CLI
//!
//! Usage:
//!   notes-tags [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>   Engine configuration (TOML format)
//!   --syntax <SYNTAX>     Marker syntax: liquid or bare
//!   --check-balance       Reject unbalanced notes/endnotes markers
//!   --lenient             Render unknown tags as nothing instead of failing
//!   -l, --list-tags       List registered directives
//!   -v, --verbose         Debug logging on stderr
//!   -h, --help            Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use notes_tags::{Engine, EngineConfig, Syntax, TagRegistry};

#[derive(Parser)]
#[command(name = "notes-tags")]
#[command(about = "Render notes/endnotes template directives")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Engine configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Marker syntax, overrides the config file
    #[arg(long)]
    syntax: Option<Syntax>,

    /// Reject unbalanced notes/endnotes markers
    #[arg(long)]
    check_balance: bool,

    /// Render unknown tags as nothing instead of failing
    #[arg(long)]
    lenient: bool,

    /// List registered directives and exit
    #[arg(short, long)]
    list_tags: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("notes_tags=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("notes_tags=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    if cli.list_tags {
        print_tags(&TagRegistry::with_builtin());
        return;
    }

    // Load config, then let flags override it
    let mut config = match &cli.config {
        Some(path) => match EngineConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };
    if let Some(syntax) = cli.syntax {
        config = config.with_syntax(syntax);
    }
    if cli.check_balance {
        config = config.with_check_balance(true);
    }
    if cli.lenient {
        config = config.with_strict_tags(false);
    }

    // Read input
    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let engine = Engine::new(TagRegistry::with_builtin(), config);
    tracing::debug!(config = ?engine.config(), tags = ?engine.registry().names(), "engine ready");
    match engine.render(&source) {
        Ok(output) => {
            print!("{}", output);
        }
        Err(e) => {
            eprint!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
    }
}

fn print_tags(registry: &TagRegistry) {
    for (open, close) in registry.pairs() {
        println!("{} ... {}", open, close);
    }
    for name in registry.names() {
        if registry.closer_for(name).is_none() && !registry.is_closer(name) {
            println!("{}", name);
        }
    }
}
