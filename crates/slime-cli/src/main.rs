//! `slime` CLI: load JSON documents into slime trees and inspect them.
//!
//! ## Usage
//!
//! ```sh
//! # Round-trip JSON through a tree (stdin → stdout)
//! echo '{"name":"Alice","age":30}' | slime fmt
//!
//! # Pretty-print a file into another file
//! slime fmt --pretty -i data.json -o pretty.json
//!
//! # Look up a value by dotted path; numeric segments index arrays
//! slime get address.tags.0 -i data.json
//!
//! # Node counts per type, symbol count and depth
//! slime stats -i data.json
//! slime stats --json -i data.json
//!
//! # Debug logging (RUST_LOG takes precedence)
//! slime --verbose fmt -i data.json
//! ```

use std::io::{self, Read};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use slime_core::{json, Inspector, Slime, Type, Visitor};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slime",
    version,
    about = "Inspect JSON documents through slime value trees",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse JSON into a tree and print it back
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Indent the output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the value at a dotted path, e.g. `servers.0.host`
    Get {
        /// Dotted path; numeric segments index arrays
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Show node counts per type, symbol count and maximum depth
    Stats {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Fmt {
            input,
            output,
            pretty,
        } => {
            let slime = load(input.as_deref())?;
            let text = if pretty {
                json::encode_pretty(slime.root()).context("Failed to format JSON")?
            } else {
                json::encode(slime.root())
            };
            write_output(output.as_deref(), &text)?;
        }
        Commands::Get { path, input } => {
            let slime = load(input.as_deref())?;
            let found = resolve(&slime, &path)?;
            println!("{}", json::encode(found));
        }
        Commands::Stats {
            input,
            json: as_json,
        } => {
            let slime = load(input.as_deref())?;
            let stats = TreeStats::collect(&slime);
            if as_json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{stats}");
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(io::stderr)
        .init();
}

fn load(path: Option<&str>) -> Result<Slime> {
    let text = read_input(path)?;
    let slime = json::decode(&text).with_context(|| match path {
        Some(path) => format!("Failed to parse JSON from {path}"),
        None => "Failed to parse JSON from stdin".to_string(),
    })?;
    tracing::debug!(
        bytes = text.len(),
        symbols = slime.symbols().len(),
        "loaded document"
    );
    Ok(slime)
}

/// Walk `path` from the root. An empty path selects the root itself.
fn resolve<'a>(slime: &'a Slime, path: &str) -> Result<Inspector<'a>> {
    let mut node = slime.root();
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        node = match (node.kind(), segment.parse::<usize>()) {
            (Type::Array, Ok(idx)) => node.entry(idx),
            _ => node.field(segment),
        };
        if !node.valid() {
            bail!("Path '{path}' does not resolve: no value at '{segment}'");
        }
    }
    Ok(node)
}

/// Per-type node counts, gathered by a visitor that descends into
/// containers itself.
#[derive(Debug, Default, Serialize)]
struct TreeStats {
    nodes: usize,
    nix: usize,
    bool: usize,
    long: usize,
    double: usize,
    string: usize,
    data: usize,
    array: usize,
    object: usize,
    symbols: usize,
    max_depth: usize,
    #[serde(skip)]
    depth: usize,
}

impl TreeStats {
    fn collect(slime: &Slime) -> Self {
        let mut stats = TreeStats {
            symbols: slime.symbols().len(),
            ..Default::default()
        };
        stats.enter(slime.root());
        stats
    }

    fn enter(&mut self, node: Inspector<'_>) {
        self.depth += 1;
        self.nodes += 1;
        self.max_depth = self.max_depth.max(self.depth);
        node.accept(self);
        self.depth -= 1;
    }
}

impl Visitor for TreeStats {
    fn visit_nix(&mut self) {
        self.nix += 1;
    }

    fn visit_bool(&mut self, _value: bool) {
        self.bool += 1;
    }

    fn visit_long(&mut self, _value: i64) {
        self.long += 1;
    }

    fn visit_double(&mut self, _value: f64) {
        self.double += 1;
    }

    fn visit_string(&mut self, _value: &str) {
        self.string += 1;
    }

    fn visit_data(&mut self, _value: &[u8]) {
        self.data += 1;
    }

    fn visit_array(&mut self, array: Inspector<'_>) {
        self.array += 1;
        array.traverse_array(|_, entry| self.enter(entry));
    }

    fn visit_object(&mut self, object: Inspector<'_>) {
        self.object += 1;
        object.traverse_object(|_, field| self.enter(field));
    }
}

impl std::fmt::Display for TreeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Nodes:      {}", self.nodes)?;
        for (kind, count) in [
            (Type::Nix, self.nix),
            (Type::Bool, self.bool),
            (Type::Long, self.long),
            (Type::Double, self.double),
            (Type::String, self.string),
            (Type::Data, self.data),
            (Type::Array, self.array),
            (Type::Object, self.object),
        ] {
            writeln!(f, "  {:<8}  {}", kind.name(), count)?;
        }
        writeln!(f, "Symbols:    {}", self.symbols)?;
        writeln!(f, "Max depth:  {}", self.max_depth)
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {path}"))?;
        }
        None => {
            println!("{content}");
        }
    }
    Ok(())
}
