//! Spiderweb CLI
//!
//! Usage:
//!   spiderweb [OPTIONS] [INPUT]
//!
//! Options:
//!   -o, --output <FILE>  Write the positioned document here (stdout otherwise)
//!   --in-place           Write the positioned document back to INPUT
//!   -c, --config <FILE>  Layout settings file (TOML format)
//!   --root <ID>          Override the root node
//!   --seed <N>           Enable angle jitter with this seed
//!   --verify             Print a verification report to stderr
//!   -v, --verbose        Raise log verbosity (repeatable)
//!   -h, --help           Print help

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use spiderweb::{layout, DocumentError, Graph, LayoutConfig, RunError, Settings};

#[derive(Parser)]
#[command(name = "spiderweb")]
#[command(about = "Radial spider-web layout for reaction graphs")]
struct Cli {
    /// Input document (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Output file (writes to stdout if not provided)
    #[arg(short, long, conflicts_with = "in_place")]
    output: Option<PathBuf>,

    /// Write the result back to the input file
    #[arg(long, requires = "input")]
    in_place: bool,

    /// Layout settings file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Root node identifier
    #[arg(long)]
    root: Option<String>,

    /// Enable angle jitter with this seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print a verification report to stderr
    #[arg(long)]
    verify: bool,

    /// Raise log verbosity: -v for info, -vv for debug
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        if let Some(at) = error_location(&e, cli.input.as_deref()) {
            eprintln!("  --> {}", at);
        }
        std::process::exit(1);
    }
}

/// `file:line:column` of a malformed input document
fn error_location(err: &RunError, input: Option<&Path>) -> Option<String> {
    let RunError::Document(doc) = err else {
        return None;
    };
    let (line, column) = doc.location()?;
    let name = input
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stdin>".to_string());
    Some(format!("{}:{}:{}", name, line, column))
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), RunError> {
    let mut config = match &cli.config {
        Some(path) => {
            let settings = Settings::from_file(path)?;
            if let Some(name) = &settings.name {
                tracing::info!(settings = %name, path = %path.display(), "loaded settings");
            }
            settings.config
        }
        None => LayoutConfig::default(),
    };
    if let Some(root) = &cli.root {
        config = config.with_root(root.clone());
    }
    if let Some(seed) = cli.seed {
        config = config.with_jitter(seed);
    }

    let graph = match &cli.input {
        Some(path) => Graph::load(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(DocumentError::from)?;
            Graph::from_json(&buffer)?
        }
    };

    let laid = layout(graph, &config)?;

    for ring in &laid.result.rings {
        tracing::info!(
            ring = ring.index,
            kind = %ring.kind,
            nodes = ring.members.len(),
            radius = ring.radius,
            "ring placed"
        );
    }
    if !laid.result.report.is_clean() {
        tracing::warn!("layout finished with issues:\n{}", laid.result.report);
    }

    if cli.verify {
        eprintln!("{}", laid.verify(&config));
    }

    let target = if cli.in_place { cli.input.as_ref() } else { cli.output.as_ref() };
    match target {
        Some(path) => laid.graph.save(path)?,
        None => println!("{}", laid.graph.to_json()?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> RunError {
        Graph::from_json("{\n  \"nodes\": [\n    { \"id\": }\n  ]\n}")
            .unwrap_err()
            .into()
    }

    #[test]
    fn test_error_location_names_the_input() {
        let at = error_location(&json_error(), Some(Path::new("web.json"))).unwrap();
        assert!(at.starts_with("web.json:3:"), "{}", at);
    }

    #[test]
    fn test_error_location_from_stdin() {
        let at = error_location(&json_error(), None).unwrap();
        assert!(at.starts_with("<stdin>:3:"), "{}", at);
    }

    #[test]
    fn test_no_location_for_layout_errors() {
        let err = RunError::from(spiderweb::LayoutError::missing_root("benzene", vec![]));
        assert_eq!(error_location(&err, Some(Path::new("web.json"))), None);
    }
}
