//! resgen: embed include-linked schema files as generated byte-array resources.

mod commands;
mod logging;
mod manifest;
mod output;

use std::path::{Path, PathBuf};
use std::process;

use clap::error::ErrorKind;
use clap::Parser;

use resgen_emit::{parse_namespaces, EmitError};
use resgen_graph::GraphError;

use commands::generate::{self, GenerateOptions};
use manifest::{ManifestError, ResgenManifest};
use output::WriteError;

/// Output could not be written.
const EXIT_WRITE: i32 = 1;
/// An include could not be read, or includes form a cycle.
const EXIT_RESOLVE: i32 = 2;
/// Generated symbols collided.
const EXIT_EMIT: i32 = 3;
/// The manifest could not be loaded.
const EXIT_CONFIG: i32 = 4;

#[derive(Parser, Debug)]
#[command(
    name = "resgen",
    version,
    about = "Embed include-linked schema files as generated byte-array resources"
)]
struct Cli {
    /// Root schema file; its directory is the include root
    root: PathBuf,
    /// Generated source file to write
    target: PathBuf,
    /// Enclosing namespaces, outer to inner (e.g. foo::bar)
    namespace: Option<String>,
    /// Manifest to use instead of searching for resgen.toml
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the resolved include order instead of writing the target
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(_) => {
            print_usage();
            return;
        }
    };

    logging::init_tracing();

    if let Err(e) = run(&cli) {
        eprintln!("error: {e:#}");
        process::exit(exit_code(&e));
    }
}

fn print_usage() {
    let program = std::env::args().next().unwrap_or_else(|| "resgen".to_string());
    println!("usage: {program} <path to fbs root type> <target> [namespace]");
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let namespaces = match cli.namespace.as_deref() {
        Some(spec) => parse_namespaces(spec),
        None => load_manifest(cli.config.as_deref(), &cli.root)?
            .map(|manifest| manifest.default_namespaces())
            .unwrap_or_default(),
    };

    generate::run(&GenerateOptions {
        root: &cli.root,
        output: &cli.target,
        namespaces: &namespaces,
        dry_run: cli.dry_run,
    })
}

/// Load the manifest named by `--config`, or search upward from the root file's directory.
fn load_manifest(config: Option<&Path>, root: &Path) -> anyhow::Result<Option<ResgenManifest>> {
    if let Some(path) = config {
        return Ok(Some(ResgenManifest::load(path)?));
    }
    let start = match root.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok(ResgenManifest::find_and_load(start)?.map(|(manifest, _)| manifest))
}

/// Map a failure to the process exit status.
fn exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if cause.is::<WriteError>() {
            return EXIT_WRITE;
        }
        if cause.is::<GraphError>() {
            return EXIT_RESOLVE;
        }
        if cause.is::<EmitError>() {
            return EXIT_EMIT;
        }
        if cause.is::<ManifestError>() {
            return EXIT_CONFIG;
        }
    }
    1
}
