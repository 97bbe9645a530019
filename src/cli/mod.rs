//! CLI layer: argument parsing, logging setup, and subcommand implementations.

pub mod args;

pub use args::*;

use std::fs;
use std::io::Write;
use std::path::Path;

use clap::{Parser, Subcommand};
use tracing::info;

use callflow::callexpr::strip_args;
use callflow::{
    compute_entry_point_flows_with, entry_points, load_corpus, save_snapshot, CallContext,
    CallflowError, EntryPointFlows, FlowReport, MetadataIndex, NameResolver, Resolution,
};

// ─── CLI ─────────────────────────────────────────────────────────────

/// Entry-point call flow reconstruction over parsed Java type metadata
#[derive(Parser, Debug)]
#[command(name = "callflow", version, about, after_help = "\
Run 'callflow <COMMAND> --help' for detailed options and examples.\n\
Common options: -i <PATH> (corpus file, directory or snapshot)")]
pub(crate) struct Cli {
    /// Log level for stderr output (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Compute the call flow of every entry point
    Flows(FlowsArgs),

    /// List the entry points of a corpus
    Roots(RootsArgs),

    /// Resolve one call expression in the context of a method
    Resolve(ResolveArgs),

    /// Save a corpus as a compressed snapshot
    Snapshot(SnapshotArgs),
}

// ─── Main entry point ───────────────────────────────────────────────

pub fn run() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = match cli.command {
        Commands::Flows(args) => cmd_flows(&args),
        Commands::Roots(args) => cmd_roots(&args),
        Commands::Resolve(args) => cmd_resolve(&args),
        Commands::Snapshot(args) => cmd_snapshot(&args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

pub(crate) fn parse_log_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "error" => tracing::Level::ERROR,
        "warn" => tracing::Level::WARN,
        "debug" => tracing::Level::DEBUG,
        "trace" => tracing::Level::TRACE,
        _ => tracing::Level::INFO,
    }
}

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_max_level(parse_log_level(level))
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

// ─── Commands ───────────────────────────────────────────────────────

pub(crate) fn cmd_flows(args: &FlowsArgs) -> Result<(), CallflowError> {
    let types = load_corpus(Path::new(&args.input))?;
    let config = args.heuristics.to_config(args.threads);
    let report = compute_entry_point_flows_with(&types, &config);

    let rendered = match args.format {
        OutputFormat::Json if args.stats => to_json(&report)?,
        OutputFormat::Json => to_json(&report.flows)?,
        OutputFormat::Text => render_text(&report),
    };
    write_output(args.output.as_deref(), &rendered)?;

    if let Some(path) = &args.output {
        info!(output = %path, flows = report.flows.len(), "Flows written");
    }
    Ok(())
}

fn cmd_roots(args: &RootsArgs) -> Result<(), CallflowError> {
    let types = load_corpus(Path::new(&args.input))?;
    let mut out = String::new();
    for root in entry_points(&types) {
        out.push_str(&root.display);
        out.push('\n');
    }
    write_output(None, &out)
}

fn cmd_resolve(args: &ResolveArgs) -> Result<(), CallflowError> {
    let types = load_corpus(Path::new(&args.input))?;
    let line = resolve_one(&types, &args.method, &args.call, &args.heuristics)?;
    write_output(None, &format!("{}\n", line))
}

fn cmd_snapshot(args: &SnapshotArgs) -> Result<(), CallflowError> {
    let types = load_corpus(Path::new(&args.input))?;
    save_snapshot(Path::new(&args.output), &types)
}

// ─── Rendering ──────────────────────────────────────────────────────

/// Resolve `call` inside `method` and describe the outcome in one line.
pub(crate) fn resolve_one(
    types: &[callflow::TypeRecord],
    method: &str,
    call: &str,
    heuristics: &HeuristicArgs,
) -> Result<String, CallflowError> {
    if call.trim().is_empty() {
        return Err(CallflowError::InvalidArgs("--call must not be empty".to_string()));
    }
    let index = MetadataIndex::build(types);
    let caller = index
        .method(&strip_args(method))
        .ok_or_else(|| CallflowError::MethodNotFound(method.to_string()))?;

    let config = heuristics.to_config(1);
    let resolver = NameResolver::new(&index, &config);
    Ok(match resolver.resolve(call, &CallContext::of(caller)) {
        Resolution::Method(target) => target.display_signature(),
        Resolution::Framework(leaf) => leaf,
        Resolution::Ignored => "IGNORED".to_string(),
        Resolution::Unresolved => format!("UNRESOLVED: {}", call),
    })
}

/// Entry-point blocks separated by blank lines, one flow node per line.
pub(crate) fn render_text(report: &FlowReport) -> String {
    let mut out = String::new();
    write_flows(&mut out, &report.flows);
    if !report.stats.unresolved_calls.is_empty() {
        out.push_str(&format!("# {} unresolved call expression(s)\n", report.stats.unresolved_calls.len()));
    }
    out
}

fn write_flows(out: &mut String, flows: &EntryPointFlows) {
    for flow in flows.values() {
        for node in flow {
            out.push_str(node);
            out.push('\n');
        }
        out.push('\n');
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, CallflowError> {
    let mut json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    json.push('\n');
    Ok(json)
}

fn write_output(path: Option<&str>, text: &str) -> Result<(), CallflowError> {
    match path {
        Some(path) => fs::write(path, text)?,
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(text.as_bytes())?;
            lock.flush()?;
        }
    }
    Ok(())
}
