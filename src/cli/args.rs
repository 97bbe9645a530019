//! CLI argument structs for all subcommands.

use std::fmt;
use std::str::FromStr;

use clap::{Args, Parser};

use callflow::EngineConfig;
use callflow::config::{DEFAULT_FRAMEWORK_MARKERS, DEFAULT_NOOP_RECEIVERS};

/// How `flows` prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `{ "<entry>": ["<entry>", " -> <callee>", ...] }`
    #[default]
    Json,
    /// One block per entry point, one node per line.
    Text,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "txt" => Ok(OutputFormat::Text),
            other => Err(format!("Unknown output format '{}' (expected json or text)", other)),
        }
    }
}

/// Resolver heuristics shared by `flows` and `resolve`.
#[derive(Args, Debug, Clone, Default)]
pub struct HeuristicArgs {
    /// Extra framework marker (receiver type / name suffix), repeatable.
    /// Added to the built-in list unless --no-default-markers is given.
    #[arg(long = "marker", value_name = "SUFFIX")]
    pub markers: Vec<String>,

    /// Drop the built-in framework markers (Repository, Optional, List, ...)
    #[arg(long)]
    pub no_default_markers: bool,

    /// Extra receiver whose calls are ignored (e.g. "audit"), repeatable.
    #[arg(long = "noop-receiver", value_name = "NAME")]
    pub noop_receivers: Vec<String>,
}

impl HeuristicArgs {
    /// Engine configuration for these flags, running on `threads` threads.
    pub fn to_config(&self, threads: usize) -> EngineConfig {
        let mut framework_markers: Vec<String> = if self.no_default_markers {
            Vec::new()
        } else {
            DEFAULT_FRAMEWORK_MARKERS.iter().map(|s| s.to_string()).collect()
        };
        framework_markers.extend(self.markers.iter().map(|m| m.trim().to_string()).filter(|m| !m.is_empty()));

        let mut noop_receivers: Vec<String> = DEFAULT_NOOP_RECEIVERS.iter().map(|s| s.to_string()).collect();
        noop_receivers.extend(self.noop_receivers.iter().map(|r| r.trim().to_string()).filter(|r| !r.is_empty()));

        EngineConfig { threads, framework_markers, noop_receivers }
    }
}

#[derive(Parser, Debug)]
#[command(after_long_help = r#"EXAMPLES:
  All flows as JSON:     callflow flows -i corpus/
  Readable listing:      callflow flows -i corpus.json --format text
  Write to file:         callflow flows -i corpus/ -o flows.json --stats
  Parallel:              callflow flows -i corpus.cfs --threads 0
  Extra framework type:  callflow flows -i corpus/ --marker Client --marker Template
  Ignore audit calls:    callflow flows -i corpus/ --noop-receiver audit

NOTES:
  - Input is a JSON array of type records, a single record, a directory of
    .json files (loaded in path order), or a snapshot from 'callflow snapshot'
  - Every method of a controller or soap type is an entry point
  - The first node of a flow is the entry point; later nodes start with " -> "
  - Calls that match nothing are omitted; run with --log-level debug to list them
  - Output is identical for every --threads value"#)]
pub struct FlowsArgs {
    /// Corpus file, directory, or snapshot
    #[arg(short, long)]
    pub input: String,

    /// Output format: json or text
    #[arg(short, long, default_value = "json")]
    pub format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Number of parallel threads (0 = auto)
    #[arg(short, long, default_value = "1")]
    pub threads: usize,

    /// JSON only: emit the full report (flows, roots, unresolved calls)
    #[arg(long)]
    pub stats: bool,

    #[command(flatten)]
    pub heuristics: HeuristicArgs,
}

#[derive(Parser, Debug)]
pub struct RootsArgs {
    /// Corpus file, directory, or snapshot
    #[arg(short, long)]
    pub input: String,
}

#[derive(Parser, Debug)]
#[command(after_long_help = r#"EXAMPLES:
  Field receiver:   callflow resolve -i corpus/ -m com.shop.OrderService.place --call "orderRepository.save(order)"
  Bare call:        callflow resolve -i corpus/ -m com.shop.OrderService.place --call "validate()"

OUTPUT:
  The callee's signature, a "Framework method: ..." leaf, "IGNORED" for
  logging-style receivers, or "UNRESOLVED: <call>""#)]
pub struct ResolveArgs {
    /// Corpus file, directory, or snapshot
    #[arg(short, long)]
    pub input: String,

    /// Calling method, pkg.Type.method (a parameter list is ignored)
    #[arg(short, long)]
    pub method: String,

    /// Raw call expression as it appears in the method body
    #[arg(short, long)]
    pub call: String,

    #[command(flatten)]
    pub heuristics: HeuristicArgs,
}

#[derive(Parser, Debug)]
#[command(after_long_help = r#"EXAMPLES:
  callflow snapshot -i corpus/ -o corpus.cfs
  callflow flows -i corpus.cfs

NOTES:
  - Snapshots are LZ4-compressed bincode and load much faster than JSON
  - Any command taking --input accepts a snapshot"#)]
pub struct SnapshotArgs {
    /// Corpus file or directory
    #[arg(short, long)]
    pub input: String,

    /// Snapshot file to write
    #[arg(short, long)]
    pub output: String,
}
