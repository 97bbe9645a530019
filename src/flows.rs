//! One flow per entry point.
//!
//! Every root is walked by its own [`Traversal`] with a fresh visited set.
//! Roots share nothing but the immutable index, so with `threads > 1` they are
//! split into chunks and walked on scoped threads; the calling thread merges
//! the results in root order, which keeps the output identical to a
//! sequential run.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::entry::{entry_points, EntryPoint};
use crate::index::MetadataIndex;
use crate::model::TypeRecord;
use crate::traversal::{Flow, Traversal, TraversalStats};

/// Entry display signature → flow. Sorted so serialized output is stable.
pub type EntryPointFlows = BTreeMap<String, Flow>;

#[derive(Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct FlowReport {
    pub flows: EntryPointFlows,
    pub roots: usize,
    pub overload_collisions: usize,
    pub stats: TraversalStats,
}

/// Flows for every controller / SOAP method, with the default configuration.
pub fn compute_entry_point_flows(types: &[TypeRecord]) -> EntryPointFlows {
    compute_entry_point_flows_with(types, &EngineConfig::default()).flows
}

pub fn compute_entry_point_flows_with(types: &[TypeRecord], config: &EngineConfig) -> FlowReport {
    let start = Instant::now();
    let index = MetadataIndex::build(types);
    let roots = entry_points(types);

    let threads = config.effective_threads().min(roots.len()).max(1);
    let results: Vec<(String, Flow, TraversalStats)> = if threads == 1 {
        roots.iter().map(|root| walk_root(&index, config, root)).collect()
    } else {
        let chunk_size = roots.len().div_ceil(threads);
        let index = &index;
        std::thread::scope(|s| {
            let handles: Vec<_> = roots
                .chunks(chunk_size)
                .map(|chunk| {
                    s.spawn(move || {
                        chunk.iter().map(|root| walk_root(index, config, root)).collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect()
        })
    };

    let mut report = FlowReport {
        roots: roots.len(),
        overload_collisions: index.overload_collisions(),
        ..Default::default()
    };
    for (display, flow, stats) in results {
        if !flow.is_empty() {
            report.flows.insert(display, flow);
        }
        report.stats.merge(stats);
    }

    for call in &report.stats.unresolved_calls {
        debug!(call = %call, "Unresolved call expression");
    }
    info!(
        types = index.type_count(),
        methods = index.method_count(),
        roots = report.roots,
        flows = report.flows.len(),
        unresolved = report.stats.unresolved_calls.len(),
        threads,
        elapsed_ms = format_args!("{:.1}", start.elapsed().as_secs_f64() * 1000.0),
        "Entry point flows computed"
    );

    report
}

fn walk_root(index: &MetadataIndex<'_>, config: &EngineConfig, root: &EntryPoint) -> (String, Flow, TraversalStats) {
    let mut traversal = Traversal::new(index, config);
    traversal.visit(&root.base_fqn);
    let (flow, stats) = traversal.finish();
    (root.display.clone(), flow, stats)
}

#[cfg(test)]
#[path = "flows_tests.rs"]
mod tests;
