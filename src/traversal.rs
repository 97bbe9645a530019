//! Depth-first flow construction below one entry point.
//!
//! The walk is pre-order and gated by a visited set of base FQNs that lives
//! exactly as long as one [`Traversal`]: a method reached twice (cycle or
//! diamond) is listed and expanded only the first time, and a framework leaf
//! is listed once per flow. Recursion is replaced
//! by an explicit frame stack so very deep call chains cannot exhaust the
//! thread stack.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::callexpr::{segments, strip_args};
use crate::config::EngineConfig;
use crate::index::{MetadataIndex, MethodEntry};
use crate::resolver::{CallContext, NameResolver, Resolution};

/// Prefix of every node after the first.
pub const EDGE_MARKER: &str = " -> ";
pub const UNRESOLVED_PREFIX: &str = "UNRESOLVED: ";
pub const ENTRY_POINT_SUFFIX: &str = " (Entry Point)";

/// Ordered display strings for one entry point.
pub type Flow = Vec<String>;

/// Diagnostics gathered while walking. Never part of the flow itself.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TraversalStats {
    /// Distinct methods expanded.
    pub visited: usize,
    /// Distinct framework leaves emitted.
    pub framework_leaves: usize,
    /// Call expressions inside resolved methods that matched nothing.
    pub unresolved_calls: BTreeSet<String>,
    /// Traversal keys whose own method could not be found.
    pub unresolved_methods: BTreeSet<String>,
}

impl TraversalStats {
    pub fn merge(&mut self, other: TraversalStats) {
        self.visited += other.visited;
        self.framework_leaves += other.framework_leaves;
        self.unresolved_calls.extend(other.unresolved_calls);
        self.unresolved_methods.extend(other.unresolved_methods);
    }
}

struct Frame<'i, 'a> {
    method: &'i MethodEntry<'a>,
    next_call: usize,
}

pub struct Traversal<'i, 'a> {
    index: &'i MetadataIndex<'a>,
    resolver: NameResolver<'i, 'a>,
    visited: HashSet<String>,
    /// Framework leaves already listed in this flow.
    leaves: HashSet<String>,
    flow: Flow,
    stats: TraversalStats,
}

impl<'i, 'a> Traversal<'i, 'a> {
    pub fn new(index: &'i MetadataIndex<'a>, config: &'i EngineConfig) -> Self {
        Self {
            index,
            resolver: NameResolver::new(index, config),
            visited: HashSet::new(),
            leaves: HashSet::new(),
            flow: Vec::new(),
            stats: TraversalStats::default(),
        }
    }

    /// Walk everything reachable from `key` (`pkg.Type.method`, parameter
    /// list optional), appending to this traversal's flow.
    pub fn visit(&mut self, key: &str) {
        let base = strip_args(key);
        if base.is_empty() {
            self.flow.push(format!("{}<empty key>", UNRESOLVED_PREFIX));
            return;
        }
        if !self.visited.insert(base.clone()) {
            return;
        }

        let Some(entry) = self.lookup(&base) else {
            let marker = if self.flow.is_empty() {
                format!("{}{}", key, ENTRY_POINT_SUFFIX)
            } else {
                format!("{}{}", UNRESOLVED_PREFIX, key)
            };
            self.flow.push(marker);
            self.stats.unresolved_methods.insert(key.to_string());
            return;
        };
        // A name-only fallback may land on a method already walked under its
        // real key.
        if entry.key != base && !self.visited.insert(entry.key.clone()) {
            return;
        }

        if self.flow.is_empty() {
            self.flow.push(entry.display_signature());
        }
        self.walk(entry);
    }

    /// The flow so far and the walk's diagnostics.
    pub fn finish(mut self) -> (Flow, TraversalStats) {
        self.stats.visited = self.visited.len();
        (self.flow, self.stats)
    }

    /// Exact key, then class+name on the key's last two segments, then the
    /// method name anywhere in the corpus.
    fn lookup(&self, base: &str) -> Option<&'i MethodEntry<'a>> {
        if let Some(entry) = self.index().method(base) {
            return Some(entry);
        }
        let segs = segments(base);
        let name = segs.last()?;
        if segs.len() >= 2 {
            if let Some(entry) = self.resolver.by_class_and_name(&segs[segs.len() - 2], name) {
                return Some(entry);
            }
        }
        self.resolver.by_name_anywhere(name)
    }

    fn index(&self) -> &'i MetadataIndex<'a> {
        self.index
    }

    fn walk(&mut self, root: &'i MethodEntry<'a>) {
        let mut stack = vec![Frame { method: root, next_call: 0 }];

        while let Some(frame) = stack.last_mut() {
            let method = frame.method;
            let Some(raw) = method.record.calls.get(frame.next_call) else {
                stack.pop();
                continue;
            };
            frame.next_call += 1;

            match self.resolver.resolve(raw, &CallContext::of(method)) {
                Resolution::Method(target) => {
                    if self.visited.insert(target.key.clone()) {
                        self.flow.push(format!("{}{}", EDGE_MARKER, target.display_signature()));
                        stack.push(Frame { method: target, next_call: 0 });
                    }
                }
                Resolution::Framework(leaf) => {
                    if !self.leaves.contains(&leaf) {
                        self.flow.push(format!("{}{}", EDGE_MARKER, leaf));
                        self.leaves.insert(leaf);
                        self.stats.framework_leaves += 1;
                    }
                }
                Resolution::Ignored => {}
                Resolution::Unresolved => {
                    self.stats.unresolved_calls.insert(raw.clone());
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "traversal_tests.rs"]
mod tests;
