//! # callflow — Call Flow Resolution Engine
//!
//! Reconstructs, for every controller / SOAP entry point of a parsed Java
//! corpus, a deterministic, cycle-safe, best-effort call chain suitable for
//! driving a sequence diagram.
//!
//! ## Library usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! let types = callflow::load_corpus(Path::new("corpus/"))?;
//! for (entry, flow) in callflow::compute_entry_point_flows(&types) {
//!     println!("{}", entry);
//!     for node in flow.iter().skip(1) {
//!         println!("  {}", node);
//!     }
//! }
//! # Ok::<(), callflow::CallflowError>(())
//! ```
//!
//! Call expressions are resolved by a fixed tier order (see [`resolver`]);
//! anything that cannot be matched is either dropped, turned into a
//! "framework" leaf, or marked `UNRESOLVED`. The engine itself never fails.

pub mod callexpr;
pub mod chain;
pub mod config;
pub mod corpus;
pub mod entry;
pub mod error;
pub mod flows;
pub mod index;
pub mod model;
pub mod resolver;
pub mod traversal;

#[cfg(test)]
mod test_utils;

pub use config::EngineConfig;
pub use corpus::{load_corpus, load_snapshot, save_snapshot};
pub use entry::{entry_points, EntryPoint};
pub use error::CallflowError;
pub use flows::{compute_entry_point_flows, compute_entry_point_flows_with, EntryPointFlows, FlowReport};
pub use index::{MetadataIndex, MethodEntry};
pub use model::{FieldRecord, MethodRecord, TypeKind, TypeRecord, Variable};
pub use resolver::{CallContext, NameResolver, Resolution};
pub use traversal::{Flow, Traversal, TraversalStats};
