//! Metadata index: type and method lookup tables for one analysis run.
//!
//! Methods are keyed by `typeFqn.methodName`. Parameter lists are not part of
//! the key, so overloads collapse onto one entry and the last one indexed
//! wins.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::callexpr::{simple_name, strip_generics};
use crate::model::{MethodRecord, TypeRecord};

/// A method together with the type that declares it.
#[derive(Debug, Clone)]
pub struct MethodEntry<'a> {
    /// `typeFqn.methodName`, the base FQN used for lookup and visited sets.
    pub key: String,
    pub type_fqn: String,
    pub owner: &'a TypeRecord,
    pub record: &'a MethodRecord,
}

impl MethodEntry<'_> {
    /// `pkg.Type.method(T1, T2)`.
    pub fn display_signature(&self) -> String {
        format!("{}.{}({})", self.type_fqn, self.record.name, self.record.param_list())
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }
}

impl PartialEq for MethodEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

/// Lookup tables over a borrowed corpus. Immutable once built.
#[derive(Debug, Default)]
pub struct MetadataIndex<'a> {
    types: HashMap<String, &'a TypeRecord>,
    /// Types in corpus order, with their FQN.
    type_order: Vec<(String, &'a TypeRecord)>,
    /// simple name → position in `type_order` of the first type with that name
    simple_names: HashMap<String, usize>,
    methods: HashMap<String, MethodEntry<'a>>,
    /// Distinct method keys in first-insertion order; drives every corpus scan
    /// so results never depend on hash iteration order.
    method_order: Vec<String>,
    overloaded: HashSet<String>,
}

impl<'a> MetadataIndex<'a> {
    pub fn build(types: &'a [TypeRecord]) -> Self {
        let mut index = MetadataIndex::default();

        for ty in types {
            let fqn = ty.fqn();
            index.simple_names.entry(ty.name.clone()).or_insert(index.type_order.len());
            index.type_order.push((fqn.clone(), ty));
            index.types.insert(fqn.clone(), ty);

            for method in &ty.methods {
                let key = format!("{}.{}", fqn, method.name);
                let entry = MethodEntry {
                    key: key.clone(),
                    type_fqn: fqn.clone(),
                    owner: ty,
                    record: method,
                };
                if index.methods.insert(key.clone(), entry).is_some() {
                    if index.overloaded.insert(key.clone()) {
                        debug!(method = %key, "Overloads collapsed, last declaration wins");
                    }
                } else {
                    index.method_order.push(key);
                }
            }
        }

        index
    }

    pub fn type_by_fqn(&self, fqn: &str) -> Option<&'a TypeRecord> {
        self.types.get(fqn).copied()
    }

    /// First type in corpus order whose simple name matches, with its FQN.
    pub fn type_by_simple_name(&self, name: &str) -> Option<(&str, &'a TypeRecord)> {
        self.simple_names
            .get(name)
            .and_then(|&i| self.type_order.get(i))
            .map(|(fqn, ty)| (fqn.as_str(), *ty))
    }

    pub fn method(&self, key: &str) -> Option<&MethodEntry<'a>> {
        self.methods.get(key)
    }

    /// All indexed methods in deterministic corpus order.
    pub fn methods(&self) -> impl Iterator<Item = &MethodEntry<'a>> {
        self.method_order.iter().filter_map(|k| self.methods.get(k))
    }

    /// Map a declared type name onto an indexed FQN when possible.
    ///
    /// Generic arguments and array markers are dropped first. A name that is
    /// already an indexed FQN is kept; otherwise its simple name is matched
    /// against indexed types; failing both, the stripped name is returned
    /// as-is so callers can still pattern-match on it.
    pub fn resolve_type_name(&self, declared: &str) -> String {
        let stripped = strip_generics(declared);
        if self.types.contains_key(&stripped) {
            return stripped;
        }
        match self.type_by_simple_name(simple_name(&stripped)) {
            Some((fqn, _)) => fqn.to_string(),
            None => stripped,
        }
    }

    /// Indexed ancestors of a type, nearest first: parent chain and
    /// interfaces, breadth-first. Names that do not resolve to an indexed
    /// type end that branch. Cyclic hierarchies are tolerated.
    pub fn supertypes(&self, type_fqn: &str) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(type_fqn.to_string());
        let mut queue = vec![type_fqn.to_string()];
        let mut out = Vec::new();
        let mut i = 0;
        while let Some(current) = queue.get(i).cloned() {
            i += 1;
            let Some(ty) = self.type_by_fqn(&current) else { continue };
            for declared in ty.parent.iter().chain(ty.interfaces.iter()) {
                let fqn = self.resolve_type_name(declared);
                if self.types.contains_key(&fqn) && seen.insert(fqn.clone()) {
                    out.push(fqn.clone());
                    queue.push(fqn);
                }
            }
        }
        out
    }

    /// `type_fqn.name`, or the nearest inherited declaration of `name`.
    pub fn member(&self, type_fqn: &str, name: &str) -> Option<&MethodEntry<'a>> {
        self.method(&format!("{}.{}", type_fqn, name)).or_else(|| {
            self.supertypes(type_fqn)
                .iter()
                .find_map(|sup| self.method(&format!("{}.{}", sup, name)))
        })
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    /// Number of method keys that more than one declaration mapped onto.
    pub fn overload_collisions(&self) -> usize {
        self.overloaded.len()
    }
}
