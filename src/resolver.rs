//! Tiered name resolution for one raw call expression.
//!
//! Tiers, first success wins:
//!
//! 0. no-op receivers (logging, console) are dropped
//! 1. direct lookup of the argument-stripped text
//!    (dotted calls then go through [`ChainResolver`])
//! 2. `Outer.method` where `Outer` is an indexed type's simple name
//! 3. bare name on the caller's type and its ancestors
//! 4. any method in the corpus with the same simple name
//! 5. infrastructure receivers become terminal "framework" leaves
//!
//! A dotted call whose receiver type is known but not indexed is checked
//! against tier 5 right after the chain walk, so `orderRepository.save()`
//! stays a framework leaf even when some corpus type declares `save`.
//!
//! Resolution is pure: the same expression in the same context always yields
//! the same answer.

use crate::callexpr::{qualifier, segments, simple_name, strip_args};
use crate::chain::{ChainOutcome, ChainResolver};
use crate::config::EngineConfig;
use crate::index::{MetadataIndex, MethodEntry};
use crate::model::{TypeRecord, Variable};

pub const FRAMEWORK_PREFIX: &str = "Framework method: ";

/// What the caller can see at the call site.
#[derive(Debug, Clone, Copy)]
pub struct CallContext<'c, 'a> {
    pub owner_fqn: &'c str,
    pub owner: &'a TypeRecord,
    pub params: &'a [Variable],
    pub locals: &'a [Variable],
}

impl<'c, 'a> CallContext<'c, 'a> {
    pub fn of(caller: &'c MethodEntry<'a>) -> Self {
        Self {
            owner_fqn: &caller.type_fqn,
            owner: caller.owner,
            params: &caller.record.parameters,
            locals: &caller.record.locals,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'i, 'a> {
    /// A corpus method; the traversal recurses into it.
    Method(&'i MethodEntry<'a>),
    /// Terminal leaf text, e.g. `Framework method: Repository.save()`.
    Framework(String),
    /// Deliberately dropped (logging and the like).
    Ignored,
    Unresolved,
}

pub struct NameResolver<'i, 'a> {
    index: &'i MetadataIndex<'a>,
    config: &'i EngineConfig,
}

impl<'i, 'a> NameResolver<'i, 'a> {
    pub fn new(index: &'i MetadataIndex<'a>, config: &'i EngineConfig) -> Self {
        Self { index, config }
    }

    pub fn resolve(&self, raw: &str, ctx: &CallContext<'_, 'a>) -> Resolution<'i, 'a> {
        let mut segs = segments(raw);
        if segs.first().is_some_and(|s| s == "this") {
            segs.remove(0);
        }
        if segs.is_empty() {
            return Resolution::Unresolved;
        }
        if self.is_noop(&segs) {
            return Resolution::Ignored;
        }

        // Tier 1: already-qualified signatures
        if let Some(m) = self.direct(raw, &segs) {
            return Resolution::Method(m);
        }

        let method_name = &segs[segs.len() - 1];
        let mut chain_type: Option<String> = None;

        if segs.len() == 2 && segs[0] == "super" {
            if let Some(m) = self.on_ancestors(ctx.owner_fqn, method_name) {
                return Resolution::Method(m);
            }
        } else if segs.len() >= 2 {
            match ChainResolver::new(self.index).resolve(&segs, ctx) {
                ChainOutcome::Resolved(m) => return Resolution::Method(m),
                ChainOutcome::Abandoned { last_type } => chain_type = last_type,
            }
        }

        // A receiver typed outside the corpus is infrastructure when its type
        // carries a marker; a same-named corpus method must not capture it.
        if chain_type.as_deref().is_some_and(|t| self.index().type_by_fqn(t).is_none()) {
            if let Some(category) = self.framework_category(&segs, chain_type.as_deref()) {
                return Self::framework_leaf(category, method_name);
            }
        }

        // Tier 2: Outer.method
        if segs.len() >= 2 {
            if let Some(m) = self.by_class_and_name(&segs[segs.len() - 2], method_name) {
                return Resolution::Method(m);
            }
        }

        // Tier 3: bare name in the caller's own type hierarchy
        if segs.len() == 1 {
            if let Some(m) = self.index().member(ctx.owner_fqn, method_name) {
                return Resolution::Method(m);
            }
        }

        // Tier 4: exact name anywhere
        if let Some(m) = self.by_name_anywhere(method_name) {
            return Resolution::Method(m);
        }

        // Tier 5: infrastructure receivers
        if let Some(category) = self.framework_category(&segs, chain_type.as_deref()) {
            return Self::framework_leaf(category, method_name);
        }

        Resolution::Unresolved
    }

    fn index(&self) -> &'i MetadataIndex<'a> {
        self.index
    }

    fn framework_leaf(category: &str, method_name: &str) -> Resolution<'i, 'a> {
        Resolution::Framework(format!("{}{}.{}()", FRAMEWORK_PREFIX, category, method_name))
    }

    fn direct(&self, raw: &str, segs: &[String]) -> Option<&'i MethodEntry<'a>> {
        let index = self.index();
        index.method(&strip_args(raw)).or_else(|| index.method(&segs.join(".")))
    }

    /// `super.name()`: the nearest ancestor declaring `name`.
    fn on_ancestors(&self, owner_fqn: &str, name: &str) -> Option<&'i MethodEntry<'a>> {
        let index = self.index();
        index
            .supertypes(owner_fqn)
            .iter()
            .find_map(|sup| index.method(&format!("{}.{}", sup, name)))
    }

    /// Tier 2. `outer` may be qualified; only its simple name is compared.
    pub(crate) fn by_class_and_name(&self, outer: &str, name: &str) -> Option<&'i MethodEntry<'a>> {
        let outer = simple_name(outer);
        self.index().type_by_simple_name(outer)?;
        self.index().methods().find(|m| m.owner.name == outer && m.name() == name)
    }

    /// Tier 4. Ambiguous by nature: the first match in corpus order wins.
    pub(crate) fn by_name_anywhere(&self, name: &str) -> Option<&'i MethodEntry<'a>> {
        self.index().methods().find(|m| m.name() == name)
    }

    fn is_noop(&self, segs: &[String]) -> bool {
        if segs.len() < 2 {
            return false;
        }
        let qual = qualifier(segs);
        self.config
            .noop_receivers
            .iter()
            .any(|r| *r == segs[0] || *r == qual)
    }

    /// The first configured marker that the inferred receiver type, or any
    /// qualifying segment, ends with (case-insensitive).
    fn framework_category(&self, segs: &[String], chain_type: Option<&str>) -> Option<&'i str> {
        let config: &'i EngineConfig = self.config;
        let mut candidates: Vec<String> = Vec::new();
        if let Some(t) = chain_type {
            candidates.push(simple_name(t).to_lowercase());
        }
        candidates.extend(
            segs[..segs.len() - 1]
                .iter()
                .map(|s| simple_name(s).to_lowercase()),
        );

        candidates.iter().find_map(|cand| {
            config
                .framework_markers
                .iter()
                .find(|marker| !marker.is_empty() && cand.ends_with(&marker.to_lowercase()))
                .map(|marker| marker.as_str())
        })
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
