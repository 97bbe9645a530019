//! Chained-call resolution: `recv.first().second()`.
//!
//! The receiver's static type comes from the caller's parameters, locals and
//! fields. Each following segment is looked up on the current type, and the
//! declared return type of every intermediate hop becomes the type of the
//! next one.

use crate::callexpr::constructed_type;
use crate::index::{MetadataIndex, MethodEntry};
use crate::resolver::CallContext;

#[derive(Debug)]
pub enum ChainOutcome<'i, 'a> {
    /// The final segment resolved to an indexed method.
    Resolved(&'i MethodEntry<'a>),
    /// Some hop could not be looked up. `last_type` is the type the walk had
    /// reached (resolved FQN or bare name), if the receiver was typed at all.
    Abandoned { last_type: Option<String> },
}

pub struct ChainResolver<'i, 'a> {
    index: &'i MetadataIndex<'a>,
}

impl<'i, 'a> ChainResolver<'i, 'a> {
    pub fn new(index: &'i MetadataIndex<'a>) -> Self {
        Self { index }
    }

    /// Static type of a receiver name in the caller's scope, resolved against
    /// the index where possible.
    ///
    /// Order: parameters, locals, fields of the declaring type, inherited
    /// fields, `new T` receivers, then a bare indexed type name (static call).
    pub fn receiver_type(&self, receiver: &str, ctx: &CallContext<'_, 'a>) -> Option<String> {
        let declared = ctx.params.iter()
            .chain(ctx.locals.iter())
            .find(|v| v.name == receiver)
            .map(|v| v.type_name.as_str())
            .or_else(|| ctx.owner.field(receiver).map(|f| f.type_name.as_str()))
            .or_else(|| {
                self.index.supertypes(ctx.owner_fqn).iter().find_map(|sup| {
                    self.index.type_by_fqn(sup)
                        .and_then(|t| t.field(receiver))
                        .map(|f| f.type_name.as_str())
                })
            })
            .or_else(|| constructed_type(receiver));

        if let Some(declared) = declared {
            return Some(self.index.resolve_type_name(declared));
        }

        if self.index.type_by_fqn(receiver).is_some() {
            return Some(receiver.to_string());
        }
        self.index.type_by_simple_name(receiver).map(|(fqn, _)| fqn.to_string())
    }

    fn index(&self) -> &'i MetadataIndex<'a> {
        self.index
    }

    /// Walk `segs` (receiver first, at least two segments).
    pub fn resolve(&self, segs: &[String], ctx: &CallContext<'_, 'a>) -> ChainOutcome<'i, 'a> {
        if segs.len() < 2 {
            return ChainOutcome::Abandoned { last_type: None };
        }
        let Some(mut current) = self.receiver_type(&segs[0], ctx) else {
            return ChainOutcome::Abandoned { last_type: None };
        };

        let index = self.index();
        let last = segs.len() - 1;
        for (i, seg) in segs.iter().enumerate().skip(1) {
            match index.member(&current, seg) {
                Some(entry) if i == last => return ChainOutcome::Resolved(entry),
                Some(entry) => current = index.resolve_type_name(&entry.record.return_type),
                None => return ChainOutcome::Abandoned { last_type: Some(current) },
            }
        }
        ChainOutcome::Abandoned { last_type: Some(current) }
    }
}
