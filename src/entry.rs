//! Entry-point selection: every method of every controller or SOAP type.

use serde::Serialize;

use crate::model::TypeRecord;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EntryPoint {
    /// `pkg.Type.method(T1, T2)`, the key of the resulting flow.
    pub display: String,
    /// `pkg.Type.method`, where the traversal starts.
    pub base_fqn: String,
}

/// Traversal roots in corpus order.
pub fn entry_points(types: &[TypeRecord]) -> Vec<EntryPoint> {
    types
        .iter()
        .filter(|t| t.kind.is_entry_point())
        .flat_map(|t| {
            let fqn = t.fqn();
            t.methods.iter().map(move |m| EntryPoint {
                display: format!("{}.{}({})", fqn, m.name, m.param_list()),
                base_fqn: format!("{}.{}", fqn, m.name),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeKind;
    use crate::test_utils::{method, method_with_params, type_rec};

    #[test]
    fn test_only_controller_and_soap_methods_are_roots() {
        let corpus = vec![
            type_rec("web", "OrderController", TypeKind::Controller, vec![
                method_with_params("get", &[("Long", "id"), ("String", "fields")], &[]),
                method("list", &[]),
            ]),
            type_rec("svc", "OrderService", TypeKind::Service, vec![method("get", &[])]),
            type_rec("ws", "BillingEndpoint", TypeKind::Soap, vec![method("invoice", &[])]),
        ];
        let roots = entry_points(&corpus);
        let displays: Vec<&str> = roots.iter().map(|r| r.display.as_str()).collect();
        assert_eq!(displays, vec![
            "web.OrderController.get(Long, String)",
            "web.OrderController.list()",
            "ws.BillingEndpoint.invoice()",
        ]);
        assert_eq!(roots[0].base_fqn, "web.OrderController.get");
    }

    #[test]
    fn test_empty_corpus_has_no_roots() {
        assert!(entry_points(&[]).is_empty());
    }

    #[test]
    fn test_overloaded_entry_methods_keep_distinct_displays() {
        let corpus = vec![type_rec("web", "Api", TypeKind::Controller, vec![
            method_with_params("find", &[("Long", "id")], &[]),
            method_with_params("find", &[("String", "code")], &[]),
        ])];
        let roots = entry_points(&corpus);
        assert_eq!(roots.len(), 2);
        assert_ne!(roots[0].display, roots[1].display);
        assert_eq!(roots[0].base_fqn, roots[1].base_fqn);
    }
}
