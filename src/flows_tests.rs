//! End-to-end flow computation over whole corpora, plus property tests over
//! random call graphs.

use std::collections::HashSet;

use proptest::prelude::*;

use super::*;
use crate::model::{TypeKind, TypeRecord};
use crate::test_utils::*;
use crate::resolver::FRAMEWORK_PREFIX;
use crate::traversal::EDGE_MARKER;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn order_corpus() -> Vec<TypeRecord> {
    vec![
        with_fields(
            type_rec("com.shop.web", "OrderController", TypeKind::Controller, vec![
                method_with_params("create", &[("OrderRequest", "req")], &[
                    "log.info(\"create\")",
                    "orderService.place(req.toOrder())",
                ]),
                method("list", &["orderService.findAll()"]),
            ]),
            &[("OrderService", "orderService")],
        ),
        with_fields(
            type_rec("com.shop.service", "OrderService", TypeKind::Service, vec![
                method("place", &["validate()", "orderRepository.save(order)", "notifier.send()"]),
                method("validate", &[]),
                method("findAll", &["orderRepository.findAll()"]),
            ]),
            &[("OrderRepository", "orderRepository"), ("Notifier", "notifier")],
        ),
        type_rec("com.shop.service", "Notifier", TypeKind::Service, vec![method("send", &["validate()"])]),
        type_rec("com.shop.ws", "OrderEndpoint", TypeKind::Soap, vec![
            method("submit", &["com.shop.service.OrderService.place(com.shop.Order)"]),
        ]),
    ]
}

#[test]
fn test_flows_for_every_entry_point() {
    let corpus = order_corpus();
    let flows = compute_entry_point_flows(&corpus);
    assert_eq!(flows.len(), 3);

    assert_eq!(flows["com.shop.web.OrderController.create(OrderRequest)"], strings(&[
        "com.shop.web.OrderController.create(OrderRequest)",
        " -> com.shop.service.OrderService.place()",
        " -> com.shop.service.OrderService.validate()",
        " -> Framework method: Repository.save()",
        " -> com.shop.service.Notifier.send()",
    ]));
    assert_eq!(flows["com.shop.web.OrderController.list()"], strings(&[
        "com.shop.web.OrderController.list()",
        " -> com.shop.service.OrderService.findAll()",
        " -> Framework method: Repository.findAll()",
    ]));
    assert_eq!(flows["com.shop.ws.OrderEndpoint.submit()"][1], " -> com.shop.service.OrderService.place()");
}

#[test]
fn test_visited_sets_are_per_root() {
    // Both entry points reach OrderService.place; each flow lists it.
    let corpus = order_corpus();
    let flows = compute_entry_point_flows(&corpus);
    let place = " -> com.shop.service.OrderService.place()";
    assert!(flows["com.shop.web.OrderController.create(OrderRequest)"].iter().any(|n| n == place));
    assert!(flows["com.shop.ws.OrderEndpoint.submit()"].iter().any(|n| n == place));
}

#[test]
fn test_empty_corpus_gives_empty_map() {
    assert!(compute_entry_point_flows(&[]).is_empty());
    let report = compute_entry_point_flows_with(&[], &EngineConfig::default());
    assert_eq!(report.roots, 0);
}

#[test]
fn test_corpus_without_controllers_gives_empty_map() {
    let corpus = vec![type_rec("svc", "Only", TypeKind::Service, vec![method("run", &[])])];
    assert!(compute_entry_point_flows(&corpus).is_empty());
}

#[test]
fn test_overloaded_entry_uses_last_declaration() {
    let corpus = vec![type_rec("web", "Api", TypeKind::Controller, vec![
        method_with_params("find", &[("Long", "id")], &["byId()"]),
        method_with_params("find", &[("String", "code")], &["byCode()"]),
        method("byId", &[]),
        method("byCode", &[]),
    ])];
    let report = compute_entry_point_flows_with(&corpus, &EngineConfig::default());
    assert_eq!(report.overload_collisions, 1);
    // both roots walk the single surviving record: find(String)
    let expected = strings(&["web.Api.find(String)", " -> web.Api.byCode()"]);
    assert_eq!(report.flows["web.Api.find(Long)"], expected);
    assert_eq!(report.flows["web.Api.find(String)"], expected);
}

#[test]
fn test_report_collects_unresolved_calls() {
    let corpus = vec![type_rec("web", "Api", TypeKind::Controller, vec![
        method("a", &["mystery.call()", "b()"]),
        method("b", &["mystery.call()", "other()"]),
    ])];
    let report = compute_entry_point_flows_with(&corpus, &EngineConfig::default());
    let unresolved: Vec<&str> = report.stats.unresolved_calls.iter().map(String::as_str).collect();
    assert_eq!(unresolved, vec!["mystery.call()", "other()"]);
}

#[test]
fn test_parallel_matches_sequential() {
    let corpus = order_corpus();
    let sequential = compute_entry_point_flows_with(&corpus, &EngineConfig::default());
    let parallel = compute_entry_point_flows_with(&corpus, &EngineConfig { threads: 3, ..Default::default() });
    assert_eq!(sequential.flows, parallel.flows);
    assert_eq!(sequential.stats, parallel.stats);
}

#[test]
fn test_output_is_deterministic() {
    let corpus = order_corpus();
    let first = serde_json::to_string(&compute_entry_point_flows(&corpus)).unwrap();
    for _ in 0..5 {
        assert_eq!(serde_json::to_string(&compute_entry_point_flows(&corpus)).unwrap(), first);
    }
}

// ─── Property tests ─────────────────────────────────────────────────

/// Distinct repository methods the random corpora may call.
const REPO_METHODS: usize = 2;

/// `types` types with `per_type` methods each; method `i` calls the targets
/// listed in `calls[i]`. The two targets past the corpus are unresolvable
/// names; the next `REPO_METHODS` are calls on an unindexed repository field.
fn build_corpus(types: usize, per_type: usize, calls: &[Vec<usize>]) -> Vec<TypeRecord> {
    let total = types * per_type;
    (0..types)
        .map(|t| {
            let methods = (0..per_type)
                .map(|m| {
                    let i = t * per_type + m;
                    let exprs: Vec<String> = calls[i]
                        .iter()
                        .map(|&target| {
                            if target >= total + 2 {
                                format!("repo.save{}(entity)", target - total - 2)
                            } else if target >= total {
                                format!("ghost{}()", target)
                            } else if target / per_type == t {
                                format!("m{}()", target % per_type)
                            } else {
                                format!("p.T{}.m{}()", target / per_type, target % per_type)
                            }
                        })
                        .collect();
                    let refs: Vec<&str> = exprs.iter().map(String::as_str).collect();
                    method(&format!("m{}", m), &refs)
                })
                .collect();
            let kind = if t == 0 { TypeKind::Controller } else { TypeKind::Service };
            with_fields(type_rec("p", &format!("T{}", t), kind, methods), &[("OrderRepository", "repo")])
        })
        .collect()
}

fn arb_corpus() -> impl Strategy<Value = Vec<TypeRecord>> {
    (1usize..4, 1usize..5).prop_flat_map(|(types, per_type)| {
        let total = types * per_type;
        prop::collection::vec(prop::collection::vec(0..total + 2 + REPO_METHODS, 0..6), total)
            .prop_map(move |calls| build_corpus(types, per_type, &calls))
    })
}

proptest! {
    #[test]
    fn prop_flows_are_bounded_and_unique(corpus in arb_corpus()) {
        let method_count: usize = corpus.iter().map(|t| t.methods.len()).sum();
        let flows = compute_entry_point_flows(&corpus);
        prop_assert_eq!(flows.len(), corpus[0].methods.len());

        for (entry, flow) in &flows {
            prop_assert!(!flow.is_empty());
            prop_assert_eq!(&flow[0], entry);

            let leaves = flow.iter().filter(|n| n.contains(FRAMEWORK_PREFIX)).count();
            prop_assert!(leaves <= REPO_METHODS, "leaf listed twice in {:?}", flow);
            prop_assert!(flow.len() - leaves <= method_count);

            let nodes: HashSet<&str> = flow.iter()
                .map(|n| n.strip_prefix(EDGE_MARKER).unwrap_or(n))
                .collect();
            prop_assert_eq!(nodes.len(), flow.len(), "duplicate node in {:?}", flow);
        }
    }

    #[test]
    fn prop_thread_count_does_not_change_output(corpus in arb_corpus()) {
        let sequential = compute_entry_point_flows_with(&corpus, &EngineConfig::default());
        let parallel = compute_entry_point_flows_with(&corpus, &EngineConfig { threads: 4, ..Default::default() });
        prop_assert_eq!(sequential.flows, parallel.flows);
    }
}
