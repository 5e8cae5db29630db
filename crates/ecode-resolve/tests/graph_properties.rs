//! Property tests for resolution over generated annotation graphs.
//!
//! Graphs are small (up to six operations) but dense in delegations, so
//! cycles, self-loops, and diamonds show up in almost every case.

use std::collections::{BTreeSet, HashSet, VecDeque};

use ecode_core::{ErrorCodeDescription, Operation, OperationId};
use ecode_resolve::Registry;
use proptest::prelude::*;

type Literal = (Option<&'static str>, &'static str);

#[derive(Debug, Clone)]
enum Decl {
    Literal(Option<&'static str>, &'static str),
    Delegate(usize),
}

fn op_name(i: usize) -> String {
    format!("Graph.Op{i}")
}

fn decl(ops: usize) -> impl Strategy<Value = Decl> {
    prop_oneof![
        (
            prop::option::of(prop::sample::select(vec!["id", "name"])),
            prop::sample::select(vec!["A", "B", "C", "D"]),
        )
            .prop_map(|(p, c)| Decl::Literal(p, c)),
        (0..ops).prop_map(Decl::Delegate),
    ]
}

fn graph() -> impl Strategy<Value = Vec<Vec<Decl>>> {
    (1usize..=6).prop_flat_map(|ops| {
        let operation = prop::collection::vec(decl(ops), 0..5);
        prop::collection::vec(operation, ops)
    })
}

fn build(graph: &[Vec<Decl>]) -> Registry {
    let mut builder = Registry::builder();
    for (i, decls) in graph.iter().enumerate() {
        let mut op = Operation::parse(&op_name(i)).unwrap();
        for d in decls {
            op = match d {
                Decl::Literal(p, c) => op.literal(*p, c, None),
                Decl::Delegate(j) => op.delegates_to_operation(&op_name(*j)).unwrap(),
            };
        }
        builder = builder.operation(op);
    }
    builder.build().unwrap()
}

fn reachable_literals(graph: &[Vec<Decl>], root: usize) -> BTreeSet<Literal> {
    let mut seen = HashSet::from([root]);
    let mut queue = VecDeque::from([root]);
    let mut literals = BTreeSet::new();
    while let Some(i) = queue.pop_front() {
        for d in &graph[i] {
            match d {
                Decl::Literal(p, c) => {
                    literals.insert((*p, *c));
                }
                Decl::Delegate(j) => {
                    if seen.insert(*j) {
                        queue.push_back(*j);
                    }
                }
            }
        }
    }
    literals
}

proptest! {
    /// Resolution terminates on any graph and yields exactly the literals of
    /// every reachable operation, each once.
    #[test]
    fn resolves_exactly_reachable_literals(graph in graph()) {
        let registry = build(&graph);
        let resolver = registry.resolver();
        for root in 0..graph.len() {
            let id = OperationId::parse(&op_name(root)).unwrap();
            let codes = resolver.error_codes(&id).unwrap();

            let unique: HashSet<&ErrorCodeDescription> = codes.iter().collect();
            prop_assert_eq!(unique.len(), codes.len(), "duplicate entries in {:?}", codes);

            let actual: BTreeSet<(Option<&str>, &str)> =
                codes.iter().map(|c| (c.property_name(), c.error_code())).collect();
            let expected: BTreeSet<(Option<&str>, &str)> =
                reachable_literals(&graph, root).into_iter().collect();
            prop_assert_eq!(actual, expected);
        }
    }

    /// Resolving the same operation twice gives the same ordered list.
    #[test]
    fn resolution_is_idempotent(graph in graph()) {
        let registry = build(&graph);
        for root in 0..graph.len() {
            let id = OperationId::parse(&op_name(root)).unwrap();
            let first = registry.resolver().error_codes(&id).unwrap();
            let second = registry.resolver().error_codes(&id).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
