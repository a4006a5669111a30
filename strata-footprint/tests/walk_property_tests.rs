//! Property-Based Tests for the Graph Walker
//!
//! For any finite directed graph, cycles included:
//! - `walk` terminates
//! - each distinct node contributes to the total at most once
//! - the total equals the sum of shallow sizes over exactly the set of
//!   reachable, non-filtered nodes

use proptest::prelude::*;
use std::cell::RefCell;
use std::collections::HashSet;
use std::mem;
use std::sync::Arc;
use strata_footprint::{
    FieldMetadataCache, GraphWalker, IncludeAll, Measurable, MemSizeVisitor, TypeToken,
};

struct GraphNode<'a> {
    edges: RefCell<Vec<&'a GraphNode<'a>>>,
    _payload: u64,
}

struct GraphNodeMarker;

impl<'a> GraphNode<'a> {
    fn new() -> Self {
        Self {
            edges: RefCell::new(Vec::new()),
            _payload: 0,
        }
    }
}

impl<'a> Measurable for GraphNode<'a> {
    fn type_token(&self) -> TypeToken {
        TypeToken::of::<GraphNodeMarker>()
    }

    fn declared_fields(&self) -> &'static [&'static str] {
        &["edges"]
    }

    fn field_references(&self, field: &str) -> Vec<&dyn Measurable> {
        match field {
            "edges" => self
                .edges
                .borrow()
                .iter()
                .map(|n| *n as &dyn Measurable)
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn walker() -> GraphWalker<IncludeAll, MemSizeVisitor> {
    GraphWalker::new(
        IncludeAll,
        MemSizeVisitor,
        Arc::new(FieldMetadataCache::new(64)),
    )
}

/// Reachable node indices from `root`, computed independently of the walker.
fn reachable(n: usize, edges: &[(usize, usize)], root: usize) -> HashSet<usize> {
    let mut seen = HashSet::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if !seen.insert(node) {
            continue;
        }
        for &(from, to) in edges {
            if from % n == node {
                stack.push(to % n);
            }
        }
    }
    seen
}

fn edge_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..24).prop_flat_map(|n| {
        (
            Just(n),
            proptest::collection::vec((0..n, 0..n), 0..64),
        )
    })
}

proptest! {
    #[test]
    fn walk_counts_every_node_exactly_once((n, edges) in edge_strategy()) {
        let nodes: Vec<GraphNode<'_>> = (0..n).map(|_| GraphNode::new()).collect();
        for &(from, to) in &edges {
            nodes[from].edges.borrow_mut().push(&nodes[to]);
        }

        let roots: Vec<&dyn Measurable> = nodes.iter().map(|x| x as &dyn Measurable).collect();
        let total = walker().walk(&roots).expect("walk from all roots");
        prop_assert_eq!(total, (n as u64) * mem::size_of::<GraphNode<'_>>() as u64);
    }

    #[test]
    fn walk_total_matches_reachable_set((n, edges) in edge_strategy()) {
        let nodes: Vec<GraphNode<'_>> = (0..n).map(|_| GraphNode::new()).collect();
        for &(from, to) in &edges {
            nodes[from].edges.borrow_mut().push(&nodes[to]);
        }

        let expected = reachable(n, &edges, 0).len() as u64
            * mem::size_of::<GraphNode<'_>>() as u64;
        let total = walker().walk(&[&nodes[0]]).expect("walk from one root");
        prop_assert_eq!(total, expected);
    }
}
