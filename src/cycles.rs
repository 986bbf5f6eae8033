//! Cycle guard for citations added between two existing publications.
//!
//! Ownership edges point from the cited publication to the citing one. Adding `from -> to` closes a cycle exactly
//! when `from` is already reachable from `to`.

use std::collections::{HashSet, VecDeque};

use petgraph::stable_graph::StableDiGraph;
use petgraph::Direction;

use crate::node::NodeKey;

/// Check whether adding the ownership edge `from -> to` would introduce a cycle.
///
/// A self edge is always a cycle. An edge that already exists never creates a new one.
pub(crate) fn would_create_cycle<N, E>(graph: &StableDiGraph<N, E>, from: NodeKey, to: NodeKey) -> bool {
    if from == to {
        return true;
    }
    if graph.contains_edge(from, to) {
        return false;
    }

    // BFS from `to` looking for `from`.
    let mut queue: VecDeque<NodeKey> = VecDeque::from([to]);
    let mut visited: HashSet<NodeKey, ahash::RandomState> = HashSet::default();
    visited.insert(to);

    while let Some(current) = queue.pop_front() {
        if current == from {
            return true;
        }
        for next in graph.neighbors_directed(current, Direction::Outgoing) {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(len: usize) -> (StableDiGraph<usize, ()>, Vec<NodeKey>) {
        let mut graph = StableDiGraph::new();
        let keys: Vec<NodeKey> = (0..len).map(|i| graph.add_node(i)).collect();
        for pair in keys.windows(2) {
            graph.add_edge(pair[0], pair[1], ());
        }
        (graph, keys)
    }

    #[test]
    fn self_edge_is_a_cycle() {
        let (graph, keys) = chain(1);
        assert!(would_create_cycle(&graph, keys[0], keys[0]));
    }

    #[test]
    fn back_edge_is_a_cycle() {
        let (graph, keys) = chain(4);
        assert!(would_create_cycle(&graph, keys[3], keys[0]));
        assert!(would_create_cycle(&graph, keys[2], keys[1]));
    }

    #[test]
    fn forward_and_existing_edges_are_fine() {
        let (graph, keys) = chain(4);
        assert!(!would_create_cycle(&graph, keys[0], keys[3]));
        assert!(!would_create_cycle(&graph, keys[0], keys[1]));
    }

    #[test]
    fn unrelated_branches_are_fine() {
        let mut graph = StableDiGraph::<&str, ()>::new();
        let root = graph.add_node("root");
        let left = graph.add_node("left");
        let right = graph.add_node("right");
        graph.add_edge(root, left, ());
        graph.add_edge(root, right, ());
        assert!(!would_create_cycle(&graph, left, right));
        assert!(!would_create_cycle(&graph, right, left));
    }
}
