//! Single-source least-cost search.
//!
//! Classic binary-heap Dijkstra over the network, with edge weights supplied
//! by the cost resolver so query-time conditions apply without touching the
//! base network. Duplicate heap entries are tolerated and discarded lazily on
//! pop; that is cheaper than decrease-key on a binary heap and correct as
//! long as effective costs are non-negative, which the resolver guarantees.
//!
//! The search itself is sequential. Concurrency happens one level up: the
//! network is shared read-only across requests and every request owns its
//! condition set and search state, so no locking is involved.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::conditions::Conditions;
use crate::cost::{resolve, Diagnostics, ResolvedCost};
use crate::error::Result;
use crate::network::{EdgeId, Network, NodeId};

/// Per-node outcome of a search.
#[derive(Debug, Clone, Copy)]
pub struct NodeCost {
    /// Cumulative effective cost from the start; `f64::INFINITY` while unreachable.
    pub total: f64,
    /// Travel component of `total` (weather-adjusted weights).
    pub travel: f64,
    /// Toll component of `total`.
    pub toll: f64,
    /// Previous hop on the cheapest known route; `None` for the start node
    /// and for unreachable nodes.
    pub predecessor: Option<(NodeId, EdgeId)>,
}

impl NodeCost {
    fn unreached() -> Self {
        Self {
            total: f64::INFINITY,
            travel: 0.0,
            toll: 0.0,
            predecessor: None,
        }
    }
}

/// Distances and predecessor links from one start node.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    start: NodeId,
    costs: Vec<NodeCost>,
    diagnostics: Diagnostics,
}

impl ShortestPaths {
    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn cost(&self, node: NodeId) -> &NodeCost {
        &self.costs[node.0 as usize]
    }

    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.cost(node).total.is_finite()
    }

    pub fn predecessor(&self, node: NodeId) -> Option<(NodeId, EdgeId)> {
        self.cost(node).predecessor
    }

    pub fn node_count(&self) -> usize {
        self.costs.len()
    }

    /// Non-fatal resolver events collected during the search. Callers decide
    /// how to report them; nothing here has been logged yet.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Build a result with hand-written costs, bypassing the search. Lets
    /// reconstruction tests exercise states a correct search never produces.
    #[cfg(test)]
    pub(crate) fn synthetic(start: NodeId, costs: Vec<NodeCost>) -> Self {
        Self {
            start,
            costs,
            diagnostics: Diagnostics::default(),
        }
    }
}

// Min-heap entry keyed by tentative total cost.
struct QueueEntry {
    total: f64,
    node: NodeId,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.total == other.total
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap
        other
            .total
            .partial_cmp(&self.total)
            .unwrap_or(Ordering::Equal)
    }
}

/// Compute least-cost routes from `start` to every node under `conditions`.
///
/// Impassable edges are skipped as if absent. A node whose outgoing edges are
/// all closed simply stops relaxing; nodes only reachable through it stay at
/// infinity. Fails only when the resolver reports an invalid cost.
pub fn shortest_paths(
    network: &Network,
    conditions: &Conditions,
    start: NodeId,
) -> Result<ShortestPaths> {
    let mut costs = vec![NodeCost::unreached(); network.node_count()];
    let mut diagnostics = Diagnostics::default();
    costs[start.0 as usize].total = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(QueueEntry {
        total: 0.0,
        node: start,
    });

    while let Some(QueueEntry { total, node }) = heap.pop() {
        // Skip stale entries left behind by earlier relaxations.
        if total > costs[node.0 as usize].total {
            continue;
        }
        let here = costs[node.0 as usize];

        for (neighbor, edge_id) in network.neighbors(node) {
            let cost = match resolve(network, edge_id, conditions, &mut diagnostics)? {
                ResolvedCost::Passable(cost) => cost,
                ResolvedCost::Impassable => continue,
            };

            let candidate = total + cost.total();
            let entry = &mut costs[neighbor.0 as usize];
            if candidate < entry.total {
                entry.total = candidate;
                entry.travel = here.travel + cost.travel;
                entry.toll = here.toll + cost.toll;
                entry.predecessor = Some((node, edge_id));
                heap.push(QueueEntry {
                    total: candidate,
                    node: neighbor,
                });
            }
        }
    }

    Ok(ShortestPaths {
        start,
        costs,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::Conditions;

    #[test]
    fn start_node_costs_zero_with_no_predecessor() {
        let mut network = Network::new();
        let a = network.add_node("A");
        let b = network.add_node("B");
        network.add_edge(a, b, 2.0, None).unwrap();

        let paths = shortest_paths(&network, &Conditions::new(), a).unwrap();
        assert_eq!(paths.cost(a).total, 0.0);
        assert!(paths.predecessor(a).is_none());
    }

    #[test]
    fn dead_end_node_stops_relaxing() {
        // A -> B -> C with B's only outgoing edge closed: C stays unreachable.
        let mut network = Network::new();
        let a = network.add_node("A");
        let b = network.add_node("B");
        let c = network.add_node("C");
        network.add_edge(a, b, 1.0, None).unwrap();
        let bc = network.add_edge(b, c, 1.0, None).unwrap();

        let conditions = Conditions::new().with_closure(bc);
        let paths = shortest_paths(&network, &conditions, a).unwrap();
        assert!(paths.is_reachable(b));
        assert!(!paths.is_reachable(c));
    }

    #[test]
    fn cheaper_late_path_updates_predecessor() {
        // Direct A -> C (9) loses to A -> B -> C (2 + 3).
        let mut network = Network::new();
        let a = network.add_node("A");
        let b = network.add_node("B");
        let c = network.add_node("C");
        network.add_edge(a, c, 9.0, None).unwrap();
        network.add_edge(a, b, 2.0, None).unwrap();
        let bc = network.add_edge(b, c, 3.0, None).unwrap();

        let paths = shortest_paths(&network, &Conditions::new(), a).unwrap();
        assert_eq!(paths.cost(c).total, 5.0);
        assert_eq!(paths.predecessor(c), Some((b, bc)));
    }

    #[test]
    fn cycles_terminate() {
        let mut network = Network::new();
        let a = network.add_node("A");
        let b = network.add_node("B");
        network.add_edge(a, b, 1.0, None).unwrap();
        network.add_edge(b, a, 1.0, None).unwrap();

        let paths = shortest_paths(&network, &Conditions::new(), a).unwrap();
        assert_eq!(paths.cost(b).total, 1.0);
        assert_eq!(paths.cost(a).total, 0.0);
    }

    #[test]
    fn toll_components_accumulate_along_the_route() {
        let mut network = Network::new();
        let a = network.add_node("A");
        let b = network.add_node("B");
        let c = network.add_node("C");
        network.add_edge(a, b, 2.0, Some(1.0)).unwrap();
        network.add_edge(b, c, 3.0, Some(4.0)).unwrap();

        let paths = shortest_paths(&network, &Conditions::new(), a).unwrap();
        let at_c = paths.cost(c);
        assert_eq!(at_c.travel, 5.0);
        assert_eq!(at_c.toll, 5.0);
        assert_eq!(at_c.total, 10.0);
    }
}
