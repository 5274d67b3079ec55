//! Route reconstruction and per-destination summaries.

use serde::Serialize;

use crate::dijkstra::ShortestPaths;
use crate::error::{Error, Result};
use crate::network::{Network, NodeId};

/// An ordered route from the search's start node to one destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Visited nodes in travel order, start first.
    pub nodes: Vec<NodeId>,
    pub total_cost: f64,
    pub travel_cost: f64,
    pub toll_cost: f64,
}

impl Route {
    /// Render the route as "Depot -> Hub -> Store".
    pub fn display(&self, network: &Network) -> String {
        self.nodes
            .iter()
            .map(|&n| network.node_name(n))
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    pub fn summary(&self, network: &Network) -> RouteSummary {
        RouteSummary {
            destination: network
                .node_name(*self.nodes.last().expect("route has at least the start node"))
                .to_string(),
            stops: self
                .nodes
                .iter()
                .map(|&n| network.node_name(n).to_string())
                .collect(),
            total_cost: self.total_cost,
            travel_cost: self.travel_cost,
            toll_cost: self.toll_cost,
        }
    }
}

/// Serializable route description for reporting collaborators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub destination: String,
    pub stops: Vec<String>,
    pub total_cost: f64,
    pub travel_cost: f64,
    pub toll_cost: f64,
}

/// Walk predecessor links back from `target` and reverse into travel order.
///
/// Returns `Ok(None)` when the target was never reached; that is a normal
/// outcome, not an error. Fails with [`Error::CorruptPredecessorChain`] if
/// the walk does not terminate within the node count, which would mean the
/// search result was tampered with or a search invariant broke. The guard
/// matters because reconstruction may run long after (and far away from) the
/// search that produced the result.
pub fn reconstruct(
    network: &Network,
    paths: &ShortestPaths,
    target: NodeId,
) -> Result<Option<Route>> {
    if !paths.is_reachable(target) {
        return Ok(None);
    }

    let limit = paths.node_count();
    let mut nodes = vec![target];
    let mut current = target;
    while let Some((previous, _)) = paths.predecessor(current) {
        nodes.push(previous);
        current = previous;
        if nodes.len() > limit {
            return Err(Error::CorruptPredecessorChain {
                target: network.node_name(target).to_string(),
                limit,
            });
        }
    }
    nodes.reverse();

    let cost = paths.cost(target);
    Ok(Some(Route {
        nodes,
        total_cost: cost.total,
        travel_cost: cost.travel,
        toll_cost: cost.toll,
    }))
}

/// Summaries for every reachable node, cheapest first.
///
/// The start node is included as a zero-cost single-stop route; unreachable
/// nodes are simply absent.
pub fn summarize_all(network: &Network, paths: &ShortestPaths) -> Result<Vec<RouteSummary>> {
    let mut summaries = Vec::new();
    for node in network.node_ids() {
        if let Some(route) = reconstruct(network, paths, node)? {
            summaries.push(route.summary(network));
        }
    }
    summaries.sort_by(|a, b| {
        a.total_cost
            .partial_cmp(&b.total_cost)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.destination.cmp(&b.destination))
    });
    Ok(summaries)
}
