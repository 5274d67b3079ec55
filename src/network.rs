//! Immutable logistics network: nodes, directed edges, adjacency.
//!
//! The network is append-only while being assembled and read-only afterwards.
//! There is no removal API; topology changes build a replacement network so
//! that in-flight planning requests keep reading the previous version without
//! locking.

use crate::error::{Error, Result};
use rustc_hash::FxHashMap;

/// Index of a node in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Index of a directed edge in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u32);

/// A directed leg between two registered nodes.
///
/// An undirected road is two edges, one per direction. `toll` carries the
/// booth cost in the same unit as `weight`; `None` means the leg is toll-free,
/// so a toll cost cannot exist without a toll.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    /// Base traversal weight (distance or travel time, caller's unit). Never negative.
    pub weight: f64,
    pub toll: Option<f64>,
}

/// Adjacency store for a delivery region.
///
/// Nodes are interned by display name; edges live in a flat vector and the
/// per-node adjacency lists hold edge indices into it.
#[derive(Debug, Default)]
pub struct Network {
    names: Vec<String>,
    name_index: FxHashMap<String, NodeId>,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<EdgeId>>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node by display name.
    ///
    /// Re-registering an existing name returns the id it already has.
    pub fn add_node(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.name_index.get(name) {
            return id;
        }
        let id = NodeId(self.names.len() as u32);
        self.names.push(name.to_string());
        self.name_index.insert(name.to_string(), id);
        self.adjacency.push(Vec::new());
        id
    }

    /// Insert a directed edge between two registered nodes.
    ///
    /// Endpoints must have been registered via [`add_node`](Self::add_node)
    /// first. Rejects negative or non-finite weights and toll costs, and
    /// duplicate (from, to) pairs.
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        weight: f64,
        toll: Option<f64>,
    ) -> Result<EdgeId> {
        let invalid = |reason: String| Error::InvalidEdge {
            from: self.label(from),
            to: self.label(to),
            reason,
        };

        if from.0 as usize >= self.names.len() || to.0 as usize >= self.names.len() {
            return Err(invalid("endpoint was never registered".to_string()));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(invalid(format!("weight {weight} must be finite and non-negative")));
        }
        if let Some(cost) = toll {
            if !cost.is_finite() || cost < 0.0 {
                return Err(invalid(format!(
                    "toll cost {cost} must be finite and non-negative"
                )));
            }
        }
        if self.find_edge(from, to).is_some() {
            return Err(invalid("duplicate edge".to_string()));
        }

        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge {
            from,
            to,
            weight,
            toll,
        });
        self.adjacency[from.0 as usize].push(id);
        Ok(id)
    }

    /// Outgoing neighbors of a node as (neighbor, edge) pairs.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, EdgeId)> + '_ {
        self.adjacency[node.0 as usize]
            .iter()
            .map(move |&id| (self.edges[id.0 as usize].to, id))
    }

    /// Look up the edge id for a (from, to) pair.
    pub fn find_edge(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        if from.0 as usize >= self.adjacency.len() {
            return None;
        }
        self.adjacency[from.0 as usize]
            .iter()
            .copied()
            .find(|&id| self.edges[id.0 as usize].to == to)
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0 as usize]
    }

    /// All edges with their ids, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| (EdgeId(i as u32), e))
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.name_index.get(name).copied()
    }

    /// Like [`node_id`](Self::node_id), but failing with
    /// [`Error::UnknownNode`] for callers that treat a missing name as an error.
    pub fn require_node(&self, name: &str) -> Result<NodeId> {
        self.node_id(name)
            .ok_or_else(|| Error::UnknownNode(name.to_string()))
    }

    pub fn node_name(&self, id: NodeId) -> &str {
        &self.names[id.0 as usize]
    }

    /// All node ids in registration order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.names.len() as u32).map(NodeId)
    }

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Human-readable "from -> to" label for an edge.
    pub fn edge_label(&self, id: EdgeId) -> String {
        let edge = self.edge(id);
        format!("{} -> {}", self.node_name(edge.from), self.node_name(edge.to))
    }

    /// Node name, or a positional placeholder for ids that were never registered.
    fn label(&self, id: NodeId) -> String {
        self.names
            .get(id.0 as usize)
            .cloned()
            .unwrap_or_else(|| format!("#{}", id.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_node_is_idempotent() {
        let mut network = Network::new();
        let a = network.add_node("Depot");
        let b = network.add_node("Depot");
        assert_eq!(a, b);
        assert_eq!(network.node_count(), 1);
    }

    #[test]
    fn add_edge_rejects_negative_weight() {
        let mut network = Network::new();
        let a = network.add_node("A");
        let b = network.add_node("B");
        let err = network.add_edge(a, b, -1.0, None).unwrap_err();
        assert!(matches!(err, Error::InvalidEdge { .. }));
    }

    #[test]
    fn add_edge_rejects_negative_toll() {
        let mut network = Network::new();
        let a = network.add_node("A");
        let b = network.add_node("B");
        let err = network.add_edge(a, b, 2.0, Some(-5.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidEdge { .. }));
    }

    #[test]
    fn add_edge_rejects_unregistered_endpoint() {
        let mut network = Network::new();
        let a = network.add_node("A");
        let err = network.add_edge(a, NodeId(7), 1.0, None).unwrap_err();
        assert!(matches!(err, Error::InvalidEdge { .. }));
    }

    #[test]
    fn add_edge_rejects_duplicate_pair() {
        let mut network = Network::new();
        let a = network.add_node("A");
        let b = network.add_node("B");
        network.add_edge(a, b, 1.0, None).unwrap();
        let err = network.add_edge(a, b, 2.0, None).unwrap_err();
        assert!(matches!(err, Error::InvalidEdge { .. }));
    }

    #[test]
    fn require_node_reports_missing_names() {
        let mut network = Network::new();
        network.add_node("Depot");
        assert!(network.require_node("Depot").is_ok());
        let err = network.require_node("Ghost").unwrap_err();
        assert!(matches!(err, Error::UnknownNode(name) if name == "Ghost"));
    }

    #[test]
    fn opposite_directions_are_distinct_edges() {
        let mut network = Network::new();
        let a = network.add_node("A");
        let b = network.add_node("B");
        network.add_edge(a, b, 1.0, None).unwrap();
        network.add_edge(b, a, 4.0, None).unwrap();
        assert_eq!(network.edge_count(), 2);
        assert_ne!(network.find_edge(a, b), network.find_edge(b, a));
    }

    #[test]
    fn neighbors_lists_outgoing_edges_only() {
        let mut network = Network::new();
        let a = network.add_node("A");
        let b = network.add_node("B");
        let c = network.add_node("C");
        let ab = network.add_edge(a, b, 1.0, None).unwrap();
        let ac = network.add_edge(a, c, 2.0, None).unwrap();
        network.add_edge(b, c, 3.0, None).unwrap();

        let out: Vec<_> = network.neighbors(a).collect();
        assert_eq!(out, vec![(b, ab), (c, ac)]);
        assert_eq!(network.neighbors(c).count(), 0);
    }
}
