//! Query-time road conditions layered over the base network.
//!
//! A condition set belongs to a single planning request. It never mutates the
//! network it is applied to; the same network can serve any number of
//! concurrent requests, each with its own conditions.

use crate::network::{EdgeId, Network, NodeId};
use rustc_hash::FxHashMap;

/// A single modifier affecting edge traversal.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Road closed. The edge drops out of consideration entirely and any
    /// other modifier on it is irrelevant.
    Closure,
    /// Weather slowdown. Multiplies the base weight; several on one edge
    /// compound multiplicatively (rain on top of fog).
    Weather { multiplier: f64 },
    /// Toll activation or cost change. Replaces the edge's base toll cost.
    TollOverride { cost: f64 },
    /// A condition kind this build does not understand, preserved from input
    /// so the resolver can report it instead of the parser dropping it.
    Unrecognized { kind: String },
}

/// Scope of a weather condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherScope {
    /// Applies to every edge in the network.
    Network,
    /// Applies to one edge.
    Edge(EdgeId),
}

/// The set of conditions active for one planning request.
///
/// Conditions attach either to a specific edge or to the whole network.
/// Attachment order is irrelevant: the cost resolver combines them with a
/// fixed rule (closure dominates, weather multiplies, largest toll override
/// wins), so any insertion order resolves to the same effective cost.
#[derive(Debug, Clone, Default)]
pub struct Conditions {
    per_edge: FxHashMap<EdgeId, Vec<Condition>>,
    network_wide: Vec<Condition>,
}

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an edge closed.
    pub fn with_closure(mut self, edge: EdgeId) -> Self {
        self.attach(Some(edge), Condition::Closure);
        self
    }

    /// Close a node: every edge into or out of it becomes impassable.
    pub fn with_closed_node(mut self, network: &Network, node: NodeId) -> Self {
        self.close_node(network, node);
        self
    }

    /// Borrowing form of [`with_closed_node`](Self::with_closed_node).
    pub fn close_node(&mut self, network: &Network, node: NodeId) {
        for (id, edge) in network.edges() {
            if edge.from == node || edge.to == node {
                self.attach(Some(id), Condition::Closure);
            }
        }
    }

    /// Apply a weather slowdown to one edge or to the whole network.
    pub fn with_weather(mut self, scope: WeatherScope, multiplier: f64) -> Self {
        let target = match scope {
            WeatherScope::Network => None,
            WeatherScope::Edge(edge) => Some(edge),
        };
        self.attach(target, Condition::Weather { multiplier });
        self
    }

    /// Activate (or re-price) a toll on an edge.
    pub fn with_toll(mut self, edge: EdgeId, cost: f64) -> Self {
        self.attach(Some(edge), Condition::TollOverride { cost });
        self
    }

    /// Attach an already-built condition; `None` scope means network-wide.
    /// Entry point for the file loader.
    pub fn attach(&mut self, edge: Option<EdgeId>, condition: Condition) {
        match edge {
            Some(edge) => self.per_edge.entry(edge).or_default().push(condition),
            None => self.network_wide.push(condition),
        }
    }

    /// Conditions affecting an edge: edge-scoped first, then network-wide.
    pub fn for_edge(&self, edge: EdgeId) -> impl Iterator<Item = &Condition> {
        self.per_edge
            .get(&edge)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .chain(self.network_wide.iter())
    }

    /// Total number of attached conditions.
    pub fn len(&self) -> usize {
        self.per_edge.values().map(Vec::len).sum::<usize>() + self.network_wide.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
