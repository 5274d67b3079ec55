//! Least-cost delivery routing over logistics networks whose edge costs vary
//! with query-time conditions (closures, weather, tolls).
//!
//! The base [`Network`] is immutable and shared; each planning request brings
//! its own [`Conditions`] set, runs [`shortest_paths`], and reconstructs
//! routes from the result. Conditions never mutate the network.

pub mod conditions;
pub mod cost;
pub mod dijkstra;
pub mod error;
pub mod network;
pub mod parse;
pub mod route;

pub use conditions::{Condition, Conditions, WeatherScope};
pub use cost::{resolve, Diagnostics, EdgeCost, ResolvedCost};
pub use dijkstra::{shortest_paths, NodeCost, ShortestPaths};
pub use error::{Error, Result};
pub use network::{Edge, EdgeId, Network, NodeId};
pub use route::{reconstruct, summarize_all, Route, RouteSummary};
