//! Effective edge cost under active conditions.
//!
//! The resolver folds an edge's conditions into a single traversal cost with
//! a fixed combination rule, independent of the order conditions were
//! attached in:
//!
//! 1. Any closure makes the edge impassable; nothing else matters.
//! 2. Weather multipliers (edge-scoped and network-wide alike) compound
//!    multiplicatively on the base weight.
//! 3. The toll cost is the base edge toll, unless one or more overrides
//!    apply, in which case the largest override wins. The toll is added to
//!    the weighted travel cost: travel weight and toll currency are
//!    deliberately merged into one scalar, the same trade-off a dispatcher
//!    makes between a slow free road and a fast toll road. Both components
//!    are still tracked separately for reporting.
//!
//! Unrecognized condition kinds are skipped, never fatal. They are recorded
//! in [`Diagnostics`] so the caller can log them; a forward-compatible
//! condition feed must not abort route planning.

use crate::conditions::{Condition, Conditions};
use crate::error::{Error, Result};
use crate::network::{EdgeId, Network};

/// Cost of traversing one edge, split for reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeCost {
    /// Weather-adjusted travel weight.
    pub travel: f64,
    /// Toll surcharge, zero when no toll applies.
    pub toll: f64,
}

impl EdgeCost {
    /// The single scalar the search minimizes.
    pub fn total(&self) -> f64 {
        self.travel + self.toll
    }
}

/// Outcome of resolving one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedCost {
    Passable(EdgeCost),
    /// Closed for this request; treated by the search as if the edge were absent.
    Impassable,
}

/// Side channel for non-fatal resolution events.
///
/// Accumulated across a whole search and handed back with the result; the
/// resolver itself never logs.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    skipped: Vec<(EdgeId, String)>,
}

impl Diagnostics {
    /// Unrecognized conditions that were skipped, as (edge, kind) pairs.
    pub fn skipped(&self) -> &[(EdgeId, String)] {
        &self.skipped
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    fn note_skipped(&mut self, edge: EdgeId, kind: &str) {
        self.skipped.push((edge, kind.to_string()));
    }
}

/// Resolve the effective traversal cost of an edge under a condition set.
///
/// Fails with [`Error::InvalidCost`] when a condition would produce a
/// negative or non-finite cost (a zero or negative weather multiplier, a
/// negative toll override). Those break the non-negative-weight assumption
/// of the search and must surface to the caller, not get clamped away.
pub fn resolve(
    network: &Network,
    edge_id: EdgeId,
    conditions: &Conditions,
    diagnostics: &mut Diagnostics,
) -> Result<ResolvedCost> {
    let edge = network.edge(edge_id);
    let invalid = |reason: String| Error::InvalidCost {
        from: network.node_name(edge.from).to_string(),
        to: network.node_name(edge.to).to_string(),
        reason,
    };

    let mut multiplier = 1.0;
    let mut toll_override: Option<f64> = None;

    for condition in conditions.for_edge(edge_id) {
        match condition {
            Condition::Closure => return Ok(ResolvedCost::Impassable),
            Condition::Weather { multiplier: m } => {
                if !m.is_finite() || *m <= 0.0 {
                    return Err(invalid(format!(
                        "weather multiplier {m} must be finite and positive"
                    )));
                }
                multiplier *= m;
            }
            Condition::TollOverride { cost } => {
                if !cost.is_finite() || *cost < 0.0 {
                    return Err(invalid(format!(
                        "toll override {cost} must be finite and non-negative"
                    )));
                }
                toll_override = Some(toll_override.map_or(*cost, |prev: f64| prev.max(*cost)));
            }
            Condition::Unrecognized { kind } => diagnostics.note_skipped(edge_id, kind),
        }
    }

    let cost = EdgeCost {
        travel: edge.weight * multiplier,
        toll: toll_override.or(edge.toll).unwrap_or(0.0),
    };
    if !cost.total().is_finite() {
        return Err(invalid("effective cost overflowed".to_string()));
    }
    Ok(ResolvedCost::Passable(cost))
}
