use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::net::Ipv4Addr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::framework::{Metric, RouterId};

/// A directed link from a vertex towards one of its neighbours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    /// the interface address the owning router uses on this link
    pub source_addr: Ipv4Addr,
    pub metric: Metric,
    /// id of the neighbouring vertex, resolved through the topology
    pub target: RouterId,
}

#[cfg_attr(feature = "serde", serde_with::serde_as)]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    pub router_id: RouterId,
    /// Neighbour id, Edge
    #[cfg_attr(feature = "serde", serde_as(as = "Vec<(_, _)>"))]
    pub adjacencies: HashMap<RouterId, Edge>,
}

impl Vertex {
    pub fn new(router_id: RouterId) -> Self {
        Self {
            router_id,
            adjacencies: HashMap::new(),
        }
    }

    /// Adds an edge, overwriting any existing edge to the same neighbour
    pub fn connect(&mut self, edge: Edge) {
        self.adjacencies.insert(edge.target, edge);
    }

    pub fn edge_to(&self, target: &RouterId) -> Option<&Edge> {
        self.adjacencies.get(target)
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.adjacencies.values()
    }

    pub fn degree(&self) -> usize {
        self.adjacencies.len()
    }
}

impl Display for Vertex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Vertex: [{:<15}]", self.router_id.to_string())?;
        let mut edges: Vec<&Edge> = self.edges().collect();
        edges.sort_by_key(|e| e.target);
        for edge in edges {
            writeln!(
                f,
                "\t[{:<15}]----{:02}---->[{:<15}]",
                edge.source_addr.to_string(),
                edge.metric,
                edge.target.to_string()
            )?;
        }
        Ok(())
    }
}
