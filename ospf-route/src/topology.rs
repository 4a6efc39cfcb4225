use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use log::{debug, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::concepts::graph::{Edge, Vertex};
use crate::concepts::lsa::{LinkStateDb, LinkType};
use crate::feedback::RoutingWarning;
use crate::framework::RouterId;

/// The forwarding graph: every vertex keyed by router id.
///
/// Edges only name their target, the vertex itself is looked up here.
/// An edge may point at a router that never advertised anything, such a target is not traversable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Topology {
    vertices: BTreeMap<RouterId, Vertex>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a fresh graph from a database snapshot
    pub fn build(lsdb: &LinkStateDb) -> (Self, Vec<RoutingWarning>) {
        let mut topology = Self::new();
        let warnings = topology.rebuild(lsdb);
        (topology, warnings)
    }

    /// Discards the current graph and rebuilds it from `lsdb`.
    ///
    /// Returns the links that had to be skipped.
    pub fn rebuild(&mut self, lsdb: &LinkStateDb) -> Vec<RoutingWarning> {
        self.vertices.clear();
        let mut warnings = Vec::new();

        for lsa in &lsdb.routers {
            let source_id = lsa.advertising_router;
            let vertex = self
                .vertices
                .entry(source_id)
                .or_insert_with(|| Vertex::new(source_id));

            // edges go outwards only, the reverse direction comes from the neighbour's own LSA
            for link in &lsa.links {
                match link.link_type {
                    LinkType::PointToPoint => {
                        vertex.connect(Edge {
                            source_addr: link.link_data,
                            metric: link.metric,
                            target: link.link_id,
                        });
                    }
                    LinkType::Transit => {
                        let Some(network) = lsdb.network_lsa(&link.link_id) else {
                            let warning = RoutingWarning::Lookup {
                                advertising_router: source_id,
                                link_id: link.link_id,
                            };
                            warn!("{warning}, skipping link");
                            warnings.push(warning);
                            continue;
                        };
                        for target in &network.attached_routers {
                            if *target == source_id {
                                continue;
                            }
                            vertex.connect(Edge {
                                source_addr: link.link_data,
                                metric: link.metric,
                                target: *target,
                            });
                        }
                    }
                    LinkType::Stub | LinkType::Virtual => {}
                }
            }
        }

        debug!(
            "Built topology with {} vertices and {} edges",
            self.vertices.len(),
            self.edge_count()
        );
        warnings
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn vertex(&self, id: &RouterId) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    /// The edge from `from` towards `to`, if `from` advertised one
    pub fn edge(&self, from: &RouterId, to: &RouterId) -> Option<&Edge> {
        self.vertices.get(from)?.edge_to(to)
    }

    pub fn contains(&self, id: &RouterId) -> bool {
        self.vertices.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.vertices.values().map(Vertex::degree).sum()
    }
}

impl Display for Topology {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "============Topo Information============")?;
        for vertex in self.vertices.values() {
            write!(f, "{vertex}")?;
        }
        write!(f, "========================================")
    }
}
