use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use log::{debug, trace};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::concepts::path::PathRecord;
use crate::feedback::RoutingWarning;
use crate::framework::{RouterConfig, RouterId};
use crate::topology::Topology;
use crate::util::sum_inf;

/// Finalized shortest paths from the local router, keyed by target router
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShortestPaths {
    root: RouterId,
    paths: BTreeMap<RouterId, PathRecord>,
    /// vertices of the topology that no path reaches
    unreachable: Vec<RouterId>,
}

impl ShortestPaths {
    /// A result containing nothing but the local router itself
    pub fn local_only(root: RouterId) -> Self {
        Self {
            root,
            paths: BTreeMap::from([(root, PathRecord::local(root))]),
            unreachable: Vec::new(),
        }
    }

    /// Runs the shortest-path search over `topology`, rooted at `config.router_id`.
    ///
    /// The first hop towards a neighbour of the local router is that neighbour's own
    /// interface on the link back to us, so a neighbour that does not advertise the
    /// reverse link cannot be used as a first hop. Every other vertex inherits the
    /// first hop of its predecessor on the tree.
    pub fn compute(topology: &Topology, config: &RouterConfig) -> Result<Self, RoutingWarning> {
        if topology.is_empty() {
            return Err(RoutingWarning::EmptyTopology);
        }
        let root = config.router_id;
        let mut result = Self::local_only(root);

        let mut pending: BTreeMap<RouterId, PathRecord> = topology
            .vertices()
            .filter(|v| v.router_id != root)
            .map(|v| (v.router_id, PathRecord::unreached(v.router_id)))
            .collect();

        let mut frontier = PathRecord::local(root);
        loop {
            // a vertex without outgoing edges simply ends its own branch
            if let Some(vertex) = topology.vertex(&frontier.target) {
                for edge in vertex.edges() {
                    let Some(candidate) = pending.get_mut(&edge.target) else {
                        continue;
                    };
                    let metric = sum_inf(frontier.total_metric, edge.metric);
                    if metric >= candidate.total_metric {
                        continue;
                    }
                    if frontier.target == root {
                        let Some(back) = topology.edge(&edge.target, &root) else {
                            trace!(
                                "{} does not advertise a link back to {root}, \
                                 not usable as a first hop",
                                edge.target
                            );
                            continue;
                        };
                        candidate.next_hop = Some(back.source_addr);
                        candidate.out_interface = config.interface_for(&edge.source_addr);
                    } else {
                        candidate.next_hop = frontier.next_hop;
                        candidate.out_interface = frontier.out_interface;
                    }
                    candidate.total_metric = metric;
                }
            }

            // linear scan, ties go to the lowest router id
            let mut next: Option<&PathRecord> = None;
            for record in pending.values() {
                if record.is_reachable()
                    && next.map_or(true, |best| record.total_metric < best.total_metric)
                {
                    next = Some(record);
                }
            }
            let Some(next) = next.map(|r| r.target) else {
                break;
            };
            let Some(record) = pending.remove(&next) else {
                break;
            };
            result.paths.insert(next, record);
            frontier = record;
        }

        result.unreachable = pending.into_keys().collect();
        debug!(
            "Computed {} paths from {root}, {} routers unreachable",
            result.paths.len(),
            result.unreachable.len()
        );
        Ok(result)
    }

    pub fn root(&self) -> RouterId {
        self.root
    }

    pub fn get(&self, target: &RouterId) -> Option<&PathRecord> {
        self.paths.get(target)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathRecord> {
        self.paths.values()
    }

    pub fn unreachable(&self) -> &[RouterId] {
        &self.unreachable
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Display for ShortestPaths {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "============Path Information============")?;
        for record in self.paths.values() {
            writeln!(f, "{record}")?;
        }
        write!(f, "========================================")
    }
}
