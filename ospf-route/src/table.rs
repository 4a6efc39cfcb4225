use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt::{Display, Formatter};
use std::net::Ipv4Addr;

use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::concepts::route::RouteEntry;
use crate::spf::ShortestPaths;
use crate::topology::Topology;
use crate::util::network_of;

/// Destination network -> best route, recomputed from scratch every cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoutingTable {
    routes: BTreeMap<Ipv4Addr, RouteEntry>,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives one route per destination network.
    ///
    /// Every interface of every reached router is a candidate destination; when two
    /// candidates land on the same network the cheaper one is kept.
    pub fn generate(paths: &ShortestPaths, topology: &Topology) -> Self {
        let mut table = Self::new();
        for record in paths.iter() {
            // we don't need a route to ourselves
            if record.target == paths.root() {
                continue;
            }
            let Some(next_hop) = record.next_hop else {
                continue;
            };
            let Some(vertex) = topology.vertex(&record.target) else {
                continue;
            };
            for edge in vertex.edges() {
                let destination = network_of(edge.source_addr);
                table.offer(RouteEntry::new(destination, next_hop, record.total_metric));
            }
        }
        debug!("Generated {} routes", table.routes.len());
        table
    }

    /// Inserts `route` unless an equal or better route to the same destination already exists
    pub fn offer(&mut self, route: RouteEntry) {
        match self.routes.entry(route.destination) {
            Entry::Vacant(slot) => {
                slot.insert(route);
            }
            Entry::Occupied(mut slot) => {
                if route.is_better_than(slot.get()) {
                    slot.insert(route);
                }
            }
        }
    }

    pub fn get(&self, destination: &Ipv4Addr) -> Option<&RouteEntry> {
        self.routes.get(destination)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry> {
        self.routes.values()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Display for RoutingTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "============Table Information============")?;
        writeln!(f, "| dest_ip | net_mask | next_hop | metric |")?;
        for route in self.routes.values() {
            writeln!(f, "{route}")?;
        }
        write!(f, "=========================================")
    }
}
