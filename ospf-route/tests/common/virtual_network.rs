use std::collections::BTreeMap;
use std::net::Ipv4Addr;
use std::sync::Arc;

use ospf_route::concepts::lsa::{
    LinkStateDb, LinkType, NetworkLsa, RouterLink, RouterLsa, SharedLsdb,
};
use ospf_route::framework::{
    InterfaceId, LinkStateSource, Metric, RouterConfig, RouterId, RoutingSystem,
};
use ospf_route::router::{Router, INF};
use ospf_route::spf::ShortestPaths;
use ospf_route::topology::Topology;
use ospf_route::util::sum_inf;

use crate::common::faulty_kernel::FaultyKernel;

pub struct VirtualSystem {}

impl RoutingSystem for VirtualSystem {
    type Database = Arc<SharedLsdb>;
    type Kernel = FaultyKernel;
}

/// Router `n` is 10.0.0.n
pub fn rid(n: u8) -> RouterId {
    Ipv4Addr::new(10, 0, 0, n)
}

/// Router `node`'s address on point-to-point link `link` is 192.168.link.node
pub fn itf(link: u8, node: u8) -> Ipv4Addr {
    Ipv4Addr::new(192, 168, link, node)
}

pub fn net(link: u8) -> Ipv4Addr {
    Ipv4Addr::new(192, 168, link, 0)
}

pub fn ifindex(link: u8) -> InterfaceId {
    100 + link as InterfaceId
}

pub fn p2p(neighbour: RouterId, local_addr: Ipv4Addr, metric: Metric) -> RouterLink {
    RouterLink {
        link_type: LinkType::PointToPoint,
        link_id: neighbour,
        link_data: local_addr,
        metric,
    }
}

pub fn transit(dr_addr: Ipv4Addr, local_addr: Ipv4Addr, metric: Metric) -> RouterLink {
    RouterLink {
        link_type: LinkType::Transit,
        link_id: dr_addr,
        link_data: local_addr,
        metric,
    }
}

pub fn stub(network: Ipv4Addr, metric: Metric) -> RouterLink {
    RouterLink {
        link_type: LinkType::Stub,
        link_id: network,
        link_data: Ipv4Addr::new(255, 255, 255, 0),
        metric,
    }
}

pub fn router_lsa(id: RouterId, links: Vec<RouterLink>) -> RouterLsa {
    RouterLsa {
        advertising_router: id,
        links,
    }
}

pub fn network_lsa(dr_addr: Ipv4Addr, dr: RouterId, attached: &[RouterId]) -> NetworkLsa {
    NetworkLsa {
        link_state_id: dr_addr,
        advertising_router: dr,
        attached_routers: attached.to_vec(),
    }
}

/// A set of routers joined by point-to-point links, described through a shared LSDB
pub struct VirtualNetwork {
    pub lsdb: Arc<SharedLsdb>,
    pub nodes: Vec<u8>,
    pub links: Vec<(u8, u8, u8, Metric)>,
}

impl VirtualNetwork {
    /// `links` are (link id, a, b, metric). Only routers listed in `nodes` originate an LSA,
    /// links towards other routers are still advertised by the listed end.
    pub fn create(nodes: &[u8], links: &[(u8, u8, u8, Metric)]) -> VirtualNetwork {
        let network = VirtualNetwork {
            lsdb: Arc::new(SharedLsdb::default()),
            nodes: nodes.to_vec(),
            links: links.to_vec(),
        };
        network.readvertise();
        network
    }

    fn lsa_for(&self, node: u8) -> RouterLsa {
        let mut out = Vec::new();
        for (lid, a, b, metric) in &self.links {
            if *a == node || *b == node {
                let neigh = if *a == node { *b } else { *a };
                out.push(p2p(rid(neigh), itf(*lid, node), *metric));
                out.push(stub(net(*lid), *metric));
            }
        }
        router_lsa(rid(node), out)
    }

    fn readvertise(&self) {
        for node in &self.nodes {
            self.lsdb.install_router_lsa(self.lsa_for(*node));
        }
    }

    pub fn update_edge(&mut self, link: u8, metric: Metric) {
        for entry in &mut self.links {
            if entry.0 == link {
                entry.3 = metric;
            }
        }
        self.readvertise();
    }

    pub fn remove_edge(&mut self, link: u8) {
        self.links.retain(|entry| entry.0 != link);
        self.readvertise();
    }

    pub fn db(&self) -> LinkStateDb {
        self.lsdb.snapshot()
    }

    pub fn config_for(&self, node: u8) -> RouterConfig {
        let mut config = RouterConfig::new(rid(node));
        for (lid, a, b, _) in &self.links {
            if *a == node || *b == node {
                config = config.with_interface(itf(*lid, node), ifindex(*lid));
            }
        }
        config
    }

    pub fn topology(&self) -> Topology {
        let (topology, warnings) = Topology::build(&self.db());
        assert!(warnings.is_empty(), "unexpected warnings {warnings:?}");
        topology
    }

    pub fn paths_from(&self, node: u8) -> ShortestPaths {
        ShortestPaths::compute(&self.topology(), &self.config_for(node))
            .expect("topology is not empty")
    }

    pub fn router(&self, node: u8) -> (Router<VirtualSystem>, FaultyKernel) {
        let kernel = FaultyKernel::new();
        let router = Router::new(self.config_for(node), self.lsdb.clone(), kernel.clone());
        (router, kernel)
    }

    pub fn get_next_hop(&self, cur: u8, dest: u8) -> Ipv4Addr {
        let paths = self.paths_from(cur);
        let record = paths
            .get(&rid(dest))
            .unwrap_or_else(|| panic!("No path found from {cur} to {dest}"));
        record.next_hop.unwrap_or_else(|| panic!("No next hop from {cur} to {dest}"))
    }

    pub fn get_metric_to(&self, cur: u8, dest: u8) -> Metric {
        self.paths_from(cur)
            .get(&rid(dest))
            .map(|record| record.total_metric)
            .unwrap_or(INF)
    }
}

/// Bellman-Ford over the topology edges, used as a reference for the SPF results
pub fn reference_distances(topology: &Topology, root: RouterId) -> BTreeMap<RouterId, Metric> {
    let mut dist: BTreeMap<RouterId, Metric> =
        topology.vertices().map(|v| (v.router_id, INF)).collect();
    dist.insert(root, 0);
    for _ in 0..topology.len() {
        let mut changed = false;
        for vertex in topology.vertices() {
            let from = dist.get(&vertex.router_id).copied().unwrap_or(INF);
            if from == INF {
                continue;
            }
            for edge in vertex.edges() {
                if !topology.contains(&edge.target) {
                    continue;
                }
                let candidate = sum_inf(from, edge.metric);
                let slot = dist.entry(edge.target).or_insert(INF);
                if candidate < *slot {
                    *slot = candidate;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    dist
}
