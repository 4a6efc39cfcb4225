use std::net::Ipv4Addr;

use ospf_route::concepts::lsa::LinkStateDb;

use crate::common::virtual_network::{
    network_lsa, p2p, rid, router_lsa, stub, transit, VirtualNetwork,
};

pub fn vnet_simple_weighted() -> VirtualNetwork {
    VirtualNetwork::create(
        &[1, 2, 3, 4, 5],
        &[
            (0, 1, 2, 2),
            (1, 1, 3, 1),
            (2, 2, 3, 4),
            (3, 2, 4, 5),
            (4, 3, 4, 100),
            (5, 3, 5, 8),
            (6, 4, 5, 1),
        ],
    )
}

/// Router 6 never originates an LSA, 4 and 5 still advertise links towards it
pub fn vnet_fragile_network() -> VirtualNetwork {
    VirtualNetwork::create(
        &[1, 2, 3, 4, 5],
        &[
            (0, 1, 2, 1),
            (1, 1, 3, 1),
            (2, 2, 3, 1),
            (3, 1, 4, 10),
            (4, 5, 4, 1),
            (5, 6, 4, 1),
            (6, 6, 5, 1),
        ],
    )
}

/// 1 -- 2 -- 4, 1 -- 3. Router 4 only advertises a stub, so it has no outgoing edges.
/// 4 is finalized before 3.
pub fn vnet_dead_end() -> VirtualNetwork {
    let network = VirtualNetwork::create(&[1, 2, 3], &[(0, 1, 2, 1), (1, 1, 3, 5), (2, 2, 4, 1)]);
    network
        .lsdb
        .install_router_lsa(router_lsa(rid(4), vec![stub(Ipv4Addr::new(10, 40, 0, 0), 1)]));
    network
}

/// Two routers each reachable only from one side
pub fn vnet_islands() -> VirtualNetwork {
    VirtualNetwork::create(&[1, 2, 8, 9], &[(0, 1, 2, 3), (9, 8, 9, 1)])
}

pub const SHARED_DR: Ipv4Addr = Ipv4Addr::new(172, 16, 0, 1);

/// 1, 2 and 3 on one broadcast segment 172.16.0.0/24, 1 is the designated router.
/// 3 also has a point-to-point link to 4.
pub fn lsdb_shared_segment() -> LinkStateDb {
    LinkStateDb {
        routers: vec![
            router_lsa(rid(1), vec![transit(SHARED_DR, SHARED_DR, 10)]),
            router_lsa(rid(2), vec![transit(SHARED_DR, Ipv4Addr::new(172, 16, 0, 2), 10)]),
            router_lsa(
                rid(3),
                vec![
                    transit(SHARED_DR, Ipv4Addr::new(172, 16, 0, 3), 10),
                    p2p(rid(4), Ipv4Addr::new(192, 168, 34, 3), 2),
                ],
            ),
            router_lsa(rid(4), vec![p2p(rid(3), Ipv4Addr::new(192, 168, 34, 4), 2)]),
        ],
        networks: vec![network_lsa(SHARED_DR, rid(1), &[rid(1), rid(2), rid(3)])],
    }
}

/// 1 reaches 2 at cost 5 and 3 at cost 3; 2 and 3 share the link 192.168.23.0/24
pub fn vnet_shared_destination() -> VirtualNetwork {
    VirtualNetwork::create(&[1, 2, 3], &[(12, 1, 2, 5), (13, 1, 3, 3), (23, 2, 3, 7)])
}
