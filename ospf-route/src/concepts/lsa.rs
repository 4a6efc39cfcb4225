use std::net::Ipv4Addr;

use parking_lot::RwLock;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::framework::{LinkStateSource, Metric, RouterId};

/// The kind of connection a router-LSA link describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum LinkType {
    /// `link_id` is the neighbouring router's id
    PointToPoint,
    /// `link_id` is the designated router's interface address on a shared network
    Transit,
    /// `link_id` is a network number, there is no neighbour
    Stub,
    Virtual,
}

impl TryFrom<u8> for LinkType {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(LinkType::PointToPoint),
            2 => Ok(LinkType::Transit),
            3 => Ok(LinkType::Stub),
            4 => Ok(LinkType::Virtual),
            other => Err(other),
        }
    }
}

/// One link descriptor within a router-LSA
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RouterLink {
    pub link_type: LinkType,
    pub link_id: Ipv4Addr,
    /// the advertising router's own interface address on this link
    pub link_data: Ipv4Addr,
    pub metric: Metric,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RouterLsa {
    pub advertising_router: RouterId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub links: Vec<RouterLink>,
}

/// Lists every router attached to a shared network, originated by its designated router
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NetworkLsa {
    /// the designated router's interface address, referenced by transit links
    pub link_state_id: Ipv4Addr,
    pub advertising_router: RouterId,
    pub attached_routers: Vec<RouterId>,
}

/// A point-in-time copy of the link-state database
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkStateDb {
    #[cfg_attr(feature = "serde", serde(default))]
    pub routers: Vec<RouterLsa>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub networks: Vec<NetworkLsa>,
}

impl LinkStateDb {
    pub fn network_lsa(&self, link_id: &Ipv4Addr) -> Option<&NetworkLsa> {
        self.networks.iter().find(|lsa| lsa.link_state_id == *link_id)
    }

    pub fn router_lsa(&self, router: &RouterId) -> Option<&RouterLsa> {
        self.routers.iter().find(|lsa| lsa.advertising_router == *router)
    }
}

impl LinkStateSource for LinkStateDb {
    fn snapshot(&self) -> LinkStateDb {
        self.clone()
    }
}

/// The live database as maintained by flooding.
///
/// Router and network LSAs sit behind separate locks. Readers that need both
/// always take the router lock first.
#[derive(Default)]
pub struct SharedLsdb {
    routers: RwLock<Vec<RouterLsa>>,
    networks: RwLock<Vec<NetworkLsa>>,
}

impl SharedLsdb {
    pub fn new(db: LinkStateDb) -> Self {
        Self {
            routers: RwLock::new(db.routers),
            networks: RwLock::new(db.networks),
        }
    }

    /// Installs a router-LSA, replacing any previous one from the same advertising router
    pub fn install_router_lsa(&self, lsa: RouterLsa) {
        let mut routers = self.routers.write();
        if let Some(existing) = routers
            .iter_mut()
            .find(|r| r.advertising_router == lsa.advertising_router)
        {
            *existing = lsa;
        } else {
            routers.push(lsa);
        }
    }

    /// Installs a network-LSA, replacing any previous one with the same link state id
    pub fn install_network_lsa(&self, lsa: NetworkLsa) {
        let mut networks = self.networks.write();
        if let Some(existing) = networks
            .iter_mut()
            .find(|n| n.link_state_id == lsa.link_state_id)
        {
            *existing = lsa;
        } else {
            networks.push(lsa);
        }
    }

    pub fn remove_router_lsa(&self, router: &RouterId) -> Option<RouterLsa> {
        let mut routers = self.routers.write();
        let pos = routers.iter().position(|r| r.advertising_router == *router)?;
        Some(routers.remove(pos))
    }

    pub fn remove_network_lsa(&self, link_state_id: &Ipv4Addr) -> Option<NetworkLsa> {
        let mut networks = self.networks.write();
        let pos = networks.iter().position(|n| n.link_state_id == *link_state_id)?;
        Some(networks.remove(pos))
    }

    /// Replaces the whole database contents
    pub fn replace(&self, db: LinkStateDb) {
        let mut routers = self.routers.write();
        let mut networks = self.networks.write();
        *routers = db.routers;
        *networks = db.networks;
    }
}

impl LinkStateSource for SharedLsdb {
    fn snapshot(&self) -> LinkStateDb {
        let routers = self.routers.read();
        let networks = self.networks.read();
        LinkStateDb {
            routers: routers.clone(),
            networks: networks.clone(),
        }
    }
}
