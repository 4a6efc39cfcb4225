use std::fmt::{Display, Formatter};
use std::net::Ipv4Addr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::framework::{InterfaceId, Metric, RouterId};
use crate::router::INF;

/// The best known way of reaching one router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathRecord {
    pub target: RouterId,
    /// total cost from the local router, INF while unreached
    pub total_metric: Metric,
    /// the neighbour's address packets are forwarded to, None for the local router
    pub next_hop: Option<Ipv4Addr>,
    /// the local interface facing `next_hop`, if the interface table knows it
    pub out_interface: Option<InterfaceId>,
}

impl PathRecord {
    pub fn unreached(target: RouterId) -> Self {
        Self {
            target,
            total_metric: INF,
            next_hop: None,
            out_interface: None,
        }
    }

    pub fn local(target: RouterId) -> Self {
        Self {
            target,
            total_metric: 0,
            next_hop: None,
            out_interface: None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.total_metric != INF
    }
}

impl Display for PathRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "to [{:<15}]: {:02} ", self.target.to_string(), self.total_metric)?;
        match (self.next_hop, self.out_interface) {
            (Some(nh), Some(itf)) => write!(f, "{:<15} dev {itf}", nh.to_string()),
            (Some(nh), None) => write!(f, "{:<15}", nh.to_string()),
            _ => write!(f, "{:<15}", "-"),
        }
    }
}
