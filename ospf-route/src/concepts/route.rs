use std::fmt::{Display, Formatter};
use std::net::Ipv4Addr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::framework::Metric;
use crate::util::NETWORK_MASK;

/// Where a route was learned from. Only intra-area routes are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum RouteType {
    #[default]
    IntraArea,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RouteEntry {
    /// the destination network, already masked
    pub destination: Ipv4Addr,
    pub mask: Ipv4Addr,
    /// the gateway on the first hop towards the destination
    pub next_hop: Ipv4Addr,
    /// total cost of the path to the router owning the destination network
    pub metric: Metric,
    pub route_type: RouteType,
}

impl RouteEntry {
    pub fn new(destination: Ipv4Addr, next_hop: Ipv4Addr, metric: Metric) -> Self {
        Self {
            destination,
            mask: NETWORK_MASK,
            next_hop,
            metric,
            route_type: RouteType::IntraArea,
        }
    }

    /// Whether this entry should replace `other` for the same destination.
    /// Ties on metric go to the lower gateway so the outcome never depends on visiting order.
    pub fn is_better_than(&self, other: &RouteEntry) -> bool {
        (self.metric, self.next_hop) < (other.metric, other.next_hop)
    }
}

impl Display for RouteEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "| {:<15} | {:<15} | {:<15} |   {:02}   |",
            self.destination.to_string(),
            self.mask.to_string(),
            self.next_hop.to_string(),
            self.metric
        )
    }
}

/// A route as programmed into the operating system, carrying what is needed to remove it again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KernelRoute {
    pub destination: Ipv4Addr,
    pub mask: Ipv4Addr,
    pub gateway: Ipv4Addr,
    pub metric: Metric,
}

impl From<&RouteEntry> for KernelRoute {
    fn from(entry: &RouteEntry) -> Self {
        Self {
            destination: entry.destination,
            mask: entry.mask,
            gateway: entry.next_hop,
            metric: entry.metric,
        }
    }
}

impl Display for KernelRoute {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} via {} metric {}",
            self.destination,
            u32::from(self.mask).count_ones(),
            self.gateway,
            self.metric
        )
    }
}
