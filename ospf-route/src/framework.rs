use std::collections::BTreeMap;
use std::io;
use std::net::Ipv4Addr;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::concepts::lsa::LinkStateDb;
use crate::concepts::route::KernelRoute;

/// A router identifier, conventionally written as a dotted quad
pub type RouterId = Ipv4Addr;
/// Stable identifier of a local outgoing interface (an OS ifindex)
pub type InterfaceId = u32;
/// Link cost. Lower is better.
pub type Metric = u32;

pub trait RoutingSystem {
    /// The link-state database owned by the flooding subsystem
    type Database: LinkStateSource;
    /// The forwarding table that computed routes are written into
    type Kernel: ForwardingTable;
}

/// Something that can hand out a consistent copy of the link-state database.
///
/// Implementations must hold their locks only for the duration of the copy;
/// the returned value is independent of the live database.
pub trait LinkStateSource {
    fn snapshot(&self) -> LinkStateDb;
}

impl<S: LinkStateSource + ?Sized> LinkStateSource for Arc<S> {
    fn snapshot(&self) -> LinkStateDb {
        (**self).snapshot()
    }
}

/// The operating system's packet forwarding table.
///
/// Each call is a single, blocking programming request. Failures are returned
/// as-is, the caller decides whether they are fatal.
pub trait ForwardingTable {
    fn add_route(&mut self, route: &KernelRoute) -> io::Result<()>;
    fn delete_route(&mut self, route: &KernelRoute) -> io::Result<()>;
}

/// Local router parameters supplied by the interface configuration layer
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RouterConfig {
    /// The identifier of this router
    pub router_id: RouterId,
    /// Local interface address -> outgoing interface
    #[cfg_attr(feature = "serde", serde(default))]
    pub interfaces: BTreeMap<Ipv4Addr, InterfaceId>,
}

impl RouterConfig {
    pub fn new(router_id: RouterId) -> Self {
        Self {
            router_id,
            interfaces: BTreeMap::new(),
        }
    }

    pub fn with_interface(mut self, addr: Ipv4Addr, itf: InterfaceId) -> Self {
        self.interfaces.insert(addr, itf);
        self
    }

    pub fn interface_for(&self, addr: &Ipv4Addr) -> Option<InterfaceId> {
        self.interfaces.get(addr).copied()
    }
}
