use std::fmt::{Display, Formatter};
use std::io;
use std::net::Ipv4Addr;

use thiserror::Error;

use crate::concepts::route::KernelRoute;
use crate::framework::RouterId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelOp {
    Add,
    Delete,
}

impl Display for KernelOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelOp::Add => write!(f, "add"),
            KernelOp::Delete => write!(f, "delete"),
        }
    }
}

/// Failures talking to the operating system
#[derive(Error, Debug)]
pub enum RoutingError {
    /// No route can ever be programmed without this socket
    #[error("Failed to open the kernel routing socket: {source}")]
    SocketInit {
        #[source]
        source: io::Error,
    },
    /// A single add/delete request was refused. The entry is retried on the next full cycle.
    #[error("Failed to {op} kernel route {route}: {source}")]
    KernelProgramming {
        op: KernelOp,
        route: KernelRoute,
        #[source]
        source: io::Error,
    },
}

/// Although this is an error enum, these should be treated as warnings.
/// The computation carries on with whatever it could still produce.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingWarning {
    /// A transit link references a network-LSA that is not in the database.
    /// The link is skipped, the rest of the topology is still built.
    #[error(
        "Router {advertising_router} has a transit link to {link_id}, \
         but no network-LSA exists for it"
    )]
    Lookup {
        advertising_router: RouterId,
        link_id: Ipv4Addr,
    },
    /// Shortest paths were requested before any topology was built
    #[error("The topology is empty, run build_topology first")]
    EmptyTopology,
}
