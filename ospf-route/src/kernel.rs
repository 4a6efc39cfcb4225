use std::collections::BTreeMap;
use std::io;
use std::net::Ipv4Addr;
use std::sync::Arc;

use educe::Educe;
use log::{debug, error, info};
use parking_lot::Mutex;

use crate::concepts::route::KernelRoute;
use crate::feedback::{KernelOp, RoutingError};
use crate::framework::ForwardingTable;
use crate::table::RoutingTable;

/// Outcome of a reset or write. Failures are collected here rather than returned as errors.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub added: usize,
    pub removed: usize,
    pub errors: Vec<RoutingError>,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Keeps the forwarding table in line with the computed routes.
///
/// Every write withdraws everything previously installed and then installs the new set.
/// Only routes that were actually accepted are tracked, and whatever is still tracked
/// is withdrawn when the synchronizer is dropped.
#[derive(Educe)]
#[educe(Debug(bound()))]
pub struct KernelSync<K: ForwardingTable> {
    #[educe(Debug(ignore))]
    table: K,
    installed: Vec<KernelRoute>,
}

impl<K: ForwardingTable> KernelSync<K> {
    pub fn new(table: K) -> Self {
        Self {
            table,
            installed: Vec::new(),
        }
    }

    pub fn table(&self) -> &K {
        &self.table
    }

    /// Routes currently believed to be in the kernel
    pub fn installed(&self) -> &[KernelRoute] {
        &self.installed
    }

    /// Deletes every tracked route. The tracked list is cleared even if some deletions fail.
    pub fn reset(&mut self) -> SyncReport {
        let mut report = SyncReport::default();
        for route in self.installed.drain(..) {
            match self.table.delete_route(&route) {
                Ok(()) => report.removed += 1,
                Err(source) => {
                    let err = RoutingError::KernelProgramming {
                        op: KernelOp::Delete,
                        route,
                        source,
                    };
                    error!("{err}");
                    report.errors.push(err);
                }
            }
        }
        info!(
            "Reset kernel routes, {} removed, {} failed",
            report.removed,
            report.errors.len()
        );
        report
    }

    /// Replaces the installed routes with `routes`
    pub fn write(&mut self, routes: &RoutingTable) -> SyncReport {
        let mut report = self.reset();
        for entry in routes.iter() {
            let route = KernelRoute::from(entry);
            match self.table.add_route(&route) {
                Ok(()) => {
                    debug!("Added route {route}");
                    report.added += 1;
                    self.installed.push(route);
                }
                Err(source) => {
                    let err = RoutingError::KernelProgramming {
                        op: KernelOp::Add,
                        route,
                        source,
                    };
                    error!("{err}");
                    report.errors.push(err);
                }
            }
        }
        info!(
            "Wrote kernel routes, {}/{} installed",
            self.installed.len(),
            routes.len()
        );
        report
    }
}

impl<K: ForwardingTable> Drop for KernelSync<K> {
    fn drop(&mut self) {
        if !self.installed.is_empty() {
            self.reset();
        }
    }
}

type RouteKey = (Ipv4Addr, Ipv4Addr, Ipv4Addr);

/// An in-process forwarding table with kernel-like semantics.
///
/// Routes are keyed by (destination, mask, gateway). Clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    routes: Arc<Mutex<BTreeMap<RouteKey, KernelRoute>>>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<KernelRoute> {
        self.routes.lock().values().copied().collect()
    }

    pub fn route_to(&self, destination: &Ipv4Addr) -> Option<KernelRoute> {
        self.routes
            .lock()
            .values()
            .find(|r| r.destination == *destination)
            .copied()
    }

    pub fn len(&self) -> usize {
        self.routes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.lock().is_empty()
    }
}

fn route_key(route: &KernelRoute) -> RouteKey {
    (route.destination, route.mask, route.gateway)
}

impl ForwardingTable for MemoryTable {
    fn add_route(&mut self, route: &KernelRoute) -> io::Result<()> {
        let mut routes = self.routes.lock();
        let key = route_key(route);
        if routes.contains_key(&key) {
            return Err(io::Error::from(io::ErrorKind::AlreadyExists));
        }
        routes.insert(key, *route);
        Ok(())
    }

    fn delete_route(&mut self, route: &KernelRoute) -> io::Result<()> {
        match self.routes.lock().remove(&route_key(route)) {
            Some(_) => Ok(()),
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(target_os = "linux")] {
        mod ioctl;
        pub use ioctl::IoctlTable;
    } else {
        /// Kernel route programming is only implemented for Linux
        #[derive(Debug)]
        pub struct IoctlTable {}

        impl IoctlTable {
            pub fn open() -> Result<Self, RoutingError> {
                Err(RoutingError::SocketInit {
                    source: io::Error::from(io::ErrorKind::Unsupported),
                })
            }
        }

        impl ForwardingTable for IoctlTable {
            fn add_route(&mut self, _route: &KernelRoute) -> io::Result<()> {
                Err(io::Error::from(io::ErrorKind::Unsupported))
            }

            fn delete_route(&mut self, _route: &KernelRoute) -> io::Result<()> {
                Err(io::Error::from(io::ErrorKind::Unsupported))
            }
        }
    }
}
