use std::collections::BTreeSet;
use std::io;
use std::net::Ipv4Addr;
use std::ops::Deref;
use std::sync::Arc;

use ospf_route::concepts::route::KernelRoute;
use ospf_route::framework::ForwardingTable;
use ospf_route::kernel::MemoryTable;
use parking_lot::Mutex;

#[derive(Debug, Default)]
struct Faults {
    fail_add: BTreeSet<Ipv4Addr>,
    fail_delete: BTreeSet<Ipv4Addr>,
    adds: usize,
    deletes: usize,
}

/// A [`MemoryTable`] that can be told to refuse requests for chosen destinations.
///
/// Clones share both the table and the injected faults.
#[derive(Debug, Clone, Default)]
pub struct FaultyKernel {
    table: MemoryTable,
    faults: Arc<Mutex<Faults>>,
}

impl FaultyKernel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent add towards `destination` fail
    pub fn fail_adds_to(&self, destination: Ipv4Addr) {
        self.faults.lock().fail_add.insert(destination);
    }

    /// Makes every subsequent delete of a route towards `destination` fail
    pub fn fail_deletes_to(&self, destination: Ipv4Addr) {
        self.faults.lock().fail_delete.insert(destination);
    }

    pub fn clear_failures(&self) {
        let mut faults = self.faults.lock();
        faults.fail_add.clear();
        faults.fail_delete.clear();
    }

    /// Number of successful (adds, deletes) so far
    pub fn churn(&self) -> (usize, usize) {
        let faults = self.faults.lock();
        (faults.adds, faults.deletes)
    }
}

impl Deref for FaultyKernel {
    type Target = MemoryTable;

    fn deref(&self) -> &MemoryTable {
        &self.table
    }
}

impl ForwardingTable for FaultyKernel {
    fn add_route(&mut self, route: &KernelRoute) -> io::Result<()> {
        let mut faults = self.faults.lock();
        if faults.fail_add.contains(&route.destination) {
            return Err(io::Error::from(io::ErrorKind::OutOfMemory));
        }
        self.table.add_route(route)?;
        faults.adds += 1;
        Ok(())
    }

    fn delete_route(&mut self, route: &KernelRoute) -> io::Result<()> {
        let mut faults = self.faults.lock();
        if faults.fail_delete.contains(&route.destination) {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        self.table.delete_route(route)?;
        faults.deletes += 1;
        Ok(())
    }
}
