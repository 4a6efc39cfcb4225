use educe::Educe;
use log::{debug, info, warn};

use crate::feedback::RoutingWarning;
use crate::framework::{LinkStateSource, Metric, RouterConfig, RoutingSystem};
use crate::kernel::{KernelSync, SyncReport};
use crate::spf::ShortestPaths;
use crate::table::RoutingTable;
use crate::topology::Topology;

pub const INF: Metric = Metric::MAX;

/// What one update cycle ran into
#[derive(Debug, Default)]
pub struct UpdateReport {
    pub warnings: Vec<RoutingWarning>,
    pub sync: SyncReport,
}

/// Owns the recomputation pipeline for one router.
///
/// Every stage fully replaces the output of the previous cycle, only the list of
/// routes installed in the kernel survives between cycles.
#[derive(Educe)]
#[educe(Debug(bound()))]
pub struct Router<T: RoutingSystem + ?Sized> {
    pub config: RouterConfig,
    #[educe(Debug(ignore))]
    database: T::Database,
    pub topology: Topology,
    pub paths: ShortestPaths,
    pub routes: RoutingTable,
    kernel: KernelSync<T::Kernel>,
}

impl<T: RoutingSystem> Router<T> {
    pub fn new(config: RouterConfig, database: T::Database, kernel: T::Kernel) -> Self {
        let paths = ShortestPaths::local_only(config.router_id);
        Self {
            config,
            database,
            topology: Topology::new(),
            paths,
            routes: RoutingTable::new(),
            kernel: KernelSync::new(kernel),
        }
    }

    /// Runs one full cycle: topology, shortest paths, routes, kernel
    pub fn update(&mut self) -> UpdateReport {
        info!("Update OSPF routing for {}", self.config.router_id);
        let mut warnings = self.build_topology();
        debug!("\n{}", self.topology);

        if let Err(warning) = self.calculate_paths() {
            warnings.push(warning);
        }
        debug!("\n{}", self.paths);

        self.generate_routes();
        debug!("\n{}", self.routes);

        let sync = self.write_kernel_routes();
        UpdateReport { warnings, sync }
    }

    // region Stages

    /// Copies the database and rebuilds the topology from the copy
    pub fn build_topology(&mut self) -> Vec<RoutingWarning> {
        let snapshot = self.database.snapshot();
        self.topology.rebuild(&snapshot)
    }

    /// Recomputes the shortest paths over the current topology.
    ///
    /// On an empty topology only the local router is left in the path set.
    pub fn calculate_paths(&mut self) -> Result<(), RoutingWarning> {
        match ShortestPaths::compute(&self.topology, &self.config) {
            Ok(paths) => {
                self.paths = paths;
                Ok(())
            }
            Err(warning) => {
                warn!("{warning}");
                self.paths = ShortestPaths::local_only(self.config.router_id);
                Err(warning)
            }
        }
    }

    pub fn generate_routes(&mut self) {
        self.routes = RoutingTable::generate(&self.paths, &self.topology);
    }

    pub fn write_kernel_routes(&mut self) -> SyncReport {
        self.kernel.write(&self.routes)
    }

    // endregion

    /// Withdraws every route this router installed
    pub fn reset_routes(&mut self) -> SyncReport {
        self.kernel.reset()
    }

    pub fn kernel(&self) -> &KernelSync<T::Kernel> {
        &self.kernel
    }

    pub fn database(&self) -> &T::Database {
        &self.database
    }
}
