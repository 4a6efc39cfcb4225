mod config;

use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use log::{error, info, warn};
use ospf_route::concepts::lsa::{LinkStateDb, SharedLsdb};
use ospf_route::framework::RoutingSystem;
use ospf_route::kernel::{IoctlTable, MemoryTable};
use ospf_route::router::{Router, UpdateReport};
use simplelog::*;
use tokio::fs;

use crate::config::ReplayConfig;

/// Routes are kept in memory and printed
struct DryRunSystem {}
impl RoutingSystem for DryRunSystem {
    type Database = Arc<SharedLsdb>;
    type Kernel = MemoryTable;
}

/// Routes are programmed into the Linux forwarding table
struct KernelSystem {}
impl RoutingSystem for KernelSystem {
    type Database = Arc<SharedLsdb>;
    type Kernel = IoctlTable;
}

async fn load_lsdb(path: &Path) -> anyhow::Result<LinkStateDb> {
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read LSDB from {}", path.display()))?;
    Ok(serde_json::from_str(&raw)?)
}

/// One log line per cycle. Warnings were already logged by the stage that produced them.
fn cycle_summary<T: RoutingSystem>(
    cycle: u32,
    router: &Router<T>,
    report: &UpdateReport,
) -> String {
    format!(
        "Cycle {cycle}: {} routes, {} installed, {} warnings, {} kernel errors",
        router.routes.len(),
        router.kernel().installed().len(),
        report.warnings.len(),
        report.sync.errors.len()
    )
}

/// Runs update cycles until `shutdown` resolves or the configured number of cycles is reached
async fn run<T, S>(cfg: ReplayConfig, kernel: T::Kernel, shutdown: S) -> anyhow::Result<()>
where
    T: RoutingSystem<Database = Arc<SharedLsdb>>,
    S: Future,
{
    let lsdb = Arc::new(SharedLsdb::default());
    let mut router = Router::<T>::new(cfg.router.clone(), lsdb.clone(), kernel);
    let mut interval = tokio::time::interval(Duration::from_millis(cfg.interval_ms));
    let mut cycle = 0u32;
    // polled across iterations so a signal during a cycle is seen at the next select
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = &mut shutdown => {
                info!("Interrupted, withdrawing routes");
                break;
            }
        }

        // stands in for flooding: whatever is on disk is the current database
        match load_lsdb(&cfg.lsdb).await {
            Ok(db) => lsdb.replace(db),
            Err(err) => warn!("{err:#}, keeping the previous database"),
        }

        let report = router.update();
        info!("{}", cycle_summary(cycle, &router, &report));
        info!("\n{}", router.routes);

        cycle += 1;
        if cfg.cycles.is_some_and(|max| cycle >= max) {
            break;
        }
    }

    router.reset_routes();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    TermLogger::init(LevelFilter::Info, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)
        .context("Failed to init logger")?;

    let path = std::env::args().nth(1).unwrap_or_else(|| "./config.json".to_string());
    let raw = fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read config from {path}"))?;
    let cfg: ReplayConfig = serde_json::from_str(&raw)?;

    info!("Starting SPF replay as {}", cfg.router.router_id);

    if cfg.dry_run {
        run::<DryRunSystem, _>(cfg, MemoryTable::new(), tokio::signal::ctrl_c()).await
    } else {
        let kernel = match IoctlTable::open() {
            Ok(kernel) => kernel,
            Err(err) => {
                error!("{err}");
                return Err(err.into());
            }
        };
        run::<KernelSystem, _>(cfg, kernel, tokio::signal::ctrl_c()).await
    }
}
