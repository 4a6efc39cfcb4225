use std::path::PathBuf;

use ospf_route::framework::RouterConfig;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct ReplayConfig {
    /// `router_id` and `interfaces` sit at the top level of the file
    #[serde(flatten)]
    pub router: RouterConfig,
    /// LSDB snapshot, re-read every cycle
    pub lsdb: PathBuf,
    #[serde(default = "default_interval")]
    pub interval_ms: u64,
    /// keep routes in memory instead of programming the kernel
    #[serde(default)]
    pub dry_run: bool,
    /// stop after this many cycles, run until ctrl-c otherwise
    #[serde(default)]
    pub cycles: Option<u32>,
}

fn default_interval() -> u64 {
    10_000
}
