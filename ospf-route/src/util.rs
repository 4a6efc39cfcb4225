use crate::framework::Metric;
use crate::router::INF;
use std::cmp::min;
use std::net::Ipv4Addr;

/// The mask applied to every derived destination network (a /24).
pub const NETWORK_MASK: Ipv4Addr = Ipv4Addr::new(255, 255, 255, 0);

/// Adds two metrics, treating [`INF`] as absorbing
///
/// # Arguments
///
/// * `cost_a`: First metric
/// * `cost_b`: Second metric
///
/// returns: Metric, never INF unless one of the operands was INF
///
/// # Examples
///
/// ```
/// use ospf_route::router::INF;
/// use ospf_route::util::sum_inf;
///
/// assert_eq!(sum_inf(3, 4), 7);
/// assert_eq!(sum_inf(INF, 1), INF);
/// assert_eq!(sum_inf(INF - 1, 5), INF - 1);
/// ```
pub fn sum_inf(cost_a: Metric, cost_b: Metric) -> Metric {
    if cost_a == INF || cost_b == INF {
        INF
    } else {
        min((INF - 1) as u64, cost_a as u64 + cost_b as u64) as Metric
    }
}

/// Masks an interface address down to its destination network
///
/// ```
/// use std::net::Ipv4Addr;
/// use ospf_route::util::network_of;
///
/// assert_eq!(network_of(Ipv4Addr::new(192, 168, 7, 42)), Ipv4Addr::new(192, 168, 7, 0));
/// ```
pub fn network_of(addr: Ipv4Addr) -> Ipv4Addr {
    Ipv4Addr::from(u32::from(addr) & u32::from(NETWORK_MASK))
}
