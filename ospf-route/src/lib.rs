//! Route computation core of a link-state (OSPF-style) routing daemon.
//!
//! A [`router::Router`] copies the link-state database, builds a
//! [`topology::Topology`] from it, runs the shortest-path search in [`spf`],
//! derives destination-network routes in [`table`], and reconciles them with
//! the operating system's forwarding table through [`kernel::KernelSync`].
//!
//! Everything outside the pipeline (flooding, adjacency formation, interface
//! configuration) is reached through the traits in [`framework`].

pub mod concepts;
pub mod feedback;
pub mod framework;
pub mod kernel;
pub mod router;
pub mod spf;
pub mod table;
pub mod topology;
pub mod util;
