use std::io;
use std::net::Ipv4Addr;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

use log::debug;

use crate::concepts::route::KernelRoute;
use crate::feedback::RoutingError;
use crate::framework::ForwardingTable;

/// Programs the Linux forwarding table through `SIOCADDRT` / `SIOCDELRT`.
///
/// The socket is closed when the table is dropped.
#[derive(Debug)]
pub struct IoctlTable {
    fd: OwnedFd,
}

impl IoctlTable {
    pub fn open() -> Result<Self, RoutingError> {
        let raw = unsafe { libc::socket(libc::AF_INET, libc::SOCK_DGRAM, 0) };
        if raw < 0 {
            return Err(RoutingError::SocketInit {
                source: io::Error::last_os_error(),
            });
        }
        debug!("Opened kernel routing socket fd={raw}");
        Ok(Self {
            fd: unsafe { OwnedFd::from_raw_fd(raw) },
        })
    }

    fn request(&self, op: libc::c_ulong, route: &KernelRoute) -> io::Result<()> {
        let mut entry = rtentry_for(route);
        let ret = unsafe {
            libc::ioctl(self.fd.as_raw_fd(), op as _, &mut entry as *mut libc::rtentry)
        };
        if ret < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

impl ForwardingTable for IoctlTable {
    fn add_route(&mut self, route: &KernelRoute) -> io::Result<()> {
        self.request(libc::SIOCADDRT as libc::c_ulong, route)
    }

    fn delete_route(&mut self, route: &KernelRoute) -> io::Result<()> {
        self.request(libc::SIOCDELRT as libc::c_ulong, route)
    }
}

fn sockaddr_v4(addr: Ipv4Addr) -> libc::sockaddr {
    let sin = libc::sockaddr_in {
        sin_family: libc::AF_INET as libc::sa_family_t,
        sin_port: 0,
        sin_addr: libc::in_addr {
            s_addr: u32::from(addr).to_be(),
        },
        sin_zero: [0; 8],
    };
    // sockaddr_in and sockaddr are both 16 bytes
    unsafe { std::mem::transmute::<libc::sockaddr_in, libc::sockaddr>(sin) }
}

fn rtentry_for(route: &KernelRoute) -> libc::rtentry {
    let mut entry: libc::rtentry = unsafe { std::mem::zeroed() };
    entry.rt_dst = sockaddr_v4(route.destination);
    entry.rt_genmask = sockaddr_v4(route.mask);
    entry.rt_gateway = sockaddr_v4(route.gateway);
    entry.rt_flags = libc::RTF_UP | libc::RTF_GATEWAY;
    // the kernel stores rt_metric - 1 as the route priority
    entry.rt_metric = route.metric.saturating_add(1).min(i16::MAX as u32) as libc::c_short;
    entry
}
