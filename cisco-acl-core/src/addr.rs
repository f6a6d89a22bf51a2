use std::fmt;
use std::net::Ipv4Addr;

use serde::Serialize;

/// A host or subnet referenced by an ACL.
///
/// Identity is `(addr, prefix)`. Hosts carry prefix 32, so a `host` token
/// and a zero-wildcard network reference to the same address are the same
/// object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NetObject {
    pub addr: Ipv4Addr,
    pub prefix: u8,
}

impl NetObject {
    pub fn host(addr: Ipv4Addr) -> Self {
        NetObject { addr, prefix: 32 }
    }

    pub fn network(addr: Ipv4Addr, prefix: u8) -> Self {
        NetObject { addr, prefix }
    }

    pub fn is_host(&self) -> bool {
        self.prefix == 32
    }
}

impl fmt::Display for NetObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

/// Convert an inverted (wildcard) mask to a prefix length.
///
/// A valid wildcard mask has all of its one-bits contiguous at the low end,
/// so `mask + 1` must be a power of two (or zero for `255.255.255.255`).
/// Returns `None` for non-contiguous masks such as `0.0.2.255`; a leading
/// zero octet alone does not make a token a wildcard mask.
pub fn wildcard_prefix(mask: Ipv4Addr) -> Option<u8> {
    let bits = u32::from(mask);
    if bits & bits.wrapping_add(1) != 0 {
        return None;
    }
    Some((32 - bits.count_ones()) as u8)
}
