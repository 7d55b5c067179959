//! IP CIDR network rule implementation.

use ipnet::IpNet;
use std::net::IpAddr;

use super::HostRule;
use crate::RuleKind;

/// CidrMatcher matches IP addresses contained in a network.
///
/// The port of the query is ignored. The stored network is truncated to its
/// prefix, so `10.0.0.1/8` and `10.0.0.0/8` are the same rule.
///
/// # Examples
/// ```
/// use hostmatch::rule::{CidrMatcher, HostRule};
///
/// let rule = CidrMatcher::parse("192.168.0.0/16").unwrap();
/// assert!(rule.match_host("", "", Some("192.168.1.1".parse().unwrap())));
/// assert!(!rule.match_host("", "", Some("10.0.0.1".parse().unwrap())));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CidrMatcher {
    net: IpNet,
}

impl CidrMatcher {
    /// Create a CidrMatcher for the given network.
    pub fn new(net: IpNet) -> Self {
        Self { net: net.trunc() }
    }

    /// Parse `address/prefix` notation (IPv4 or IPv6).
    pub fn parse(pattern: &str) -> Option<Self> {
        pattern.trim().parse::<IpNet>().ok().map(Self::new)
    }

    /// Get the network of this rule.
    pub fn network(&self) -> IpNet {
        self.net
    }
}

impl HostRule for CidrMatcher {
    fn match_host(&self, _host: &str, _port: &str, ip: Option<IpAddr>) -> bool {
        match ip {
            // IPv4-mapped IPv6 addresses are tested as IPv4
            Some(ip) => self.net.contains(&ip.to_canonical()),
            None => false,
        }
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Cidr
    }
}
