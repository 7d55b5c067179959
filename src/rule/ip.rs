//! Exact IP address rule implementation.

use std::net::IpAddr;

use super::{port_matches, HostRule};
use crate::RuleKind;

/// IpMatcher matches one IP address, optionally restricted to a port.
///
/// # Examples
/// ```
/// use hostmatch::rule::{HostRule, IpMatcher};
///
/// let rule = IpMatcher::new("8.8.8.8".parse().unwrap(), "53");
/// assert!(rule.match_host("", "53", Some("8.8.8.8".parse().unwrap())));
/// assert!(!rule.match_host("", "443", Some("8.8.8.8".parse().unwrap())));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpMatcher {
    ip: IpAddr,
    /// Empty means any port
    port: String,
}

impl IpMatcher {
    /// Create a new IpMatcher. An empty `port` accepts any port.
    pub fn new(ip: IpAddr, port: impl Into<String>) -> Self {
        Self {
            ip,
            port: port.into(),
        }
    }

    /// Get the IP address of this rule.
    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    /// Get the port of this rule (empty for any).
    pub fn port(&self) -> &str {
        &self.port
    }
}

impl HostRule for IpMatcher {
    fn match_host(&self, _host: &str, port: &str, ip: Option<IpAddr>) -> bool {
        match ip {
            Some(ip) if ip.to_canonical() == self.ip.to_canonical() => {
                port_matches(&self.port, port)
            }
            _ => false,
        }
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Ip
    }
}
