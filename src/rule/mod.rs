//! Host rule parsing and matcher types.

mod cidr;
mod domain;
mod ip;
mod path;

pub use cidr::CidrMatcher;
pub use domain::{normalize_domain, DomainMatcher};
pub use ip::IpMatcher;
pub use path::PathMatcher;

use std::net::IpAddr;
use std::str::FromStr;

use crate::addr::split_host_port;
use crate::error::HostRuleError;
use crate::RuleKind;

/// HostRule is the matching capability shared by every host matcher.
pub trait HostRule: Send + Sync {
    /// Test a query against this rule.
    ///
    /// # Arguments
    /// * `host` - Normalized host of the query (lower-case, IDNA ASCII)
    /// * `port` - Port of the query, empty when none was given
    /// * `ip` - The host parsed as an IP literal, if it is one
    fn match_host(&self, host: &str, port: &str, ip: Option<IpAddr>) -> bool;

    /// Get the kind of this rule.
    fn kind(&self) -> RuleKind;
}

/// A parsed host rule.
///
/// # Examples
/// ```
/// use hostmatch::rule::{HostMatcher, HostRule};
/// use hostmatch::RuleKind;
///
/// let m = HostMatcher::parse("*.example.com:443").unwrap();
/// assert_eq!(m.kind(), RuleKind::Domain);
///
/// let m = HostMatcher::parse("10.0.0.0/8").unwrap();
/// assert_eq!(m.kind(), RuleKind::Cidr);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMatcher {
    /// Matches any host, port or IP
    All,
    /// Network containment
    Cidr(CidrMatcher),
    /// Exact IP with optional port
    Ip(IpMatcher),
    /// Domain suffix with optional port
    Domain(DomainMatcher),
}

impl HostMatcher {
    /// Parse one textual host rule.
    ///
    /// Tried in order: `*`, CIDR network, IP literal (with optional port,
    /// IPv6 bracketed when a port is present), then domain pattern.
    pub fn parse(text: &str) -> Result<Self, HostRuleError> {
        let text = text.trim().to_lowercase();
        if text.is_empty() {
            return Err(HostRuleError::EmptyHost(text));
        }

        if text == "*" {
            return Ok(HostMatcher::All);
        }

        // CIDR strings carry no port, so this runs before host:port splitting.
        if let Some(cidr) = CidrMatcher::parse(&text) {
            return Ok(HostMatcher::Cidr(cidr));
        }

        let (host, port) = match split_host_port(&text) {
            Some((host, port)) => {
                if host.is_empty() {
                    return Err(HostRuleError::EmptyHost(text.clone()));
                }
                (host, port)
            }
            None => (text.as_str(), ""),
        };

        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(HostMatcher::Ip(IpMatcher::new(ip, port)));
        }

        DomainMatcher::new(host, port)
            .map(HostMatcher::Domain)
            .ok_or_else(|| HostRuleError::EmptyHost(text.clone()))
    }
}

impl FromStr for HostMatcher {
    type Err = HostRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl HostRule for HostMatcher {
    fn match_host(&self, host: &str, port: &str, ip: Option<IpAddr>) -> bool {
        match self {
            HostMatcher::All => true,
            HostMatcher::Cidr(m) => m.match_host(host, port, ip),
            HostMatcher::Ip(m) => m.match_host(host, port, ip),
            HostMatcher::Domain(m) => m.match_host(host, port, ip),
        }
    }

    fn kind(&self) -> RuleKind {
        match self {
            HostMatcher::All => RuleKind::All,
            HostMatcher::Cidr(m) => m.kind(),
            HostMatcher::Ip(m) => m.kind(),
            HostMatcher::Domain(m) => m.kind(),
        }
    }
}

/// Port check shared by IP and domain rules: an empty rule port accepts any.
fn port_matches(rule_port: &str, port: &str) -> bool {
    rule_port.is_empty() || rule_port == port
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn domain(suffix: &str, port: &str, match_host: bool) -> HostMatcher {
        HostMatcher::Domain(DomainMatcher::from_parts(suffix, port, match_host))
    }

    #[test]
    fn test_parse_ip() {
        let localhost = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1));

        assert_eq!(
            HostMatcher::parse("127.0.0.1").unwrap(),
            HostMatcher::Ip(IpMatcher::new(localhost, ""))
        );
        assert_eq!(
            HostMatcher::parse("127.0.0.1:80").unwrap(),
            HostMatcher::Ip(IpMatcher::new(localhost, "80"))
        );
    }

    #[test]
    fn test_parse_ipv6() {
        let ip: IpAddr = "::1".parse().unwrap();

        assert_eq!(
            HostMatcher::parse("::1").unwrap(),
            HostMatcher::Ip(IpMatcher::new(ip, ""))
        );
        assert_eq!(
            HostMatcher::parse("[::1]:8080").unwrap(),
            HostMatcher::Ip(IpMatcher::new(ip, "8080"))
        );
    }

    #[test]
    fn test_parse_cidr() {
        let m = HostMatcher::parse("10.0.0.1/8").unwrap();
        assert_eq!(m, HostMatcher::Cidr(CidrMatcher::new("10.0.0.0/8".parse().unwrap())));
    }

    #[test]
    fn test_parse_domain() {
        assert_eq!(
            HostMatcher::parse("localhost").unwrap(),
            domain(".localhost", "", true)
        );
        assert_eq!(
            HostMatcher::parse("localhost:80").unwrap(),
            domain(".localhost", "80", true)
        );
        assert_eq!(
            HostMatcher::parse("local.host").unwrap(),
            domain(".local.host", "", true)
        );
        assert_eq!(
            HostMatcher::parse(".local.host").unwrap(),
            domain(".local.host", "", false)
        );
        assert_eq!(
            HostMatcher::parse("*.local.host").unwrap(),
            domain(".local.host", "", false)
        );
        assert_eq!(
            HostMatcher::parse("  Local.HOST  ").unwrap(),
            domain(".local.host", "", true)
        );
    }

    #[test]
    fn test_parse_all() {
        assert_eq!(HostMatcher::parse("*").unwrap(), HostMatcher::All);
        assert_eq!(HostMatcher::parse(" * ").unwrap(), HostMatcher::All);
    }

    #[test]
    fn test_parse_empty_host() {
        assert!(HostMatcher::parse("").is_err());
        assert!(HostMatcher::parse("   ").is_err());
        assert!(HostMatcher::parse(":").is_err());
        assert!(HostMatcher::parse(":80").is_err());
        assert!(matches!(
            HostMatcher::parse(":80"),
            Err(HostRuleError::EmptyHost(_))
        ));
    }

    #[test]
    fn test_from_str() {
        let m: HostMatcher = "example.com".parse().unwrap();
        assert_eq!(m.kind(), RuleKind::Domain);
    }

    #[test]
    fn test_dispatch() {
        let ip: IpAddr = "10.1.2.3".parse().unwrap();

        assert!(HostMatcher::All.match_host("anything", "1", None));
        assert!(HostMatcher::parse("10.0.0.0/8")
            .unwrap()
            .match_host("", "", Some(ip)));
        assert!(HostMatcher::parse("10.1.2.3:22")
            .unwrap()
            .match_host("", "22", Some(ip)));
        assert!(!HostMatcher::parse("10.1.2.3:22")
            .unwrap()
            .match_host("", "23", Some(ip)));
        assert!(HostMatcher::parse("example.com")
            .unwrap()
            .match_host("www.example.com", "", None));
    }
}
