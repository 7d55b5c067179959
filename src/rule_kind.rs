//! Host rule kind definitions.

use std::fmt;

/// RuleKind names the variant of a parsed host rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// `*`, matches every host
    All,
    /// IP network containment (IPv4 and IPv6)
    Cidr,
    /// Exact IP address, optionally with a port
    Ip,
    /// Domain suffix, optionally with a port
    Domain,
}

impl RuleKind {
    /// Get the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::All => "ALL",
            RuleKind::Cidr => "IP-CIDR",
            RuleKind::Ip => "IP",
            RuleKind::Domain => "DOMAIN",
        }
    }

    /// Whether rules of this kind are evaluated against IP literal addresses.
    ///
    /// `All` answers true here and in [`RuleKind::matches_domains`].
    pub fn matches_ips(&self) -> bool {
        matches!(self, RuleKind::All | RuleKind::Cidr | RuleKind::Ip)
    }

    /// Whether rules of this kind are evaluated against domain names.
    pub fn matches_domains(&self) -> bool {
        matches!(self, RuleKind::All | RuleKind::Domain)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
