//! RuleSet construction and address matching.

mod config;

pub use config::{RuleConfig, DEFAULT_ENV_VARS};

use std::net::IpAddr;

use crate::addr::host_and_port;
use crate::rule::{normalize_domain, CidrMatcher, HostMatcher, HostRule, PathMatcher};
use crate::RuleKind;

/// A host rule with a path rule attached.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PathRule {
    host: HostMatcher,
    path: PathMatcher,
}

impl PathRule {
    fn matches(&self, host: &str, port: &str, ip: Option<IpAddr>, path: &str) -> bool {
        self.host.match_host(host, port, ip) && self.path.matches(path)
    }
}

/// Bucket sizes and build outcome of a [`RuleSet`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleSetStats {
    /// IP and CIDR rules without a path
    pub ip: usize,
    /// Domain rules without a path
    pub domain: usize,
    /// IP, CIDR and `*` rules with a path
    pub ip_path: usize,
    /// Domain and `*` rules with a path
    pub domain_path: usize,
    /// Entries that failed to parse and were skipped
    pub dropped: usize,
    /// A bare `*` rule made every address match
    pub match_all: bool,
}

/// RuleSet answers whether an address is selected by a list of rules.
///
/// Rules are parsed once at construction and bucketed by kind, so IP
/// addresses are only tested against IP and CIDR rules and domain names
/// only against domain rules. A `*` host rule with a path is tested for
/// both. Within a bucket rules are tried in configuration order.
///
/// Entries that fail to parse are skipped rather than reported, so one bad
/// entry in a merged list does not disable the others. [`RuleSet::dropped`]
/// tells how many were skipped; use [`HostMatcher::parse`] directly for
/// strict validation.
///
/// A built RuleSet is immutable and can be shared across threads.
///
/// # Examples
/// ```
/// use hostmatch::RuleSet;
///
/// let rules = RuleSet::new(["localhost", "10.0.0.0/8", "*.internal:8080", "docs.rs/*/latest"]);
///
/// assert!(rules.matches("localhost"));
/// assert!(rules.matches("10.1.2.3:22"));
/// assert!(rules.matches("api.internal:8080"));
/// assert!(!rules.matches("api.internal:443"));
/// assert!(rules.matches("docs.rs/serde/latest"));
/// assert!(!rules.matches("example.com"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    match_all: bool,
    ip_rules: Vec<HostMatcher>,
    domain_rules: Vec<HostMatcher>,
    ip_path_rules: Vec<PathRule>,
    domain_path_rules: Vec<PathRule>,
    dropped: usize,
}

impl RuleSet {
    /// Build a RuleSet from rule entries.
    ///
    /// Each entry is trimmed; blank entries are ignored and malformed
    /// entries are skipped.
    ///
    /// An entry that is a CIDR network as a whole (`10.0.0.1/8`, `fc00::/7`)
    /// is a CIDR rule; `ip/N` is never read as an IP with path `N`. For any
    /// other entry the first `/` separates the host from the path.
    pub fn new<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();

        for rule in rules {
            let rule = rule.as_ref().trim();
            if rule.is_empty() {
                continue;
            }
            if !set.add(rule) {
                // Nothing can narrow an unconditional match.
                return Self::match_all();
            }
        }

        log::debug!(
            "Built rule set: {} ip, {} domain, {} ip+path, {} domain+path, {} dropped",
            set.ip_rules.len(),
            set.domain_rules.len(),
            set.ip_path_rules.len(),
            set.domain_path_rules.len(),
            set.dropped
        );

        set
    }

    /// Build a RuleSet from a configuration.
    pub fn from_config(config: &RuleConfig) -> Self {
        let set = Self::new(&config.rules);
        if set.dropped > 0 {
            log::warn!(
                "Rule list {:?}: skipped {} invalid entries",
                config.name,
                set.dropped
            );
        }
        set
    }

    /// A RuleSet that matches every address.
    pub fn match_all() -> Self {
        Self {
            match_all: true,
            ..Self::default()
        }
    }

    /// Parse one trimmed, non-empty entry into its bucket.
    ///
    /// Returns false when the entry is a bare `*`.
    fn add(&mut self, rule: &str) -> bool {
        // A CIDR rule's slash is the prefix length, not a path separator.
        if let Some(cidr) = CidrMatcher::parse(rule) {
            self.ip_rules.push(HostMatcher::Cidr(cidr));
            return true;
        }

        let (host_part, path_part) = match rule.find('/') {
            Some(idx) => (&rule[..idx], Some(&rule[idx + 1..])),
            None => (rule, None),
        };

        let host = match HostMatcher::parse(host_part) {
            Ok(host) => host,
            Err(e) => {
                log::debug!("Skipping rule {:?}: {}", rule, e);
                self.dropped += 1;
                return true;
            }
        };

        let kind = host.kind();
        match path_part {
            None if kind == RuleKind::All => return false,
            None if kind.matches_ips() => self.ip_rules.push(host),
            None => self.domain_rules.push(host),
            Some(path) => {
                let rule = PathRule {
                    host,
                    path: PathMatcher::parse(path),
                };
                // `*/path` has to apply to IP literals and domain names alike.
                if kind.matches_domains() {
                    self.domain_path_rules.push(rule.clone());
                }
                if kind.matches_ips() {
                    self.ip_path_rules.push(rule);
                }
            }
        }
        true
    }

    /// Check whether an address `host[:port][/path]` is selected.
    ///
    /// The empty address always matches.
    pub fn matches(&self, addr: &str) -> bool {
        if self.match_all || addr.is_empty() {
            return true;
        }

        let (hostport, path) = match addr.find('/') {
            Some(idx) => (&addr[..idx], Some(&addr[idx + 1..])),
            None => (addr, None),
        };
        let (host, port) = host_and_port(hostport);

        let matched = match host.parse::<IpAddr>() {
            Ok(ip) => self.match_ip(host, port, ip, path),
            Err(_) => self.match_domain(&normalize_domain(host), port, path),
        };

        log::trace!("Match {:?}: {}", addr, matched);
        matched
    }

    fn match_ip(&self, host: &str, port: &str, ip: IpAddr, path: Option<&str>) -> bool {
        let ip = Some(ip);
        match path {
            None => self.ip_rules.iter().any(|m| m.match_host(host, port, ip)),
            Some(path) => self
                .ip_path_rules
                .iter()
                .any(|m| m.matches(host, port, ip, path)),
        }
    }

    fn match_domain(&self, host: &str, port: &str, path: Option<&str>) -> bool {
        match path {
            None => self
                .domain_rules
                .iter()
                .any(|m| m.match_host(host, port, None)),
            Some(path) => self
                .domain_path_rules
                .iter()
                .any(|m| m.matches(host, port, None, path)),
        }
    }

    /// Whether a bare `*` rule made every address match.
    pub fn is_match_all(&self) -> bool {
        self.match_all
    }

    /// Number of parsed rules (a rule in two buckets counts once per bucket).
    pub fn len(&self) -> usize {
        self.ip_rules.len()
            + self.domain_rules.len()
            + self.ip_path_rules.len()
            + self.domain_path_rules.len()
    }

    /// Whether no rule was parsed. A match-all set is not empty.
    pub fn is_empty(&self) -> bool {
        !self.match_all && self.len() == 0
    }

    /// Number of entries skipped because they failed to parse.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Get bucket sizes and build outcome.
    pub fn stats(&self) -> RuleSetStats {
        RuleSetStats {
            ip: self.ip_rules.len(),
            domain: self.domain_rules.len(),
            ip_path: self.ip_path_rules.len(),
            domain_path: self.domain_path_rules.len(),
            dropped: self.dropped,
            match_all: self.match_all,
        }
    }
}

impl From<&RuleConfig> for RuleSet {
    fn from(config: &RuleConfig) -> Self {
        Self::from_config(config)
    }
}
