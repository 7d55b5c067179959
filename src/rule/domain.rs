//! Domain suffix rule implementation.

use std::net::IpAddr;

use super::{port_matches, HostRule};
use crate::RuleKind;

/// DomainMatcher matches a domain and its subdomains by suffix.
///
/// # Pattern Formats
/// - `example.com` - matches `example.com` and every subdomain
/// - `.example.com` - matches subdomains only, not `example.com`
/// - `*.example.com` - same as `.example.com`
///
/// Any of these may carry a `:port` suffix.
///
/// # Examples
/// ```
/// use hostmatch::rule::{DomainMatcher, HostRule};
///
/// let rule = DomainMatcher::new("example.com", "").unwrap();
/// assert!(rule.match_host("example.com", "", None));
/// assert!(rule.match_host("a.b.example.com", "", None));
/// assert!(!rule.match_host("notexample.com", "", None));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainMatcher {
    /// Lower-case IDNA ASCII suffix, always starting with '.'
    suffix: String,
    /// Empty means any port
    port: String,
    /// Also match the bare domain (suffix without its leading dot)
    match_apex: bool,
}

impl DomainMatcher {
    /// Create a DomainMatcher from a domain pattern.
    ///
    /// Returns `None` when the pattern is empty.
    pub fn new(pattern: &str, port: impl Into<String>) -> Option<Self> {
        let pattern = pattern.trim().to_lowercase();
        if pattern.is_empty() {
            return None;
        }

        // "*.example.com" is the same rule as ".example.com"
        let pattern = if pattern.starts_with("*.") {
            pattern[1..].to_string()
        } else {
            pattern
        };

        let (labels, match_apex) = match pattern.strip_prefix('.') {
            Some(labels) => (labels, false),
            None => (pattern.as_str(), true),
        };

        let labels = if labels.is_empty() {
            String::new()
        } else {
            normalize_domain(labels)
        };

        Some(Self {
            suffix: format!(".{labels}"),
            port: port.into(),
            match_apex,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_parts(suffix: &str, port: &str, match_apex: bool) -> Self {
        Self {
            suffix: suffix.to_string(),
            port: port.to_string(),
            match_apex,
        }
    }

    /// Get the stored suffix (always starts with '.').
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Get the port of this rule (empty for any).
    pub fn port(&self) -> &str {
        &self.port
    }

    /// Whether the bare domain matches too, not only its subdomains.
    pub fn matches_apex(&self) -> bool {
        self.match_apex
    }
}

impl HostRule for DomainMatcher {
    fn match_host(&self, host: &str, port: &str, _ip: Option<IpAddr>) -> bool {
        let matched =
            host.ends_with(&self.suffix) || (self.match_apex && host == &self.suffix[1..]);
        matched && port_matches(&self.port, port)
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Domain
    }
}

/// Lower-case a domain and convert it to its IDNA ASCII form.
///
/// Falls back to the lower-cased input when conversion fails.
///
/// # Examples
/// ```
/// use hostmatch::rule::normalize_domain;
///
/// assert_eq!(normalize_domain("Example.COM"), "example.com");
/// assert_eq!(normalize_domain("bücher.example"), "xn--bcher-kva.example");
/// ```
pub fn normalize_domain(domain: &str) -> String {
    let lower = domain.to_lowercase();
    match idna::domain_to_ascii(&lower) {
        Ok(ascii) => ascii,
        Err(e) => {
            log::trace!("IDNA conversion failed for {:?}: {:?}", lower, e);
            lower
        }
    }
}
