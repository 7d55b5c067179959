//! hostmatch - Address matching for proxy bypass lists and host allow-lists.
//!
//! This crate decides whether a network address (`host[:port][/path]`) is
//! selected by a list of textual rules, the way `NO_PROXY` style settings
//! are interpreted.
//!
//! # Features
//!
//! - **IP matching**: Exact IPv4/IPv6 addresses, optionally with a port
//! - **IP-CIDR matching**: IPv4 and IPv6 network containment
//! - **Domain matching**: Suffix matching with or without the bare domain,
//!   IDNA normalization of internationalized names
//! - **Path matching**: Exact paths and `*` / `**` globs after the host
//! - **Thread-safe**: A built [`RuleSet`] is immutable
//!
//! # Quick Start
//!
//! ```
//! use hostmatch::RuleSet;
//!
//! let rules = RuleSet::new(["localhost", "*.corp.example", "10.0.0.0/8", "[::1]:8080"]);
//!
//! assert!(rules.matches("localhost:3000"));
//! assert!(rules.matches("git.corp.example"));
//! assert!(!rules.matches("corp.example"));
//! assert!(rules.matches("10.20.30.40"));
//! assert!(rules.matches("[::1]:8080"));
//! assert!(!rules.matches("example.com"));
//! ```
//!
//! # Rule Grammar
//!
//! ```text
//! rule   := host ["/" path] | cidr
//! host   := "*" | ip [":" port] | "[" ipv6 "]" [":" port] | domain [":" port]
//! domain := ["*."] labels | "." labels
//! path   := text with optional "*" and "**"
//! ```
//!
//! - `example.com` matches `example.com` and all its subdomains
//! - `.example.com` and `*.example.com` match subdomains only
//! - `*` alone matches every address
//! - `*/health` matches the path `health` on any host
//!
//! Entries that fail to parse are skipped so that one bad entry does not
//! disable a whole list. See [`RuleSet::dropped`].
//!
//! # Matching Order
//!
//! IP literal addresses are tested against IP and CIDR rules, other hosts
//! against domain rules. Addresses with a path are only tested against
//! rules with a path. The first matching rule wins.

mod addr;
mod error;
mod global;
mod rule_kind;

pub mod rule;
pub mod ruleset;

// Re-export core types
pub use addr::split_host_port;
pub use error::{Error, HostRuleError, Result};
pub use rule_kind::RuleKind;

// Re-export ruleset types
pub use ruleset::{RuleConfig, RuleSet, RuleSetStats};

// Re-export global API functions
pub use global::{
    current, ensure_initialized, init_from_env, is_initialized, matches, reload,
    reload_from_config,
};
