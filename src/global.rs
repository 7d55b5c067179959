//! Process-wide rule set and public API.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::{Arc, Once};

use crate::ruleset::{RuleConfig, RuleSet};

/// Global rule set
static GLOBAL_RULESET: Lazy<RwLock<Option<Arc<RuleSet>>>> = Lazy::new(|| RwLock::new(None));

/// Initialization flag
static INIT: Once = Once::new();

/// Ensure the global rule set is initialized.
///
/// On first use the rule list is read from `NO_PROXY` (or `no_proxy`). When
/// neither is set the global set is empty and matches nothing but the empty
/// address. An explicit [`reload`] before first use takes precedence.
pub fn ensure_initialized() {
    INIT.call_once(|| {
        let (ruleset, _) = ruleset_from_env();
        // Check and install under one lock so a concurrent reload is kept.
        let mut guard = GLOBAL_RULESET.write();
        if guard.is_none() {
            *guard = Some(Arc::new(ruleset));
        }
    });
}

/// (Re)build the global rule set from `NO_PROXY` / `no_proxy`.
///
/// Returns false when neither variable is set.
pub fn init_from_env() -> bool {
    let (ruleset, found) = ruleset_from_env();
    install(ruleset);
    found
}

/// Build a rule set from the environment; empty when no variable is set.
fn ruleset_from_env() -> (RuleSet, bool) {
    match RuleConfig::from_env_default() {
        Ok(config) => (RuleSet::from_config(&config), true),
        Err(e) => {
            log::debug!("No rule list in environment: {}", e);
            (RuleSet::default(), false)
        }
    }
}

/// Check if the global rule set is initialized.
pub fn is_initialized() -> bool {
    GLOBAL_RULESET.read().is_some()
}

/// Replace the global rule set with one built from `rules`.
pub fn reload<I, S>(rules: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    install(RuleSet::new(rules));
}

/// Replace the global rule set with one built from a configuration.
pub fn reload_from_config(config: &RuleConfig) {
    install(RuleSet::from_config(config));
    log::debug!("Reloaded global rule set from {:?}", config.name);
}

fn install(ruleset: RuleSet) {
    *GLOBAL_RULESET.write() = Some(Arc::new(ruleset));
}

/// Get a handle to the current global rule set.
pub fn current() -> Arc<RuleSet> {
    ensure_initialized();
    GLOBAL_RULESET
        .read()
        .clone()
        .unwrap_or_else(|| Arc::new(RuleSet::default()))
}

/// Match an address against the global rule set.
///
/// # Examples
/// ```
/// hostmatch::reload(["localhost", "127.0.0.0/8"]);
///
/// assert!(hostmatch::matches("localhost:8080"));
/// assert!(hostmatch::matches("127.0.0.1"));
/// assert!(!hostmatch::matches("example.com"));
/// ```
pub fn matches(addr: &str) -> bool {
    current().matches(addr)
}
