//! Rule list configuration sources.

use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};

/// Environment variables consulted by [`RuleConfig::from_env_default`], in order.
pub const DEFAULT_ENV_VARS: [&str; 2] = ["NO_PROXY", "no_proxy"];

/// An ordered list of rule entries plus an optional name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RuleConfig {
    /// Name of the rule list, for logs
    #[serde(default)]
    pub name: String,
    /// Rule entries in configuration order
    #[serde(default)]
    pub rules: Vec<String>,
}

/// A YAML/JSON document is either a mapping or a bare list of rules.
#[derive(Deserialize)]
#[serde(untagged)]
enum ConfigDocument {
    // Tried first: a struct also deserializes from a sequence.
    List(Vec<String>),
    Full(RuleConfig),
}

impl From<ConfigDocument> for RuleConfig {
    fn from(doc: ConfigDocument) -> Self {
        match doc {
            ConfigDocument::List(rules) => RuleConfig::new("", rules),
            ConfigDocument::Full(config) => config,
        }
    }
}

impl RuleConfig {
    /// Create a new RuleConfig.
    pub fn new<I, S>(name: impl Into<String>, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            rules: rules.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a comma separated list such as the value of `NO_PROXY`.
    ///
    /// Entries are trimmed and blank entries are ignored.
    pub fn from_list(list: &str) -> Self {
        let rules = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Self::new("", rules)
    }

    /// Read a comma separated rule list from an environment variable.
    pub fn from_env(var: &str) -> Result<Self> {
        let value = std::env::var(var).map_err(|_| Error::EnvNotSet(var.to_string()))?;
        let mut config = Self::from_list(&value);
        config.name = var.to_string();
        Ok(config)
    }

    /// Read the rule list from `NO_PROXY`, falling back to `no_proxy`.
    pub fn from_env_default() -> Result<Self> {
        DEFAULT_ENV_VARS
            .iter()
            .find_map(|var| Self::from_env(var).ok())
            .ok_or_else(|| Error::EnvNotSet(DEFAULT_ENV_VARS.join(" or ")))
    }

    /// Parse one rule per line. `#` starts a comment; blank lines are skipped.
    pub fn from_lines<R: Read>(reader: R) -> Result<Self> {
        let mut rules = Vec::new();

        for line in BufReader::new(reader).lines() {
            let line = line?;

            // Remove comments
            let line = match line.find('#') {
                Some(idx) => &line[..idx],
                None => &line,
            };
            let line = line.trim();

            if !line.is_empty() {
                rules.push(line.to_string());
            }
        }

        Ok(Self::new("", rules))
    }

    /// Parse a YAML document.
    pub fn from_yaml_reader<R: Read>(reader: R) -> Result<Self> {
        let doc: ConfigDocument = serde_yaml::from_reader(reader)?;
        Ok(doc.into())
    }

    /// Parse a JSON document.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let doc: ConfigDocument = serde_json::from_reader(reader)?;
        Ok(doc.into())
    }

    /// Load a configuration file.
    ///
    /// `.json` files are read as JSON, `.yaml`/`.yml` as YAML, anything else
    /// as one rule per line.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let mut config = match ext.as_deref() {
            Some("json") => Self::from_json_reader(file)?,
            Some("yaml") | Some("yml") => Self::from_yaml_reader(file)?,
            _ => Self::from_lines(file)?,
        };

        if config.name.is_empty() {
            config.name = path.display().to_string();
        }
        Ok(config)
    }

    /// Append the rules of another configuration after these.
    pub fn merge(&mut self, other: RuleConfig) {
        self.rules.extend(other.rules);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_list() {
        let config = RuleConfig::from_list(" localhost, ,127.0.0.1:80,,*.example.com ");
        assert_eq!(
            config.rules,
            vec!["localhost", "127.0.0.1:80", "*.example.com"]
        );
    }

    #[test]
    fn test_from_list_empty() {
        assert!(RuleConfig::from_list("").rules.is_empty());
        assert!(RuleConfig::from_list(" , ,").rules.is_empty());
    }

    #[test]
    fn test_from_env() {
        std::env::set_var("HOSTMATCH_TEST_FROM_ENV", "a.com,b.com");
        let config = RuleConfig::from_env("HOSTMATCH_TEST_FROM_ENV").unwrap();
        assert_eq!(config.name, "HOSTMATCH_TEST_FROM_ENV");
        assert_eq!(config.rules, vec!["a.com", "b.com"]);

        assert!(matches!(
            RuleConfig::from_env("HOSTMATCH_TEST_UNSET_VAR"),
            Err(Error::EnvNotSet(_))
        ));
    }

    #[test]
    fn test_from_lines() {
        let text = r#"
# Comment
localhost
10.0.0.0/8   # private

*.example.com/api/**
"#;
        let config = RuleConfig::from_lines(text.as_bytes()).unwrap();
        assert_eq!(
            config.rules,
            vec!["localhost", "10.0.0.0/8", "*.example.com/api/**"]
        );
    }

    #[test]
    fn test_from_yaml() {
        let yaml = "name: bypass\nrules:\n  - localhost\n  - 192.168.0.0/16\n";
        let config = RuleConfig::from_yaml_reader(yaml.as_bytes()).unwrap();
        assert_eq!(config.name, "bypass");
        assert_eq!(config.rules, vec!["localhost", "192.168.0.0/16"]);

        let list = "- a.com\n- b.com\n";
        let config = RuleConfig::from_yaml_reader(list.as_bytes()).unwrap();
        assert_eq!(config.rules, vec!["a.com", "b.com"]);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{"rules": ["localhost", "::1"]}"#;
        let config = RuleConfig::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(config.name, "");
        assert_eq!(config.rules, vec!["localhost", "::1"]);

        assert!(RuleConfig::from_json_reader("{".as_bytes()).is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"["example.com", "10.0.0.0/8"]"#).unwrap();

        let config = RuleConfig::from_file(file.path()).unwrap();
        assert_eq!(config.rules, vec!["example.com", "10.0.0.0/8"]);
        assert!(!config.name.is_empty());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "localhost\n# skip\n*.local").unwrap();
        let config = RuleConfig::from_file(file.path()).unwrap();
        assert_eq!(config.rules, vec!["localhost", "*.local"]);
    }

    #[test]
    fn test_from_missing_file() {
        let result = RuleConfig::from_file(Path::new("/nonexistent/hostmatch/rules.txt"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_merge() {
        let mut config = RuleConfig::from_list("a.com");
        config.merge(RuleConfig::from_list("b.com,c.com"));
        assert_eq!(config.rules, vec!["a.com", "b.com", "c.com"]);
    }
}
