//! Path rule implementation.

/// PathMatcher matches the path part of an address (the text after the
/// first `/`, without that slash).
///
/// A path without `*` matches only itself. Otherwise it is a pattern:
/// - `*` matches a non-empty run of characters other than `/`
/// - `**` matches everything that follows; with text after it, the path
///   must end with that text
///
/// # Examples
/// ```
/// use hostmatch::rule::PathMatcher;
///
/// let single = PathMatcher::parse("api/*");
/// assert!(single.matches("api/users"));
/// assert!(!single.matches("api/users/1"));
///
/// let deep = PathMatcher::parse("api/**");
/// assert!(deep.matches("api/users/1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathMatcher {
    /// Byte-identical path
    Exact(String),
    /// Glob with `*` and `**`
    Pattern(String),
}

impl PathMatcher {
    /// Parse a path rule. Any string is a valid path rule.
    pub fn parse(path: &str) -> Self {
        if path.contains('*') {
            PathMatcher::Pattern(path.to_string())
        } else {
            PathMatcher::Exact(path.to_string())
        }
    }

    /// Check whether a path matches this rule.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathMatcher::Exact(exact) => exact == path,
            PathMatcher::Pattern(pattern) => glob_match(pattern.as_bytes(), path.as_bytes()),
        }
    }
}

impl From<&str> for PathMatcher {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

/// Scan pattern and path in lockstep.
fn glob_match(pattern: &[u8], path: &[u8]) -> bool {
    let mut pi = 0;
    let mut si = 0;

    while si < path.len() && pi < pattern.len() {
        if pattern[pi] == b'*' {
            if pattern.get(pi + 1) == Some(&b'*') {
                let tail = &pattern[pi + 2..];
                return tail.is_empty() || path.ends_with(tail);
            }

            match path[si..].iter().position(|&b| b == b'/') {
                // '*' never matches an empty segment
                Some(0) => return false,
                Some(n) => {
                    si += n;
                    pi += 1;
                }
                // The rest of the path is one segment, so '*' must end the pattern
                None => return pi + 1 == pattern.len(),
            }
        } else if pattern[pi] == path[si] {
            pi += 1;
            si += 1;
        } else {
            return false;
        }
    }

    pi == pattern.len() && si == path.len()
}
