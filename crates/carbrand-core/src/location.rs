//! Navigation targets
//!
//! A raw target such as `/cars?page=2#top` is split into path, query and
//! hash. Matching and guards only ever look at the normalised path.

use std::fmt;

/// Parsed navigation target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Normalised path (`/`, `/cars`, ...)
    pub path: String,
    /// Query string without the leading `?`
    pub query: Option<String>,
    /// Fragment without the leading `#`
    pub hash: Option<String>,
}

impl Location {
    /// Parse a raw navigation target
    pub fn parse(raw: &str) -> Self {
        let (rest, hash) = match raw.split_once('#') {
            Some((rest, hash)) => (rest, non_empty(hash)),
            None => (raw, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, non_empty(query)),
            None => (rest, None),
        };

        Self {
            path: carbrand_router::normalize(path),
            query,
            hash,
        }
    }

    /// The location every router starts from
    pub fn root() -> Self {
        Self {
            path: "/".to_string(),
            query: None,
            hash: None,
        }
    }

    /// Same query and hash, different path
    pub fn with_path(&self, path: &str) -> Self {
        Self {
            path: carbrand_router::normalize(path),
            query: self.query.clone(),
            hash: self.hash.clone(),
        }
    }

    /// Path plus query and hash, as it would appear in the address bar
    pub fn full_path(&self) -> String {
        let mut out = self.path.clone();
        if let Some(query) = &self.query {
            out.push('?');
            out.push_str(query);
        }
        if let Some(hash) = &self.hash {
            out.push('#');
            out.push_str(hash);
        }
        out
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_path())
    }
}

impl From<&str> for Location {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}
