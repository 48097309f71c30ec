//! Router configuration
//!
//! Built in code through the builder methods, or loaded from JSON:
//!
//! ```
//! use carbrand_core::RouterConfig;
//!
//! let config = RouterConfig::from_json(r#"{ "token_key": "jwt" }"#).unwrap();
//! assert_eq!(config.token_key, "jwt");
//! assert!(config.public_pages.contains("/login"));
//! ```

use crate::{Error, Result};
use serde::Deserialize;
use smallvec::SmallVec;

/// Paths reachable without a session token
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct PublicPages(SmallVec<[String; 4]>);

impl PublicPages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path; duplicates are ignored
    pub fn insert(&mut self, path: &str) {
        let path = carbrand_router::normalize(path);
        if !self.0.contains(&path) {
            self.0.push(path);
        }
    }

    /// Whether `path` is exempt from the login check
    pub fn contains(&self, path: &str) -> bool {
        let path = carbrand_router::normalize(path);
        self.0.iter().any(|p| *p == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for PublicPages {
    fn from(paths: Vec<String>) -> Self {
        let mut pages = Self::new();
        for path in &paths {
            pages.insert(path);
        }
        pages
    }
}

impl<'a> FromIterator<&'a str> for PublicPages {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut pages = Self::new();
        for path in iter {
            pages.insert(path);
        }
        pages
    }
}

/// Router configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Where unauthenticated navigations are sent
    pub login_path: String,
    /// Paths that skip the token check
    pub public_pages: PublicPages,
    /// Storage key holding the session token
    pub token_key: String,
    /// Guard redirects allowed within a single navigation
    pub max_redirects: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            public_pages: ["/login"].into_iter().collect(),
            token_key: "token".to_string(),
            max_redirects: 8,
        }
    }
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.login_path = carbrand_router::normalize(&config.login_path);
        config.validate()?;
        Ok(config)
    }

    /// Set the login page; it also becomes a public page
    pub fn login_path(mut self, path: &str) -> Self {
        self.login_path = carbrand_router::normalize(path);
        self.public_pages.insert(path);
        self
    }

    pub fn public_page(mut self, path: &str) -> Self {
        self.public_pages.insert(path);
        self
    }

    pub fn token_key(mut self, key: impl Into<String>) -> Self {
        self.token_key = key.into();
        self
    }

    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Check invariants the router relies on
    pub fn validate(&self) -> Result<()> {
        if !self.public_pages.contains(&self.login_path) {
            return Err(Error::LoginNotPublic(self.login_path.clone()));
        }
        if self.token_key.is_empty() {
            return Err(Error::Config("token_key must not be empty".to_string()));
        }
        if self.max_redirects == 0 {
            return Err(Error::Config("max_redirects must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RouterConfig::default();
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.token_key, "token");
        assert!(config.public_pages.contains("/login"));
        assert!(!config.public_pages.contains("/cars"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_login_path_becomes_public() {
        let config = RouterConfig::new().login_path("/signin/");
        assert_eq!(config.login_path, "/signin");
        assert!(config.public_pages.contains("/signin"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_public_pages_normalised() {
        let config = RouterConfig::new().public_page("about/").public_page("/about");
        assert!(config.public_pages.contains("/about/"));
        assert_eq!(config.public_pages.len(), 2);
    }

    #[test]
    fn test_from_json_partial() {
        let config = RouterConfig::from_json(r#"{ "max_redirects": 3 }"#).unwrap();
        assert_eq!(config.max_redirects, 3);
        assert_eq!(config.login_path, "/login");
    }

    #[test]
    fn test_from_json_login_not_public() {
        let err = RouterConfig::from_json(
            r#"{ "login_path": "/signin", "public_pages": ["/login"] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::LoginNotPublic(ref p) if p == "/signin"));
    }

    #[test]
    fn test_from_json_malformed() {
        let err = RouterConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validate_rejects_zero_redirects() {
        let config = RouterConfig::new().max_redirects(0);
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
