//! Navigation guards
//!
//! A guard runs before a navigation commits and decides whether it
//! proceeds, goes somewhere else, or stops. Guards are chained; the first
//! decision other than `Proceed` wins.

use crate::config::{PublicPages, RouterConfig};
use crate::storage::Storage;
use crate::Location;

/// Decision returned by a guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Let the navigation continue
    Proceed,
    /// Abandon the target and navigate here instead
    Redirect(String),
    /// Abandon the navigation entirely
    Block,
}

/// Guard trait - runs before every navigation
pub trait Guard: Send + Sync {
    fn check(&self, to: &Location, from: &Location) -> GuardDecision;
}

impl<F> Guard for F
where
    F: Fn(&Location, &Location) -> GuardDecision + Send + Sync,
{
    fn check(&self, to: &Location, from: &Location) -> GuardDecision {
        self(to, from)
    }
}

/// Guards in registration order
#[derive(Default)]
pub struct GuardChain {
    guards: Vec<Box<dyn Guard>>,
}

impl GuardChain {
    pub fn new() -> Self {
        Self { guards: Vec::new() }
    }

    pub fn add<G: Guard + 'static>(&mut self, guard: G) {
        self.guards.push(Box::new(guard));
    }

    /// Run guards until one does not proceed
    pub fn run(&self, to: &Location, from: &Location) -> GuardDecision {
        for guard in &self.guards {
            match guard.check(to, from) {
                GuardDecision::Proceed => continue,
                decision => return decision,
            }
        }
        GuardDecision::Proceed
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

impl std::fmt::Debug for GuardChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuardChain")
            .field("guards", &self.guards.len())
            .finish()
    }
}

/// Login gate
///
/// Navigations to anything outside the public pages need a non-empty
/// token in storage; without one they are sent to the login page. A
/// storage read that fails counts as no token.
pub struct AuthGuard<S> {
    storage: S,
    public_pages: PublicPages,
    token_key: String,
    login_path: String,
}

impl<S: Storage> AuthGuard<S> {
    pub fn new(storage: S, config: &RouterConfig) -> Self {
        Self {
            storage,
            public_pages: config.public_pages.clone(),
            token_key: config.token_key.clone(),
            login_path: config.login_path.clone(),
        }
    }

    /// Whether the session token is present
    pub fn is_authenticated(&self) -> bool {
        match self.storage.get(&self.token_key) {
            Ok(token) => token.is_some_and(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(key = %self.token_key, error = %e, "token read failed, treating as absent");
                false
            }
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: Storage> Guard for AuthGuard<S> {
    fn check(&self, to: &Location, _from: &Location) -> GuardDecision {
        let auth_required = !self.public_pages.contains(&to.path);
        if auth_required && !self.is_authenticated() {
            tracing::debug!(to = %to.path, login = %self.login_path, "no session token, redirecting");
            return GuardDecision::Redirect(self.login_path.clone());
        }
        GuardDecision::Proceed
    }
}

impl<S> std::fmt::Debug for AuthGuard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGuard")
            .field("public_pages", &self.public_pages)
            .field("token_key", &self.token_key)
            .field("login_path", &self.login_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::{Error, Result};

    struct FailingStorage;

    impl Storage for FailingStorage {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::Storage("unavailable".to_string()))
        }
    }

    fn check<S: Storage>(guard: &AuthGuard<S>, path: &str) -> GuardDecision {
        guard.check(&Location::parse(path), &Location::root())
    }

    #[test]
    fn test_redirects_without_token() {
        let guard = AuthGuard::new(MemoryStorage::new(), &RouterConfig::default());
        assert_eq!(check(&guard, "/cars"), GuardDecision::Redirect("/login".to_string()));
        assert_eq!(check(&guard, "/anything/else"), GuardDecision::Redirect("/login".to_string()));
    }

    #[test]
    fn test_login_always_proceeds() {
        let guard = AuthGuard::new(MemoryStorage::new(), &RouterConfig::default());
        assert_eq!(check(&guard, "/login"), GuardDecision::Proceed);
        assert_eq!(check(&guard, "/login/?next=/cars"), GuardDecision::Proceed);
    }

    #[test]
    fn test_token_proceeds() {
        let guard = AuthGuard::new(MemoryStorage::with("token", "abc123"), &RouterConfig::default());
        assert_eq!(check(&guard, "/cars"), GuardDecision::Proceed);
        assert_eq!(check(&guard, "/login"), GuardDecision::Proceed);
        assert!(guard.is_authenticated());
    }

    #[test]
    fn test_empty_token_is_absent() {
        let guard = AuthGuard::new(MemoryStorage::with("token", ""), &RouterConfig::default());
        assert_eq!(check(&guard, "/cars"), GuardDecision::Redirect("/login".to_string()));
    }

    #[test]
    fn test_storage_failure_is_absent() {
        let guard = AuthGuard::new(FailingStorage, &RouterConfig::default());
        assert!(!guard.is_authenticated());
        assert_eq!(check(&guard, "/cars"), GuardDecision::Redirect("/login".to_string()));
        assert_eq!(check(&guard, "/login"), GuardDecision::Proceed);
    }

    #[test]
    fn test_custom_config() {
        let config = RouterConfig::new()
            .login_path("/signin")
            .public_page("/about")
            .token_key("jwt");
        let guard = AuthGuard::new(MemoryStorage::with("token", "ignored"), &config);

        assert_eq!(check(&guard, "/about"), GuardDecision::Proceed);
        assert_eq!(check(&guard, "/cars"), GuardDecision::Redirect("/signin".to_string()));

        let guard = AuthGuard::new(MemoryStorage::with("jwt", "abc"), &config);
        assert_eq!(check(&guard, "/cars"), GuardDecision::Proceed);
    }

    #[test]
    fn test_chain_first_decision_wins() {
        let mut chain = GuardChain::new();
        chain.add(|_: &Location, _: &Location| GuardDecision::Proceed);
        chain.add(|to: &Location, _: &Location| {
            if to.path == "/admin" {
                GuardDecision::Block
            } else {
                GuardDecision::Proceed
            }
        });
        chain.add(|_: &Location, _: &Location| GuardDecision::Redirect("/late".to_string()));

        assert_eq!(chain.len(), 3);
        assert_eq!(
            chain.run(&Location::parse("/admin"), &Location::root()),
            GuardDecision::Block
        );
        assert_eq!(
            chain.run(&Location::parse("/cars"), &Location::root()),
            GuardDecision::Redirect("/late".to_string())
        );
    }

    #[test]
    fn test_empty_chain_proceeds() {
        let chain = GuardChain::new();
        assert!(chain.is_empty());
        assert_eq!(
            chain.run(&Location::parse("/cars"), &Location::root()),
            GuardDecision::Proceed
        );
    }
}
