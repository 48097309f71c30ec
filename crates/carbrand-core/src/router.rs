//! Navigation router
//!
//! Ties the route table, the guard chain and the history together. A
//! navigation goes through these steps:
//!
//! 1. parse the target into a [`Location`]
//! 2. follow redirect records in the table
//! 3. run the guards; a guard redirect restarts at step 2
//! 4. write the history and report the resolved view
//!
//! Unknown paths are guarded like any protected page. When the guards let
//! one through, the navigation lands on it with `found == false` and the
//! not-found view, if one is set.

use crate::guard::{Guard, GuardChain, GuardDecision};
use crate::history::{History, MemoryHistory, NavigationType};
use crate::route::{Resolved, RouteTable};
use crate::{Error, Location, Result, RouterConfig};

/// A committed navigation
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation<V> {
    /// Where the navigation ended up
    pub location: Location,
    /// View to render: the matched route's, or the not-found view
    pub view: Option<V>,
    /// Whether a route matched `location`
    pub found: bool,
    /// Params captured by the matched route
    pub params: Vec<(String, String)>,
    /// Originally requested location, set when any redirect happened
    pub redirected_from: Option<Location>,
}

impl<V> Navigation<V> {
    fn start() -> Self {
        Self {
            location: Location::root(),
            view: None,
            found: false,
            params: Vec::new(),
            redirected_from: None,
        }
    }

    /// Whether the navigation ended somewhere other than requested
    pub fn is_redirected(&self) -> bool {
        self.redirected_from.is_some()
    }

    /// Value of a captured path param
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Client-side navigation router
pub struct Router<V> {
    config: RouterConfig,
    table: RouteTable<V>,
    guards: GuardChain,
    history: Box<dyn History>,
    current: Navigation<V>,
    not_found: Option<V>,
}

impl<V> std::fmt::Debug for Router<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.table.len())
            .field("guards", &self.guards.len())
            .field("current", &self.current.location)
            .finish()
    }
}

impl<V: Clone> Router<V> {
    /// Router with no routes, no guards and an in-memory history at `/`
    pub fn new(config: RouterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            table: RouteTable::default(),
            guards: GuardChain::new(),
            history: Box::new(MemoryHistory::default()),
            current: Navigation::start(),
            not_found: None,
        })
    }

    /// Replace the history backend
    pub fn with_history<H: History + 'static>(mut self, history: H) -> Self {
        self.history = Box::new(history);
        self
    }

    /// Install the route table
    pub fn register_routes(&mut self, table: RouteTable<V>) {
        tracing::debug!(routes = table.len(), "routes registered");
        self.table = table;
    }

    /// Add a guard run before every navigation, after those already added
    pub fn before_each<G: Guard + 'static>(&mut self, guard: G) {
        self.guards.add(guard);
    }

    /// View reported for paths no route matches
    pub fn not_found(&mut self, view: V) {
        self.not_found = Some(view);
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn routes(&self) -> &RouteTable<V> {
        &self.table
    }

    pub fn current(&self) -> &Location {
        &self.current.location
    }

    pub fn current_view(&self) -> Option<&V> {
        self.current.view.as_ref()
    }

    pub fn current_navigation(&self) -> &Navigation<V> {
        &self.current
    }

    /// Table lookup for `path`, without guards
    pub fn resolve(&self, path: &str) -> Resolved<'_, V> {
        self.table.resolve(&Location::parse(path).path)
    }

    /// Navigate to `path`, adding a history entry
    pub fn push(&mut self, path: &str) -> Result<Navigation<V>> {
        self.navigate(Location::parse(path), NavigationType::Push)
    }

    /// Navigate to `path`, replacing the current history entry
    pub fn replace(&mut self, path: &str) -> Result<Navigation<V>> {
        self.navigate(Location::parse(path), NavigationType::Replace)
    }

    /// Navigate to a location the host history already moved to
    pub fn pop(&mut self, path: &str) -> Result<Navigation<V>> {
        self.navigate(Location::parse(path), NavigationType::Pop)
    }

    /// Go one entry back
    ///
    /// Returns `Ok(None)` when there is nothing to go back to, or when the
    /// history backend completes the move asynchronously (then the host
    /// reports it through [`Router::pop`]).
    pub fn back(&mut self) -> Result<Option<Navigation<V>>> {
        let Some(location) = self.history.back()? else {
            return Ok(None);
        };
        match self.navigate(location, NavigationType::Pop) {
            Ok(navigation) => Ok(Some(navigation)),
            Err(e) => {
                // Undo the cursor move
                if let Err(undo) = self.history.forward() {
                    tracing::warn!(error = %undo, "history cursor not restored after failed back");
                }
                Err(e)
            }
        }
    }

    /// Go one entry forward; see [`Router::back`]
    pub fn forward(&mut self) -> Result<Option<Navigation<V>>> {
        let Some(location) = self.history.forward()? else {
            return Ok(None);
        };
        match self.navigate(location, NavigationType::Pop) {
            Ok(navigation) => Ok(Some(navigation)),
            Err(e) => {
                if let Err(undo) = self.history.back() {
                    tracing::warn!(error = %undo, "history cursor not restored after failed forward");
                }
                Err(e)
            }
        }
    }

    fn navigate(&mut self, requested: Location, nav_type: NavigationType) -> Result<Navigation<V>> {
        let mut target = requested.clone();
        let mut redirected = false;
        let mut guard_redirects = 0;

        loop {
            let resolved = self.table.resolve(&target.path);
            if resolved.redirected {
                target = target.with_path(&resolved.path);
                redirected = true;
            }

            match self.guards.run(&target, &self.current.location) {
                GuardDecision::Proceed => {
                    let found = resolved.is_found();
                    let view = if found {
                        resolved.view().cloned()
                    } else {
                        self.not_found.clone()
                    };
                    let navigation = Navigation {
                        location: target,
                        view,
                        found,
                        params: resolved.params,
                        redirected_from: redirected.then_some(requested),
                    };
                    return self.commit(navigation, nav_type);
                }
                GuardDecision::Redirect(to) => {
                    guard_redirects += 1;
                    if guard_redirects > self.config.max_redirects {
                        tracing::warn!(requested = %requested, "too many guard redirects");
                        return Err(Error::RedirectLoop(requested.full_path()));
                    }
                    tracing::info!(from = %target.path, to = %to, "navigation redirected");
                    target = Location::parse(&to);
                    redirected = true;
                }
                GuardDecision::Block => {
                    tracing::debug!(to = %target, "navigation blocked");
                    return Err(Error::NavigationBlocked(target.full_path()));
                }
            }
        }
    }

    fn commit(&mut self, navigation: Navigation<V>, nav_type: NavigationType) -> Result<Navigation<V>> {
        match nav_type {
            NavigationType::Push => self.history.push(&navigation.location)?,
            NavigationType::Replace => self.history.replace(&navigation.location)?,
            NavigationType::Pop if navigation.is_redirected() => {
                self.history.replace(&navigation.location)?
            }
            NavigationType::Pop => {}
        }

        tracing::debug!(
            from = %self.current.location,
            to = %navigation.location,
            found = navigation.found,
            "navigation committed"
        );
        self.current = navigation.clone();
        Ok(navigation)
    }
}
