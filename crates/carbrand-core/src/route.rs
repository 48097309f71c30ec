//! Route records and the validated route table

use crate::{Error, Result};
use carbrand_router::RouteTrie;
use std::collections::HashMap;

/// What a route does once matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget<V> {
    /// Render a view
    View(V),
    /// Send the navigation to another path
    Redirect(String),
}

/// A single route definition
#[derive(Debug, Clone)]
pub struct Route<V> {
    path: String,
    name: Option<String>,
    target: RouteTarget<V>,
}

impl<V> Route<V> {
    /// Route rendering `view`
    pub fn view(path: &str, view: V) -> Self {
        Self {
            path: path.to_string(),
            name: None,
            target: RouteTarget::View(view),
        }
    }

    /// Route redirecting unconditionally to `to`
    ///
    /// `to` may reuse params captured by `path`, as in
    /// `Route::redirect("/old/:id", "/cars/:id")`.
    pub fn redirect(path: &str, to: &str) -> Self {
        Self {
            path: path.to_string(),
            name: None,
            target: RouteTarget::Redirect(carbrand_router::normalize(to)),
        }
    }

    /// Name used for lookups through [`RouteTable::by_name`]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn target(&self) -> &RouteTarget<V> {
        &self.target
    }

    /// The view this route renders, `None` for redirects
    pub fn view_ref(&self) -> Option<&V> {
        match &self.target {
            RouteTarget::View(view) => Some(view),
            RouteTarget::Redirect(_) => None,
        }
    }
}

/// Outcome of looking a path up in the table
#[derive(Debug)]
pub struct Resolved<'a, V> {
    /// Path after record redirects
    pub path: String,
    /// Final record, `None` when nothing matches
    pub route: Option<&'a Route<V>>,
    /// Params captured by the final record
    pub params: Vec<(String, String)>,
    /// Whether a redirect record was followed
    pub redirected: bool,
}

impl<V> Resolved<'_, V> {
    pub fn view(&self) -> Option<&V> {
        self.route.and_then(Route::view_ref)
    }

    pub fn is_found(&self) -> bool {
        self.route.is_some()
    }
}

/// Immutable, validated set of routes
///
/// Construction fails on duplicate paths, redirects to paths no record
/// handles, and redirect cycles, so a table that exists always resolves.
#[derive(Debug)]
pub struct RouteTable<V> {
    routes: Vec<Route<V>>,
    trie: RouteTrie,
    names: HashMap<String, usize>,
}

impl<V> RouteTable<V> {
    pub fn new(routes: Vec<Route<V>>) -> Result<Self> {
        let mut trie = RouteTrie::new();
        let mut names = HashMap::new();

        for (index, route) in routes.iter().enumerate() {
            trie.insert(&route.path, index as u32)?;
            if let Some(name) = &route.name {
                if names.insert(name.clone(), index).is_some() {
                    return Err(Error::DuplicateRoute(format!("name {}", name)));
                }
            }
        }

        let table = Self { routes, trie, names };
        table.check_redirects()?;

        tracing::debug!(routes = table.routes.len(), "route table built");
        Ok(table)
    }

    fn check_redirects(&self) -> Result<()> {
        for route in &self.routes {
            let RouteTarget::Redirect(first) = &route.target else {
                continue;
            };

            let captured: Vec<&str> = carbrand_router::segments(&route.path)
                .filter_map(param_name)
                .collect();
            if let Some(missing) = carbrand_router::segments(first)
                .filter_map(param_name)
                .find(|name| !captured.contains(name))
            {
                return Err(Error::InvalidPath(format!(
                    "redirect {} -> {} uses param {} that the source does not capture",
                    route.path, first, missing
                )));
            }

            let mut to = first;
            let mut hops = 0;
            loop {
                let Some(next) = self.lookup(to) else {
                    return Err(Error::UnknownRedirectTarget {
                        from: route.path.clone(),
                        to: to.clone(),
                    });
                };
                match &self.routes[next.0].target {
                    RouteTarget::View(_) => break,
                    RouteTarget::Redirect(again) => {
                        hops += 1;
                        if hops > self.routes.len() {
                            return Err(Error::RedirectLoop(route.path.clone()));
                        }
                        to = again;
                    }
                }
            }
        }
        Ok(())
    }

    fn lookup(&self, path: &str) -> Option<(usize, Vec<(String, String)>)> {
        self.trie
            .find(path)
            .map(|m| (m.route_id as usize, m.params))
    }

    /// Look up `path`, following redirect records to the final route
    pub fn resolve(&self, path: &str) -> Resolved<'_, V> {
        let mut path = carbrand_router::normalize(path);
        let mut redirected = false;

        // Cycles are rejected in `new`, so this runs at most once per record
        for _ in 0..=self.routes.len() {
            let Some((index, params)) = self.lookup(&path) else {
                break;
            };
            let route = &self.routes[index];
            match &route.target {
                RouteTarget::Redirect(to) => {
                    path = fill_params(to, &params);
                    redirected = true;
                }
                RouteTarget::View(_) => {
                    return Resolved {
                        path,
                        route: Some(route),
                        params,
                        redirected,
                    };
                }
            }
        }

        Resolved {
            path,
            route: None,
            params: Vec::new(),
            redirected,
        }
    }

    pub fn by_name(&self, name: &str) -> Option<&Route<V>> {
        self.names.get(name).map(|&index| &self.routes[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route<V>> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Param name of a `:name` or `*name` segment (`*` for a bare wildcard)
fn param_name(segment: &str) -> Option<&str> {
    if let Some(name) = segment.strip_prefix(':') {
        Some(name)
    } else if let Some(name) = segment.strip_prefix('*') {
        Some(if name.is_empty() { "*" } else { name })
    } else {
        None
    }
}

/// Substitute captured params into a redirect target
fn fill_params(target: &str, params: &[(String, String)]) -> String {
    let filled: Vec<&str> = carbrand_router::segments(target)
        .map(|segment| {
            param_name(segment)
                .and_then(|name| params.iter().find(|(k, _)| k == name))
                .map_or(segment, |(_, value)| value.as_str())
        })
        .collect();
    carbrand_router::normalize(&filled.join("/"))
}

impl<V> Default for RouteTable<V> {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            trie: RouteTrie::new(),
            names: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable<&'static str> {
        RouteTable::new(vec![
            Route::redirect("/", "/login"),
            Route::view("/login", "login").named("login"),
            Route::view("/cars", "cars").named("cars"),
            Route::view("/cars/:id", "car"),
        ])
        .unwrap()
    }

    #[test]
    fn test_resolve_view() {
        let table = table();
        let resolved = table.resolve("/cars");
        assert_eq!(resolved.path, "/cars");
        assert_eq!(resolved.view(), Some(&"cars"));
        assert!(!resolved.redirected);
    }

    #[test]
    fn test_resolve_follows_redirect() {
        let table = table();
        let resolved = table.resolve("/");
        assert_eq!(resolved.path, "/login");
        assert_eq!(resolved.view(), Some(&"login"));
        assert!(resolved.redirected);
    }

    #[test]
    fn test_resolve_params() {
        let table = table();
        let resolved = table.resolve("/cars/7/");
        assert_eq!(resolved.view(), Some(&"car"));
        assert_eq!(resolved.params, vec![("id".to_string(), "7".to_string())]);
    }

    #[test]
    fn test_resolve_unknown() {
        let table = table();
        let resolved = table.resolve("/brands");
        assert_eq!(resolved.path, "/brands");
        assert!(!resolved.is_found());
        assert_eq!(resolved.view(), None);
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let err = RouteTable::new(vec![Route::view("/cars", 1), Route::view("/cars/", 2)])
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateRoute(ref p) if p == "/cars/"));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let err = RouteTable::new(vec![
            Route::view("/a", 1).named("x"),
            Route::view("/b", 2).named("x"),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateRoute(_)));
    }

    #[test]
    fn test_relative_path_rejected() {
        let err = RouteTable::new(vec![Route::view("cars", 1)]).unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
    }

    #[test]
    fn test_dangling_redirect_rejected() {
        let err = RouteTable::new(vec![Route::<u8>::redirect("/", "/home")]).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownRedirectTarget { ref from, ref to } if from == "/" && to == "/home"
        ));
    }

    #[test]
    fn test_redirect_cycle_rejected() {
        let err = RouteTable::new(vec![
            Route::<u8>::redirect("/a", "/b"),
            Route::<u8>::redirect("/b", "/a"),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::RedirectLoop(_)));
    }

    #[test]
    fn test_redirect_chain() {
        let table = RouteTable::new(vec![
            Route::redirect("/", "/home"),
            Route::redirect("/home", "/cars"),
            Route::view("/cars", "cars"),
        ])
        .unwrap();
        let resolved = table.resolve("/");
        assert_eq!(resolved.path, "/cars");
        assert_eq!(resolved.view(), Some(&"cars"));
    }

    #[test]
    fn test_redirect_carries_params() {
        let table = RouteTable::new(vec![
            Route::redirect("/old/:id", "/cars/:id"),
            Route::redirect("/archive/*rest", "/docs/*rest"),
            Route::view("/cars/:id", "car"),
            Route::view("/docs/*rest", "docs"),
        ])
        .unwrap();

        let resolved = table.resolve("/old/7");
        assert_eq!(resolved.path, "/cars/7");
        assert_eq!(resolved.view(), Some(&"car"));
        assert_eq!(resolved.params, vec![("id".to_string(), "7".to_string())]);

        let resolved = table.resolve("/archive/2023/brands");
        assert_eq!(resolved.path, "/docs/2023/brands");
        assert_eq!(resolved.params, vec![("rest".to_string(), "2023/brands".to_string())]);
    }

    #[test]
    fn test_redirect_with_uncaptured_param_rejected() {
        let err = RouteTable::new(vec![
            Route::redirect("/old", "/cars/:id"),
            Route::view("/cars/:id", "car"),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
    }

    #[test]
    fn test_by_name() {
        let table = table();
        assert_eq!(table.by_name("cars").map(Route::path), Some("/cars"));
        assert!(table.by_name("missing").is_none());
        assert_eq!(table.len(), 4);
    }
}
