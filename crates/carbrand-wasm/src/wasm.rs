//! WASM bindings for JavaScript interop

use crate::history::BrowserHistory;
use crate::storage::LocalStorage;
use carbrand_core::{create_router, AppView, Navigation, Router};
use wasm_bindgen::prelude::*;

// ============================================================================
// Navigation result
// ============================================================================

/// Committed navigation as seen from JS
#[wasm_bindgen]
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationResult {
    /// A route matched the final path
    pub found: bool,
    path: String,
    view: Option<String>,
    redirected_from: Option<String>,
}

#[wasm_bindgen]
impl NavigationResult {
    /// Final path, with query and hash
    #[wasm_bindgen(getter)]
    pub fn path(&self) -> String {
        self.path.clone()
    }

    /// View name to render (`"login"`, `"cars"`), undefined when not found
    #[wasm_bindgen(getter)]
    pub fn view(&self) -> Option<String> {
        self.view.clone()
    }

    /// Originally requested path when a redirect happened
    #[wasm_bindgen(getter)]
    pub fn redirected_from(&self) -> Option<String> {
        self.redirected_from.clone()
    }
}

impl From<Navigation<AppView>> for NavigationResult {
    fn from(nav: Navigation<AppView>) -> Self {
        Self {
            found: nav.found,
            path: nav.location.full_path(),
            view: nav.view.map(|v| v.as_str().to_string()),
            redirected_from: nav.redirected_from.map(|l| l.full_path()),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

/// App router over `localStorage` and `window.history`
#[wasm_bindgen]
pub struct WasmRouter {
    inner: Router<AppView>,
}

#[wasm_bindgen]
impl WasmRouter {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WasmRouter, JsValue> {
        let inner = create_router(LocalStorage)
            .map_err(to_js)?
            .with_history(BrowserHistory);
        Ok(WasmRouter { inner })
    }

    /// Resolve the address bar's current location, replacing its entry
    pub fn start(&mut self) -> Result<NavigationResult, JsValue> {
        let location = BrowserHistory::current_location().map_err(to_js)?;
        self.replace(&location.full_path())
    }

    pub fn push(&mut self, path: &str) -> Result<NavigationResult, JsValue> {
        self.inner.push(path).map(Into::into).map_err(to_js)
    }

    pub fn replace(&mut self, path: &str) -> Result<NavigationResult, JsValue> {
        self.inner.replace(path).map(Into::into).map_err(to_js)
    }

    /// Call from a `popstate` listener with the new location
    pub fn pop(&mut self, path: &str) -> Result<NavigationResult, JsValue> {
        self.inner.pop(path).map(Into::into).map_err(to_js)
    }

    /// Ask the browser to go back; completes through `pop`
    pub fn back(&mut self) -> Result<(), JsValue> {
        self.inner.back().map(|_| ()).map_err(to_js)
    }

    pub fn forward(&mut self) -> Result<(), JsValue> {
        self.inner.forward().map(|_| ()).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn current_path(&self) -> String {
        self.inner.current().full_path()
    }

    #[wasm_bindgen(getter)]
    pub fn current_view(&self) -> Option<String> {
        self.inner.current_view().map(|v| v.as_str().to_string())
    }
}

fn to_js(e: carbrand_core::Error) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbrand_core::Location;

    #[test]
    fn test_navigation_result_from_redirect() {
        let nav = Navigation {
            location: Location::parse("/login"),
            view: Some(AppView::Login),
            found: true,
            params: Vec::new(),
            redirected_from: Some(Location::parse("/cars?page=2")),
        };

        let result = NavigationResult::from(nav);
        assert!(result.found);
        assert_eq!(result.path(), "/login");
        assert_eq!(result.view().as_deref(), Some("login"));
        assert_eq!(result.redirected_from().as_deref(), Some("/cars?page=2"));
    }

    #[test]
    fn test_navigation_result_not_found() {
        let nav: Navigation<AppView> = Navigation {
            location: Location::parse("/brands#top"),
            view: None,
            found: false,
            params: Vec::new(),
            redirected_from: None,
        };

        let result = NavigationResult::from(nav);
        assert!(!result.found);
        assert_eq!(result.path(), "/brands#top");
        assert_eq!(result.view(), None);
        assert_eq!(result.redirected_from(), None);
    }
}
