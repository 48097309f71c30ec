//! Browser `window.history`

use carbrand_core::{Error, History, Location, Result};
use wasm_bindgen::JsValue;

/// HTML5 history backend
///
/// `back` and `forward` only ask the browser to move; the move lands later
/// as a `popstate` event, which the host forwards to `Router::pop`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHistory;

impl BrowserHistory {
    fn window() -> Result<web_sys::Window> {
        web_sys::window().ok_or_else(|| Error::History("no window".to_string()))
    }

    fn history() -> Result<web_sys::History> {
        Self::window()?.history().map_err(js_err)
    }

    /// Location currently in the address bar
    pub fn current_location() -> Result<Location> {
        let location = Self::window()?.location();
        let pathname = location.pathname().map_err(js_err)?;
        let search = location.search().map_err(js_err)?;
        let hash = location.hash().map_err(js_err)?;
        Ok(Location::parse(&format!("{}{}{}", pathname, search, hash)))
    }
}

impl History for BrowserHistory {
    fn push(&mut self, location: &Location) -> Result<()> {
        Self::history()?
            .push_state_with_url(&JsValue::NULL, "", Some(&location.full_path()))
            .map_err(js_err)
    }

    fn replace(&mut self, location: &Location) -> Result<()> {
        Self::history()?
            .replace_state_with_url(&JsValue::NULL, "", Some(&location.full_path()))
            .map_err(js_err)
    }

    fn back(&mut self) -> Result<Option<Location>> {
        Self::history()?.back().map_err(js_err)?;
        Ok(None)
    }

    fn forward(&mut self) -> Result<Option<Location>> {
        Self::history()?.forward().map_err(js_err)?;
        Ok(None)
    }
}

fn js_err(e: JsValue) -> Error {
    Error::History(format!("{:?}", e))
}
