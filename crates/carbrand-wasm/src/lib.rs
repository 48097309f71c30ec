//! carbrand-wasm: Browser bindings for the carbrand router
//!
//! Backs the router with `window.localStorage` and `window.history`
//! and exports `WasmRouter` to JavaScript.

#[cfg(feature = "wasm")]
pub mod history;
#[cfg(feature = "wasm")]
pub mod storage;

#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::*;

#[cfg(feature = "wasm")]
pub use history::BrowserHistory;
#[cfg(feature = "wasm")]
pub use storage::LocalStorage;

pub use carbrand_core::{AppView, Navigation};
