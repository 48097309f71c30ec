//! carbrand-core: Client-side navigation for the car-brand front end
//!
//! Maps URL paths to views and keeps protected pages behind a login gate.
//! Platform bindings (browser storage and history) live in carbrand-wasm;
//! everything here runs natively as well.
//!
//! ```
//! use carbrand_core::{create_router, AppView, MemoryStorage};
//!
//! let mut router = create_router(MemoryStorage::new()).unwrap();
//! let nav = router.push("/cars").unwrap();
//! assert_eq!(nav.location.path, "/login");
//! assert_eq!(nav.view, Some(AppView::Login));
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod app;
pub mod config;
pub mod error;
pub mod guard;
pub mod history;
pub mod location;
pub mod route;
pub mod router;
pub mod storage;

// Re-exports
pub use app::{app_routes, create_router, create_router_with, AppView};
pub use config::{PublicPages, RouterConfig};
pub use error::{Error, Result};
pub use guard::{AuthGuard, Guard, GuardChain, GuardDecision};
pub use history::{History, MemoryHistory, NavigationType};
pub use location::Location;
pub use route::{Resolved, Route, RouteTable, RouteTarget};
pub use router::{Navigation, Router};
pub use storage::{FileStorage, MemoryStorage, Storage};
