//! Routes of the car-brand front end
//!
//! | Path     | Behavior                   |
//! |----------|----------------------------|
//! | `/`      | redirect to `/login`       |
//! | `/login` | login view                 |
//! | `/cars`  | car listing (needs token)  |

use crate::guard::AuthGuard;
use crate::route::{Route, RouteTable};
use crate::router::Router;
use crate::storage::Storage;
use crate::{Result, RouterConfig};

/// Views the front end can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppView {
    Login,
    Cars,
}

impl AppView {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppView::Login => "login",
            AppView::Cars => "cars",
        }
    }
}

impl std::fmt::Display for AppView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The application's route table, rooted at `login_path`
pub fn app_routes(login_path: &str) -> Result<RouteTable<AppView>> {
    RouteTable::new(vec![
        Route::redirect("/", login_path),
        Route::view(login_path, AppView::Login).named("login"),
        Route::view("/cars", AppView::Cars).named("cars"),
    ])
}

/// Router with the app's routes and the login gate over `storage`
pub fn create_router<S: Storage + 'static>(storage: S) -> Result<Router<AppView>> {
    create_router_with(storage, RouterConfig::default())
}

/// [`create_router`] with a custom configuration
pub fn create_router_with<S: Storage + 'static>(
    storage: S,
    config: RouterConfig,
) -> Result<Router<AppView>> {
    let table = app_routes(&config.login_path)?;
    let guard = AuthGuard::new(storage, &config);

    let mut router = Router::new(config)?;
    router.register_routes(table);
    router.before_each(guard);
    Ok(router)
}
