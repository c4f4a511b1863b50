//! Application Context
//!
//! App-wide values provided via the Leptos Context API: configuration, the
//! session, and the current route. Project id and role are *not* in here;
//! they travel as an explicit `ProjectScope` prop.

use std::sync::Arc;

use leptos::prelude::*;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::routes::{self, Route};
use crate::session::Session;

#[derive(Clone)]
pub struct AppContext {
    config: Arc<AppConfig>,
    pub session: Session,
    /// Guarded route being shown - read
    pub route: ReadSignal<Route>,
    /// Guarded route being shown - write
    set_route: WriteSignal<Route>,
}

impl AppContext {
    pub fn new(config: AppConfig, session: Session, route: (ReadSignal<Route>, WriteSignal<Route>)) -> Self {
        Self {
            config: Arc::new(config),
            session,
            route: route.0,
            set_route: route.1,
        }
    }

    /// Fresh client bound to the shared session
    pub fn api(&self) -> ApiClient {
        ApiClient::new(&self.config, self.session.clone())
    }

    /// Change screens; the address bar follows
    pub fn navigate(&self, route: Route) {
        log::debug!("[ROUTE] -> {}", route.to_hash());
        routes::navigate(&route);
        self.set_route.set(route);
    }

    /// Address bar changed underneath us (back/forward)
    pub fn sync_route(&self, route: Route) {
        if self.route.get_untracked() != route {
            self.set_route.set(route);
        }
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
