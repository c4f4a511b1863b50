//! FixHub Frontend App
//!
//! Owns the route signal, applies the auth guard and picks the screen.

use leptos::prelude::*;

use crate::components::{Layout, Login, ProjectLayout, Projects, Register};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::routes::{self, guard, ProjectPage, Route};
use crate::session::Session;

/// Top-level screen; a project keeps its screen (and loaded role) while
/// only the page inside it changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Login,
    Register,
    Projects,
    Project(u32),
    NotFound,
}

impl From<Route> for Screen {
    fn from(route: Route) -> Self {
        match route {
            Route::Login => Screen::Login,
            Route::Register => Screen::Register,
            Route::Projects => Screen::Projects,
            Route::Project { id, .. } => Screen::Project(id),
            Route::NotFound => Screen::NotFound,
        }
    }
}

#[component]
pub fn App(config: AppConfig, session: Session) -> impl IntoView {
    let initial = guard(routes::current(), session.is_authenticated());
    let (route, set_route) = signal(initial);
    if initial != routes::current() {
        routes::navigate(&initial);
    }

    let ctx = AppContext::new(config, session.clone(), (route, set_route));
    provide_context(ctx.clone());

    // Back/forward and plain links
    {
        let ctx = ctx.clone();
        routes::listen(move |next| ctx.sync_route(next));
    }

    // Auth guard: re-runs on route change and on login/logout/expiry
    {
        let ctx = ctx.clone();
        Effect::new(move |_| {
            let requested = route.get();
            let allowed = guard(requested, session.is_authenticated());
            if allowed != requested {
                log::debug!("[ROUTE] guard {:?} -> {:?}", requested, allowed);
                ctx.navigate(allowed);
            }
        });
    }

    let screen = Memo::new(move |_| Screen::from(route.get()));
    let page = Memo::new(move |_| match route.get() {
        Route::Project { page, .. } => page,
        _ => ProjectPage::Dashboard,
    });

    move || match screen.get() {
        Screen::Login => view! { <Login /> }.into_any(),
        Screen::Register => view! { <Register /> }.into_any(),
        Screen::Projects => view! { <Layout><Projects /></Layout> }.into_any(),
        Screen::Project(id) => view! {
            <Layout>
                <ProjectLayout project_id=id page=page />
            </Layout>
        }
        .into_any(),
        Screen::NotFound => view! {
            <Layout>
                <div class="not-found">
                    <h2>"Page not found"</h2>
                    <a href=Route::Projects.to_hash()>"Back to projects"</a>
                </div>
            </Layout>
        }
        .into_any(),
    }
}
