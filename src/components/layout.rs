//! Layout Component
//!
//! Sidebar with navigation and logout, content on the right.

use leptos::prelude::*;

use super::DiagnosticsPanel;
use crate::api::auth;
use crate::context::use_app_context;
use crate::routes::{ProjectPage, Route};

/// Project navigation entries: (page, label)
const PROJECT_LINKS: &[(ProjectPage, &str)] = &[
    (ProjectPage::Dashboard, "Dashboard"),
    (ProjectPage::Tickets, "Tickets"),
    (ProjectPage::Kanban, "Kanban"),
    (ProjectPage::Members, "Members"),
];

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let ctx = use_app_context();
    let route = ctx.route;
    let project_id = Memo::new(move |_| route.get().project_id());

    let on_logout = move |_| {
        auth::logout(&ctx.api());
    };

    view! {
        <div class="app-layout">
            <aside class="sidebar">
                <div>
                    <h1 class="sidebar-title">"FixHub"</h1>
                    <nav class="sidebar-nav">
                        <a href=Route::Projects.to_hash() class="nav-link">"Projects"</a>
                        {move || project_id.get().map(|id| {
                            PROJECT_LINKS.iter().map(|(page, label)| {
                                let target = Route::Project { id, page: *page };
                                let is_active = move || route.get() == target;
                                view! {
                                    <a
                                        href=target.to_hash()
                                        class=move || if is_active() { "nav-link nested active" } else { "nav-link nested" }
                                    >
                                        {*label}
                                    </a>
                                }
                            }).collect_view()
                        })}
                    </nav>
                </div>
                <div class="sidebar-footer">
                    <DiagnosticsPanel />
                    <button class="logout-btn" on:click=on_logout>"Logout"</button>
                </div>
            </aside>
            <main class="main-content">
                {children()}
            </main>
        </div>
    }
}
