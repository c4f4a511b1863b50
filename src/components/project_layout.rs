//! Project Layout
//!
//! Resolves the caller's role once per project visit, then renders the
//! requested page with that scope. Switching pages inside the project
//! reuses the loaded role.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{Dashboard, Kanban, ProjectMembers, TicketDetail, TicketList};
use crate::context::use_app_context;
use crate::liveness::Liveness;
use crate::project_scope::{load_scope, ProjectScope, ScopeLoad, ACCESS_DENIED_MESSAGE};
use crate::routes::ProjectPage;

#[component]
pub fn ProjectLayout(project_id: u32, #[prop(into)] page: Signal<ProjectPage>) -> impl IntoView {
    let ctx = use_app_context();
    let alive = Liveness::for_current_owner();
    let (load, set_load) = signal(ScopeLoad::Loading);

    spawn_local(async move {
        let result = load_scope(&ctx.api(), project_id).await;
        if alive.is_alive() {
            log::debug!("[SCOPE] project {} -> {:?}", project_id, result);
            set_load.set(result);
        }
    });

    move || match load.get() {
        ScopeLoad::Loading => view! { <p class="loading">"Loading project…"</p> }.into_any(),
        ScopeLoad::Denied => view! { <p class="access-denied">{ACCESS_DENIED_MESSAGE}</p> }.into_any(),
        ScopeLoad::Failed(msg) => view! { <p class="form-error">{msg}</p> }.into_any(),
        ScopeLoad::Ready(scope) => view! { <ProjectPageView scope=scope page=page /> }.into_any(),
    }
}

#[component]
fn ProjectPageView(scope: ProjectScope, page: Signal<ProjectPage>) -> impl IntoView {
    move || match page.get() {
        ProjectPage::Dashboard => view! { <Dashboard scope=scope /> }.into_any(),
        ProjectPage::Tickets => view! { <TicketList scope=scope /> }.into_any(),
        ProjectPage::Ticket(ticket_id) => view! { <TicketDetail scope=scope ticket_id=ticket_id /> }.into_any(),
        ProjectPage::Kanban => view! { <Kanban scope=scope /> }.into_any(),
        ProjectPage::Members => view! { <ProjectMembers scope=scope /> }.into_any(),
    }
}
