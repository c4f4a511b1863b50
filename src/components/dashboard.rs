//! Project Dashboard
//!
//! Ticket counts per status and shortcuts into the project.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::dashboard;
use crate::context::use_app_context;
use crate::liveness::Liveness;
use crate::models::{DashboardSummary, TicketStatus};
use crate::permissions::can_manage_members;
use crate::project_scope::ProjectScope;
use crate::routes::{ProjectPage, Route};

#[component]
pub fn Dashboard(scope: ProjectScope) -> impl IntoView {
    let ctx = use_app_context();
    let alive = Liveness::for_current_owner();
    let (summary, set_summary) = signal::<Option<DashboardSummary>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    {
        let ctx = ctx.clone();
        spawn_local(async move {
            let result = dashboard::project_dashboard(&ctx.api(), scope.project_id).await;
            if !alive.is_alive() {
                return;
            }
            match result {
                Ok(loaded) => set_summary.set(Some(loaded)),
                Err(err) => set_error.set(Some(err.user_message("Failed to load dashboard"))),
            }
        });
    }

    let go = move |page: ProjectPage| {
        let ctx = ctx.clone();
        move |_: web_sys::MouseEvent| ctx.navigate(Route::Project { id: scope.project_id, page })
    };

    view! {
        <div class="dashboard">
            <h2>"Project Dashboard"</h2>
            <p class="role-badge">"Your role: " {scope.role.label()}</p>

            {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}

            {move || summary.get().map(|summary| view! {
                <div class="status-cards">
                    {TicketStatus::ALL.into_iter().map(|status| view! {
                        <div class=format!("status-card {}", status.as_str())>
                            <span class="status-label">{status.label()}</span>
                            <span class="status-count">{summary.count(status)}</span>
                        </div>
                    }).collect_view()}
                    <div class="status-card total">
                        <span class="status-label">"Total"</span>
                        <span class="status-count">{summary.total()}</span>
                    </div>
                </div>
            })}

            <div class="dashboard-actions">
                <button on:click=go(ProjectPage::Tickets)>"View Tickets"</button>
                <button on:click=go(ProjectPage::Kanban)>"Kanban Board"</button>
                <Show when=move || can_manage_members(scope.role)>
                    <button on:click=go(ProjectPage::Members)>"Members"</button>
                </Show>
            </div>
        </div>
    }
}
