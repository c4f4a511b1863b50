//! Project Members Screen

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::members;
use crate::context::use_app_context;
use crate::draft::required;
use crate::error::load_error;
use crate::liveness::Liveness;
use crate::models::{ProjectMember, Role};
use crate::permissions::can_manage_members;
use crate::project_scope::ProjectScope;

/// Roles offered when adding someone; admins are made server-side
const ASSIGNABLE_ROLES: &[Role] = &[Role::Developer, Role::Viewer];

#[component]
pub fn ProjectMembers(scope: ProjectScope) -> impl IntoView {
    let ctx = use_app_context();
    let alive = Liveness::for_current_owner();

    let (list, set_list) = signal(Vec::<ProjectMember>::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (reload, set_reload) = signal(0u32);

    Effect::new(move |_| {
        let _ = reload.get();
        let ctx = ctx.clone();
        let alive = alive.clone();
        spawn_local(async move {
            let result = members::list_members(&ctx.api(), scope.project_id).await;
            if !alive.is_alive() {
                return;
            }
            set_error.set(load_error(&result, "Failed to load members"));
            if let Ok(loaded) = result {
                set_list.set(loaded);
            }
        });
    });

    view! {
        <div class="members-page">
            <h2>"Members"</h2>
            <Show when=move || can_manage_members(scope.role)>
                <AddMemberForm scope=scope on_added=Callback::new(move |_| set_reload.update(|n| *n += 1)) />
            </Show>
            {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
            <table class="member-table">
                <thead>
                    <tr>
                        <th>"Member"</th>
                        <th>"Role"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || list.get()
                        key=|m| (m.id, m.role)
                        children=|member| view! {
                            <tr>
                                <td>{member.display_name()}</td>
                                <td class=format!("role {}", member.role.as_str())>{member.role.label()}</td>
                            </tr>
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}

/// Admin-only form
#[component]
fn AddMemberForm(scope: ProjectScope, on_added: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let alive = Liveness::for_current_owner();

    let (email, set_email) = signal(String::new());
    let (role, set_role) = signal(Role::Developer);
    let (error, set_error) = signal::<Option<String>>(None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let email_value = email.get_untracked();
        let email_value = match required(&email_value, "Email") {
            Ok(value) => value.to_string(),
            Err(msg) => {
                set_error.set(Some(msg));
                return;
            }
        };
        let role_value = role.get_untracked();
        set_error.set(None);

        let ctx = ctx.clone();
        let alive = alive.clone();
        spawn_local(async move {
            let result = members::add_member(&ctx.api(), scope.project_id, &email_value, role_value).await;
            if !alive.is_alive() {
                return;
            }
            match result {
                Ok(_) => {
                    log::info!("[MEMBERS] added {} as {}", email_value, role_value);
                    set_email.set(String::new());
                    on_added.run(());
                }
                Err(err) => set_error.set(Some(err.user_message("Failed to add member"))),
            }
        });
    };

    view! {
        <form class="add-member-form" on:submit=on_submit>
            <input
                type="email"
                placeholder="Member email"
                prop:value=move || email.get()
                on:input=move |ev| set_email.set(event_target_value(&ev))
            />
            <select on:change=move |ev| {
                if let Some(r) = Role::from_key(&event_target_value(&ev)) {
                    set_role.set(r);
                }
            }>
                {ASSIGNABLE_ROLES.iter().map(|r| view! {
                    <option value=r.as_str() selected=move || role.get() == *r>{r.label()}</option>
                }).collect_view()}
            </select>
            <button type="submit">"Add Member"</button>
            {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
        </form>
    }
}
