//! Ticket Detail Screen
//!
//! What the caller may do is derived from their role and the ticket's
//! assignee on every render. Editing goes through a `TicketDraft`; the
//! server's answer replaces it wholesale.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{alert, Comments, ConfirmButton};
use crate::api::{attachments, members, tickets};
use crate::context::use_app_context;
use crate::draft::{assignee_value, parse_assignee, TicketDraft};
use crate::liveness::Liveness;
use crate::models::{Attachment, Priority, ProjectMember, Ticket, TicketStatus};
use crate::permissions::TicketPermissions;
use crate::project_scope::ProjectScope;
use crate::routes::{ProjectPage, Route};

#[component]
pub fn TicketDetail(scope: ProjectScope, ticket_id: u32) -> impl IntoView {
    let ctx = use_app_context();
    let alive = Liveness::for_current_owner();

    let (ticket, set_ticket) = signal::<Option<Ticket>>(None);
    let (load_error, set_load_error) = signal::<Option<String>>(None);
    let (team, set_team) = signal(Vec::<ProjectMember>::new());
    let (files, set_files) = signal(Vec::<Attachment>::new());
    // Some while the edit form is open
    let (draft, set_draft) = signal::<Option<TicketDraft>>(None);
    let (save_error, set_save_error) = signal::<Option<String>>(None);

    // Load ticket, members and attachments
    {
        let ctx = ctx.clone();
        let alive = alive.clone();
        spawn_local(async move {
            let api = ctx.api();
            let loaded = tickets::get_ticket(&api, scope.project_id, ticket_id).await;
            if !alive.is_alive() {
                return;
            }
            match loaded {
                Ok(t) => set_ticket.set(Some(t)),
                Err(err) => {
                    set_load_error.set(Some(err.user_message("Failed to load ticket")));
                    return;
                }
            }

            match members::list_members(&api, scope.project_id).await {
                Ok(loaded) if alive.is_alive() => set_team.set(loaded),
                Ok(_) => return,
                Err(err) => log::warn!("[TICKET] member list unavailable: {}", err),
            }
            match attachments::list_attachments(&api, ticket_id).await {
                Ok(loaded) if alive.is_alive() => set_files.set(loaded),
                Ok(_) => {}
                Err(err) => log::warn!("[TICKET] attachments unavailable: {}", err),
            }
        });
    }

    let perms = Memo::new(move |_| {
        ticket
            .get()
            .map(|t| TicketPermissions::derive(scope.role, t.assigned_to))
            .unwrap_or(TicketPermissions { can_edit: false, can_reassign: false, can_archive: false })
    });

    let assignee_name = move |assignee: Option<u32>| match assignee {
        None => "Unassigned".to_string(),
        Some(id) => team
            .get()
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.display_name())
            .unwrap_or_else(|| format!("User #{}", id)),
    };

    let on_save = {
        let ctx = ctx.clone();
        let alive = alive.clone();
        move |_: web_sys::MouseEvent| {
            let Some(current) = draft.get_untracked() else { return };
            let update = match current.to_update() {
                Ok(update) => update,
                Err(msg) => {
                    set_save_error.set(Some(msg));
                    return;
                }
            };
            set_save_error.set(None);
            let ctx = ctx.clone();
            let alive = alive.clone();
            spawn_local(async move {
                let result = tickets::update_ticket(&ctx.api(), ticket_id, &update).await;
                if !alive.is_alive() {
                    return;
                }
                match result {
                    Ok(saved) => {
                        log::info!("[TICKET] saved #{}", saved.id);
                        set_ticket.set(Some(saved));
                        set_draft.set(None);
                    }
                    Err(err) => set_save_error.set(Some(err.user_message("Failed to save ticket"))),
                }
            });
        }
    };

    let on_status = {
        let ctx = ctx.clone();
        let alive = alive.clone();
        move |ev: web_sys::Event| {
            let Some(status) = TicketStatus::from_key(&event_target_value(&ev)) else { return };
            let ctx = ctx.clone();
            let alive = alive.clone();
            spawn_local(async move {
                let result = tickets::update_status(&ctx.api(), ticket_id, status).await;
                if !alive.is_alive() {
                    return;
                }
                match result {
                    Ok(updated) => set_ticket.set(Some(updated)),
                    Err(err) => {
                        // Re-render puts the select back on the server's status
                        set_ticket.update(|_| {});
                        alert(&err.user_message("Status change not allowed"));
                    }
                }
            });
        }
    };

    let on_archive = Callback::new({
        let ctx = ctx.clone();
        move |_: ()| {
            let ctx = ctx.clone();
            let alive = alive.clone();
            spawn_local(async move {
                let result = tickets::archive_ticket(&ctx.api(), ticket_id).await;
                if !alive.is_alive() {
                    return;
                }
                match result {
                    Ok(_) => {
                        log::info!("[TICKET] archived #{}", ticket_id);
                        ctx.navigate(Route::Project { id: scope.project_id, page: ProjectPage::Tickets });
                    }
                    Err(err) => alert(&err.user_message("Failed to archive ticket")),
                }
            });
        }
    });

    let back = move |_| ctx.navigate(Route::Project { id: scope.project_id, page: ProjectPage::Tickets });

    view! {
        <div class="ticket-detail">
            <button class="back-btn" on:click=back>"← Back to tickets"</button>
            {move || load_error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}

            {move || ticket.get().map(|t| {
                let editing = draft.get().is_some();
                let can = perms.get();
                let status = t.status;
                let priority = t.priority;
                let assigned_to = t.assigned_to;
                let description = t.description.clone();
                view! {
                    <div class="ticket-header">
                        <h2>"#" {t.id} " " {t.title.clone()}</h2>
                        <span class="ticket-type">{t.ticket_type.label()}</span>
                    </div>

                    <div class="ticket-fields">
                        <div class="field">
                            <label>"Status"</label>
                            {if can.can_edit && !editing {
                                view! {
                                    <select on:change=on_status.clone()>
                                        {TicketStatus::ALL.into_iter().map(|s| view! {
                                            <option value=s.as_str() selected=s == status>{s.label()}</option>
                                        }).collect_view()}
                                    </select>
                                }.into_any()
                            } else {
                                view! { <span class=format!("status {}", status.as_str())>{status.label()}</span> }.into_any()
                            }}
                        </div>
                        {(!editing).then(|| view! {
                            <div class="field">
                                <label>"Priority"</label>
                                <span class=format!("priority {}", priority.as_str())>{priority.label()}</span>
                            </div>
                            <div class="field">
                                <label>"Assignee"</label>
                                <span>{assignee_name(assigned_to)}</span>
                            </div>
                            <div class="field">
                                <label>"Description"</label>
                                <p class="ticket-description">
                                    {description.unwrap_or_else(|| "No description".to_string())}
                                </p>
                            </div>
                        })}
                    </div>
                }
            })}

            <Show when=move || draft.get().is_some()>
                <TicketEditForm
                    draft=draft
                    set_draft=set_draft
                    team=team
                    can_reassign=Signal::derive(move || perms.get().can_reassign)
                />
                {move || save_error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
                <div class="edit-actions">
                    <button class="save-btn" on:click=on_save.clone()>"Save"</button>
                    <button class="cancel-btn" on:click=move |_| {
                        set_save_error.set(None);
                        set_draft.set(None);
                    }>"Cancel"</button>
                </div>
            </Show>

            <div class="ticket-actions">
                <Show when=move || perms.get().can_edit && draft.get().is_none()>
                    <button class="edit-btn" on:click=move |_| {
                        if let Some(t) = ticket.get_untracked() {
                            set_draft.set(Some(TicketDraft::from_ticket(&t)));
                        }
                    }>"Edit"</button>
                </Show>
                <Show when=move || perms.get().can_archive>
                    <ConfirmButton
                        label="Archive"
                        prompt="Archive this ticket?"
                        button_class="archive-btn"
                        on_confirm=on_archive
                    />
                </Show>
            </div>

            <Show when=move || !files.get().is_empty()>
                <div class="attachments">
                    <h3>"Attachments"</h3>
                    <ul>
                        <For
                            each=move || files.get()
                            key=|a| a.id
                            children=|file| view! {
                                <li class="attachment">
                                    <span class="attachment-name">{file.filename}</span>
                                    <span class="attachment-date">{file.uploaded_at}</span>
                                </li>
                            }
                        />
                    </ul>
                </div>
            </Show>

            <Show when=move || ticket.get().is_some()>
                <Comments ticket_id=ticket_id />
            </Show>
        </div>
    }
}

/// Editable fields of the draft; assignment locked unless `can_reassign`
#[component]
fn TicketEditForm(
    draft: ReadSignal<Option<TicketDraft>>,
    set_draft: WriteSignal<Option<TicketDraft>>,
    team: ReadSignal<Vec<ProjectMember>>,
    can_reassign: Signal<bool>,
) -> impl IntoView {
    let edit = move |f: &dyn Fn(&mut TicketDraft)| {
        set_draft.update(|d| {
            if let Some(d) = d.as_mut() {
                f(d);
            }
        });
    };
    let current = move || draft.get().unwrap_or_else(|| TicketDraft {
        title: String::new(),
        description: String::new(),
        priority: Priority::default(),
        assignee: None,
    });

    view! {
        <div class="ticket-edit-form">
            <div class="field">
                <label>"Title"</label>
                <input
                    type="text"
                    prop:value=move || current().title
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        edit(&|d| d.title = value.clone());
                    }
                />
            </div>
            <div class="field">
                <label>"Description"</label>
                <textarea
                    prop:value=move || current().description
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        edit(&|d| d.description = value.clone());
                    }
                />
            </div>
            <div class="field">
                <label>"Priority"</label>
                <select on:change=move |ev| {
                    if let Some(p) = Priority::from_key(&event_target_value(&ev)) {
                        edit(&|d| d.priority = p);
                    }
                }>
                    {Priority::ALL.into_iter().map(|p| view! {
                        <option value=p.as_str() selected=move || current().priority == p>{p.label()}</option>
                    }).collect_view()}
                </select>
            </div>
            <div class="field">
                <label>"Assignee"</label>
                <select
                    disabled=move || !can_reassign.get()
                    prop:value=move || assignee_value(current().assignee)
                    on:change=move |ev| {
                        let assignee = parse_assignee(&event_target_value(&ev));
                        edit(&|d| d.assignee = assignee);
                    }
                >
                    <option value="">"Unassigned"</option>
                    <For
                        each=move || team.get()
                        key=|m| m.id
                        children=move |member| {
                            let id = member.id;
                            view! {
                                <option value=id.to_string() selected=move || current().assignee == Some(id)>
                                    {member.display_name()}
                                </option>
                            }
                        }
                    />
                </select>
            </div>
        </div>
    }
}
