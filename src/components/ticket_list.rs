//! Ticket List Screen
//!
//! Project tickets with status/priority/assignee/text filters and, for roles
//! that may create, a new ticket form.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{members, tickets};
use crate::context::use_app_context;
use crate::draft::{optional, parse_assignee, required};
use crate::error::load_error;
use crate::liveness::{Liveness, RequestSeq};
use crate::models::{NewTicket, Priority, ProjectMember, Ticket, TicketFilter, TicketStatus, TicketType};
use crate::permissions::can_create_ticket;
use crate::project_scope::ProjectScope;
use crate::routes::{ProjectPage, Route};

const SEARCH_DEBOUNCE_MS: u32 = 300;

#[component]
pub fn TicketList(scope: ProjectScope) -> impl IntoView {
    let ctx = use_app_context();
    let alive = Liveness::for_current_owner();

    let (list, set_list) = signal(Vec::<Ticket>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);
    let (filter, set_filter) = signal(TicketFilter::default());
    let (reload, set_reload) = signal(0u32);
    let (team, set_team) = signal(Vec::<ProjectMember>::new());
    let loads = RequestSeq::new();
    let keystrokes = RequestSeq::new();

    // Members feed the assignee filter and the create form
    {
        let ctx = ctx.clone();
        let alive = alive.clone();
        spawn_local(async move {
            let result = members::list_members(&ctx.api(), scope.project_id).await;
            if !alive.is_alive() {
                return;
            }
            match result {
                Ok(loaded) => set_team.set(loaded),
                Err(err) => log::warn!("[TICKETS] member list unavailable: {}", err),
            }
        });
    }

    // Reload whenever the filter changes or a ticket was created; a response
    // is dropped if a newer load has started since
    {
        let ctx = ctx.clone();
        Effect::new(move |_| {
            let _ = reload.get();
            let current = filter.get();
            let ctx = ctx.clone();
            let alive = alive.clone();
            let loads = loads.clone();
            let ticket = loads.next();
            set_loading.set(true);
            spawn_local(async move {
                let api = ctx.api();
                let result = if current.is_empty() {
                    tickets::list_tickets(&api, scope.project_id).await
                } else {
                    tickets::search_tickets(&api, scope.project_id, &current).await
                };
                if !alive.is_alive() || !loads.is_current(ticket) {
                    log::debug!("[TICKETS] dropping stale load #{}", ticket);
                    return;
                }
                set_error.set(load_error(&result, "Failed to load tickets"));
                if let Ok(loaded) = result {
                    set_list.set(loaded);
                }
                set_loading.set(false);
            });
        });
    }

    let open = Callback::new(move |ticket_id: u32| {
        ctx.navigate(Route::Project { id: scope.project_id, page: ProjectPage::Ticket(ticket_id) });
    });

    view! {
        <div class="tickets-page">
            <h2>"Tickets"</h2>

            <Show when=move || can_create_ticket(scope.role)>
                <NewTicketForm
                    scope=scope
                    team=team
                    on_created=Callback::new(move |_| set_reload.update(|n| *n += 1))
                />
            </Show>

            <div class="ticket-filters">
                <select on:change=move |ev| {
                    let status = TicketStatus::from_key(&event_target_value(&ev));
                    set_filter.update(|f| f.status = status);
                }>
                    <option value="">"All statuses"</option>
                    {TicketStatus::ALL.into_iter().map(|s| view! {
                        <option value=s.as_str()>{s.label()}</option>
                    }).collect_view()}
                </select>
                <select on:change=move |ev| {
                    let priority = Priority::from_key(&event_target_value(&ev));
                    set_filter.update(|f| f.priority = priority);
                }>
                    <option value="">"All priorities"</option>
                    {Priority::ALL.into_iter().map(|p| view! {
                        <option value=p.as_str()>{p.label()}</option>
                    }).collect_view()}
                </select>
                <select on:change=move |ev| {
                    let assignee = parse_assignee(&event_target_value(&ev));
                    set_filter.update(|f| f.assignee = assignee);
                }>
                    <option value="">"Any assignee"</option>
                    <For
                        each=move || team.get()
                        key=|m| m.id
                        children=|member| view! {
                            <option value=member.id.to_string()>{member.display_name()}</option>
                        }
                    />
                </select>
                <input
                    type="search"
                    placeholder="Search title or description"
                    on:input=move |ev| {
                        let query = optional(&event_target_value(&ev)).map(str::to_string);
                        let keystrokes = keystrokes.clone();
                        let ticket = keystrokes.next();
                        spawn_local(async move {
                            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
                            // Only the last keystroke in a burst searches
                            if keystrokes.is_current(ticket) {
                                set_filter.try_update(|f| f.query = query);
                            }
                        });
                    }
                />
            </div>

            {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}

            <Show when=move || !loading.get() fallback=|| view! { <p class="loading">"Loading tickets..."</p> }>
                <Show
                    when=move || !list.get().is_empty()
                    fallback=|| view! { <p class="empty-state">"No tickets found."</p> }
                >
                    <table class="ticket-table">
                        <thead>
                            <tr>
                                <th>"#"</th>
                                <th>"Title"</th>
                                <th>"Type"</th>
                                <th>"Priority"</th>
                                <th>"Status"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || list.get()
                                key=|t| (t.id, t.status, t.priority, t.title.clone())
                                children=move |ticket| {
                                    let id = ticket.id;
                                    view! {
                                        <tr class="ticket-row" on:click=move |_| open.run(id)>
                                            <td>{id}</td>
                                            <td>{ticket.title}</td>
                                            <td>{ticket.ticket_type.label()}</td>
                                            <td class=format!("priority {}", ticket.priority.as_str())>{ticket.priority.label()}</td>
                                            <td class=format!("status {}", ticket.status.as_str())>{ticket.status.label()}</td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </Show>
            </Show>
        </div>
    }
}

/// New ticket form; shown to admins and developers
#[component]
fn NewTicketForm(
    scope: ProjectScope,
    team: ReadSignal<Vec<ProjectMember>>,
    on_created: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let alive = Liveness::for_current_owner();

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (ticket_type, set_ticket_type) = signal(TicketType::default());
    let (priority, set_priority) = signal(Priority::default());
    let (assignee, set_assignee) = signal::<Option<u32>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title_value = title.get_untracked();
        let title_value = match required(&title_value, "Title") {
            Ok(value) => value.to_string(),
            Err(msg) => {
                set_error.set(Some(msg));
                return;
            }
        };
        let description_value = optional(&description.get_untracked()).map(str::to_string);
        let ticket_type_value = ticket_type.get_untracked();
        let priority_value = priority.get_untracked();
        let assignee_value = assignee.get_untracked();
        set_error.set(None);

        let ctx = ctx.clone();
        let alive = alive.clone();
        spawn_local(async move {
            let new_ticket = NewTicket {
                title: &title_value,
                description: description_value.as_deref(),
                ticket_type: ticket_type_value,
                priority: priority_value,
                project_id: scope.project_id,
                assigned_to: assignee_value,
            };
            let result = tickets::create_ticket(&ctx.api(), &new_ticket).await;
            if !alive.is_alive() {
                return;
            }
            match result {
                Ok(ticket) => {
                    log::info!("[TICKETS] created #{}", ticket.id);
                    set_title.set(String::new());
                    set_description.set(String::new());
                    on_created.run(());
                }
                Err(err) => set_error.set(Some(err.user_message("Failed to create ticket"))),
            }
        });
    };

    view! {
        <form class="new-ticket-form" on:submit=on_submit>
            <input
                type="text"
                placeholder="Title"
                prop:value=move || title.get()
                on:input=move |ev| set_title.set(event_target_value(&ev))
            />
            <textarea
                placeholder="Description"
                prop:value=move || description.get()
                on:input=move |ev| set_description.set(event_target_value(&ev))
            />
            <div class="new-ticket-row">
                <select on:change=move |ev| {
                    if let Some(t) = TicketType::from_key(&event_target_value(&ev)) {
                        set_ticket_type.set(t);
                    }
                }>
                    {TicketType::ALL.into_iter().map(|t| view! {
                        <option value=t.as_str() selected=move || ticket_type.get() == t>{t.label()}</option>
                    }).collect_view()}
                </select>
                <select on:change=move |ev| {
                    if let Some(p) = Priority::from_key(&event_target_value(&ev)) {
                        set_priority.set(p);
                    }
                }>
                    {Priority::ALL.into_iter().map(|p| view! {
                        <option value=p.as_str() selected=move || priority.get() == p>{p.label()}</option>
                    }).collect_view()}
                </select>
                <select on:change=move |ev| set_assignee.set(parse_assignee(&event_target_value(&ev)))>
                    <option value="">"Unassigned"</option>
                    <For
                        each=move || team.get()
                        key=|m| m.id
                        children=|member| view! {
                            <option value=member.id.to_string()>{member.display_name()}</option>
                        }
                    />
                </select>
                <button type="submit">"Create Ticket"</button>
            </div>
            {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
        </form>
    }
}
