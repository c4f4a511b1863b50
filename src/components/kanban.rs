//! Kanban Board Component
//!
//! Three status columns with drag-and-drop between them. A drop is applied
//! to the board immediately; a rejected update puts the board back the way
//! it was at drop time.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use super::alert;
use crate::api::kanban;
use crate::board::{self, DropPlan, Settled, MOVE_REJECTED_MESSAGE};
use crate::context::use_app_context;
use crate::liveness::Liveness;
use crate::models::{Ticket, TicketStatus};
use crate::permissions::can_drag;
use crate::project_scope::ProjectScope;
use crate::routes::{ProjectPage, Route};
use crate::store::{store_begin_drop, store_load, store_settle, BoardState, BoardStateStoreFields, BoardStore};

use leptos_dragdrop::*;

#[component]
pub fn Kanban(scope: ProjectScope) -> impl IntoView {
    let ctx = use_app_context();
    let alive = Liveness::for_current_owner();

    let store: BoardStore = Store::new(BoardState::default());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);

    let draggable = can_drag(scope.role);
    let dnd = create_dnd_signals::<TicketStatus>(Signal::derive(move || draggable));

    // Initial load
    {
        let ctx = ctx.clone();
        let alive = alive.clone();
        spawn_local(async move {
            let result = kanban::board(&ctx.api(), scope.project_id).await;
            if !alive.is_alive() {
                return;
            }
            match result {
                Ok(columns) => {
                    let tickets = columns.into_tickets();
                    log::debug!("[KANBAN] loaded {} cards", tickets.len());
                    store_load(&store, tickets);
                }
                Err(err) => set_error.set(Some(err.user_message("Failed to load board"))),
            }
            set_loading.set(false);
        });
    }

    // Drop: apply locally, send, settle
    {
        let ctx = ctx.clone();
        let alive = alive.clone();
        bind_global_mouseup(dnd, move |ticket_id, to: TicketStatus| {
            if !alive.is_alive() {
                return;
            }
            match store_begin_drop(&store, ticket_id, to, scope.role) {
                DropPlan::Rejected => log::debug!("[KANBAN] drop of #{} refused for {}", ticket_id, scope.role),
                DropPlan::NoOp => {}
                DropPlan::Move(pending) => {
                    log::info!("[KANBAN] #{} {} -> {}", ticket_id, pending.from.as_str(), pending.to.as_str());
                    let ctx = ctx.clone();
                    let alive = alive.clone();
                    spawn_local(async move {
                        let result = board::commit_move(&ctx.api(), &pending).await;
                        if !alive.is_alive() {
                            return;
                        }
                        if let Settled::RolledBack(_) = store_settle(&store, pending, result) {
                            alert(MOVE_REJECTED_MESSAGE);
                        }
                    });
                }
            }
        });
    }

    // Status of the card being dragged, for drop hints
    let dragging_from = Memo::new(move |_| {
        let id = dnd.dragging_id_read.get()?;
        store.tickets().with(|tickets| tickets.iter().find(|t| t.id == id).map(|t| t.status))
    });

    let open = Callback::new(move |ticket_id: u32| {
        ctx.navigate(Route::Project { id: scope.project_id, page: ProjectPage::Ticket(ticket_id) });
    });

    view! {
        <div class="kanban-page">
            <div class="kanban-header">
                <h2>"Kanban Board"</h2>
                <Show when=move || { store.in_flight().get() > 0 }>
                    <span class="saving">"Saving…"</span>
                </Show>
            </div>
            <Show when=move || !draggable>
                <p class="read-only-note">"You have read-only access to this board."</p>
            </Show>
            {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}

            <Show when=move || !loading.get() fallback=|| view! { <p class="loading">"Loading board..."</p> }>
                <div class="kanban-board">
                    {TicketStatus::ALL.into_iter().map(|status| view! {
                        <KanbanColumn
                            status=status
                            store=store
                            dnd=dnd
                            dragging_from=dragging_from
                            on_open=open
                        />
                    }).collect_view()}
                </div>
            </Show>
        </div>
    }
}

/// One status column; also the drop zone for that status
#[component]
fn KanbanColumn(
    status: TicketStatus,
    store: BoardStore,
    dnd: DndSignals<TicketStatus>,
    dragging_from: Memo<Option<TicketStatus>>,
    on_open: Callback<u32>,
) -> impl IntoView {
    let cards = Memo::new(move |_| store.tickets().with(|tickets| board::column(tickets, status)));

    let on_mouseenter = make_on_zone_mouseenter(dnd, status);
    let on_mouseleave = make_on_mouseleave(dnd);
    let column_class = move || {
        let mut class = String::from("kanban-column");
        if is_drop_target(&dnd, status) {
            class.push_str(" drop-target");
        }
        if dragging_from.get().is_some_and(|from| board::is_suggested_target(from, status)) {
            class.push_str(" suggested");
        }
        class
    };

    view! {
        <div class=column_class on:mouseenter=on_mouseenter on:mouseleave=on_mouseleave>
            <div class="kanban-column-header">
                <span class="column-title">{status.label()}</span>
                <span class="column-count">{move || cards.get().len()}</span>
            </div>
            <div class="kanban-cards">
                <For
                    each=move || cards.get()
                    key=|t| (t.id, t.status, t.title.clone())
                    children=move |ticket: Ticket| {
                        let id = ticket.id;
                        let on_mousedown = make_on_mousedown(dnd, id);
                        let is_dragging = move || dnd.dragging_id_read.get() == Some(id);
                        view! {
                            <div
                                class=move || if is_dragging() { "kanban-card dragging" } else { "kanban-card" }
                                class:draggable=move || dnd.enabled.get()
                                on:mousedown=on_mousedown
                                on:click=move |_| {
                                    if !dnd.drag_just_ended_read.get_untracked() {
                                        on_open.run(id);
                                    }
                                }
                            >
                                <span class="card-id">"#" {id}</span>
                                <span class="card-title">{ticket.title}</span>
                                <span class=format!("card-priority {}", ticket.priority.as_str())>
                                    {ticket.priority.label()}
                                </span>
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}
