//! Kanban Board Store
//!
//! Uses Leptos reactive_stores so a status change re-renders only the
//! affected columns. Owned by one board screen; nothing is shared.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::board::{self, DropPlan, PendingMove, Settled};
use crate::error::ApiError;
use crate::models::{Role, Ticket, TicketStatus};

/// Board screen state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct BoardState {
    /// Cards on the board, in load order
    pub tickets: Vec<Ticket>,
    /// Moves applied locally and still awaiting the server
    pub in_flight: u32,
}

/// Type alias for the store
pub type BoardStore = Store<BoardState>;

// ========================
// Store Helper Functions
// ========================

/// Replace the whole board (initial load)
pub fn store_load(store: &BoardStore, tickets: Vec<Ticket>) {
    *store.tickets().write() = tickets;
    *store.in_flight().write() = 0;
}

/// Plan a drop against the current board and apply it optimistically
pub fn store_begin_drop(store: &BoardStore, ticket_id: u32, to: TicketStatus, role: Role) -> DropPlan {
    let plan = store
        .tickets()
        .with_untracked(|tickets| board::plan_drop(tickets, ticket_id, to, role));
    if let DropPlan::Move(pending) = &plan {
        board::apply_status(&mut store.tickets().write(), pending.ticket_id, pending.to);
        *store.in_flight().write() += 1;
    }
    plan
}

/// Fold the server's answer back in; rolls back to the snapshot on failure
pub fn store_settle(store: &BoardStore, pending: PendingMove, result: Result<Ticket, ApiError>) -> Settled {
    let settled = board::settle(&mut store.tickets().write(), pending, result);
    store.in_flight().update(|n| *n = n.saturating_sub(1));
    settled
}
