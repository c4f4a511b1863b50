//! Kanban Board Logic
//!
//! Optimistic status moves: plan a drop, apply it locally, send the update,
//! then settle. A failed update restores the snapshot taken at drop time.
//!
//! Moves are not serialized. If a second drop lands before the first request
//! resolves and the first one fails, its rollback also discards the second
//! move locally.

use crate::api::{tickets, ApiClient, Transport};
use crate::error::ApiError;
use crate::models::{Role, Ticket, TicketStatus};
use crate::permissions::can_drag;

/// Alert shown when the server refuses a move
pub const MOVE_REJECTED_MESSAGE: &str = "Status change not allowed";

/// A move that has been applied locally but not yet confirmed
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMove {
    pub ticket_id: u32,
    pub from: TicketStatus,
    pub to: TicketStatus,
    /// Board exactly as it was before the drop
    pub snapshot: Vec<Ticket>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropPlan {
    /// Role may not move cards; nothing is sent
    Rejected,
    /// Same column or unknown card; nothing is sent
    NoOp,
    Move(PendingMove),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Settled {
    Confirmed,
    RolledBack(ApiError),
}

pub fn plan_drop(board: &[Ticket], ticket_id: u32, to: TicketStatus, role: Role) -> DropPlan {
    if !can_drag(role) {
        return DropPlan::Rejected;
    }
    let Some(ticket) = board.iter().find(|t| t.id == ticket_id) else {
        return DropPlan::NoOp;
    };
    if ticket.status == to {
        return DropPlan::NoOp;
    }
    DropPlan::Move(PendingMove {
        ticket_id,
        from: ticket.status,
        to,
        snapshot: board.to_vec(),
    })
}

/// Set one card's status in place; false if the card is not on the board
pub fn apply_status(board: &mut [Ticket], ticket_id: u32, status: TicketStatus) -> bool {
    match board.iter_mut().find(|t| t.id == ticket_id) {
        Some(ticket) => {
            ticket.status = status;
            true
        }
        None => false,
    }
}

/// Send the status update for an applied move
pub async fn commit_move<T: Transport>(api: &ApiClient<T>, pending: &PendingMove) -> Result<Ticket, ApiError> {
    tickets::update_status(api, pending.ticket_id, pending.to).await
}

/// Keep the optimistic state on success, restore the snapshot on failure
pub fn settle(board: &mut Vec<Ticket>, pending: PendingMove, result: Result<Ticket, ApiError>) -> Settled {
    match result {
        Ok(_) => Settled::Confirmed,
        Err(err) => {
            log::warn!(
                "[KANBAN] move of #{} {} -> {} rejected: {}",
                pending.ticket_id,
                pending.from.as_str(),
                pending.to.as_str(),
                err
            );
            *board = pending.snapshot;
            Settled::RolledBack(err)
        }
    }
}

/// Cards in one column, board order preserved
pub fn column(board: &[Ticket], status: TicketStatus) -> Vec<Ticket> {
    board.iter().filter(|t| t.status == status).cloned().collect()
}

/// Highlight hint for a drop zone while `from` is being dragged
pub fn is_suggested_target(from: TicketStatus, to: TicketStatus) -> bool {
    from.allowed_next().contains(&to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake;
    use crate::models::{Priority, TicketType};

    fn make_ticket(id: u32, status: TicketStatus) -> Ticket {
        Ticket {
            id,
            title: format!("Ticket {}", id),
            description: None,
            status,
            priority: Priority::Medium,
            ticket_type: TicketType::Task,
            project_id: 1,
            assigned_to: None,
            is_deleted: None,
        }
    }

    fn scenario_board() -> Vec<Ticket> {
        vec![make_ticket(1, TicketStatus::Todo), make_ticket(2, TicketStatus::InProgress)]
    }

    fn statuses(board: &[Ticket]) -> Vec<(u32, TicketStatus)> {
        board.iter().map(|t| (t.id, t.status)).collect()
    }

    fn expect_move(plan: DropPlan) -> PendingMove {
        match plan {
            DropPlan::Move(pending) => pending,
            other => panic!("expected a move, got {:?}", other),
        }
    }

    const UPDATED: &str = r#"{"id":1,"title":"Ticket 1","description":null,"type":"task","status":"done","priority":"medium","project_id":1,"assigned_to":null}"#;

    #[test]
    fn test_successful_move_changes_only_target() {
        let board = vec![
            make_ticket(1, TicketStatus::Todo),
            make_ticket(2, TicketStatus::InProgress),
            make_ticket(3, TicketStatus::Done),
        ];
        for ticket in &board {
            for to in TicketStatus::ALL.into_iter().filter(|s| *s != ticket.status) {
                let mut working = board.clone();
                let pending = expect_move(plan_drop(&working, ticket.id, to, Role::Developer));
                assert!(apply_status(&mut working, pending.ticket_id, pending.to));
                let updated = make_ticket(ticket.id, to);
                assert_eq!(settle(&mut working, pending, Ok(updated)), Settled::Confirmed);

                for (before, after) in board.iter().zip(&working) {
                    if before.id == ticket.id {
                        assert_eq!(after.status, to);
                    } else {
                        assert_eq!(before, after);
                    }
                }
            }
        }
    }

    #[test]
    fn test_failed_move_restores_snapshot() {
        let board = scenario_board();
        for ticket in &board {
            for to in TicketStatus::ALL.into_iter().filter(|s| *s != ticket.status) {
                let mut working = board.clone();
                let pending = expect_move(plan_drop(&working, ticket.id, to, Role::Admin));
                apply_status(&mut working, pending.ticket_id, pending.to);
                let settled = settle(&mut working, pending, Err(ApiError::Validation("no".into())));
                assert!(matches!(settled, Settled::RolledBack(_)));
                assert_eq!(working, board);
            }
        }
    }

    #[test]
    fn test_viewer_never_plans_a_move() {
        let board = scenario_board();
        for ticket in &board {
            for to in TicketStatus::ALL {
                assert_eq!(plan_drop(&board, ticket.id, to, Role::Viewer), DropPlan::Rejected);
            }
        }
    }

    #[test]
    fn test_same_column_and_unknown_card_are_noops() {
        let board = scenario_board();
        assert_eq!(plan_drop(&board, 1, TicketStatus::Todo, Role::Admin), DropPlan::NoOp);
        assert_eq!(plan_drop(&board, 99, TicketStatus::Done, Role::Admin), DropPlan::NoOp);
    }

    #[tokio::test]
    async fn test_scenario_confirmed() {
        let (api, transport) = fake::client();
        transport.respond(200, UPDATED);
        let mut board = scenario_board();

        let pending = expect_move(plan_drop(&board, 1, TicketStatus::Done, Role::Developer));
        apply_status(&mut board, pending.ticket_id, pending.to);
        assert_eq!(statuses(&board), vec![(1, TicketStatus::Done), (2, TicketStatus::InProgress)]);

        let result = commit_move(&api, &pending).await;
        assert_eq!(settle(&mut board, pending, result), Settled::Confirmed);
        assert_eq!(statuses(&board), vec![(1, TicketStatus::Done), (2, TicketStatus::InProgress)]);
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_scenario_rejected() {
        let (api, transport) = fake::client();
        transport.respond(400, r#"{"detail":"Invalid status transition: todo → done"}"#);
        let mut board = scenario_board();

        let pending = expect_move(plan_drop(&board, 1, TicketStatus::Done, Role::Developer));
        apply_status(&mut board, pending.ticket_id, pending.to);
        assert_eq!(statuses(&board), vec![(1, TicketStatus::Done), (2, TicketStatus::InProgress)]);

        let result = commit_move(&api, &pending).await;
        assert!(matches!(settle(&mut board, pending, result), Settled::RolledBack(_)));
        assert_eq!(statuses(&board), vec![(1, TicketStatus::Todo), (2, TicketStatus::InProgress)]);
    }

    #[test]
    fn test_racing_moves_last_rollback_wins() {
        let mut board = scenario_board();

        let first = expect_move(plan_drop(&board, 1, TicketStatus::InProgress, Role::Admin));
        apply_status(&mut board, first.ticket_id, first.to);
        let second = expect_move(plan_drop(&board, 2, TicketStatus::Done, Role::Admin));
        apply_status(&mut board, second.ticket_id, second.to);
        assert_eq!(statuses(&board), vec![(1, TicketStatus::InProgress), (2, TicketStatus::Done)]);

        // Second confirms first, then the first request fails
        assert_eq!(settle(&mut board, second, Ok(make_ticket(2, TicketStatus::Done))), Settled::Confirmed);
        settle(&mut board, first, Err(ApiError::Network("timeout".into())));

        // The first snapshot predates the second move, so that move is lost locally
        assert_eq!(statuses(&board), statuses(&scenario_board()));
    }

    #[test]
    fn test_columns_and_hints() {
        let board = vec![
            make_ticket(1, TicketStatus::Todo),
            make_ticket(2, TicketStatus::Done),
            make_ticket(3, TicketStatus::Todo),
        ];
        let todo: Vec<u32> = column(&board, TicketStatus::Todo).iter().map(|t| t.id).collect();
        assert_eq!(todo, vec![1, 3]);
        assert!(column(&board, TicketStatus::InProgress).is_empty());

        assert!(is_suggested_target(TicketStatus::Todo, TicketStatus::InProgress));
        assert!(!is_suggested_target(TicketStatus::Todo, TicketStatus::Done));
    }
}
