//! Kanban Accessor
//!
//! Server-grouped board view. Status changes go through
//! `tickets::update_status`, not through this resource.

use crate::error::ApiError;
use crate::models::KanbanColumns;

use super::{ApiClient, Transport};

pub async fn board<T: Transport>(api: &ApiClient<T>, project_id: u32) -> Result<KanbanColumns, ApiError> {
    api.get(&format!("/kanban/project/{}", project_id)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake;
    use crate::models::TicketStatus;

    #[tokio::test]
    async fn test_board_flattens_in_column_order() {
        let (api, transport) = fake::client();
        transport.respond(
            200,
            r#"{"todo":[],"in_progress":[{"id":5,"title":"B","description":null,"type":"task","status":"in_progress","priority":"low","project_id":1,"assigned_to":null}],
                "done":[{"id":2,"title":"A","description":null,"type":"bug","status":"done","priority":"high","project_id":1,"assigned_to":3}]}"#,
        );

        let tickets = board(&api, 1).await.unwrap().into_tickets();
        let statuses: Vec<TicketStatus> = tickets.iter().map(|t| t.status).collect();
        assert_eq!(statuses, vec![TicketStatus::InProgress, TicketStatus::Done]);
        assert_eq!(transport.last_request().url, "http://api.test/kanban/project/1");
    }
}
