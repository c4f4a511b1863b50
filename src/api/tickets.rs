//! Ticket Accessors

use crate::error::ApiError;
use crate::models::{MessageResponse, NewTicket, StatusUpdate, Ticket, TicketFilter, TicketStatus, TicketUpdate};

use super::{query_string, ApiClient, Transport};

pub async fn list_tickets<T: Transport>(api: &ApiClient<T>, project_id: u32) -> Result<Vec<Ticket>, ApiError> {
    api.get(&format!("/tickets/project/{}", project_id)).await
}

/// The backend has no single-ticket GET; look it up in the project list
pub async fn get_ticket<T: Transport>(api: &ApiClient<T>, project_id: u32, ticket_id: u32) -> Result<Ticket, ApiError> {
    list_tickets(api, project_id)
        .await?
        .into_iter()
        .find(|t| t.id == ticket_id)
        .ok_or_else(|| ApiError::NotFound("Ticket not found".to_string()))
}

/// Filtered list, always scoped to `project_id`
pub async fn search_tickets<T: Transport>(
    api: &ApiClient<T>,
    project_id: u32,
    filter: &TicketFilter,
) -> Result<Vec<Ticket>, ApiError> {
    let mut pairs = vec![("project_id", project_id.to_string())];
    if let Some(status) = filter.status {
        pairs.push(("status", status.as_str().to_string()));
    }
    if let Some(priority) = filter.priority {
        pairs.push(("priority", priority.as_str().to_string()));
    }
    if let Some(assignee) = filter.assignee {
        pairs.push(("assignee", assignee.to_string()));
    }
    if let Some(q) = filter.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        pairs.push(("q", q.to_string()));
    }
    api.get(&format!("/tickets/search{}", query_string(&pairs))).await
}

pub async fn create_ticket<T: Transport>(api: &ApiClient<T>, ticket: &NewTicket<'_>) -> Result<Ticket, ApiError> {
    api.post("/tickets/", ticket).await
}

/// Submit the full editable field set; the response is the new truth
pub async fn update_ticket<T: Transport>(api: &ApiClient<T>, ticket_id: u32, update: &TicketUpdate) -> Result<Ticket, ApiError> {
    api.put(&format!("/tickets/{}", ticket_id), update).await
}

pub async fn update_status<T: Transport>(api: &ApiClient<T>, ticket_id: u32, status: TicketStatus) -> Result<Ticket, ApiError> {
    api.put(&format!("/tickets/{}", ticket_id), &StatusUpdate { status }).await
}

/// Soft delete (archive); admin only on the server
pub async fn archive_ticket<T: Transport>(api: &ApiClient<T>, ticket_id: u32) -> Result<MessageResponse, ApiError> {
    api.delete(&format!("/tickets/{}", ticket_id)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{fake, Method};
    use crate::models::{Priority, TicketType};

    const TICKETS: &str = r#"[
        {"id":1,"title":"A","description":null,"type":"bug","status":"todo","priority":"low","project_id":7,"assigned_to":null},
        {"id":2,"title":"B","description":"d","type":"task","status":"in_progress","priority":"high","project_id":7,"assigned_to":4}
    ]"#;

    #[tokio::test]
    async fn test_get_ticket_from_project_list() {
        let (api, transport) = fake::client();
        transport.respond(200, TICKETS);

        let ticket = get_ticket(&api, 7, 2).await.unwrap();
        assert_eq!(ticket.title, "B");
        assert_eq!(ticket.assigned_to, Some(4));
        assert_eq!(transport.last_request().url, "http://api.test/tickets/project/7");
    }

    #[tokio::test]
    async fn test_get_missing_ticket_is_not_found() {
        let (api, transport) = fake::client();
        transport.respond(200, TICKETS);

        let err = get_ticket(&api, 7, 99).await.unwrap_err();
        assert_eq!(err, ApiError::NotFound("Ticket not found".to_string()));
    }

    #[tokio::test]
    async fn test_search_builds_query() {
        let (api, transport) = fake::client();
        transport.respond(200, "[]");

        let filter = TicketFilter {
            status: Some(TicketStatus::InProgress),
            priority: Some(Priority::High),
            assignee: Some(4),
            query: Some(" crash ".to_string()),
        };
        search_tickets(&api, 7, &filter).await.unwrap();
        assert_eq!(
            transport.last_request().url,
            "http://api.test/tickets/search?project_id=7&status=in%5Fprogress&priority=high&assignee=4&q=crash"
        );
    }

    #[tokio::test]
    async fn test_create_ticket_payload() {
        let (api, transport) = fake::client();
        transport.respond(
            200,
            r#"{"id":3,"title":"New","description":null,"type":"feature","status":"todo","priority":"medium","project_id":7,"assigned_to":null}"#,
        );

        let ticket = create_ticket(
            &api,
            &NewTicket {
                title: "New",
                description: None,
                ticket_type: TicketType::Feature,
                priority: Priority::Medium,
                project_id: 7,
                assigned_to: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(ticket.status, TicketStatus::Todo);

        let body = transport.last_request().body.unwrap();
        assert_eq!(body["type"], "feature");
        assert_eq!(body["project_id"], 7);
        assert!(body["description"].is_null());
    }

    #[tokio::test]
    async fn test_update_status_sends_only_status() {
        let (api, transport) = fake::client();
        transport.respond(
            200,
            r#"{"id":1,"title":"A","description":null,"type":"bug","status":"in_progress","priority":"low","project_id":7,"assigned_to":null}"#,
        );

        update_status(&api, 1, TicketStatus::InProgress).await.unwrap();
        let request = transport.last_request();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.url, "http://api.test/tickets/1");
        assert_eq!(request.body.unwrap(), serde_json::json!({"status": "in_progress"}));
    }

    #[tokio::test]
    async fn test_archive_ticket() {
        let (api, transport) = fake::client();
        transport.respond(200, r#"{"message":"Ticket deleted successfully"}"#);

        archive_ticket(&api, 2).await.unwrap();
        let request = transport.last_request();
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.url, "http://api.test/tickets/2");
    }
}
