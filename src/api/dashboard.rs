//! Dashboard Accessor

use crate::error::ApiError;
use crate::models::DashboardSummary;

use super::{ApiClient, Transport};

/// Ticket counts per status for one project
pub async fn project_dashboard<T: Transport>(api: &ApiClient<T>, project_id: u32) -> Result<DashboardSummary, ApiError> {
    api.get(&format!("/dashboard/project/{}", project_id)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake;
    use crate::models::TicketStatus;

    #[tokio::test]
    async fn test_project_dashboard() {
        let (api, transport) = fake::client();
        transport.respond(200, r#"{"project_id":2,"summary":[{"status":"in_progress","tickets":4}]}"#);

        let summary = project_dashboard(&api, 2).await.unwrap();
        assert_eq!(summary.count(TicketStatus::InProgress), 4);
        assert_eq!(transport.last_request().url, "http://api.test/dashboard/project/2");
    }
}
