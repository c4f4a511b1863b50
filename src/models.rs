//! Frontend Models
//!
//! Data structures matching the FixHub REST API payloads.

use serde::{Deserialize, Serialize};
use std::fmt;

// ========================
// Closed vocabularies
// ========================

/// Caller's role inside one project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Developer,
    Viewer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Developer, Role::Viewer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Developer => "developer",
            Role::Viewer => "viewer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Developer => "Developer",
            Role::Viewer => "Viewer",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == key)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket workflow status; doubles as the Kanban column key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Todo,
    InProgress,
    Done,
}

impl TicketStatus {
    /// Column order on the board
    pub const ALL: [TicketStatus; 3] = [TicketStatus::Todo, TicketStatus::InProgress, TicketStatus::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Todo => "todo",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Done => "done",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::Todo => "To Do",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::Done => "Done",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == key)
    }

    /// Transitions the backend workflow accepts from this status.
    /// Used only to highlight drop targets; the server still decides.
    pub fn allowed_next(&self) -> &'static [TicketStatus] {
        match self {
            TicketStatus::Todo => &[TicketStatus::InProgress],
            TicketStatus::InProgress => &[TicketStatus::Done],
            TicketStatus::Done => &[TicketStatus::InProgress],
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketType {
    #[default]
    Bug,
    Task,
    Feature,
}

impl TicketType {
    pub const ALL: [TicketType; 3] = [TicketType::Bug, TicketType::Task, TicketType::Feature];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketType::Bug => "bug",
            TicketType::Task => "task",
            TicketType::Feature => "feature",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TicketType::Bug => "Bug",
            TicketType::Task => "Task",
            TicketType::Feature => "Feature",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == key)
    }
}

// ========================
// Entities
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Member row from `/projects/{id}/members`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMember {
    #[serde(alias = "user_id")]
    pub id: u32,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
}

impl ProjectMember {
    pub fn display_name(&self) -> String {
        self.email.clone().unwrap_or_else(|| format!("User #{}", self.id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TicketStatus,
    pub priority: Priority,
    #[serde(rename = "type")]
    pub ticket_type: TicketType,
    pub project_id: u32,
    #[serde(default)]
    pub assigned_to: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u32,
    pub content: String,
    #[serde(default)]
    pub ticket_id: Option<u32>,
    #[serde(rename = "user_id")]
    pub author_id: u32,
    #[serde(rename = "user_email", default)]
    pub author_email: Option<String>,
    #[serde(rename = "user_role", default)]
    pub author_role: Option<Role>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Comment {
    pub fn author_label(&self) -> String {
        self.author_email.clone().unwrap_or_else(|| format!("User #{}", self.author_id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: u32,
    pub filename: String,
    pub uploaded_at: String,
    pub ticket_id: u32,
    pub uploaded_by: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: TicketStatus,
    pub tickets: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub project_id: u32,
    pub summary: Vec<StatusCount>,
}

impl DashboardSummary {
    pub fn count(&self, status: TicketStatus) -> u32 {
        self.summary
            .iter()
            .filter(|c| c.status == status)
            .map(|c| c.tickets)
            .sum()
    }

    pub fn total(&self) -> u32 {
        self.summary.iter().map(|c| c.tickets).sum()
    }
}

/// Server-side board view (`/kanban/project/{id}`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KanbanColumns {
    #[serde(default)]
    pub todo: Vec<Ticket>,
    #[serde(default)]
    pub in_progress: Vec<Ticket>,
    #[serde(default)]
    pub done: Vec<Ticket>,
}

impl KanbanColumns {
    /// Flatten to one list in column order
    pub fn into_tickets(self) -> Vec<Ticket> {
        let mut tickets = self.todo;
        tickets.extend(self.in_progress);
        tickets.extend(self.done);
        tickets
    }
}

// ========================
// Request / response payloads
// ========================

#[derive(Debug, Clone, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoleResponse {
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewProject<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewMember<'a> {
    pub email: &'a str,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTicket<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    #[serde(rename = "type")]
    pub ticket_type: TicketType,
    pub priority: Priority,
    pub project_id: u32,
    pub assigned_to: Option<u32>,
}

/// Full editable field set submitted by the detail screen.
/// `assigned_to: None` is sent as `null` so a ticket can be unassigned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketUpdate {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub assigned_to: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub status: TicketStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewComment<'a> {
    pub content: &'a str,
    pub ticket_id: u32,
}

/// Filters for `/tickets/search`, always scoped to one project
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TicketFilter {
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
    pub assignee: Option<u32>,
    pub query: Option<String>,
}

impl TicketFilter {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.priority.is_none()
            && self.assignee.is_none()
            && self.query.as_deref().map_or(true, |q| q.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket_json(status: &str) -> String {
        format!(
            r#"{{"id":4,"title":"Crash on save","description":null,"type":"bug","status":"{}","priority":"high","project_id":2,"assigned_to":null}}"#,
            status
        )
    }

    #[test]
    fn test_ticket_decodes_backend_shape() {
        let ticket: Ticket = serde_json::from_str(&ticket_json("in_progress")).unwrap();
        assert_eq!(ticket.status, TicketStatus::InProgress);
        assert_eq!(ticket.ticket_type, TicketType::Bug);
        assert_eq!(ticket.priority, Priority::High);
        assert_eq!(ticket.assigned_to, None);
        assert_eq!(ticket.is_deleted, None);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result: Result<Ticket, _> = serde_json::from_str(&ticket_json("blocked"));
        assert!(result.is_err());
    }

    #[test]
    fn test_status_keys() {
        for status in TicketStatus::ALL {
            assert_eq!(TicketStatus::from_key(status.as_str()), Some(status));
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        assert_eq!(TicketStatus::from_key("In Progress"), None);
    }

    #[test]
    fn test_workflow_hint_matches_backend_table() {
        assert_eq!(TicketStatus::Todo.allowed_next(), &[TicketStatus::InProgress]);
        assert_eq!(TicketStatus::InProgress.allowed_next(), &[TicketStatus::Done]);
        assert_eq!(TicketStatus::Done.allowed_next(), &[TicketStatus::InProgress]);
    }

    #[test]
    fn test_member_accepts_user_id_shape() {
        let member: ProjectMember = serde_json::from_str(r#"{"user_id":9,"role":"viewer"}"#).unwrap();
        assert_eq!(member.id, 9);
        assert_eq!(member.role, Role::Viewer);
        assert_eq!(member.display_name(), "User #9");

        let member: ProjectMember =
            serde_json::from_str(r#"{"id":3,"email":"dev@fixhub.io","role":"developer"}"#).unwrap();
        assert_eq!(member.display_name(), "dev@fixhub.io");
    }

    #[test]
    fn test_ticket_update_sends_null_assignee() {
        let update = TicketUpdate {
            title: "t".into(),
            description: None,
            priority: Priority::Low,
            assigned_to: None,
        };
        let value = serde_json::to_value(&update).unwrap();
        assert!(value.get("assigned_to").unwrap().is_null());
        assert_eq!(value["priority"], "low");
    }

    #[test]
    fn test_dashboard_counts() {
        let summary: DashboardSummary = serde_json::from_str(
            r#"{"project_id":1,"summary":[{"status":"todo","tickets":3},{"status":"done","tickets":2}]}"#,
        )
        .unwrap();
        assert_eq!(summary.count(TicketStatus::Todo), 3);
        assert_eq!(summary.count(TicketStatus::InProgress), 0);
        assert_eq!(summary.total(), 5);
    }

    #[test]
    fn test_filter_emptiness() {
        assert!(TicketFilter::default().is_empty());
        let filter = TicketFilter { query: Some("  ".into()), ..Default::default() };
        assert!(filter.is_empty());
        let filter = TicketFilter { status: Some(TicketStatus::Done), ..Default::default() };
        assert!(!filter.is_empty());
    }
}
