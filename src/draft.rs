//! Edit buffers and basic form constraints.

use crate::models::{Priority, Ticket, TicketUpdate};

/// Local edit state of the ticket detail form
#[derive(Debug, Clone, PartialEq)]
pub struct TicketDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub assignee: Option<u32>,
}

impl TicketDraft {
    pub fn from_ticket(ticket: &Ticket) -> Self {
        Self {
            title: ticket.title.clone(),
            description: ticket.description.clone().unwrap_or_default(),
            priority: ticket.priority,
            assignee: ticket.assigned_to,
        }
    }

    /// Full editable field set; a blank description is sent as `null`
    pub fn to_update(&self) -> Result<TicketUpdate, String> {
        let title = required(&self.title, "Title")?;
        let description = self.description.trim();
        Ok(TicketUpdate {
            title: title.to_string(),
            description: if description.is_empty() { None } else { Some(description.to_string()) },
            priority: self.priority,
            assigned_to: self.assignee,
        })
    }
}

/// Trimmed value, or an error naming the field
pub fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(format!("{} is required", field))
    } else {
        Ok(trimmed)
    }
}

/// Blank input becomes `None`
pub fn optional(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

/// `<select>` value for the assignee: "" means unassigned
pub fn parse_assignee(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

pub fn assignee_value(assignee: Option<u32>) -> String {
    assignee.map(|id| id.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TicketStatus, TicketType};

    fn ticket() -> Ticket {
        Ticket {
            id: 5,
            title: "Login broken".into(),
            description: None,
            status: TicketStatus::Todo,
            priority: Priority::High,
            ticket_type: TicketType::Bug,
            project_id: 1,
            assigned_to: Some(3),
            is_deleted: None,
        }
    }

    #[test]
    fn test_draft_round_trips_editable_fields() {
        let draft = TicketDraft::from_ticket(&ticket());
        assert_eq!(draft.description, "");
        let update = draft.to_update().unwrap();
        assert_eq!(update.title, "Login broken");
        assert_eq!(update.description, None);
        assert_eq!(update.priority, Priority::High);
        assert_eq!(update.assigned_to, Some(3));
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut draft = TicketDraft::from_ticket(&ticket());
        draft.title = "   ".into();
        assert_eq!(draft.to_update().unwrap_err(), "Title is required");
    }

    #[test]
    fn test_assignee_select_values() {
        assert_eq!(parse_assignee(""), None);
        assert_eq!(parse_assignee("12"), Some(12));
        assert_eq!(assignee_value(None), "");
        assert_eq!(assignee_value(Some(12)), "12");
    }

    #[test]
    fn test_optional() {
        assert_eq!(optional("  "), None);
        assert_eq!(optional(" x "), Some("x"));
    }
}
