//! UI Components
//!
//! One module per screen plus the shared layout pieces.

mod layout;
mod confirm_button;
mod login;
mod projects;
mod project_layout;
mod dashboard;
mod ticket_list;
mod ticket_detail;
mod comments;
mod kanban;
mod members;
mod diagnostics;

pub use layout::Layout;
pub use confirm_button::ConfirmButton;
pub use login::{Login, Register};
pub use projects::Projects;
pub use project_layout::ProjectLayout;
pub use dashboard::Dashboard;
pub use ticket_list::TicketList;
pub use ticket_detail::TicketDetail;
pub use comments::Comments;
pub use kanban::Kanban;
pub use members::ProjectMembers;
pub use diagnostics::DiagnosticsPanel;

/// Blocking browser alert
pub(crate) fn alert(message: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.alert_with_message(message);
    }
}
