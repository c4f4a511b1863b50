//! Hash Routes
//!
//! `#/login`, `#/projects/3/kanban`, ... parsed into a closed `Route`, plus
//! the guard that keeps anonymous users on the auth screens.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Screens inside one project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectPage {
    Dashboard,
    Tickets,
    Ticket(u32),
    Kanban,
    Members,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Projects,
    Project { id: u32, page: ProjectPage },
    NotFound,
}

impl Route {
    pub fn parse(hash: &str) -> Route {
        let path = hash.trim_start_matches('#');
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] | ["projects"] => Route::Projects,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["projects", id, rest @ ..] => {
                let Ok(id) = id.parse::<u32>() else { return Route::NotFound };
                let page = match rest {
                    [] | ["dashboard"] => ProjectPage::Dashboard,
                    ["tickets"] => ProjectPage::Tickets,
                    ["tickets", ticket_id] => match ticket_id.parse() {
                        Ok(ticket_id) => ProjectPage::Ticket(ticket_id),
                        Err(_) => return Route::NotFound,
                    },
                    ["kanban"] => ProjectPage::Kanban,
                    ["members"] => ProjectPage::Members,
                    _ => return Route::NotFound,
                };
                Route::Project { id, page }
            }
            _ => Route::NotFound,
        }
    }

    pub fn to_hash(&self) -> String {
        match self {
            Route::Login => "#/login".to_string(),
            Route::Register => "#/register".to_string(),
            Route::Projects | Route::NotFound => "#/projects".to_string(),
            Route::Project { id, page } => match page {
                ProjectPage::Dashboard => format!("#/projects/{}/dashboard", id),
                ProjectPage::Tickets => format!("#/projects/{}/tickets", id),
                ProjectPage::Ticket(ticket_id) => format!("#/projects/{}/tickets/{}", id, ticket_id),
                ProjectPage::Kanban => format!("#/projects/{}/kanban", id),
                ProjectPage::Members => format!("#/projects/{}/members", id),
            },
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }

    pub fn project_id(&self) -> Option<u32> {
        match self {
            Route::Project { id, .. } => Some(*id),
            _ => None,
        }
    }
}

/// Where the user actually lands for `requested` given the session state
pub fn guard(requested: Route, authenticated: bool) -> Route {
    match (requested.requires_auth(), authenticated) {
        (true, false) => Route::Login,
        (false, true) => Route::Projects,
        _ => requested,
    }
}

/// Route currently in the address bar
pub fn current() -> Route {
    let hash = web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default();
    Route::parse(&hash)
}

pub fn navigate(route: &Route) {
    if let Some(win) = web_sys::window() {
        if win.location().set_hash(&route.to_hash()).is_err() {
            log::warn!("[ROUTE] could not set hash for {:?}", route);
        }
    }
}

/// Call `on_change` whenever the hash changes (back/forward, links)
pub fn listen<F>(on_change: F)
where
    F: Fn(Route) + 'static,
{
    let on_hashchange = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
        on_change(current());
    });
    if let Some(win) = web_sys::window() {
        let _ = win.add_event_listener_with_callback("hashchange", on_hashchange.as_ref().unchecked_ref());
    }
    // Lives for the whole app
    on_hashchange.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse(""), Route::Projects);
        assert_eq!(Route::parse("#/"), Route::Projects);
        assert_eq!(Route::parse("#/login"), Route::Login);
        assert_eq!(Route::parse("#/register"), Route::Register);
        assert_eq!(Route::parse("#/projects/3"), Route::Project { id: 3, page: ProjectPage::Dashboard });
        assert_eq!(Route::parse("#/projects/3/kanban"), Route::Project { id: 3, page: ProjectPage::Kanban });
        assert_eq!(
            Route::parse("#/projects/3/tickets/17"),
            Route::Project { id: 3, page: ProjectPage::Ticket(17) }
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Route::parse("#/projects/abc"), Route::NotFound);
        assert_eq!(Route::parse("#/projects/3/tickets/x"), Route::NotFound);
        assert_eq!(Route::parse("#/projects/3/settings"), Route::NotFound);
        assert_eq!(Route::parse("#/admin"), Route::NotFound);
    }

    #[test]
    fn test_hash_parses_back() {
        let routes = [
            Route::Login,
            Route::Register,
            Route::Projects,
            Route::Project { id: 1, page: ProjectPage::Dashboard },
            Route::Project { id: 1, page: ProjectPage::Tickets },
            Route::Project { id: 1, page: ProjectPage::Ticket(9) },
            Route::Project { id: 1, page: ProjectPage::Kanban },
            Route::Project { id: 1, page: ProjectPage::Members },
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.to_hash()), route);
        }
    }

    #[test]
    fn test_guard() {
        let kanban = Route::Project { id: 2, page: ProjectPage::Kanban };
        assert_eq!(guard(kanban, false), Route::Login);
        assert_eq!(guard(kanban, true), kanban);
        assert_eq!(guard(Route::Login, false), Route::Login);
        assert_eq!(guard(Route::Login, true), Route::Projects);
        assert_eq!(guard(Route::Register, false), Route::Register);
    }
}
