//! Authentication middleware
//!
//! This module maps an identity's role onto the pages it may reach and
//! guards role-scoped operations. Every role owns a fixed dashboard subtree
//! with a statically declared navigation menu.

use tracing::{debug, warn};

use crate::models::{Identity, Role};
use crate::utils::errors::{EventDeskError, Result};

/// Public login entry point
pub const LOGIN_PATH: &str = "/login";
/// Public student self-registration page
pub const REGISTER_PATH: &str = "/register";

/// A navigation menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

const fn nav(label: &'static str, path: &'static str) -> NavItem {
    NavItem { label, path }
}

const ADMIN_NAV: &[NavItem] = &[
    nav("Home", "/admin"),
    nav("Register Faculty", "/admin/register-faculty"),
    nav("Faculty List", "/admin/faculties"),
];

const FACULTY_NAV: &[NavItem] = &[
    nav("Home", "/faculty"),
    nav("Event Approvals", "/faculty/events"),
];

const COORDINATOR_NAV: &[NavItem] = &[
    nav("Home", "/coordinator"),
    nav("Create Event", "/coordinator/create-event"),
    nav("My Events", "/coordinator/events"),
    nav("View Participants", "/coordinator/participants"),
];

const STUDENT_NAV: &[NavItem] = &[
    nav("Home", "/student"),
    nav("Events", "/student/events"),
    nav("My Events", "/student/my-events"),
    nav("Clubs", "/student/clubs"),
];

/// Every renderable page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Login,
    Register,
    AdminHome,
    RegisterFaculty,
    FacultyList,
    FacultyHome,
    EventApprovals,
    CoordinatorHome,
    CreateEvent,
    CoordinatorEvents,
    ViewParticipants,
    StudentHome,
    StudentEvents,
    StudentMyEvents,
    Clubs,
}

impl Page {
    /// Role whose subtree owns the page; `None` for public pages
    pub fn role(&self) -> Option<Role> {
        match self {
            Page::Login | Page::Register => None,
            Page::AdminHome | Page::RegisterFaculty | Page::FacultyList => Some(Role::Admin),
            Page::FacultyHome | Page::EventApprovals => Some(Role::Faculty),
            Page::CoordinatorHome | Page::CreateEvent | Page::CoordinatorEvents | Page::ViewParticipants => {
                Some(Role::Coordinator)
            }
            Page::StudentHome | Page::StudentEvents | Page::StudentMyEvents | Page::Clubs => Some(Role::Student),
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Page::Login => LOGIN_PATH,
            Page::Register => REGISTER_PATH,
            Page::AdminHome => "/admin",
            Page::RegisterFaculty => "/admin/register-faculty",
            Page::FacultyList => "/admin/faculties",
            Page::FacultyHome => "/faculty",
            Page::EventApprovals => "/faculty/events",
            Page::CoordinatorHome => "/coordinator",
            Page::CreateEvent => "/coordinator/create-event",
            Page::CoordinatorEvents => "/coordinator/events",
            Page::ViewParticipants => "/coordinator/participants",
            Page::StudentHome => "/student",
            Page::StudentEvents => "/student/events",
            Page::StudentMyEvents => "/student/my-events",
            Page::Clubs => "/student/clubs",
        }
    }

    const ALL: [Page; 15] = [
        Page::Login,
        Page::Register,
        Page::AdminHome,
        Page::RegisterFaculty,
        Page::FacultyList,
        Page::FacultyHome,
        Page::EventApprovals,
        Page::CoordinatorHome,
        Page::CreateEvent,
        Page::CoordinatorEvents,
        Page::ViewParticipants,
        Page::StudentHome,
        Page::StudentEvents,
        Page::StudentMyEvents,
        Page::Clubs,
    ];

    fn from_path(path: &str) -> Option<Page> {
        Self::ALL.iter().copied().find(|page| page.path() == path)
    }
}

/// Outcome of a navigation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Render(Page),
    Redirect(String),
}

/// Navigation bar model for a role dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navbar {
    pub brand_path: &'static str,
    pub items: &'static [NavItem],
    pub display_name: Option<String>,
}

/// Role-based router and guard
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleGuard;

impl RoleGuard {
    pub fn new() -> Self {
        Self
    }

    /// Statically declared navigation for a role
    pub fn nav_items(role: Role) -> &'static [NavItem] {
        match role {
            Role::Admin => ADMIN_NAV,
            Role::Faculty => FACULTY_NAV,
            Role::Coordinator => COORDINATOR_NAV,
            Role::Student => STUDENT_NAV,
        }
    }

    /// Navbar for the identity's dashboard
    pub fn navbar(identity: &Identity) -> Navbar {
        Navbar {
            brand_path: identity.role.root(),
            items: Self::nav_items(identity.role),
            display_name: Some(identity.name.clone()),
        }
    }

    /// Where a freshly logged-in identity lands
    pub fn landing_path(identity: &Identity) -> &'static str {
        identity.role.root()
    }

    /// Where logout always leads, regardless of the current location
    pub fn logout_path() -> &'static str {
        LOGIN_PATH
    }

    /// Decide what `path` shows for `identity` (or for an anonymous visitor)
    pub fn resolve(&self, identity: Option<&Identity>, path: &str) -> RouteDecision {
        let path = normalize_path(path);

        if path == "/" {
            return match identity {
                Some(identity) => RouteDecision::Redirect(identity.role.root().to_string()),
                None => RouteDecision::Redirect(LOGIN_PATH.to_string()),
            };
        }

        if let Some(page) = Page::from_path(&path) {
            if page.role().is_none() {
                return RouteDecision::Render(page);
            }
        }

        let Some(owner) = subtree_owner(&path) else {
            debug!(path = %path, "Unknown path");
            return match identity {
                Some(identity) => RouteDecision::Redirect(identity.role.root().to_string()),
                None => RouteDecision::Redirect(LOGIN_PATH.to_string()),
            };
        };

        let Some(identity) = identity else {
            debug!(path = %path, "Anonymous access to role subtree");
            return RouteDecision::Redirect(LOGIN_PATH.to_string());
        };

        if identity.role != owner {
            warn!(
                user_id = %identity.id,
                role = %identity.role,
                path = %path,
                "Access to another role's subtree denied"
            );
            return RouteDecision::Redirect(identity.role.root().to_string());
        }

        match Page::from_path(&path) {
            Some(page) => RouteDecision::Render(page),
            None => RouteDecision::Redirect(owner.root().to_string()),
        }
    }

    /// Guard for role-scoped operations
    pub fn require_role<'a>(&self, identity: Option<&'a Identity>, role: Role) -> Result<&'a Identity> {
        match identity {
            None => Err(EventDeskError::NotAuthenticated),
            Some(identity) if identity.role == role => Ok(identity),
            Some(identity) => {
                warn!(user_id = %identity.id, role = %identity.role, required = %role, "Role check failed");
                Err(EventDeskError::PermissionDenied(format!(
                    "{} role required, signed in as {}",
                    role, identity.role
                )))
            }
        }
    }
}

/// Role whose subtree contains `path`
fn subtree_owner(path: &str) -> Option<Role> {
    Role::ALL.into_iter().find(|role| {
        let root = role.root();
        path == root || path.strip_prefix(root).map_or(false, |rest| rest.starts_with('/'))
    })
}

/// Drop query and fragment, collapse duplicate and trailing slashes
fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}
