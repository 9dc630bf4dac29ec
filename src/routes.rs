//! Route identifiers and the navigation catalog

use serde::{Deserialize, Serialize};

/// Enumerated route identifier. `Login` and `Portal` are the unguarded
/// entry points; everything else lives inside the admin area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Dashboard,
    Employees,
    Departments,
    Branches,
    Attendance,
    Leaves,
    JobTitles,
    Payroll,
    Documents,
    Recruitment,
    Performance,
    Learning,
    OnboardingOffboarding,
    Assets,
    SupportTickets,
    HelpCenter,
    Settings,
    Reports,
    OrgChart,
    Surveys,
    Recognition,
    Missions,
    Login,
    Portal,
}

const PATHS: &[(&str, Route)] = &[
    ("/dashboard", Route::Dashboard),
    ("/employees", Route::Employees),
    ("/departments", Route::Departments),
    ("/branches", Route::Branches),
    ("/attendance", Route::Attendance),
    ("/leaves", Route::Leaves),
    ("/job-titles", Route::JobTitles),
    ("/payroll", Route::Payroll),
    ("/documents", Route::Documents),
    ("/recruitment", Route::Recruitment),
    ("/performance", Route::Performance),
    ("/learning", Route::Learning),
    ("/onboarding-offboarding", Route::OnboardingOffboarding),
    ("/assets", Route::Assets),
    ("/support-tickets", Route::SupportTickets),
    ("/help-center", Route::HelpCenter),
    ("/settings", Route::Settings),
    ("/reports", Route::Reports),
    ("/org-chart", Route::OrgChart),
    ("/surveys", Route::Surveys),
    ("/recognition", Route::Recognition),
    ("/missions", Route::Missions),
    ("/login", Route::Login),
    ("/portal", Route::Portal),
];

impl Route {
    /// The path string for this route
    pub fn path(self) -> &'static str {
        PATHS
            .iter()
            .find(|(_, r)| *r == self)
            .map(|(p, _)| *p)
            .unwrap_or("/login")
    }

    /// Parse a path string. Unknown paths are None.
    pub fn from_path(path: &str) -> Option<Route> {
        PATHS.iter().find(|(p, _)| *p == path).map(|(_, r)| *r)
    }

    /// Routes inside the guarded admin layout (everything except the
    /// two entry points)
    pub fn is_admin_area(self) -> bool {
        !matches!(self, Route::Login | Route::Portal)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// A navigation menu entry: a route plus display metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub route: Route,
    pub label: &'static str,
}

/// The full navigation catalog, in display order. Independent of any
/// user; the menu a role actually sees is the filtered subsequence from
/// [`crate::nav::nav_for`]. Contains every route that appears in a
/// permission set, so the portal link is last and /login never shows.
pub const NAV_CATALOG: &[NavItem] = &[
    NavItem { route: Route::Dashboard, label: "Dashboard" },
    NavItem { route: Route::Employees, label: "Employees" },
    NavItem { route: Route::Departments, label: "Departments" },
    NavItem { route: Route::Branches, label: "Branches" },
    NavItem { route: Route::Attendance, label: "Attendance" },
    NavItem { route: Route::Leaves, label: "Leaves" },
    NavItem { route: Route::JobTitles, label: "Job Titles" },
    NavItem { route: Route::Payroll, label: "Payroll" },
    NavItem { route: Route::Documents, label: "Documents" },
    NavItem { route: Route::Recruitment, label: "Recruitment" },
    NavItem { route: Route::Performance, label: "Performance" },
    NavItem { route: Route::Learning, label: "Learning" },
    NavItem { route: Route::OnboardingOffboarding, label: "Onboarding & Offboarding" },
    NavItem { route: Route::Assets, label: "Assets" },
    NavItem { route: Route::SupportTickets, label: "Support Tickets" },
    NavItem { route: Route::HelpCenter, label: "Help Center" },
    NavItem { route: Route::Settings, label: "Settings" },
    NavItem { route: Route::Reports, label: "Reports" },
    NavItem { route: Route::OrgChart, label: "Org Chart" },
    NavItem { route: Route::Surveys, label: "Surveys" },
    NavItem { route: Route::Recognition, label: "Recognition" },
    NavItem { route: Route::Missions, label: "Missions" },
    NavItem { route: Route::Portal, label: "My Portal" },
];
