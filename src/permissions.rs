//! Role -> route permission table
//!
//! A static mapping loaded once and never mutated at runtime. A route is
//! reachable by a session if and only if the session role's set contains
//! that route. Roles absent from the table (and roles with empty sets)
//! have no admin access and are redirected to the portal everywhere.

use crate::roles::Role;
use crate::routes::Route;

use Route::*;

const SYSTEM_ADMINISTRATOR: &[Route] = &[
    Dashboard, Employees, Departments, Branches, Attendance, Leaves, JobTitles,
    Payroll, Documents, Recruitment, Performance, Learning, OnboardingOffboarding,
    Assets, SupportTickets, HelpCenter, Settings, Reports, OrgChart, Surveys,
    Recognition, Missions, Portal,
];

const HR_MANAGER: &[Route] = &[
    Dashboard, Employees, Departments, Branches, Attendance, Leaves, JobTitles,
    Payroll, Documents, Recruitment, Performance, Learning, OnboardingOffboarding,
    Assets, SupportTickets, HelpCenter, Reports, OrgChart, Surveys, Recognition,
    Missions, Portal,
];

// Fixed by the product's access matrix: HR employees handle day-to-day
// records but neither payroll nor performance reviews.
const HR_EMPLOYEE: &[Route] = &[
    Dashboard, Employees, Departments, Branches, Attendance, Leaves, Documents,
    Recruitment, Learning, OnboardingOffboarding, SupportTickets, OrgChart,
    Recognition, Missions, Portal,
];

const RECRUITMENT_OFFICER: &[Route] = &[
    Dashboard, Employees, JobTitles, Recruitment, OnboardingOffboarding,
    OrgChart, Portal,
];

const DEPARTMENT_MANAGER: &[Route] = &[
    Dashboard, Employees, Attendance, Leaves, Performance, OrgChart, Missions,
    Portal,
];

const BRANCH_MANAGER: &[Route] = &[
    Dashboard, Employees, Departments, Branches, Attendance, Leaves, Reports,
    OrgChart, Portal,
];

const BOARD_MEMBER: &[Route] = &[
    Dashboard, Performance, Reports, OrgChart, Surveys, Portal,
];

/// The permission set for a role, in navigation catalog order.
/// Pure lookup; never fails; portal-only roles get the empty set.
pub fn permissions_for(role: Role) -> &'static [Route] {
    match role {
        Role::SystemAdministrator => SYSTEM_ADMINISTRATOR,
        Role::HrManager => HR_MANAGER,
        Role::HrEmployee => HR_EMPLOYEE,
        Role::RecruitmentOfficer => RECRUITMENT_OFFICER,
        Role::DepartmentManager => DEPARTMENT_MANAGER,
        Role::BranchManager => BRANCH_MANAGER,
        Role::BoardMember => BOARD_MEMBER,
        Role::Employee | Role::Trainee | Role::JokerEmployee => &[],
    }
}

/// Membership test against the static table
pub fn is_permitted(role: Role, route: Route) -> bool {
    permissions_for(role).contains(&route)
}
