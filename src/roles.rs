//! User roles
//!
//! A role is assigned at user creation and is immutable for the life of a
//! session. Roles come in three bands: admin-capable roles that may enter
//! the back office, the department-scoped manager role, and portal-only
//! roles with no back-office access at all.

use serde::{Deserialize, Serialize};

/// Enumerated user role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    SystemAdministrator,
    HrManager,
    HrEmployee,
    RecruitmentOfficer,
    DepartmentManager,
    BranchManager,
    BoardMember,
    Employee,
    Trainee,
    JokerEmployee,
}

/// Every role, in declaration order
pub const ALL_ROLES: &[Role] = &[
    Role::SystemAdministrator,
    Role::HrManager,
    Role::HrEmployee,
    Role::RecruitmentOfficer,
    Role::DepartmentManager,
    Role::BranchManager,
    Role::BoardMember,
    Role::Employee,
    Role::Trainee,
    Role::JokerEmployee,
];

const NAMES: &[(&str, Role)] = &[
    ("SYSTEM_ADMINISTRATOR", Role::SystemAdministrator),
    ("HR_MANAGER", Role::HrManager),
    ("HR_EMPLOYEE", Role::HrEmployee),
    ("RECRUITMENT_OFFICER", Role::RecruitmentOfficer),
    ("DEPARTMENT_MANAGER", Role::DepartmentManager),
    ("BRANCH_MANAGER", Role::BranchManager),
    ("BOARD_MEMBER", Role::BoardMember),
    ("EMPLOYEE", Role::Employee),
    ("TRAINEE", Role::Trainee),
    ("JOKER_EMPLOYEE", Role::JokerEmployee),
];

impl Role {
    /// Stable wire identifier for this role
    pub fn as_str(self) -> &'static str {
        NAMES
            .iter()
            .find(|(_, r)| *r == self)
            .map(|(n, _)| *n)
            .unwrap_or("EMPLOYEE")
    }

    /// Parse a wire identifier. Unknown names are None; callers treat
    /// that as "no permissions" rather than an error.
    pub fn parse(s: &str) -> Option<Role> {
        NAMES.iter().find(|(n, _)| *n == s).map(|(_, r)| *r)
    }

    /// May this role enter the admin area at all?
    pub fn is_admin_capable(self) -> bool {
        !crate::permissions::permissions_for(self).is_empty()
    }

    /// Is this role's record visibility restricted to its own department?
    pub fn is_department_scoped(self) -> bool {
        self == Role::DepartmentManager
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
