//! hrgate - role-based access control and data core for an HRMS back office
//!
//! The moving parts, leaves first:
//! - [`permissions`]: the static role -> route table
//! - [`guard`]: allow / redirect-to-login / redirect-to-portal decisions
//! - [`nav`]: the per-role navigation menu, an order-preserving filter
//! - [`scope`]: role-scoped record visibility (department managers)
//! - [`auth`]: users, credentials, token sessions, role switching
//! - [`directory`]: the employee directory with search/filter/pagination
//! - [`payroll`]: the payslip calculator
//! - [`prefs`]: one-shot per-client flags
//!
//! Storage is LMDB behind [`init`]; the permission table and
//! navigation catalog are const data, safe for concurrent reads.

pub mod auth;
pub mod bootstrap;
mod db;
pub mod directory;
pub mod error;
pub mod guard;
pub mod nav;
pub mod payroll;
pub mod permissions;
pub mod prefs;
pub mod roles;
pub mod routes;
pub mod scope;

pub use auth::{Session, User};
pub use bootstrap::{bootstrap, get_admin, is_bootstrapped};
pub use db::{clear_all, init, test_lock};
pub use directory::{Employee, EmployeeQuery, EmployeeStatus, Page};
pub use error::{HrgateError, Result};
pub use guard::{authorize, GuardDecision};
pub use nav::nav_for;
pub use payroll::{compute_payslip, Payslip, PayslipInput};
pub use permissions::{is_permitted, permissions_for};
pub use roles::{Role, ALL_ROLES};
pub use routes::{NavItem, Route, NAV_CATALOG};
pub use scope::{scope_for, DataScope, Scoped};
