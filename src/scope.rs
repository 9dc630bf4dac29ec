//! Role-scoped data visibility
//!
//! Authorization answers "may this role open this page"; scoping answers
//! "which of the already-authorized records may it see". Department
//! managers only see records from their own department; portal-only
//! roles see nothing; every other admin-capable role sees everything.

use crate::auth::Session;
use crate::roles::Role;

/// Record visibility for a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataScope {
    /// Identity: no filtering beyond the page's own query
    All,
    /// Only records whose department matches
    Department(String),
    /// Empty collection (role never reaches admin pages)
    Nothing,
}

/// A record carrying a department attribute
pub trait Scoped {
    fn department(&self) -> &str;
}

/// Derive the data scope for a session
pub fn scope_for(session: &Session) -> DataScope {
    if !session.role.is_admin_capable() {
        return DataScope::Nothing;
    }
    if session.role == Role::DepartmentManager {
        return DataScope::Department(session.department.clone());
    }
    DataScope::All
}

impl DataScope {
    /// Does this scope admit the given record?
    pub fn admits<R: Scoped>(&self, record: &R) -> bool {
        match self {
            DataScope::All => true,
            DataScope::Department(dept) => record.department() == dept,
            DataScope::Nothing => false,
        }
    }

    /// Filter a collection down to the admitted records
    pub fn apply<R: Scoped>(&self, records: Vec<R>) -> Vec<R> {
        match self {
            DataScope::All => records,
            DataScope::Nothing => Vec::new(),
            DataScope::Department(_) => {
                records.into_iter().filter(|r| self.admits(r)).collect()
            }
        }
    }
}
