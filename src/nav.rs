//! Navigation filtering
//!
//! The menu a role sees is the ordered subsequence of the full catalog
//! whose routes are in the role's permission set. Catalog order is
//! preserved, never sorted. Pure and deterministic, so re-filtering an
//! already-filtered list is a no-op.

use crate::permissions::is_permitted;
use crate::roles::Role;
use crate::routes::{NavItem, NAV_CATALOG};

/// The navigation items visible to a role, in catalog order
pub fn nav_for(role: Role) -> Vec<&'static NavItem> {
    filter_nav(role, NAV_CATALOG.iter().collect())
}

/// Filter an arbitrary item list down to a role's permitted routes,
/// preserving input order
pub fn filter_nav(role: Role, items: Vec<&'static NavItem>) -> Vec<&'static NavItem> {
    items
        .into_iter()
        .filter(|item| is_permitted(role, item.route))
        .collect()
}
