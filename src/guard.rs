//! Route guard
//!
//! Decides, for a (session, route) pair, whether to render the page or
//! silently redirect. Redirection carries no error payload and leaves no
//! trace beyond the audit records written at session boundaries.
//!
//! Per-route permission is enforced here, not just the coarse
//! admin-vs-portal split: an admin-capable role that manually navigates
//! outside its permission set still lands on the portal.

use serde::Serialize;

use crate::auth::Session;
use crate::permissions::is_permitted;
use crate::routes::Route;

/// Outcome of a guarded navigation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectToPortal,
}

/// Evaluate the guard for a navigation attempt.
///
/// /login and /portal never redirect, authenticated or not. Everything
/// else requires a session whose role's permission set contains the
/// route.
pub fn authorize(session: Option<&Session>, route: Route) -> GuardDecision {
    if !route.is_admin_area() {
        return GuardDecision::Allow;
    }
    let session = match session {
        Some(s) => s,
        None => return GuardDecision::RedirectToLogin,
    };
    if !session.role.is_admin_capable() {
        return GuardDecision::RedirectToPortal;
    }
    if !is_permitted(session.role, route) {
        return GuardDecision::RedirectToPortal;
    }
    GuardDecision::Allow
}
