//! Route guard tests
//!
//! The guard is a pure decision function over (session, route); these
//! tests exercise it without any storage.

use hrgate::{authorize, GuardDecision, Role, Route, Session, NAV_CATALOG};

fn session(role: Role) -> Session {
    Session::new("casey", role, "Engineering", "HQ")
}

// ============================================================================
// Unauthenticated
// ============================================================================

/// No session: every admin route bounces to /login
#[test]
fn unauthenticated_admin_routes_redirect_to_login() {
    for item in NAV_CATALOG {
        if item.route.is_admin_area() {
            assert_eq!(
                authorize(None, item.route),
                GuardDecision::RedirectToLogin,
                "{}",
                item.route
            );
        }
    }
}

/// The entry points never redirect, session or not
#[test]
fn entry_points_always_allow() {
    assert_eq!(authorize(None, Route::Portal), GuardDecision::Allow);
    assert_eq!(authorize(None, Route::Login), GuardDecision::Allow);
    for &role in hrgate::ALL_ROLES {
        let s = session(role);
        assert_eq!(authorize(Some(&s), Route::Portal), GuardDecision::Allow);
        assert_eq!(authorize(Some(&s), Route::Login), GuardDecision::Allow);
    }
}

// ============================================================================
// Portal-only roles
// ============================================================================

/// Empty-permission roles bounce to /portal on every admin route
#[test]
fn portal_only_roles_redirect_to_portal_everywhere() {
    for role in [Role::Employee, Role::Trainee, Role::JokerEmployee] {
        let s = session(role);
        for item in NAV_CATALOG {
            if item.route.is_admin_area() {
                assert_eq!(
                    authorize(Some(&s), item.route),
                    GuardDecision::RedirectToPortal,
                    "{} / {}",
                    role,
                    item.route
                );
            }
        }
    }
}

#[test]
fn plain_employee_never_sees_dashboard() {
    let s = session(Role::Employee);
    assert_eq!(
        authorize(Some(&s), Route::Dashboard),
        GuardDecision::RedirectToPortal
    );
}

// ============================================================================
// Per-route enforcement
// ============================================================================

/// An admin-capable role visiting a route outside its set is bounced to
/// the portal, not just hidden from the menu
#[test]
fn hr_employee_payroll_redirects_to_portal() {
    let s = session(Role::HrEmployee);
    assert_eq!(
        authorize(Some(&s), Route::Payroll),
        GuardDecision::RedirectToPortal
    );
    assert_eq!(authorize(Some(&s), Route::Employees), GuardDecision::Allow);
}

#[test]
fn department_manager_cannot_reach_settings() {
    let s = session(Role::DepartmentManager);
    assert_eq!(
        authorize(Some(&s), Route::Settings),
        GuardDecision::RedirectToPortal
    );
    assert_eq!(authorize(Some(&s), Route::Employees), GuardDecision::Allow);
}

/// Allow iff the permission set contains the route, for every pair
#[test]
fn guard_agrees_with_permission_table() {
    for &role in hrgate::ALL_ROLES {
        let s = session(role);
        for item in NAV_CATALOG {
            if !item.route.is_admin_area() {
                continue;
            }
            let expected = if hrgate::is_permitted(role, item.route) {
                GuardDecision::Allow
            } else {
                GuardDecision::RedirectToPortal
            };
            assert_eq!(authorize(Some(&s), item.route), expected, "{} / {}", role, item.route);
        }
    }
}
