//! Permission table and navigation filter tests
//!
//! These are pure-table properties: no database involved.

use hrgate::{
    is_permitted, nav_for, permissions_for, Role, Route, ALL_ROLES, NAV_CATALOG,
};

// ============================================================================
// Permission table
// ============================================================================

/// The menu shows a route iff the role's permission set contains it
#[test]
fn menu_membership_matches_permission_set() {
    for &role in ALL_ROLES {
        let menu: Vec<Route> = nav_for(role).iter().map(|i| i.route).collect();
        for item in NAV_CATALOG {
            assert_eq!(
                menu.contains(&item.route),
                is_permitted(role, item.route),
                "{} / {}",
                role,
                item.route
            );
        }
    }
}

#[test]
fn portal_only_roles_have_empty_sets() {
    for role in [Role::Employee, Role::Trainee, Role::JokerEmployee] {
        assert!(permissions_for(role).is_empty(), "{}", role);
        assert!(!role.is_admin_capable());
        assert!(nav_for(role).is_empty());
    }
}

#[test]
fn system_administrator_reaches_every_catalog_route() {
    for item in NAV_CATALOG {
        assert!(is_permitted(Role::SystemAdministrator, item.route));
    }
}

/// The HR employee set is pinned by the product's access matrix
#[test]
fn hr_employee_set_is_exact() {
    let expected = [
        Route::Dashboard,
        Route::Employees,
        Route::Departments,
        Route::Branches,
        Route::Attendance,
        Route::Leaves,
        Route::Documents,
        Route::Recruitment,
        Route::Learning,
        Route::OnboardingOffboarding,
        Route::SupportTickets,
        Route::OrgChart,
        Route::Recognition,
        Route::Missions,
        Route::Portal,
    ];
    let actual = permissions_for(Role::HrEmployee);
    assert_eq!(actual.len(), expected.len());
    for route in expected {
        assert!(is_permitted(Role::HrEmployee, route), "{}", route);
    }
    assert!(!is_permitted(Role::HrEmployee, Route::Payroll));
    assert!(!is_permitted(Role::HrEmployee, Route::Settings));
}

#[test]
fn login_appears_in_no_permission_set() {
    for &role in ALL_ROLES {
        assert!(!is_permitted(role, Route::Login));
    }
}

// ============================================================================
// Navigation filter
// ============================================================================

/// Catalog order is preserved, never sorted
#[test]
fn nav_preserves_catalog_order() {
    for &role in ALL_ROLES {
        let menu = nav_for(role);
        let positions: Vec<usize> = menu
            .iter()
            .map(|item| {
                NAV_CATALOG
                    .iter()
                    .position(|c| c.route == item.route)
                    .unwrap()
            })
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted, "{}", role);
    }
}

/// Re-filtering an already-filtered list is the identity
#[test]
fn nav_filter_is_idempotent() {
    for &role in ALL_ROLES {
        let once = nav_for(role);
        let twice = hrgate::nav::filter_nav(role, once.clone());
        assert_eq!(once, twice, "{}", role);
    }
}

// ============================================================================
// Identifiers
// ============================================================================

#[test]
fn route_paths_round_trip() {
    for item in NAV_CATALOG {
        assert_eq!(Route::from_path(item.route.path()), Some(item.route));
    }
    assert_eq!(Route::from_path("/login"), Some(Route::Login));
    assert_eq!(Route::from_path("/payslips"), None);
    assert_eq!(Route::from_path(""), None);
}

#[test]
fn role_names_round_trip() {
    for &role in ALL_ROLES {
        assert_eq!(Role::parse(role.as_str()), Some(role));
    }
    // Unknown tags parse to None; callers treat that as no permissions
    assert_eq!(Role::parse("SUPER_USER"), None);
    assert_eq!(Role::parse(""), None);
}
