//! Bootstrap and client preference flag tests

use std::sync::OnceLock;

use hrgate::{
    auth, bootstrap, clear_all, get_admin, init, is_bootstrapped, prefs, test_lock, Role,
};
use tempfile::TempDir;

static TEST_DIR: OnceLock<TempDir> = OnceLock::new();

fn setup() -> std::sync::MutexGuard<'static, ()> {
    let guard = test_lock();
    let dir = TEST_DIR.get_or_init(|| TempDir::new().unwrap());
    init(dir.path().to_str().unwrap()).unwrap();
    clear_all().unwrap();
    guard
}

// ============================================================================
// Bootstrap
// ============================================================================

#[test]
fn bootstrap_creates_the_first_administrator() {
    let _g = setup();
    assert!(!is_bootstrapped().unwrap());

    bootstrap("admin", "s3cret").unwrap();
    assert!(is_bootstrapped().unwrap());
    assert_eq!(get_admin().unwrap().as_deref(), Some("admin"));

    let user = auth::get_user("admin").unwrap().unwrap();
    assert_eq!(user.role, Role::SystemAdministrator);

    let token = auth::login("admin", "s3cret").unwrap();
    let session = auth::validate_session(&token).unwrap();
    assert_eq!(session.role, Role::SystemAdministrator);
}

#[test]
fn bootstrap_is_one_time() {
    let _g = setup();
    bootstrap("admin", "s3cret").unwrap();
    assert!(bootstrap("admin2", "other").is_err());
    assert_eq!(get_admin().unwrap().as_deref(), Some("admin"));
}

// ============================================================================
// Preference flags
// ============================================================================

#[test]
fn one_shot_flag_fires_once_per_client() {
    let _g = setup();
    assert!(!prefs::was_shown("client-a", "updateModalShown_v2").unwrap());

    prefs::mark_shown("client-a", "updateModalShown_v2").unwrap();
    assert!(prefs::was_shown("client-a", "updateModalShown_v2").unwrap());
    // Other clients are unaffected
    assert!(!prefs::was_shown("client-b", "updateModalShown_v2").unwrap());

    // Marking again is a no-op
    prefs::mark_shown("client-a", "updateModalShown_v2").unwrap();
    assert!(prefs::was_shown("client-a", "updateModalShown_v2").unwrap());
}

#[test]
fn flags_are_independent_per_name() {
    let _g = setup();
    prefs::mark_shown("client-a", "updateModalShown_v2").unwrap();
    assert!(!prefs::was_shown("client-a", "welcomeTourDone").unwrap());
}
