//! Bootstrap and system initialization

use crate::auth;
use crate::db::{read, write};
use crate::error::{err, HrgateError, Result};
use crate::roles::Role;

/// Has the first administrator been created?
pub fn is_bootstrapped() -> Result<bool> {
    read(|d, tx| Ok(d.meta.get(tx, "boot").map_err(err)?.is_some()))
}

/// The bootstrap administrator's username, if bootstrapped
pub fn get_admin() -> Result<Option<String>> {
    read(|d, tx| Ok(d.meta.get(tx, "admin").map_err(err)?.map(|s| s.to_string())))
}

/// One-time creation of the first SYSTEM_ADMINISTRATOR.
/// Errors if already bootstrapped.
pub fn bootstrap(admin_username: &str, password: &str) -> Result<()> {
    if is_bootstrapped()? {
        return Err(HrgateError("Already bootstrapped".into()));
    }
    auth::create_user(
        admin_username,
        admin_username,
        Role::SystemAdministrator,
        "",
        "",
    )?;
    auth::set_password(admin_username, password)?;
    write(|d, tx| {
        d.meta.put(tx, "boot", "1").map_err(err)?;
        d.meta.put(tx, "admin", admin_username).map_err(err)
    })
}
