//! Per-client one-shot preference flags
//!
//! Covers flags like `updateModalShown_v2`: shown once per client, never
//! versioned, never migrated. Keyed `client/flag`, valued with the epoch
//! the flag was first set.

use crate::db::{current_epoch, escape, read, write};
use crate::error::{err, Result};

fn flag_key(client: &str, flag: &str) -> String {
    format!("{}/{}", escape(client), escape(flag))
}

/// Record that a one-shot flag has fired for a client. Idempotent; the
/// first epoch wins.
pub fn mark_shown(client: &str, flag: &str) -> Result<()> {
    let key = flag_key(client, flag);
    write(|d, tx| {
        if d.prefs.get(tx, &key).map_err(err)?.is_some() {
            return Ok(());
        }
        d.prefs.put(tx, &key, &current_epoch()).map_err(err)
    })
}

/// Has a one-shot flag fired for this client?
pub fn was_shown(client: &str, flag: &str) -> Result<bool> {
    let key = flag_key(client, flag);
    read(|d, tx| Ok(d.prefs.get(tx, &key).map_err(err)?.is_some()))
}
