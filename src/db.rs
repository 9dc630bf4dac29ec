//! Database types and global state
//!
//! Storage layout (LMDB sub-databases):
//! - `users`: username -> packed user record
//! - `credentials`: username -> `salt|hash`
//! - `sessions`: token_hash -> `username|created|expires`
//! - `sessions_by_user`: `username/hash` -> expires
//! - `employees`: employee_id -> packed employee record
//! - `employees_by_dept`: `department/employee_id` -> epoch
//! - `audit`: `username/seq/event` -> epoch
//! - `prefs`: `client/flag` -> epoch
//! - `meta`: bootstrap markers and counters

use std::borrow::Cow;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, OnceLock};

use heed::types::{Str, U64};
use heed::{Database, Env, EnvOpenOptions, RoTxn, RwTxn};

use crate::error::{err, HrgateError, Result};

pub(crate) type DbStr = Database<Str, Str>;
pub(crate) type DbU64 = Database<Str, U64<byteorder::BigEndian>>;

/// All database handles
pub(crate) struct Dbs {
    pub users: DbStr,
    pub credentials: DbStr,
    pub sessions: DbStr,
    pub sessions_by_user: DbStr,
    pub employees: DbStr,
    pub employees_by_dept: DbU64,
    pub audit: DbU64,
    pub prefs: DbU64,
    pub meta: DbStr,
}

static ENV: OnceLock<Env> = OnceLock::new();
static DBS: OnceLock<Dbs> = OnceLock::new();
static TEST_LOCK: Mutex<()> = Mutex::new(());

pub(crate) fn dbs() -> Result<&'static Dbs> {
    DBS.get().ok_or_else(|| HrgateError("Not initialized".into()))
}

pub(crate) fn env() -> Result<&'static Env> {
    ENV.get().ok_or_else(|| HrgateError("Not initialized".into()))
}

/// Initialize the LMDB environment.
/// Returns Ok(()) if already initialized (idempotent).
pub fn init(db_path: &str) -> Result<()> {
    if ENV.get().is_some() {
        return Ok(());
    }
    std::fs::create_dir_all(db_path).map_err(err)?;
    let env = unsafe {
        EnvOpenOptions::new()
            .map_size(1 << 30)
            .max_dbs(9)
            .open(Path::new(db_path))
            .map_err(err)?
    };
    let mut tx = env.write_txn().map_err(err)?;
    let d = Dbs {
        users: env.create_database(&mut tx, Some("users")).map_err(err)?,
        credentials: env.create_database(&mut tx, Some("credentials")).map_err(err)?,
        sessions: env.create_database(&mut tx, Some("sessions")).map_err(err)?,
        sessions_by_user: env.create_database(&mut tx, Some("sessions_by_user")).map_err(err)?,
        employees: env.create_database(&mut tx, Some("employees")).map_err(err)?,
        employees_by_dept: env.create_database(&mut tx, Some("employees_by_dept")).map_err(err)?,
        audit: env.create_database(&mut tx, Some("audit")).map_err(err)?,
        prefs: env.create_database(&mut tx, Some("prefs")).map_err(err)?,
        meta: env.create_database(&mut tx, Some("meta")).map_err(err)?,
    };
    tx.commit().map_err(err)?;
    let _ = (ENV.set(env), DBS.set(d));
    Ok(())
}

/// Run a closure inside a read transaction
pub(crate) fn read<T, F: FnOnce(&Dbs, &RoTxn) -> Result<T>>(f: F) -> Result<T> {
    f(dbs()?, &env()?.read_txn().map_err(err)?)
}

/// Run a closure inside a write transaction, committing on success
pub(crate) fn write<T, F: FnOnce(&Dbs, &mut RwTxn) -> Result<T>>(f: F) -> Result<T> {
    let mut txn = env()?.write_txn().map_err(err)?;
    let r = f(dbs()?, &mut txn)?;
    txn.commit().map_err(err)?;
    Ok(r)
}

/// Wipe every sub-database (tests)
pub fn clear_all() -> Result<()> {
    write(|d, tx| {
        d.users.clear(tx).map_err(err)?;
        d.credentials.clear(tx).map_err(err)?;
        d.sessions.clear(tx).map_err(err)?;
        d.sessions_by_user.clear(tx).map_err(err)?;
        d.employees.clear(tx).map_err(err)?;
        d.employees_by_dept.clear(tx).map_err(err)?;
        d.audit.clear(tx).map_err(err)?;
        d.prefs.clear(tx).map_err(err)?;
        d.meta.clear(tx).map_err(err)
    })
}

/// Serialize tests that share the process-wide environment
pub fn test_lock() -> MutexGuard<'static, ()> {
    TEST_LOCK.lock().unwrap_or_else(|p| p.into_inner())
}

pub(crate) fn current_epoch() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Monotone counter used for audit record ordering
pub(crate) fn next_seq(d: &Dbs, tx: &mut RwTxn) -> Result<u64> {
    let seq = d
        .meta
        .get(tx, "seq")
        .map_err(err)?
        .and_then(|s| s.parse().ok())
        .unwrap_or(1u64);
    d.meta.put(tx, "seq", &(seq + 1).to_string()).map_err(err)?;
    Ok(seq)
}

// Escape separator characters in key components and packed record fields.
// Only allocates if escaping is needed.
pub(crate) fn escape(s: &str) -> Cow<'_, str> {
    if s.contains('/') || s.contains('|') || s.contains('\\') {
        Cow::Owned(
            s.replace('\\', "\\\\")
                .replace('/', "\\/")
                .replace('|', "\\|"),
        )
    } else {
        Cow::Borrowed(s)
    }
}

pub(crate) fn unescape(s: &str) -> Cow<'_, str> {
    if s.contains('\\') {
        Cow::Owned(
            s.replace("\\|", "|")
                .replace("\\/", "/")
                .replace("\\\\", "\\"),
        )
    } else {
        Cow::Borrowed(s)
    }
}

/// Split a packed value on unescaped `|` separators
pub(crate) fn split_packed(s: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut cur = String::new();
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(n) = chars.next() {
                    cur.push(n);
                }
            }
            '|' => fields.push(std::mem::take(&mut cur)),
            _ => cur.push(c),
        }
    }
    fields.push(cur);
    fields
}
