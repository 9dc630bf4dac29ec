//! Users, credentials, and token sessions
//!
//! Passwords are stored as salted SHA-256. Session tokens are 32 random
//! bytes, base64url encoded, and stored hashed; a session carries the
//! role it was opened with, so a dev role switch is an explicit
//! session-replacement operation (the old token dies, a new one is
//! issued) and every session boundary leaves an audit record.

use sha2::{Digest, Sha256};

use crate::db::{current_epoch, escape, next_seq, read, split_packed, unescape, write, Dbs};
use crate::error::{err, HrgateError, Result};
use crate::roles::Role;

/// An authenticated session: the current user, the role the session was
/// opened with, and the user's department/branch affiliation. Created at
/// login, replaced on role switch, destroyed at logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: String,
    pub role: Role,
    pub department: String,
    pub branch: String,
}

/// A stored user record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub name: String,
    pub role: Role,
    pub department: String,
    pub branch: String,
}

/// Session info returned by list_sessions
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub user: String,
    pub role: Role,
    pub created_at: u64,
    pub expires_at: u64, // 0 = never
}

// ============================================================================
// Tokens and hashing
// ============================================================================

/// Generate a cryptographically secure token (32 bytes, base64url encoded)
pub fn generate_token() -> Result<String> {
    let mut bytes = [0u8; 32];
    getrandom::getrandom(&mut bytes).map_err(err)?;
    Ok(base64url_encode(&bytes))
}

/// Hash token with SHA-256 for storage
fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex_encode(&hasher.finalize())
}

/// Base64url encode without padding
fn base64url_encode(data: &[u8]) -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
    let mut result = String::with_capacity((data.len() * 4 + 2) / 3);
    for chunk in data.chunks(3) {
        let n = match chunk.len() {
            3 => ((chunk[0] as u32) << 16) | ((chunk[1] as u32) << 8) | (chunk[2] as u32),
            2 => ((chunk[0] as u32) << 16) | ((chunk[1] as u32) << 8),
            _ => (chunk[0] as u32) << 16,
        };
        result.push(ALPHABET[((n >> 18) & 0x3F) as usize] as char);
        result.push(ALPHABET[((n >> 12) & 0x3F) as usize] as char);
        if chunk.len() > 1 {
            result.push(ALPHABET[((n >> 6) & 0x3F) as usize] as char);
        }
        if chunk.len() > 2 {
            result.push(ALPHABET[(n & 0x3F) as usize] as char);
        }
    }
    result
}

fn hex_encode(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02x}", b)).collect()
}

fn generate_salt() -> Result<String> {
    let mut bytes = [0u8; 16];
    getrandom::getrandom(&mut bytes).map_err(err)?;
    Ok(hex_encode(&bytes))
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex_encode(&hasher.finalize())
}

// ============================================================================
// Users
// ============================================================================

fn pack_user(u: &User) -> String {
    format!(
        "{}|{}|{}|{}",
        u.role.as_str(),
        escape(&u.department),
        escape(&u.branch),
        escape(&u.name)
    )
}

fn unpack_user(username: &str, value: &str) -> Result<User> {
    let fields = split_packed(value);
    if fields.len() != 4 {
        return Err(HrgateError(format!("Corrupted user record for {}", username)));
    }
    // Unknown role tags degrade to the no-permission role, not an error
    let role = Role::parse(&fields[0]).unwrap_or(Role::Employee);
    Ok(User {
        username: username.to_string(),
        name: fields[3].clone(),
        role,
        department: fields[1].clone(),
        branch: fields[2].clone(),
    })
}

/// Create a user. The role is assigned here and never changes on the
/// user record; only sessions can carry a different (switched) role.
pub fn create_user(
    username: &str,
    name: &str,
    role: Role,
    department: &str,
    branch: &str,
) -> Result<()> {
    if username.is_empty() {
        return Err(HrgateError("Username must not be empty".into()));
    }
    let user = User {
        username: username.to_string(),
        name: name.to_string(),
        role,
        department: department.to_string(),
        branch: branch.to_string(),
    };
    write(|d, tx| {
        if d.users.get(tx, username).map_err(err)?.is_some() {
            return Err(HrgateError(format!("User '{}' already exists", username)));
        }
        d.users.put(tx, username, &pack_user(&user)).map_err(err)
    })
}

/// Look up a user record
pub fn get_user(username: &str) -> Result<Option<User>> {
    read(|d, tx| {
        match d.users.get(tx, username).map_err(err)? {
            Some(v) => Ok(Some(unpack_user(username, v)?)),
            None => Ok(None),
        }
    })
}

/// List all users, in key order
pub fn list_users() -> Result<Vec<User>> {
    read(|d, tx| {
        let mut users = Vec::new();
        for item in d.users.iter(tx).map_err(err)? {
            let (k, v) = item.map_err(err)?;
            users.push(unpack_user(k, v)?);
        }
        Ok(users)
    })
}

/// Delete a user and all of their sessions
pub fn delete_user(username: &str) -> Result<bool> {
    revoke_all_sessions(username)?;
    write(|d, tx| {
        d.credentials.delete(tx, username).map_err(err)?;
        d.users.delete(tx, username).map_err(err)
    })
}

// ============================================================================
// Credentials
// ============================================================================

/// Set (or replace) a user's password
pub fn set_password(username: &str, password: &str) -> Result<()> {
    let salt = generate_salt()?;
    let hash = hash_password(&salt, password);
    let value = format!("{}|{}", salt, hash);
    write(|d, tx| d.credentials.put(tx, username, &value).map_err(err))
}

/// Verify a password. Unknown users verify false, not error.
pub fn verify_password(username: &str, password: &str) -> Result<bool> {
    read(|d, tx| {
        let value = match d.credentials.get(tx, username).map_err(err)? {
            Some(v) => v.to_string(),
            None => return Ok(false),
        };
        let parts: Vec<&str> = value.split('|').collect();
        if parts.len() != 2 {
            return Err(HrgateError("Corrupted credentials".into()));
        }
        Ok(parts[1] == hash_password(parts[0], password))
    })
}

// ============================================================================
// Sessions
// ============================================================================

// Session value layout: username|role|created_at|expires_at (0 = never)
fn create_session_with_role(username: &str, role: Role, ttl_secs: Option<u64>) -> Result<String> {
    let token = generate_token()?;
    let hash = hash_token(&token);
    let now = current_epoch();
    let expires = ttl_secs.map(|t| now + t * 1000).unwrap_or(0);

    write(|d, tx| {
        let value = format!("{}|{}|{}|{}", escape(username), role.as_str(), now, expires);
        d.sessions.put(tx, &hash, &value).map_err(err)?;
        let idx_key = format!("{}/{}", escape(username), hash);
        d.sessions_by_user
            .put(tx, &idx_key, &expires.to_string())
            .map_err(err)
    })?;

    Ok(token)
}

/// Open a session for a user with their assigned role
pub fn create_session(username: &str, ttl_secs: Option<u64>) -> Result<String> {
    let user = get_user(username)?
        .ok_or_else(|| HrgateError(format!("Unknown user '{}'", username)))?;
    create_session_with_role(username, user.role, ttl_secs)
}

/// Validate a token and materialize the session it names.
/// Department and branch come from the user record; the role comes from
/// the session itself so switched sessions keep their switched role.
pub fn validate_session(token: &str) -> Result<Session> {
    let hash = hash_token(token);

    let (username, role) = read(|d, tx| {
        let value = d
            .sessions
            .get(tx, &hash)
            .map_err(err)?
            .ok_or_else(|| HrgateError("Invalid token".into()))?;

        let fields = split_packed(value);
        if fields.len() != 4 {
            return Err(HrgateError("Corrupted session".into()));
        }
        let expires: u64 = fields[3].parse().unwrap_or(0);
        if expires > 0 && expires < current_epoch() {
            return Err(HrgateError("Token expired".into()));
        }
        let role = Role::parse(&fields[1]).unwrap_or(Role::Employee);
        Ok((fields[0].clone(), role))
    })?;

    let user = get_user(&username)?
        .ok_or_else(|| HrgateError(format!("Unknown user '{}'", username)))?;

    Ok(Session {
        user: username,
        role,
        department: user.department,
        branch: user.branch,
    })
}

impl Session {
    /// Build a session directly (tests and embedding callers)
    pub fn new(user: &str, role: Role, department: &str, branch: &str) -> Self {
        Session {
            user: user.to_string(),
            role,
            department: department.to_string(),
            branch: branch.to_string(),
        }
    }
}

/// Revoke a session by token. Returns false if the token was unknown.
pub fn revoke_session(token: &str) -> Result<bool> {
    let hash = hash_token(token);

    write(|d, tx| {
        let value = match d.sessions.get(tx, &hash).map_err(err)? {
            Some(v) => v.to_string(),
            None => return Ok(false),
        };
        let fields = split_packed(&value);
        let username = fields.first().cloned().unwrap_or_default();

        d.sessions.delete(tx, &hash).map_err(err)?;
        let idx_key = format!("{}/{}", escape(&username), hash);
        d.sessions_by_user.delete(tx, &idx_key).map_err(err)?;
        Ok(true)
    })
}

/// List live sessions for a user (expired ones are skipped)
pub fn list_sessions(username: &str) -> Result<Vec<SessionInfo>> {
    let prefix = format!("{}/", escape(username));
    let now = current_epoch();

    read(|d, tx| {
        let mut results = Vec::new();
        for item in d.sessions_by_user.prefix_iter(tx, &prefix).map_err(err)? {
            let (key, _) = item.map_err(err)?;
            let hash = &key[prefix.len()..];
            if let Some(value) = d.sessions.get(tx, hash).map_err(err)? {
                let fields = split_packed(value);
                if fields.len() == 4 {
                    let expires: u64 = fields[3].parse().unwrap_or(0);
                    if expires == 0 || expires >= now {
                        results.push(SessionInfo {
                            user: fields[0].clone(),
                            role: Role::parse(&fields[1]).unwrap_or(Role::Employee),
                            created_at: fields[2].parse().unwrap_or(0),
                            expires_at: expires,
                        });
                    }
                }
            }
        }
        Ok(results)
    })
}

/// Revoke every session for a user. Returns the number revoked.
pub fn revoke_all_sessions(username: &str) -> Result<u64> {
    let prefix = format!("{}/", escape(username));

    write(|d, tx| {
        let mut hashes = Vec::new();
        for item in d.sessions_by_user.prefix_iter(tx, &prefix).map_err(err)? {
            let (key, _) = item.map_err(err)?;
            hashes.push(key[prefix.len()..].to_string());
        }
        let count = hashes.len() as u64;
        for hash in hashes {
            d.sessions.delete(tx, &hash).map_err(err)?;
            let idx_key = format!("{}{}", prefix, hash);
            d.sessions_by_user.delete(tx, &idx_key).map_err(err)?;
        }
        Ok(count)
    })
}

// ============================================================================
// Login / logout / role switch
// ============================================================================

fn record_audit(d: &Dbs, tx: &mut heed::RwTxn, username: &str, event: &str) -> Result<()> {
    let seq = next_seq(d, tx)?;
    let key = format!("{}/{:016x}/{}", escape(username), seq, escape(event));
    d.audit.put(tx, &key, &current_epoch()).map_err(err)
}

/// Login with password. Returns a session token; the session carries the
/// user's assigned role.
pub fn login(username: &str, password: &str) -> Result<String> {
    if !verify_password(username, password)? {
        return Err(HrgateError("Invalid credentials".into()));
    }
    let token = create_session(username, None)?;
    write(|d, tx| record_audit(d, tx, username, "login"))?;
    Ok(token)
}

/// Destroy a session. Returns false if the token was already dead.
pub fn logout(token: &str) -> Result<bool> {
    let username = validate_session(token).map(|s| s.user).ok();
    let revoked = revoke_session(token)?;
    if revoked {
        if let Some(user) = username {
            write(|d, tx| record_audit(d, tx, &user, "logout"))?;
        }
    }
    Ok(revoked)
}

/// Replace a session with one carrying a different role (dev affordance).
/// The old token is revoked, a new one is issued, and the switch is
/// audited. The stored user record keeps its original role.
pub fn switch_role(token: &str, new_role: Role) -> Result<String> {
    let session = validate_session(token)?;
    revoke_session(token)?;
    let new_token = create_session_with_role(&session.user, new_role, None)?;
    let event = format!("switch_role:{}->{}", session.role.as_str(), new_role.as_str());
    write(|d, tx| record_audit(d, tx, &session.user, &event))?;
    Ok(new_token)
}

/// The audit trail for a user: (event, epoch_millis) in write order
pub fn audit_trail(username: &str) -> Result<Vec<(String, u64)>> {
    let prefix = format!("{}/", escape(username));

    read(|d, tx| {
        let mut results = Vec::new();
        for item in d.audit.prefix_iter(tx, &prefix).map_err(err)? {
            let (key, epoch) = item.map_err(err)?;
            let rest = &key[prefix.len()..];
            if let Some(slash) = rest.find('/') {
                results.push((unescape(&rest[slash + 1..]).into_owned(), epoch));
            }
        }
        Ok(results)
    })
}
