//! Employee directory
//!
//! CRUD over packed employee records plus the query shaping every list
//! page does: scope filter, case-insensitive name search, attribute
//! filters, then offset/limit pagination. The page carries the total
//! match count (pre-pagination) alongside the slice.

use serde::{Deserialize, Serialize};

use crate::auth::Session;
use crate::db::{current_epoch, escape, read, split_packed, write};
use crate::error::{err, HrgateError, Result};
use crate::permissions::is_permitted;
use crate::routes::Route;
use crate::scope::{scope_for, DataScope, Scoped};

/// Employment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeStatus {
    Active,
    OnLeave,
    Probation,
    Terminated,
}

const STATUSES: &[(&str, EmployeeStatus)] = &[
    ("ACTIVE", EmployeeStatus::Active),
    ("ON_LEAVE", EmployeeStatus::OnLeave),
    ("PROBATION", EmployeeStatus::Probation),
    ("TERMINATED", EmployeeStatus::Terminated),
];

impl EmployeeStatus {
    pub fn as_str(self) -> &'static str {
        STATUSES
            .iter()
            .find(|(_, s)| *s == self)
            .map(|(n, _)| *n)
            .unwrap_or("ACTIVE")
    }

    pub fn parse(s: &str) -> Option<EmployeeStatus> {
        STATUSES.iter().find(|(n, _)| *n == s).map(|(_, st)| *st)
    }

    /// Display badge for each status, exhaustively matched so a new
    /// variant cannot ship without one
    pub fn badge(self) -> &'static str {
        match self {
            EmployeeStatus::Active => "badge-success",
            EmployeeStatus::OnLeave => "badge-warning",
            EmployeeStatus::Probation => "badge-info",
            EmployeeStatus::Terminated => "badge-danger",
        }
    }
}

/// A directory record, tagged with department and branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub department: String,
    pub branch: String,
    pub job_title: String,
    pub status: EmployeeStatus,
}

impl Scoped for Employee {
    fn department(&self) -> &str {
        &self.department
    }
}

/// Directory list query: search and filters apply before pagination
#[derive(Debug, Clone, Default)]
pub struct EmployeeQuery {
    /// Case-insensitive substring match on the employee name
    pub search: Option<String>,
    pub department: Option<String>,
    pub branch: Option<String>,
    pub status: Option<EmployeeStatus>,
    pub offset: usize,
    /// 0 means no limit
    pub limit: usize,
}

/// One page of results plus the pre-pagination match count
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub items: Vec<Employee>,
    pub total: usize,
}

fn pack_employee(e: &Employee) -> String {
    format!(
        "{}|{}|{}|{}|{}",
        escape(&e.name),
        escape(&e.department),
        escape(&e.branch),
        escape(&e.job_title),
        e.status.as_str()
    )
}

fn unpack_employee(id: &str, value: &str) -> Result<Employee> {
    let fields = split_packed(value);
    if fields.len() != 5 {
        return Err(HrgateError(format!("Corrupted employee record {}", id)));
    }
    let status = EmployeeStatus::parse(&fields[4])
        .ok_or_else(|| HrgateError(format!("Unknown status '{}' on {}", fields[4], id)))?;
    Ok(Employee {
        id: id.to_string(),
        name: fields[0].clone(),
        department: fields[1].clone(),
        branch: fields[2].clone(),
        job_title: fields[3].clone(),
        status,
    })
}

fn dept_key(department: &str, id: &str) -> String {
    format!("{}/{}", escape(department), escape(id))
}

/// Insert or replace an employee record, keeping the department index in
/// sync when the department changes
pub fn upsert_employee(e: &Employee) -> Result<()> {
    if e.id.is_empty() {
        return Err(HrgateError("Employee id must not be empty".into()));
    }
    write(|d, tx| {
        if let Some(old) = d.employees.get(tx, &e.id).map_err(err)? {
            let old = unpack_employee(&e.id, old)?;
            if old.department != e.department {
                d.employees_by_dept
                    .delete(tx, &dept_key(&old.department, &e.id))
                    .map_err(err)?;
            }
        }
        d.employees.put(tx, &e.id, &pack_employee(e)).map_err(err)?;
        d.employees_by_dept
            .put(tx, &dept_key(&e.department, &e.id), &current_epoch())
            .map_err(err)
    })
}

pub fn get_employee(id: &str) -> Result<Option<Employee>> {
    read(|d, tx| match d.employees.get(tx, id).map_err(err)? {
        Some(v) => Ok(Some(unpack_employee(id, v)?)),
        None => Ok(None),
    })
}

pub fn delete_employee(id: &str) -> Result<bool> {
    write(|d, tx| {
        let Some(value) = d.employees.get(tx, id).map_err(err)? else {
            return Ok(false);
        };
        let e = unpack_employee(id, value)?;
        d.employees_by_dept
            .delete(tx, &dept_key(&e.department, id))
            .map_err(err)?;
        d.employees.delete(tx, id).map_err(err)
    })
}

/// All employees in a department, via the index
pub fn list_department(department: &str) -> Result<Vec<Employee>> {
    let prefix = format!("{}/", escape(department));
    read(|d, tx| {
        let mut out = Vec::new();
        for item in d.employees_by_dept.prefix_iter(tx, &prefix).map_err(err)? {
            let (key, _) = item.map_err(err)?;
            let id = crate::db::unescape(&key[prefix.len()..]).into_owned();
            if let Some(v) = d.employees.get(tx, &id).map_err(err)? {
                out.push(unpack_employee(&id, v)?);
            }
        }
        Ok(out)
    })
}

fn matches_query(e: &Employee, q: &EmployeeQuery) -> bool {
    if let Some(s) = &q.search {
        if !e.name.to_lowercase().contains(&s.to_lowercase()) {
            return false;
        }
    }
    if let Some(dept) = &q.department {
        if &e.department != dept {
            return false;
        }
    }
    if let Some(branch) = &q.branch {
        if &e.branch != branch {
            return false;
        }
    }
    if let Some(status) = q.status {
        if e.status != status {
            return false;
        }
    }
    true
}

fn paginate(mut matched: Vec<Employee>, q: &EmployeeQuery) -> Page {
    let total = matched.len();
    let items: Vec<Employee> = if q.offset >= total {
        Vec::new()
    } else {
        matched = matched.split_off(q.offset);
        if q.limit > 0 && matched.len() > q.limit {
            matched.truncate(q.limit);
        }
        matched
    };
    Page { items, total }
}

fn read_all() -> Result<Vec<Employee>> {
    read(|d, tx| {
        let mut out = Vec::new();
        for item in d.employees.iter(tx).map_err(err)? {
            let (k, v) = item.map_err(err)?;
            out.push(unpack_employee(k, v)?);
        }
        Ok(out)
    })
}

/// Unscoped listing, in key order. Search and filters apply before
/// pagination; `total` counts every match.
pub fn list_employees(q: &EmployeeQuery) -> Result<Page> {
    let matched: Vec<Employee> = read_all()?
        .into_iter()
        .filter(|e| matches_query(e, q))
        .collect();
    Ok(paginate(matched, q))
}

/// The listing a session is allowed to see.
///
/// A record is visible iff the employees page is reachable for the
/// session's role AND the session's data scope admits the record. Roles
/// without the page get an empty result, silently. Department scopes
/// read through the department index instead of scanning every record.
pub fn list_visible(session: &Session, q: &EmployeeQuery) -> Result<Page> {
    if !is_permitted(session.role, Route::Employees) {
        return Ok(Page { items: Vec::new(), total: 0 });
    }
    let admitted = match scope_for(session) {
        DataScope::Nothing => return Ok(Page { items: Vec::new(), total: 0 }),
        DataScope::Department(dept) => list_department(&dept)?,
        DataScope::All => read_all()?,
    };
    let matched: Vec<Employee> = admitted
        .into_iter()
        .filter(|e| matches_query(e, q))
        .collect();
    Ok(paginate(matched, q))
}
