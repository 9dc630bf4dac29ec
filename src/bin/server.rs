//! hrgate REST API server
//!
//! Run with: cargo run --release --features server --bin hrgate-server
//!
//! Page navigation goes through the route guard: allowed pages render,
//! everything else is silently redirected to /login or /portal with a
//! 303, exactly as the front end does it. Data endpoints map the same
//! guard decisions to 401/403 so API clients get something retryable.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use hrgate::{
    auth, bootstrap, directory, payroll, prefs,
    authorize, init, is_bootstrapped, nav_for,
    Employee, EmployeeQuery, EmployeeStatus, GuardDecision, Role, Route as PageRoute, Session,
};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct BootstrapRequest {
    admin: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct SwitchRoleRequest {
    role: String,
}

#[derive(Debug, Deserialize)]
struct PrefRequest {
    client: String,
    flag: String,
}

#[derive(Debug, Deserialize)]
struct EmployeeListQuery {
    search: Option<String>,
    department: Option<String>,
    branch: Option<String>,
    status: Option<String>,
    offset: Option<usize>,
    limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct TokenResponse {
    token: String,
}

#[derive(Debug, Serialize)]
struct NavResponse {
    items: Vec<NavEntry>,
}

#[derive(Debug, Serialize)]
struct NavEntry {
    path: &'static str,
    label: &'static str,
}

#[derive(Debug, Serialize)]
struct PageResponse {
    path: &'static str,
    user: String,
    role: &'static str,
}

#[derive(Debug, Serialize)]
struct ShownResponse {
    shown: bool,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    bootstrapped: bool,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal(e: hrgate::HrgateError) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error: e.0 }),
    )
}

fn bad_request(msg: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse { error: msg.into() }),
    )
}

// ============================================================================
// App State
// ============================================================================

#[derive(Clone)]
struct AppState {
    initialized: Arc<std::sync::atomic::AtomicBool>,
}

impl AppState {
    fn new() -> Self {
        Self {
            initialized: Arc::new(std::sync::atomic::AtomicBool::new(false)),
        }
    }

    fn is_initialized(&self) -> bool {
        self.initialized.load(std::sync::atomic::Ordering::SeqCst)
    }

    fn set_initialized(&self) {
        self.initialized.store(true, std::sync::atomic::Ordering::SeqCst);
    }

    fn require_initialized(&self) -> Result<(), ApiError> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(bad_request("Database not initialized"))
        }
    }
}

/// Resolve the session named by the Authorization bearer token, if any.
/// Invalid and expired tokens read as unauthenticated, never as errors.
fn session_from(headers: &HeaderMap) -> Option<Session> {
    let value = headers.get("authorization")?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    auth::validate_session(token).ok()
}

/// Map a guard decision onto a data endpoint: allowed sessions pass,
/// everyone else gets a JSON status the client can act on
fn data_gate(
    headers: &HeaderMap,
    route: PageRoute,
) -> Result<Session, ApiError> {
    let session = session_from(headers);
    match authorize(session.as_ref(), route) {
        GuardDecision::Allow => session.ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse { error: "Not authenticated".into() }),
            )
        }),
        GuardDecision::RedirectToLogin => Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse { error: "Not authenticated".into() }),
        )),
        GuardDecision::RedirectToPortal => Err((
            StatusCode::FORBIDDEN,
            Json(ErrorResponse { error: "Not permitted".into() }),
        )),
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        bootstrapped: is_bootstrapped().unwrap_or(false),
    })
}

async fn bootstrap_system(
    State(state): State<AppState>,
    Json(req): Json<BootstrapRequest>,
) -> Result<StatusCode, ApiError> {
    state.require_initialized()?;
    bootstrap(&req.admin, &req.password).map_err(internal)?;
    Ok(StatusCode::CREATED)
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    state.require_initialized()?;
    let token = auth::login(&req.username, &req.password).map_err(|_| {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse { error: "Invalid credentials".into() }),
        )
    })?;
    Ok(Json(TokenResponse { token }))
}

async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    state.require_initialized()?;
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| bad_request("Missing bearer token"))?;
    auth::logout(token).map_err(internal)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn switch_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SwitchRoleRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    state.require_initialized()?;
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| bad_request("Missing bearer token"))?;
    let role = Role::parse(&req.role)
        .ok_or_else(|| bad_request(format!("Unknown role '{}'", req.role)))?;
    let new_token = auth::switch_role(token, role).map_err(|e| {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse { error: e.0 }),
        )
    })?;
    Ok(Json(TokenResponse { token: new_token }))
}

async fn navigation(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<NavResponse>, ApiError> {
    state.require_initialized()?;
    let session = data_gate(&headers, PageRoute::Dashboard)?;
    let items = nav_for(session.role)
        .into_iter()
        .map(|item| NavEntry { path: item.route.path(), label: item.label })
        .collect();
    Ok(Json(NavResponse { items }))
}

/// The page guard. Renders a page stub on Allow, 303s to /login or
/// /portal otherwise, with no error payload either way.
async fn page(
    State(state): State<AppState>,
    Path(path): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    state.require_initialized()?;
    let route = PageRoute::from_path(&format!("/{}", path))
        .ok_or_else(|| bad_request(format!("Unknown route /{}", path)))?;
    let session = session_from(&headers);

    Ok(match authorize(session.as_ref(), route) {
        GuardDecision::RedirectToLogin => Redirect::to("/login").into_response(),
        GuardDecision::RedirectToPortal => Redirect::to("/portal").into_response(),
        GuardDecision::Allow => {
            let (user, role) = session
                .map(|s| (s.user, s.role.as_str()))
                .unwrap_or_else(|| ("anonymous".to_string(), ""));
            Json(PageResponse { path: route.path(), user, role }).into_response()
        }
    })
}

async fn list_employees(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(q): Query<EmployeeListQuery>,
) -> Result<Json<directory::Page>, ApiError> {
    state.require_initialized()?;
    let session = data_gate(&headers, PageRoute::Employees)?;

    let status = match q.status.as_deref() {
        Some(s) => Some(
            EmployeeStatus::parse(s)
                .ok_or_else(|| bad_request(format!("Unknown status '{}'", s)))?,
        ),
        None => None,
    };
    let query = EmployeeQuery {
        search: q.search,
        department: q.department,
        branch: q.branch,
        status,
        offset: q.offset.unwrap_or(0),
        limit: q.limit.unwrap_or(25),
    };
    let page = directory::list_visible(&session, &query).map_err(internal)?;
    Ok(Json(page))
}

async fn upsert_employee(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(employee): Json<Employee>,
) -> Result<StatusCode, ApiError> {
    state.require_initialized()?;
    data_gate(&headers, PageRoute::Employees)?;
    directory::upsert_employee(&employee).map_err(internal)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_employee(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<bool>, ApiError> {
    state.require_initialized()?;
    data_gate(&headers, PageRoute::Employees)?;
    let deleted = directory::delete_employee(&id).map_err(internal)?;
    Ok(Json(deleted))
}

async fn compute_payslip(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<payroll::PayslipInput>,
) -> Result<Json<payroll::Payslip>, ApiError> {
    state.require_initialized()?;
    data_gate(&headers, PageRoute::Payroll)?;
    let slip = payroll::compute_payslip(&input).map_err(|e| bad_request(e.0))?;
    Ok(Json(slip))
}

async fn mark_pref(
    State(state): State<AppState>,
    Json(req): Json<PrefRequest>,
) -> Result<StatusCode, ApiError> {
    state.require_initialized()?;
    prefs::mark_shown(&req.client, &req.flag).map_err(internal)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_pref(
    State(state): State<AppState>,
    Path((client, flag)): Path<(String, String)>,
) -> Result<Json<ShownResponse>, ApiError> {
    state.require_initialized()?;
    let shown = prefs::was_shown(&client, &flag).map_err(internal)?;
    Ok(Json(ShownResponse { shown }))
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let state = AppState::new();

    let args: Vec<String> = std::env::args().collect();
    let mut db_path: Option<String> = None;
    let mut port: u16 = 3000;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db-path" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    port = args[i + 1].parse().unwrap_or(3000);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("hrgate-server - HRMS access control and data server\n");
                println!("USAGE:");
                println!("    hrgate-server [OPTIONS]\n");
                println!("OPTIONS:");
                println!("    -d, --db-path <PATH>  Open the database at PATH");
                println!("    -p, --port <PORT>     Listen on PORT (default: 3000)");
                println!("    -h, --help            Show this help message");
                return;
            }
            _ => {}
        }
        i += 1;
    }

    let path = db_path.unwrap_or_else(|| "./hrgate_data".to_string());
    match init(&path) {
        Ok(()) => {
            state.set_initialized();
            println!("Database initialized at: {}", path);
        }
        Err(e) => {
            eprintln!("Failed to initialize database: {}", e.0);
            std::process::exit(1);
        }
    }

    let app = Router::new()
        // Health
        .route("/health", get(health))
        // System
        .route("/bootstrap", post(bootstrap_system))
        // Auth
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/switch-role", post(switch_role))
        // Navigation + page guard
        .route("/nav", get(navigation))
        .route("/pages/*path", get(page))
        // Directory
        .route("/employees", get(list_employees))
        .route("/employees", post(upsert_employee))
        .route("/employees/:id", delete(delete_employee))
        // Payroll
        .route("/payroll/payslip", post(compute_payslip))
        // Client prefs
        .route("/prefs", post(mark_pref))
        .route("/prefs/:client/:flag", get(get_pref))
        // Middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", port);
    println!("hrgate-server v{} listening on {}", env!("CARGO_PKG_VERSION"), addr);
    println!("\nEndpoints:");
    println!("  GET    /health                      Health check");
    println!("  POST   /bootstrap                   Create the first administrator");
    println!("  POST   /auth/login                  Login, returns bearer token");
    println!("  POST   /auth/logout                 Destroy the current session");
    println!("  POST   /auth/switch-role            Replace session with a new role");
    println!("  GET    /nav                         Navigation menu for the session role");
    println!("  GET    /pages/*path                 Guarded page (303 to /login or /portal)");
    println!("  GET    /employees                   Scoped, searchable employee list");
    println!("  POST   /employees                   Create or update an employee");
    println!("  DELETE /employees/:id               Delete an employee");
    println!("  POST   /payroll/payslip             Compute a payslip");
    println!("  POST   /prefs                       Mark a one-shot client flag");
    println!("  GET    /prefs/:client/:flag         Read a one-shot client flag");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
