//! HTTP layer of the portal: router, session wiring and all form handlers.
//!
//! The surface is HTML-form-oriented: every failure funnels into a one-shot
//! flash notice and a redirect, never a stack trace. Handlers share an
//! `AppState` carrying the resolved configuration and the user directory.
//!
//! Per-request state machine: Anonymous until `authenticate` succeeds, back
//! to Anonymous on logout or when the session's user row can no longer be
//! resolved (session invalidation).

use axum::{
    extract::{Path as UrlPath, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tower_sessions::{
    cookie::{time::Duration, Key},
    Expiry, MemoryStore, Session, SessionManagerLayer,
};
use tracing::{error, info, warn};

use crate::auth::{self, SESSION_USER_KEY};
use crate::calendar;
use crate::config::Config;
use crate::directory::{DirectoryError, PasswordChange, UserDirectory};
use crate::extract;
use crate::models::{ExtractedFile, NewUser, SessionUser, UserProfile};
use crate::pages;

/// Shared app state for the portal handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub directory: Arc<UserDirectory>,
}

#[derive(Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub employee_number: String,
    pub email: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub terms: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct PeriodForm {
    #[serde(default)]
    pub pay_date: Option<String>,
}

#[derive(Deserialize)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Deserialize)]
pub struct ForgotPasswordForm {
    #[allow(dead_code)] // Stub flow: the address is accepted but never used
    pub email: String,
}

/// Create the portal router with its session layer.
pub fn create_router(state: AppState) -> Router {
    let key = match Key::try_from(state.config.secret_key.as_bytes()) {
        Ok(key) => key,
        Err(_) => {
            warn!("PORTAL_SECRET_KEY shorter than 64 bytes; using a generated session key");
            Key::generate()
        }
    };

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_signed(key)
        .with_expiry(Expiry::OnInactivity(Duration::hours(8)));

    Router::new()
        .route("/", get(home))
        .route("/register", get(register_page).post(register))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
        .route("/portal", get(portal_page).post(portal_select))
        .route("/download/:filename", get(download))
        .route("/delete_payslip/:filename", post(delete_payslip))
        .route(
            "/change-password",
            get(change_password_page).post(change_password),
        )
        .route(
            "/forgot-password",
            get(forgot_password_page).post(forgot_password),
        )
        .route("/terms", get(terms))
        .route("/contact-hr", get(contact_hr))
        .route("/health", get(health))
        .layer(session_layer)
        .with_state(state)
}

/// Queue a flash and redirect; the notice renders on the next page.
async fn flash_redirect(
    session: &Session,
    level: &str,
    message: impl Into<String>,
    to: &str,
) -> Response {
    auth::flash(session, level, message).await;
    Redirect::to(to).into_response()
}

/// Resolve the logged-in user or produce the login redirect.
async fn require_login(session: &Session) -> Result<SessionUser, Response> {
    match auth::session_user(session).await {
        Some(user) => Ok(user),
        None => Err(flash_redirect(session, "warning", "Please login first!", "/login").await),
    }
}

/// Re-resolve the session's user against the directory. A missing row
/// invalidates the session and forces logout.
async fn resolve_profile(
    state: &AppState,
    session: &Session,
    user: &SessionUser,
) -> Result<UserProfile, Response> {
    match state.directory.find_profile(&user.username) {
        Ok(Some(profile)) => Ok(profile),
        Ok(None) => {
            warn!(username = %user.username, "session user no longer in directory, forcing logout");
            let _ = session.flush().await;
            Err(flash_redirect(session, "danger", "User not found!", "/login").await)
        }
        Err(e) => {
            error!("directory lookup failed: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR.into_response())
        }
    }
}

async fn home(session: Session) -> Redirect {
    if auth::session_user(&session).await.is_some() {
        Redirect::to("/portal")
    } else {
        Redirect::to("/login")
    }
}

async fn register_page(session: Session) -> Html<String> {
    Html(pages::register(&auth::take_flashes(&session).await))
}

async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.terms.is_none() {
        return flash_redirect(
            &session,
            "danger",
            "You must agree to the terms and conditions.",
            "/register",
        )
        .await;
    }

    let department = form
        .department
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(String::from);
    let new_user = NewUser {
        username: form.username.trim().to_string(),
        password: form.password.trim().to_string(),
        employee_number: form.employee_number.trim().to_string(),
        email: form.email.trim().to_string(),
        department,
    };

    match state.directory.register(&new_user) {
        Ok(()) => {
            info!(username = %new_user.username, "user registered");
            flash_redirect(
                &session,
                "success",
                "Registration successful! Please login.",
                "/login",
            )
            .await
        }
        Err(DirectoryError::Conflict) => {
            flash_redirect(
                &session,
                "danger",
                "Username, email, or employee number already exists!",
                "/register",
            )
            .await
        }
        Err(e) => {
            error!("registration failed: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn login_page(session: Session) -> Html<String> {
    Html(pages::login(&auth::take_flashes(&session).await))
}

async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let identifier = form.username.trim();
    match state.directory.authenticate(identifier, form.password.trim()) {
        Ok(Some(profile)) => {
            session.clear().await;
            let user = SessionUser {
                username: profile.username.clone(),
                employee_number: profile.employee_number,
                department: profile.department,
            };
            if session.insert(SESSION_USER_KEY, &user).await.is_err() {
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
            info!(username = %user.username, "login");
            flash_redirect(
                &session,
                "success",
                format!("Welcome back, {}!", user.username),
                "/portal",
            )
            .await
        }
        Ok(None) => {
            flash_redirect(
                &session,
                "danger",
                "Invalid username/email or password!",
                "/login",
            )
            .await
        }
        Err(e) => {
            error!("authentication failed: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn logout(session: Session) -> Response {
    let user = auth::session_user(&session).await;
    let _ = session.flush().await;
    if let Some(user) = user {
        info!(username = %user.username, "logout");
        flash_redirect(&session, "info", format!("Goodbye, {}!", user.username), "/login").await
    } else {
        Redirect::to("/login").into_response()
    }
}

async fn portal_page(State(state): State<AppState>, session: Session) -> Response {
    let user = match require_login(&session).await {
        Ok(user) => user,
        Err(redirect) => return redirect,
    };
    let profile = match resolve_profile(&state, &session, &user).await {
        Ok(profile) => profile,
        Err(response) => return response,
    };

    let periods = calendar::generate(
        state.config.pay_anchor,
        state.config.pay_periods,
        &state.config.master_pdf_dir,
    );
    let hidden = auth::hidden_payslips(&session).await;
    let history = match list_history(&state.config.output_dir, &profile.employee_number) {
        Ok(mut files) => {
            files.retain(|f| !hidden.contains(&f.filename));
            files
        }
        Err(e) => {
            error!("failed to list output directory: {e}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let flashes = auth::take_flashes(&session).await;
    Html(pages::portal(&flashes, &user, &periods, &history)).into_response()
}

async fn portal_select(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<PeriodForm>,
) -> Response {
    let user = match require_login(&session).await {
        Ok(user) => user,
        Err(redirect) => return redirect,
    };
    let profile = match resolve_profile(&state, &session, &user).await {
        Ok(profile) => profile,
        Err(response) => return response,
    };

    let Some(selected) = form.pay_date else {
        return Redirect::to("/portal").into_response();
    };

    let periods = calendar::generate(
        state.config.pay_anchor,
        state.config.pay_periods,
        &state.config.master_pdf_dir,
    );
    // Unknown or unavailable period: warn without touching the extractor.
    let Some(period) = periods.iter().find(|p| p.label == selected && p.available) else {
        return flash_redirect(
            &session,
            "danger",
            "Selected payslip is not available.",
            "/portal",
        )
        .await;
    };

    match extract::extract_payslip(
        &profile.employee_number,
        &period.filepath,
        &period.label,
        &state.config.output_dir,
    ) {
        Ok(Some(path)) => send_pdf(&path).await,
        Ok(None) => {
            flash_redirect(
                &session,
                "danger",
                "Selected payslip is not available.",
                "/portal",
            )
            .await
        }
        Err(e) => {
            error!(period = %period.label, "payslip extraction failed: {e}");
            flash_redirect(
                &session,
                "danger",
                "Payslip extraction failed. Please contact HR.",
                "/portal",
            )
            .await
        }
    }
}

async fn download(
    State(state): State<AppState>,
    session: Session,
    UrlPath(filename): UrlPath<String>,
) -> Response {
    let user = match require_login(&session).await {
        Ok(user) => user,
        Err(redirect) => return redirect,
    };

    // Path traversal guard plus ownership check: only the caller's own
    // extracted payslips are reachable.
    let own_prefix = format!("employee_{}_", user.employee_number);
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return StatusCode::BAD_REQUEST.into_response();
    }
    if !filename.starts_with(&own_prefix) || !filename.ends_with(".pdf") {
        return flash_redirect(&session, "danger", "Payslip not found!", "/portal").await;
    }

    let path = state.config.output_dir.join(&filename);
    if !path.exists() {
        return flash_redirect(&session, "danger", "Payslip not found!", "/portal").await;
    }
    send_pdf(&path).await
}

async fn delete_payslip(
    session: Session,
    UrlPath(filename): UrlPath<String>,
) -> Response {
    if auth::session_user(&session).await.is_none() {
        return flash_redirect(&session, "warning", "User session expired.", "/login").await;
    }

    // Display-only: hides the entry for this session, the file stays on disk.
    auth::hide_payslip(&session, &filename).await;
    flash_redirect(
        &session,
        "success",
        format!("Payslip '{filename}' removed from history."),
        "/portal",
    )
    .await
}

async fn change_password_page(session: Session) -> Response {
    if auth::session_user(&session).await.is_none() {
        return flash_redirect(&session, "warning", "Please login first!", "/login").await;
    }
    Html(pages::change_password(&auth::take_flashes(&session).await)).into_response()
}

async fn change_password(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ChangePasswordForm>,
) -> Response {
    let user = match require_login(&session).await {
        Ok(user) => user,
        Err(redirect) => return redirect,
    };

    if form.new_password.trim() != form.confirm_password.trim() {
        return flash_redirect(
            &session,
            "danger",
            "New password and confirmation do not match.",
            "/change-password",
        )
        .await;
    }

    match state.directory.change_password(
        &user.username,
        form.current_password.trim(),
        form.new_password.trim(),
    ) {
        Ok(PasswordChange::Updated) => {
            info!(username = %user.username, "password changed");
            flash_redirect(
                &session,
                "success",
                "Password updated successfully!",
                "/portal",
            )
            .await
        }
        Ok(PasswordChange::InvalidCurrent) => {
            flash_redirect(
                &session,
                "danger",
                "Current password is incorrect.",
                "/change-password",
            )
            .await
        }
        Err(e) => {
            error!("password change failed: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn forgot_password_page(session: Session) -> Html<String> {
    Html(pages::forgot_password(&auth::take_flashes(&session).await))
}

async fn forgot_password(session: Session, Form(_form): Form<ForgotPasswordForm>) -> Response {
    // Stub: no reset mail is sent, and the notice never reveals whether the
    // address is registered.
    flash_redirect(
        &session,
        "info",
        "If the email exists, a password reset link has been sent.",
        "/login",
    )
    .await
}

async fn terms(session: Session) -> Html<String> {
    Html(pages::terms(&auth::take_flashes(&session).await))
}

async fn contact_hr(session: Session) -> Html<String> {
    Html(pages::contact_hr(&auth::take_flashes(&session).await))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Scan the output directory for this employee's extracted payslips.
fn list_history(output_dir: &Path, employee_number: &str) -> std::io::Result<Vec<ExtractedFile>> {
    let prefix = format!("employee_{employee_number}_");
    let mut files = Vec::new();
    for entry in std::fs::read_dir(output_dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(pay_date) = name
            .strip_prefix(&prefix)
            .and_then(|rest| rest.strip_suffix(".pdf"))
        {
            files.push(ExtractedFile {
                pay_date: pay_date.to_string(),
                filename: name.clone(),
            });
        }
    }
    files.sort_by(|a, b| a.filename.cmp(&b.filename));
    Ok(files)
}

async fn send_pdf(path: &Path) -> Response {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(path = %path.display(), "failed to read extracted payslip: {e}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("payslip.pdf");
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use chrono::NaiveDate;
    use tower::ServiceExt; // For .oneshot() testing

    fn test_state(dir: &std::path::Path) -> AppState {
        let master_pdf_dir = dir.join("master");
        let output_dir = dir.join("output");
        std::fs::create_dir_all(&master_pdf_dir).unwrap();
        std::fs::create_dir_all(&output_dir).unwrap();
        let config = Config {
            secret_key: "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef".into(),
            base_dir: dir.to_path_buf(),
            master_pdf_dir,
            output_dir,
            db_path: dir.join("users.db"),
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            pay_anchor: NaiveDate::from_ymd_opt(2025, 7, 24).unwrap(),
            pay_periods: 26,
        };
        AppState {
            config: Arc::new(config),
            directory: Arc::new(UserDirectory::in_memory().unwrap()),
        }
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .method("POST")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn location(response: &axum::response::Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .expect("redirect expected")
            .to_str()
            .unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(test_state(dir.path()));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn anonymous_portal_redirects_to_login() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(test_state(dir.path()));
        let response = app
            .oneshot(Request::builder().uri("/portal").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
    }

    #[tokio::test]
    async fn anonymous_download_redirects_to_login() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(test_state(dir.path()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/download/employee_55_24-Jul-2025.pdf")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
    }

    #[tokio::test]
    async fn register_without_terms_bounces_back() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(test_state(dir.path()));
        let response = app
            .oneshot(form_request(
                "/register",
                "username=ann&password=pw&employee_number=55&email=ann%40example.com",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/register");
    }

    #[tokio::test]
    async fn register_then_duplicate_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        let app = create_router(state.clone());

        let body = "username=ann&password=pw&employee_number=55&email=ann%40example.com&terms=agreed";
        let response = app
            .clone()
            .oneshot(form_request("/register", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
        assert!(state.directory.authenticate("ann", "pw").unwrap().is_some());

        // Same employee number, different username and email: still a conflict.
        let dup = "username=bob&password=pw&employee_number=55&email=bob%40example.com&terms=agreed";
        let response = app.oneshot(form_request("/register", dup)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/register");
    }

    #[tokio::test]
    async fn login_wrong_password_bounces_back() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        state
            .directory
            .register(&NewUser {
                username: "ann".into(),
                password: "pw".into(),
                employee_number: "55".into(),
                email: "ann@example.com".into(),
                department: None,
            })
            .unwrap();
        let app = create_router(state);

        let response = app
            .oneshot(form_request("/login", "username=ann&password=nope"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
    }

    /// Log in and return the session cookie for follow-up requests.
    async fn login_session(app: &Router, identifier: &str, password: &str) -> String {
        let response = app
            .clone()
            .oneshot(form_request(
                "/login",
                &format!("username={identifier}&password={password}"),
            ))
            .await
            .unwrap();
        assert_eq!(location(&response), "/portal");
        // Keep only the name=value pair, dropping cookie attributes.
        response
            .headers()
            .get(header::SET_COOKIE)
            .expect("session cookie expected")
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn login_by_email_and_view_portal() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        state
            .directory
            .register(&NewUser {
                username: "ann".into(),
                password: "pw".into(),
                employee_number: "55".into(),
                email: "ann@example.com".into(),
                department: Some("Finance".into()),
            })
            .unwrap();
        let app = create_router(state);

        let cookie = login_session(&app, "ann%40example.com", "pw").await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/portal")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Welcome, ann"));
        assert!(html.contains("24-Jul-2025"));
    }

    #[tokio::test]
    async fn selecting_period_outside_window_warns_without_extracting() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        state
            .directory
            .register(&NewUser {
                username: "ann".into(),
                password: "pw".into(),
                employee_number: "55".into(),
                email: "ann@example.com".into(),
                department: None,
            })
            .unwrap();
        let output_dir = state.config.output_dir.clone();
        let app = create_router(state);

        let cookie = login_session(&app, "ann", "pw").await;
        let mut request = form_request("/portal", "pay_date=01-Jan-1999");
        request
            .headers_mut()
            .insert(header::COOKIE, cookie.parse().unwrap());
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/portal");
        // Extractor never ran: nothing appeared in the output directory.
        assert_eq!(std::fs::read_dir(&output_dir).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn download_rejects_other_employees_files() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        state
            .directory
            .register(&NewUser {
                username: "ann".into(),
                password: "pw".into(),
                employee_number: "55".into(),
                email: "ann@example.com".into(),
                department: None,
            })
            .unwrap();
        std::fs::write(
            state.config.output_dir.join("employee_66_24-Jul-2025.pdf"),
            b"%PDF-1.5",
        )
        .unwrap();
        let app = create_router(state);

        let cookie = login_session(&app, "ann", "pw").await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/download/employee_66_24-Jul-2025.pdf")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/portal");
    }

    #[tokio::test]
    async fn download_streams_own_payslip_as_attachment() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        state
            .directory
            .register(&NewUser {
                username: "ann".into(),
                password: "pw".into(),
                employee_number: "55".into(),
                email: "ann@example.com".into(),
                department: None,
            })
            .unwrap();
        std::fs::write(
            state.config.output_dir.join("employee_55_24-Jul-2025.pdf"),
            b"%PDF-1.5 payslip",
        )
        .unwrap();
        let app = create_router(state);

        let cookie = login_session(&app, "ann", "pw").await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/download/employee_55_24-Jul-2025.pdf")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(disposition.contains("employee_55_24-Jul-2025.pdf"));
    }

    #[tokio::test]
    async fn delete_payslip_hides_entry_but_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        state
            .directory
            .register(&NewUser {
                username: "ann".into(),
                password: "pw".into(),
                employee_number: "55".into(),
                email: "ann@example.com".into(),
                department: None,
            })
            .unwrap();
        let file_path = state.config.output_dir.join("employee_55_24-Jul-2025.pdf");
        std::fs::write(&file_path, b"%PDF-1.5").unwrap();
        let app = create_router(state);

        let cookie = login_session(&app, "ann", "pw").await;
        let mut request = form_request("/delete_payslip/employee_55_24-Jul-2025.pdf", "");
        request
            .headers_mut()
            .insert(header::COOKIE, cookie.parse().unwrap());
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        // The file survives; only the display list changes.
        assert!(file_path.exists());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/portal")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!html.contains("/download/employee_55_24-Jul-2025.pdf"));
    }
}
