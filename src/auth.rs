//! Password hashing and session helpers.
//!
//! Passwords are stored only as bcrypt hashes; verification is a one-way
//! salted comparison. Session state (authenticated user snapshot, one-shot
//! flash notices, the display-only hidden-payslip list) lives server-side in
//! the tower-sessions store, keyed by constants below.

use bcrypt::{hash, verify, DEFAULT_COST};
use tower_sessions::Session;

use crate::models::{Flash, SessionUser};

/// Key for the authenticated user snapshot in the session.
pub const SESSION_USER_KEY: &str = "user";
/// Key for pending one-shot notices.
pub const SESSION_FLASH_KEY: &str = "flash";
/// Key for filenames hidden from the payslip history display.
pub const SESSION_HIDDEN_KEY: &str = "hidden_payslips";

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, DEFAULT_COST)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

/// Read the logged-in user from the session, if any.
pub async fn session_user(session: &Session) -> Option<SessionUser> {
    session.get::<SessionUser>(SESSION_USER_KEY).await.ok()?
}

/// Queue a one-shot notice for the next rendered page.
pub async fn flash(session: &Session, level: &str, message: impl Into<String>) {
    let mut pending: Vec<Flash> = session
        .get(SESSION_FLASH_KEY)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    pending.push(Flash::new(level, message));
    let _ = session.insert(SESSION_FLASH_KEY, pending).await;
}

/// Take all pending notices, clearing them from the session.
pub async fn take_flashes(session: &Session) -> Vec<Flash> {
    session
        .remove::<Vec<Flash>>(SESSION_FLASH_KEY)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Filenames "deleted" from the history view this session. Display-only:
/// the files themselves are never removed.
pub async fn hidden_payslips(session: &Session) -> Vec<String> {
    session
        .get(SESSION_HIDDEN_KEY)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

pub async fn hide_payslip(session: &Session, filename: &str) {
    let mut hidden = hidden_payslips(session).await;
    if !hidden.iter().any(|f| f == filename) {
        hidden.push(filename.to_string());
    }
    let _ = session.insert(SESSION_HIDDEN_KEY, hidden).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hashed = hash_password("hunter2").expect("hash failed");
        assert_ne!(hashed, "hunter2"); // Never plain text
        assert!(verify_password("hunter2", &hashed).unwrap());
        assert!(!verify_password("hunter3", &hashed).unwrap());
    }
}
