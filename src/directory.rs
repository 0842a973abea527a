//! User directory: the persisted credential and profile store.
//!
//! A single SQLite `users` table with uniqueness on username, email and
//! employee number. A duplicate on any of the three surfaces as one generic
//! `Conflict` — the colliding field is deliberately not identified to the
//! caller. Passwords are bcrypt-hashed before they reach this module's
//! storage and are only ever compared via `auth::verify_password`.

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;

use crate::auth::{hash_password, verify_password};
use crate::models::{NewUser, UserProfile};

#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Username, email or employee number collided with an existing row.
    #[error("username, email, or employee number already exists")]
    Conflict,

    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Outcome of a password change attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum PasswordChange {
    Updated,
    InvalidCurrent,
}

pub struct UserDirectory {
    conn: Mutex<Connection>,
}

impl UserDirectory {
    /// Open (or create) the directory database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryError> {
        let conn = Connection::open(path)?;
        let dir = UserDirectory {
            conn: Mutex::new(conn),
        };
        dir.init()?;
        Ok(dir)
    }

    /// In-memory directory for tests.
    pub fn in_memory() -> Result<Self, DirectoryError> {
        let conn = Connection::open_in_memory()?;
        let dir = UserDirectory {
            conn: Mutex::new(conn),
        };
        dir.init()?;
        Ok(dir)
    }

    fn init(&self) -> Result<(), DirectoryError> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL,
                employee_number TEXT UNIQUE NOT NULL,
                email TEXT UNIQUE NOT NULL,
                department TEXT
            );",
        )?;
        Ok(())
    }

    /// Register a new user. Any uniqueness violation maps to `Conflict`.
    pub fn register(&self, new_user: &NewUser) -> Result<(), DirectoryError> {
        let hashed = hash_password(&new_user.password)?;
        let conn = self.conn.lock().unwrap();
        let result = conn.execute(
            "INSERT INTO users (username, password, employee_number, email, department)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new_user.username,
                hashed,
                new_user.employee_number,
                new_user.email,
                new_user.department,
            ],
        );
        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(DirectoryError::Conflict)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Authenticate by username or email. Returns `None` for both unknown
    /// identifier and wrong password — indistinguishable by design.
    pub fn authenticate(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<Option<UserProfile>, DirectoryError> {
        let conn = self.conn.lock().unwrap();
        let row = conn
            .query_row(
                "SELECT password, username, email, employee_number, department
                 FROM users WHERE username = ?1 OR email = ?1",
                params![identifier],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        UserProfile {
                            username: row.get(1)?,
                            email: row.get(2)?,
                            employee_number: row.get(3)?,
                            department: row.get(4)?,
                        },
                    ))
                },
            )
            .optional()?;

        match row {
            Some((stored_hash, profile)) if verify_password(password, &stored_hash)? => {
                Ok(Some(profile))
            }
            _ => Ok(None),
        }
    }

    /// Look a user up by exact username, without credentials. Used to
    /// re-resolve the session's user on each portal view.
    pub fn find_profile(&self, username: &str) -> Result<Option<UserProfile>, DirectoryError> {
        let conn = self.conn.lock().unwrap();
        let profile = conn
            .query_row(
                "SELECT username, email, employee_number, department
                 FROM users WHERE username = ?1",
                params![username],
                |row| {
                    Ok(UserProfile {
                        username: row.get(0)?,
                        email: row.get(1)?,
                        employee_number: row.get(2)?,
                        department: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(profile)
    }

    /// Change a user's password after verifying the current one.
    pub fn change_password(
        &self,
        username: &str,
        current: &str,
        new: &str,
    ) -> Result<PasswordChange, DirectoryError> {
        let conn = self.conn.lock().unwrap();
        let stored: Option<String> = conn
            .query_row(
                "SELECT password FROM users WHERE username = ?1",
                params![username],
                |row| row.get(0),
            )
            .optional()?;

        let Some(stored_hash) = stored else {
            return Ok(PasswordChange::InvalidCurrent);
        };
        if !verify_password(current, &stored_hash)? {
            return Ok(PasswordChange::InvalidCurrent);
        }

        let hashed = hash_password(new)?;
        conn.execute(
            "UPDATE users SET password = ?1 WHERE username = ?2",
            params![hashed, username],
        )?;
        Ok(PasswordChange::Updated)
    }
}
