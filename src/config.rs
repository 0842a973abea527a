//! Portal configuration, resolved once at startup from the environment.
//!
//! Everything downstream receives `&Config` (or a clone in shared state);
//! no module reads the environment after `Config::from_env` returns.
//! A malformed anchor date or bind address is a deployment error and fails
//! fast here rather than at first use.

use chrono::NaiveDate;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Anchor of the fortnightly pay calendar when not configured (DD-MM-YYYY).
const DEFAULT_PAY_ANCHOR: &str = "24-07-2025";
/// Number of pay periods the portal offers by default (one year, fortnightly).
const DEFAULT_PAY_PERIODS: usize = 26;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid PORTAL_PAY_ANCHOR {0:?}: expected DD-MM-YYYY")]
    BadAnchorDate(String),

    #[error("invalid PORTAL_PAY_PERIODS {0:?}: expected a positive integer")]
    BadPeriodCount(String),

    #[error("invalid PORTAL_BIND_ADDR {0:?}")]
    BadBindAddr(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Keys the signed session cookie. Must be at least 64 bytes to be
    /// usable; shorter values fall back to a generated per-process key.
    pub secret_key: String,
    pub base_dir: PathBuf,
    /// One master PDF per pay period lives here, named `<DD-Mon-YYYY>.pdf`.
    pub master_pdf_dir: PathBuf,
    /// Extracted per-employee payslips are written here.
    pub output_dir: PathBuf,
    pub db_path: PathBuf,
    pub bind_addr: SocketAddr,
    /// First pay date of the fortnightly calendar.
    pub pay_anchor: NaiveDate,
    pub pay_periods: usize,
}

impl Config {
    /// Resolve configuration from the environment.
    ///
    /// `PORTAL_EPHEMERAL=true` routes all storage under the system temp dir,
    /// for deployments where the filesystem is read-only outside `/tmp`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_dir = env::var("PORTAL_BASE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

        let ephemeral = env::var("PORTAL_EPHEMERAL")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let storage_root = if ephemeral {
            env::temp_dir().join("payslip-portal")
        } else {
            base_dir.clone()
        };

        let master_pdf_dir = env::var("PORTAL_MASTER_PDF_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| storage_root.join("master_pdfs"));
        let output_dir = env::var("PORTAL_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| storage_root.join("output"));
        let db_path = env::var("PORTAL_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| storage_root.join("users.db"));

        let bind_raw = env::var("PORTAL_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());
        let bind_addr: SocketAddr = bind_raw
            .parse()
            .map_err(|_| ConfigError::BadBindAddr(bind_raw.clone()))?;

        let anchor_raw =
            env::var("PORTAL_PAY_ANCHOR").unwrap_or_else(|_| DEFAULT_PAY_ANCHOR.into());
        let pay_anchor = NaiveDate::parse_from_str(&anchor_raw, "%d-%m-%Y")
            .map_err(|_| ConfigError::BadAnchorDate(anchor_raw.clone()))?;

        let pay_periods = match env::var("PORTAL_PAY_PERIODS") {
            Ok(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::BadPeriodCount(raw))?,
            Err(_) => DEFAULT_PAY_PERIODS,
        };

        let secret_key =
            env::var("PORTAL_SECRET_KEY").unwrap_or_else(|_| "change_me_in_production".into());

        Ok(Self {
            secret_key,
            base_dir,
            master_pdf_dir,
            output_dir,
            db_path,
            bind_addr,
            pay_anchor,
            pay_periods,
        })
    }

    /// Create the master and output directories if they do not exist yet.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.master_pdf_dir)?;
        std::fs::create_dir_all(&self.output_dir)?;
        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_anchor_parses() {
        let anchor = NaiveDate::parse_from_str(DEFAULT_PAY_ANCHOR, "%d-%m-%Y").unwrap();
        assert_eq!(anchor, NaiveDate::from_ymd_opt(2025, 7, 24).unwrap());
    }
}
