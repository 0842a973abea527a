//! Payslip Portal: employee self-service payslip extraction.
//!
//! Employees register, log in, and pick a fortnightly pay period; the portal
//! extracts their pages from that period's shared master PDF and streams the
//! result back as a download.
//!
//! - Calendar: deterministic fortnightly pay periods from a configured anchor
//! - Extractor: page-text scan of the master PDF via lopdf
//! - Directory: SQLite-backed credential and profile store
//! - Portal: axum HTML-form layer with server-side sessions

pub mod auth;
pub mod calendar;
pub mod config;
pub mod directory;
pub mod extract;
pub mod models;
pub mod pages;
pub mod portal;
