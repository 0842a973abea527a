//! Payslip Portal server.
//!
//! Resolves configuration from the environment, opens the user directory,
//! and serves the HTML portal.
//!
//! Usage:
//!   cargo run --bin payslip-portal          # start the portal
//!   cargo run --bin payslip-cli -- 13616733 # batch-extract one employee

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use payslip_portal::config::Config;
use payslip_portal::directory::UserDirectory;
use payslip_portal::portal::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    config.ensure_dirs()?;

    let directory = UserDirectory::open(&config.db_path)?;

    info!(addr = %config.bind_addr, "payslip portal starting");
    info!(master_dir = %config.master_pdf_dir.display(), "master documents");
    info!(output_dir = %config.output_dir.display(), "extracted payslips");
    info!(
        anchor = %config.pay_anchor,
        periods = config.pay_periods,
        "pay calendar"
    );

    let bind_addr = config.bind_addr;
    let state = AppState {
        config: Arc::new(config),
        directory: Arc::new(directory),
    };
    let app = create_router(state);

    let listener = TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
