//! Batch payslip extraction, outside the web portal.
//!
//! Sweeps every pay period in the configured window for one employee number
//! and extracts whatever master documents are present. Useful for seeding the
//! output directory or for ad-hoc extraction without a browser.

use clap::Parser;
use std::path::PathBuf;

use payslip_portal::{calendar, config::Config, extract};

#[derive(Parser)]
#[command(name = "payslip-cli")]
#[command(about = "Extract an employee's payslips from all available master PDFs", long_about = None)]
struct Cli {
    /// Employee number to search for (e.g. 13616733)
    employee_number: String,

    /// Override the master PDF directory
    #[arg(long)]
    master_dir: Option<PathBuf>,

    /// Override the output directory
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(dir) = cli.master_dir {
        config.master_pdf_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    config.ensure_dirs()?;

    let periods = calendar::generate(
        config.pay_anchor,
        config.pay_periods,
        &config.master_pdf_dir,
    );

    for period in &periods {
        if !period.available {
            println!("Pay slip for {} not available yet.", period.label);
            continue;
        }

        match extract::extract_payslip(
            &cli.employee_number,
            &period.filepath,
            &period.label,
            &config.output_dir,
        ) {
            Ok(Some(path)) => println!("Extracted payslip saved: {}", path.display()),
            Ok(None) => println!(
                "Employee {} not found in pay slip for {}",
                cli.employee_number, period.label
            ),
            Err(e) => eprintln!("Failed to extract {}: {e}", period.label),
        }
    }

    Ok(())
}
