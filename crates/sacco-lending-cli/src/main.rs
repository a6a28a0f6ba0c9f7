mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use sacco_lending_core::LendingPolicy;
use std::process;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::eligibility::{AssessArgs, EligibilityArgs};
use commands::loans::{QuoteArgs, ScheduleArgs};

/// Loan quotes, repayment schedules and eligibility for savings cooperatives
#[derive(Parser)]
#[command(
    name = "sacco",
    version,
    about = "Loan quotes, repayment schedules and eligibility for savings cooperatives",
    long_about = "A CLI for cooperative lending calculations with decimal precision. \
                  Quotes amortizing loans, prints repayment schedules, computes \
                  savings-based borrowing limits and assesses loan applications \
                  against the lending policy."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Lending policy JSON file (multiplier, over-eligibility action, products)
    #[arg(long, global = true)]
    policy: Option<String>,

    /// Currency prefix for money fields in table and minimal output
    #[arg(long, default_value = "KSh", global = true)]
    currency: String,

    /// Log computation details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote the monthly payment, total payment and total interest of a loan
    Quote(QuoteArgs),
    /// Print the month-by-month repayment schedule of a loan
    Schedule(ScheduleArgs),
    /// Maximum loan a member may request given their savings
    Eligibility(EligibilityArgs),
    /// Assess a loan application against product terms and eligibility
    Assess(AssessArgs),
    /// List the loan products on offer
    Products,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn load_policy(path: Option<&str>) -> Result<LendingPolicy, Box<dyn std::error::Error>> {
    match path {
        Some(path) => input::file::read_policy(path),
        None => Ok(LendingPolicy::default()),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let policy = || load_policy(cli.policy.as_deref());

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Quote(args) => commands::loans::run_quote(args),
        Commands::Schedule(args) => commands::loans::run_schedule(args),
        Commands::Eligibility(args) => {
            policy().and_then(|p| commands::eligibility::run_eligibility(args, &p))
        }
        Commands::Assess(args) => {
            policy().and_then(|p| commands::eligibility::run_assess(args, &p))
        }
        Commands::Products => policy().and_then(|p| commands::products::run_products(&p)),
        Commands::Version => {
            println!("sacco {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value, &cli.currency);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
