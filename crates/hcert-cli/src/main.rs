//! # hcert CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// hcert stack CLI — health-certificate verification toolchain.
///
/// Verifies decoded certificate payloads against the acceptance rules and
/// inspects computed validity windows.
#[derive(Parser, Debug)]
#[command(name = "hcert", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the verification pipeline on a decoded payload.
    Verify(hcert_cli::verify::VerifyArgs),
    /// Print per-entry validity windows and rule projections.
    Inspect(hcert_cli::inspect::InspectArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let verified = match cli.command {
        Commands::Verify(args) => hcert_cli::verify::run(args).await?,
        Commands::Inspect(args) => {
            hcert_cli::inspect::run(args)?;
            true
        }
    };

    if !verified {
        std::process::exit(1);
    }
    Ok(())
}
