//! Forecast Portal CLI - Terminal front end for the Forecast Portal API.
//!
//! # Usage
//!
//! ```bash
//! # Create an account, then log in
//! fp-cli signup -u alice -e alice@example.com -p 'correct horse'
//! fp-cli login -u alice -p 'correct horse'
//!
//! # Show who is logged in (and refresh the stored API key)
//! fp-cli session
//!
//! # Request a demand forecast
//! fp-cli forecast -f "Store ID=S001" -f "Price=33.5" -f "Holiday/Promotion=Yes"
//!
//! # Reset a forgotten password using the emailed link
//! fp-cli forgot-password -e alice@example.com
//! fp-cli reset-password --link 'http://127.0.0.1:5050/reset-password?token=...' -p 'new pass'
//!
//! fp-cli logout
//! ```
//!
//! # Environment Variables
//!
//! - `PORTAL_API_URL` - Backend base URL (default: `http://127.0.0.1:5050`)
//! - `PORTAL_STATE_DIR` - Where the session is kept between runs (default: `.forecast-portal`)
//! - `RUST_LOG` - Log filter (logs go to stderr)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod page;

use error::CliError;

#[derive(Parser)]
#[command(name = "fp-cli")]
#[command(author, version, about = "Forecast Portal CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and keep the session cookie
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create an account
    Signup {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Email a password reset link
    ForgotPassword {
        #[arg(short, long)]
        email: String,
    },
    /// Set a new password from a reset link
    ResetPassword {
        /// Reset link as received by email (its `token` parameter is sent)
        #[arg(short, long)]
        link: String,

        /// New password
        #[arg(short, long)]
        password: String,
    },
    /// Check the session and store the API key
    Session,
    /// Request a demand forecast
    Forecast {
        /// Form field as `Name=Value`; repeat for each field
        #[arg(short, long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,
    },
    /// End the session
    Logout,
    /// List the fields the forecast model knows
    Fields,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries page output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fp_cli=info,forecast_portal_client=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    if matches!(cli.command, Commands::Fields) {
        commands::forecast::list_fields(&mut std::io::stdout().lock())?;
        return Ok(());
    }

    let ctx = commands::Context::from_env()?;

    match cli.command {
        Commands::Login { username, password } => {
            commands::account::login(&ctx, username, password).await
        }
        Commands::Signup {
            username,
            email,
            password,
        } => commands::account::signup(&ctx, username, email, password).await,
        Commands::ForgotPassword { email } => commands::password::forgot(&ctx, email).await,
        Commands::ResetPassword { link, password } => {
            commands::password::reset(&ctx, &link, password).await
        }
        Commands::Session => commands::account::session(&ctx).await,
        Commands::Forecast { fields } => commands::forecast::forecast(&ctx, &fields).await,
        Commands::Logout => commands::account::logout(&ctx).await,
        Commands::Fields => Ok(()),
    }
}
