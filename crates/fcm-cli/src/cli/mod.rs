//! CLI for the FCM URL risk checker.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use fcm_core::config::{self, FcmConfig};
use fcm_core::history::HistoryStore;
use fcm_core::kv::FileStore;
use fcm_core::session::{self, SessionGate};
use fcm_core::{scoring, Dashboard};

use commands::{
    run_check, run_completions, run_history, run_login, run_logout, run_remove, run_whoami,
};

/// Top-level CLI for FCM.
#[derive(Debug, Parser)]
#[command(name = "fcm")]
#[command(about = "FCM: check a website URL for fraud and phishing risk", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Score a URL and show its risk status (saved to history when logged in).
    Check {
        /// Website URL to check.
        url: String,
    },

    /// Log in so checks are saved to your history.
    Login,

    /// Log out. Your saved history stays for next time.
    Logout,

    /// Show who is logged in.
    Whoami,

    /// Show your saved URL checks, newest first.
    History,

    /// Delete a saved check by its position in `fcm history`.
    Remove {
        /// Position as listed by `fcm history` (1 = newest).
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        position: u64,
    },

    /// Print shell completions.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Wire the configured scoring strategy, identity provider, and on-disk store.
fn open_dashboard(cfg: &FcmConfig) -> Result<Dashboard<FileStore>> {
    let store = FileStore::open_default()?;
    tracing::debug!(dir = %store.dir().display(), "using store");
    let strategy = scoring::from_config(cfg)?;
    let provider = session::provider_from_config(cfg, std::io::stdin().lock(), std::io::stdout())?;
    Ok(Dashboard::new(
        strategy,
        SessionGate::new(provider, store.clone()),
        HistoryStore::new(store, cfg.history_cap()),
    ))
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        if let CliCommand::Completions { shell } = cli.command {
            return run_completions(shell);
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let mut dashboard = open_dashboard(&cfg)?;
        dashboard.restore();

        match cli.command {
            CliCommand::Check { url } => run_check(&mut dashboard, &url).await?,
            CliCommand::Login => run_login(&mut dashboard)?,
            CliCommand::Logout => run_logout(&mut dashboard)?,
            CliCommand::Whoami => run_whoami(&dashboard),
            CliCommand::History => run_history(&dashboard)?,
            CliCommand::Remove { position } => run_remove(&mut dashboard, position)?,
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
