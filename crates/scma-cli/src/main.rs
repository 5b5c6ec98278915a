use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use scma::{CreatePolicy, Vault, VaultConfig, VaultError};

mod session;

use session::{prompt_line, Session};

#[derive(Parser)]
#[command(name = "scma")]
#[command(about = "Secure Copyright Management Application", long_about = None)]
struct Cli {
    /// Directory holding the data, log and key files
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Refuse to create an artefact whose name is already taken
    #[arg(long)]
    reject_duplicates: bool,
}

impl Cli {
    fn config(&self) -> VaultConfig {
        let policy = if self.reject_duplicates {
            CreatePolicy::Reject
        } else {
            CreatePolicy::Overwrite
        };
        VaultConfig::in_dir(&self.dir).with_create_policy(policy)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("scma=warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = cli.config();
    let vault = Vault::open(&config)
        .with_context(|| format!("opening vault in {}", cli.dir.display()))?;

    println!("Welcome to Secure Copyright Management Application (SCMA)");
    println!("Available users: admin, user");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    let Some(username) = prompt_line(&mut input, &mut stdout, "Enter username: ")? else {
        return Ok(ExitCode::FAILURE);
    };
    stdout.flush()?;
    let password = rpassword::prompt_password("Enter password: ").context("password prompt")?;

    let identity = match vault.login(&username, &password) {
        Ok(identity) => identity,
        Err(VaultError::AuthenticationFailure) => {
            println!("Authentication failed.");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };
    println!("Authentication successful!");
    tracing::info!(identity = %identity, "session started");

    Session::new(&vault, identity, input, stdout).run()?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["scma"]);
        let config = cli.config();
        assert_eq!(config, VaultConfig::in_dir("."));
    }

    #[test]
    fn test_reject_duplicates_flag() {
        let cli = Cli::parse_from(["scma", "--dir", "/tmp/vault", "--reject-duplicates"]);
        let config = cli.config();
        assert_eq!(config.create_policy, CreatePolicy::Reject);
        assert_eq!(config.data_path, PathBuf::from("/tmp/vault/scma_data.json"));
    }
}
