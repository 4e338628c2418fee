//! # Command Line Interface
//!
//! Administrative commands for applying the schema and managing individual
//! secrets from a shell.

use crate::config::AppConfig;
use crate::observability::{init_logging, log_config_info};
use crate::persistence::{DalErrorKind, RelationalDal, SecretDal};
use crate::{storage, Secret, SecretQuery};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "secretkeeper")]
#[command(about = "Manage secrets stored through the secretkeeper data access layer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database URL override
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create the secrets table if it does not exist
    Migrate,

    /// Store a new secret
    Create {
        /// Secret identifier
        #[arg(long)]
        id: String,

        /// Secret value; read from stdin when omitted
        #[arg(long)]
        value: Option<String>,
    },

    /// Print a secret as JSON
    Find {
        /// Secret identifier
        #[arg(long)]
        id: String,
    },

    /// Delete a secret (succeeds if it does not exist)
    Delete {
        /// Secret identifier
        #[arg(long)]
        id: String,
    },
}

/// Run CLI commands
pub async fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        AppConfig::load_with_database_url(cli.config.as_deref(), cli.database_url.as_deref())
            .context("failed to load configuration")?;
    if cli.verbose {
        config.observability.log_level = "debug".to_string();
    }

    init_logging(&config.observability);
    log_config_info(&config);

    if cli.command == Commands::Migrate {
        storage::migrate(&config.database).await?;
        println!("Migrations completed successfully!");
        return Ok(());
    }

    let store = storage::connect(&config.database).await?;
    let dal = RelationalDal::new(store);

    let output = execute(cli.command, &dal).await?;
    println!("{}", output);
    Ok(())
}

/// Execute a secret command against a DAL, returning the text to print
pub async fn execute(command: Commands, dal: &dyn SecretDal) -> anyhow::Result<String> {
    match command {
        Commands::Migrate => Ok("Nothing to do".to_string()),
        Commands::Create { id, value } => {
            let value = match value {
                Some(value) => value,
                None => read_value_from_stdin()?,
            };
            dal.create_secret(&Secret::new(id.clone(), value))
                .await
                .with_context(|| format!("failed to create secret '{}'", id))?;
            Ok(format!("Created secret '{}'", id))
        }
        Commands::Find { id } => match dal.find_secret(SecretQuery::find_by_secret_id(&id)).await {
            Ok(secret) => Ok(serde_json::to_string_pretty(&secret)?),
            Err(e) if e.kind() == DalErrorKind::UnknownSecret => {
                anyhow::bail!("secret '{}' not found", id)
            }
            Err(e) => Err(anyhow::Error::new(e).context(format!("failed to look up secret '{}'", id))),
        },
        Commands::Delete { id } => {
            dal.delete_secret(SecretQuery::delete_by_secret_id(&id))
                .await
                .with_context(|| format!("failed to delete secret '{}'", id))?;
            Ok(format!("Deleted secret '{}'", id))
        }
    }
}

fn read_value_from_stdin() -> anyhow::Result<String> {
    let mut value = String::new();
    std::io::stdin().read_to_string(&mut value).context("failed to read secret value from stdin")?;
    Ok(value.trim_end_matches(['\r', '\n']).to_string())
}
