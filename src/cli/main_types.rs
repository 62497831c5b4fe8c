use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ratecard-cli")]
#[command(about = "Command line interface tool for generating cross-border rate cards")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    #[arg(long, global = true, env = "RATECARD_API_KEY")]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate rate cards for a quote
    Generate {
        /// Quote record ID
        quote_id: String,
        /// Quote date (YYYY-MM-DD)
        #[arg(long)]
        quote_date: Option<String>,
        /// E2E rate tier
        #[arg(long)]
        e2e_tier: Option<String>,
        /// COD rate tier
        #[arg(long)]
        cod_tier: Option<String>,
        /// LM rate tier
        #[arg(long)]
        lm_tier: Option<String>,
        /// LM solution type
        #[arg(long)]
        lm_solution: Option<String>,
        /// Extra field overrides in name=value format
        #[arg(long, action = clap::ArgAction::Append)]
        set: Vec<String>,
    },
    /// Show the filter values and option sets for a quote
    Options {
        /// Quote record ID
        quote_id: String,
    },
    /// API key management
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Store an API key for the active profile
    SetKey {
        /// API key value
        key: String,
    },
    /// Remove the stored API key
    Clear,
    /// Show authentication status
    Status,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}
