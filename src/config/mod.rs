pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "tiny-ops")]
#[command(about = "Greeting, arithmetic and failure demonstrations")]
pub struct CliConfig {
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Print results as JSON")]
    pub json: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines on stderr")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print and return a greeting
    Greet { name: String },

    /// Add two numbers
    Add {
        #[arg(allow_negative_numbers = true)]
        a: f64,
        #[arg(allow_negative_numbers = true)]
        b: f64,
    },

    /// Print the absolute current working directory
    #[command(alias = "cwd")]
    CurrentDirectory,

    /// Fail on the reserved sentinel value, echo anything else
    CauseError { data: String },

    /// Divide a by b (a zero divisor is an error)
    Divide {
        #[arg(allow_negative_numbers = true)]
        a: f64,
        #[arg(allow_negative_numbers = true)]
        b: f64,
    },

    /// Run the steps of a TOML script file
    Run {
        /// Path to TOML script file
        #[arg(short, long, default_value = "tiny-ops.toml")]
        config: String,

        /// Show the steps without executing them
        #[arg(long)]
        dry_run: bool,

        /// Record failing steps and continue instead of aborting
        #[arg(long)]
        keep_going: bool,
    },
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Command::Run { config, .. } = &self.command {
            validation::validate_path("run.config", config)?;
        }
        Ok(())
    }
}
