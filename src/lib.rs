pub mod config;
pub mod core;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::toml_config::{ScriptConfig, Step};
pub use core::{
    failure::{cause_error, divide, SENTINEL},
    greeting::{add, current_directory, greet, greet_to},
    output::{number_value, render_dry_run, render_result},
    script::{ScriptReport, ScriptRunner, StepOutcome},
};
pub use utils::error::{OpsError, Result};
