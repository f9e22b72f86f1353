use crate::config::toml_config::{ScriptConfig, Step};
use crate::core::{failure, greeting, output::number_value};
use crate::utils::error::{OpsError, Result};
use serde::Serialize;
use serde_json::{json, Value};
use std::io::Write;

#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub index: usize,
    pub op: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScriptReport {
    pub script: String,
    pub outcomes: Vec<StepOutcome>,
}

impl ScriptReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

pub struct ScriptRunner {
    config: ScriptConfig,
    stop_on_error: bool,
}

impl ScriptRunner {
    pub fn new(config: ScriptConfig) -> Self {
        let stop_on_error = config.stop_on_error();
        Self {
            config,
            stop_on_error,
        }
    }

    /// Overrides the script's own `stop_on_error` setting.
    pub fn keep_going(mut self, keep_going: bool) -> Self {
        if keep_going {
            self.stop_on_error = false;
        }
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.config.steps
    }

    /// Runs every step in order. Greetings are written to `out`.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<ScriptReport> {
        tracing::info!(
            script = %self.config.script.name,
            steps = self.config.steps.len(),
            "running script"
        );

        let mut outcomes = Vec::with_capacity(self.config.steps.len());

        for (index, step) in self.config.steps.iter().enumerate() {
            let op = step.op_name();
            match execute_step(step, out) {
                Ok(output) => {
                    tracing::debug!(index, op, %output, "step completed");
                    outcomes.push(StepOutcome {
                        index,
                        op: op.to_string(),
                        output: Some(output),
                        error: None,
                    });
                }
                Err(e) if self.stop_on_error => {
                    tracing::error!(index, op, error = %e, "step failed, aborting script");
                    return Err(OpsError::StepFailed {
                        index,
                        op: op.to_string(),
                        source: Box::new(e),
                    });
                }
                Err(e) => {
                    tracing::warn!(index, op, error = %e, "step failed, continuing");
                    outcomes.push(StepOutcome {
                        index,
                        op: op.to_string(),
                        output: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        let report = ScriptReport {
            script: self.config.script.name.clone(),
            outcomes,
        };
        tracing::info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "script finished"
        );
        Ok(report)
    }
}

fn execute_step<W: Write>(step: &Step, out: &mut W) -> Result<Value> {
    let value = match step {
        Step::Greet { name } => json!(greeting::greet_to(out, name)?),
        Step::Add { a, b } => number_value(greeting::add(*a, *b)),
        Step::CurrentDirectory => json!(greeting::current_directory()?),
        Step::CauseError { data } => json!(failure::cause_error(data)?),
        Step::Divide { a, b } => number_value(failure::divide(*a, *b)?),
    };
    Ok(value)
}
