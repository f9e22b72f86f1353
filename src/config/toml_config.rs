use crate::utils::error::{OpsError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptConfig {
    pub script: ScriptMeta,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptMeta {
    pub name: String,
    pub description: Option<String>,
    pub stop_on_error: Option<bool>,
}

/// One operation in a script, tagged by `op`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Greet { name: String },
    Add { a: f64, b: f64 },
    CurrentDirectory,
    CauseError { data: String },
    Divide { a: f64, b: f64 },
}

impl Step {
    pub fn op_name(&self) -> &'static str {
        match self {
            Step::Greet { .. } => "greet",
            Step::Add { .. } => "add",
            Step::CurrentDirectory => "current_directory",
            Step::CauseError { .. } => "cause_error",
            Step::Divide { .. } => "divide",
        }
    }
}

impl ScriptConfig {
    /// 從 TOML 檔案載入腳本
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析腳本
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| OpsError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${USER_NAME})，找不到的保留原樣
    ///
    /// Values are escaped for TOML basic (double-quoted) strings, so a `"` or
    /// newline in a variable cannot end the string or add keys. References
    /// inside literal (single-quoted) strings receive the escaped text as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| OpsError::ConfigError {
            message: format!("env pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => escape_basic_string(&value),
                Err(_) => format!("${{{}}}", var_name),
            }
        });

        Ok(result.into_owned())
    }

    pub fn stop_on_error(&self) -> bool {
        self.script.stop_on_error.unwrap_or(true)
    }
}

fn escape_basic_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}

impl Validate for ScriptConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("script.name", &self.script.name)?;
        validation::validate_non_empty_list("steps", &self.steps)?;

        for (index, step) in self.steps.iter().enumerate() {
            match step {
                Step::Add { a, b } | Step::Divide { a, b } => {
                    validation::validate_finite(&format!("steps[{}].a", index), *a)?;
                    validation::validate_finite(&format!("steps[{}].b", index), *b)?;
                }
                Step::Greet { .. } | Step::CurrentDirectory | Step::CauseError { .. } => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_script() {
        let toml_content = r#"
[script]
name = "demo"
description = "Every operation once"

[[steps]]
op = "greet"
name = "Ada"

[[steps]]
op = "add"
a = 1.5
b = 2.5

[[steps]]
op = "current_directory"

[[steps]]
op = "cause_error"
data = "hello"

[[steps]]
op = "divide"
a = 10.0
b = 2.0
"#;

        let config = ScriptConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.script.name, "demo");
        assert!(config.stop_on_error());
        assert_eq!(config.steps.len(), 5);
        assert_eq!(
            config.steps[0],
            Step::Greet {
                name: "Ada".to_string()
            }
        );
        assert_eq!(config.steps[2], Step::CurrentDirectory);
        assert_eq!(config.steps[4].op_name(), "divide");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TINY_OPS_TEST_NAME", "Linus");

        let toml_content = r#"
[script]
name = "env"

[[steps]]
op = "greet"
name = "${TINY_OPS_TEST_NAME}"

[[steps]]
op = "cause_error"
data = "${TINY_OPS_UNSET_VARIABLE}"
"#;

        let config = ScriptConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.steps[0],
            Step::Greet {
                name: "Linus".to_string()
            }
        );
        assert_eq!(
            config.steps[1],
            Step::CauseError {
                data: "${TINY_OPS_UNSET_VARIABLE}".to_string()
            }
        );

        std::env::remove_var("TINY_OPS_TEST_NAME");
    }

    #[test]
    fn test_env_var_values_cannot_inject_keys() {
        std::env::set_var(
            "TINY_OPS_TEST_QUOTED",
            "Ada\"\nstop_on_error = false\nx = \"C:\\temp",
        );

        let toml_content = r#"
[script]
name = "escape"

[[steps]]
op = "greet"
name = "${TINY_OPS_TEST_QUOTED}"
"#;

        let config = ScriptConfig::from_toml_str(toml_content).unwrap();
        assert!(config.stop_on_error());
        assert_eq!(
            config.steps[0],
            Step::Greet {
                name: "Ada\"\nstop_on_error = false\nx = \"C:\\temp".to_string()
            }
        );

        std::env::remove_var("TINY_OPS_TEST_QUOTED");
    }

    #[test]
    fn test_unknown_op_is_rejected() {
        let toml_content = r#"
[script]
name = "bad"

[[steps]]
op = "multiply"
a = 1.0
b = 2.0
"#;

        let err = ScriptConfig::from_toml_str(toml_content).unwrap_err();
        assert!(matches!(err, OpsError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_validation_requires_steps_and_name() {
        let empty = ScriptConfig::from_toml_str("[script]\nname = \"x\"\n").unwrap();
        assert!(empty.validate().is_err());

        let blank_name = ScriptConfig::from_toml_str(
            "[script]\nname = \" \"\n\n[[steps]]\nop = \"current_directory\"\n",
        )
        .unwrap();
        assert!(blank_name.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_non_finite_numbers() {
        let toml_content = r#"
[script]
name = "inf"

[[steps]]
op = "add"
a = inf
b = 1.0
"#;

        let config = ScriptConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("steps[0].a"));
    }

    #[test]
    fn test_stop_on_error_can_be_disabled() {
        let config = ScriptConfig::from_toml_str(
            "[script]\nname = \"x\"\nstop_on_error = false\n\n[[steps]]\nop = \"current_directory\"\n",
        )
        .unwrap();
        assert!(!config.stop_on_error());
    }
}
