use crate::config::toml_config::Step;
use crate::utils::error::Result;
use serde_json::{json, Value};

/// JSON value for a numeric result. Infinities and NaN are kept as the
/// strings `inf`, `-inf` and `NaN`, since JSON numbers cannot hold them.
pub fn number_value(x: f64) -> Value {
    if x.is_finite() {
        json!(x)
    } else {
        Value::String(x.to_string())
    }
}

/// Renders one operation result for stdout.
pub fn render_result(op: &str, result: &Value, as_json: bool) -> Result<String> {
    if as_json {
        return Ok(serde_json::to_string(
            &json!({ "operation": op, "result": result }),
        )?);
    }

    Ok(match result {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Renders the step listing shown by `run --dry-run`.
pub fn render_dry_run(steps: &[Step], as_json: bool) -> Result<String> {
    if as_json {
        return Ok(serde_json::to_string_pretty(steps)?);
    }

    Ok(steps
        .iter()
        .enumerate()
        .map(|(index, step)| format!("{:>3}. {:?}", index, step))
        .collect::<Vec<_>>()
        .join("\n"))
}
