use crate::utils::error::{OpsError, Result};

/// The one input [`cause_error`] refuses.
pub const SENTINEL: &str = "bad_data";

/// Fails on the exact sentinel value, echoes everything else back.
pub fn cause_error(data: &str) -> Result<String> {
    if data == SENTINEL {
        tracing::warn!(value = data, "sentinel input rejected");
        return Err(OpsError::InvalidData {
            value: data.to_string(),
        });
    }
    Ok(format!("No error with: {}", data))
}

/// `a / b`, rejecting a zero divisor (`0.0` and `-0.0`) instead of returning
/// an infinity or NaN.
pub fn divide(a: f64, b: f64) -> Result<f64> {
    if b == 0.0 {
        return Err(OpsError::DivisionByZero { dividend: a });
    }
    Ok(a / b)
}
