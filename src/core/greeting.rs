use crate::utils::error::Result;
use std::io::{self, Write};
use std::ops::Add;

fn greeting_line(name: &str) -> String {
    format!("Hello, {}!", name)
}

/// Builds the greeting for `name` and prints the same line to stdout.
/// A failed stdout write is logged, never raised.
pub fn greet(name: &str) -> String {
    match greet_to(&mut io::stdout().lock(), name) {
        Ok(line) => {
            tracing::debug!(name, "greeting printed");
            line
        }
        Err(e) => {
            tracing::warn!(name, error = %e, "failed to write greeting to stdout");
            greeting_line(name)
        }
    }
}

/// Same as [`greet`], but writes the line to `out` instead of stdout.
pub fn greet_to<W: Write>(out: &mut W, name: &str) -> io::Result<String> {
    let line = greeting_line(name);
    writeln!(out, "{}", line)?;
    Ok(line)
}

pub fn add<T: Add<Output = T>>(a: T, b: T) -> T {
    a + b
}

/// Absolute path of the process's current working directory.
pub fn current_directory() -> Result<String> {
    let dir = std::env::current_dir()?;
    Ok(dir.to_string_lossy().into_owned())
}
