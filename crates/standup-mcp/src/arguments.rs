//! Argument extraction for tool calls and prompt requests.
//!
//! Prompt arguments always arrive as strings, tool arguments as JSON values,
//! so both forms are accepted for numbers.

use serde_json::Value;
use standup_core::{Error, Result};

/// Repository used when no path is given.
pub const DEFAULT_REPO_PATH: &str = ".";

/// Window for `collect_standup_info` and `morning-standup`.
pub const DEFAULT_WINDOW_HOURS: f64 = 24.0;

/// Window for `evening-standup`.
pub const DEFAULT_WORK_HOURS: f64 = 10.0;

fn field<'a>(arguments: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    arguments.and_then(|args| args.get(key))
}

/// `repo_path` argument; missing, null or empty means the current directory.
pub fn repo_path(arguments: Option<&Value>) -> Result<String> {
    match field(arguments, "repo_path") {
        None | Some(Value::Null) => Ok(DEFAULT_REPO_PATH.to_string()),
        Some(Value::String(path)) if path.is_empty() => Ok(DEFAULT_REPO_PATH.to_string()),
        Some(Value::String(path)) => Ok(path.clone()),
        Some(other) => Err(Error::InvalidArgument(format!(
            "repo_path must be a string, got {}",
            other
        ))),
    }
}

/// Lookback window in hours under `key`.
///
/// Missing, null, zero or an empty string fall back to `default`. Anything
/// else must be a finite, positive number or a string holding one.
pub fn window_hours(arguments: Option<&Value>, key: &str, default: f64) -> Result<f64> {
    let hours = match field(arguments, key) {
        None | Some(Value::Null) => return Ok(default),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(default);
            }
            s.parse::<f64>().ok()
        }
        Some(_) => None,
    };

    match hours {
        Some(h) if h == 0.0 => Ok(default),
        Some(h) if h.is_finite() && h > 0.0 => Ok(h),
        _ => Err(Error::InvalidArgument(format!(
            "{} must be a positive number of hours, got {}",
            key,
            field(arguments, key).map(Value::to_string).unwrap_or_default()
        ))),
    }
}
