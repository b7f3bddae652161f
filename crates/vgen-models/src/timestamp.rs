//! Timestamp parsing and formatting utilities.
//!
//! Scene boundaries are processed as float seconds internally; formatted
//! HH:MM:SS.mmm strings appear in serialized output and log messages.

use thiserror::Error;

/// Timestamp parsing error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimestampError {
    #[error("Timestamp cannot be empty")]
    Empty,

    #[error("Timestamp cannot be negative")]
    Negative,

    #[error("Invalid {component} value: {value}")]
    InvalidValue {
        component: &'static str,
        value: String,
    },

    #[error("Invalid timestamp format '{0}'. Use HH:MM:SS, MM:SS, or SS")]
    InvalidFormat(String),
}

/// Parse a timestamp string to total seconds.
///
/// Supports `HH:MM:SS[.mmm]`, `MM:SS[.mmm]` and bare `SS[.mmm]`.
///
/// # Examples
/// ```
/// use vgen_models::timestamp::parse_timestamp;
/// assert_eq!(parse_timestamp("01:30:00").unwrap(), 5400.0);
/// assert_eq!(parse_timestamp("05:30").unwrap(), 330.0);
/// assert_eq!(parse_timestamp("90").unwrap(), 90.0);
/// ```
pub fn parse_timestamp(ts: &str) -> Result<f64, TimestampError> {
    let ts = ts.trim();
    if ts.is_empty() {
        return Err(TimestampError::Empty);
    }

    let parts: Vec<&str> = ts.split(':').collect();
    let labels: &[&str] = match parts.len() {
        1 => &["seconds"],
        2 => &["minutes", "seconds"],
        3 => &["hours", "minutes", "seconds"],
        _ => return Err(TimestampError::InvalidFormat(ts.to_string())),
    };

    let values = parts
        .iter()
        .zip(labels.iter().copied())
        .map(|(part, component)| {
            part.parse::<f64>().map_err(|_| TimestampError::InvalidValue {
                component,
                value: part.to_string(),
            })
        })
        .collect::<Result<Vec<f64>, TimestampError>>()?;

    if values.iter().any(|v| *v < 0.0) {
        return Err(TimestampError::Negative);
    }

    Ok(values
        .iter()
        .rev()
        .enumerate()
        .map(|(i, v)| v * 60f64.powi(i as i32))
        .sum())
}

/// Format seconds as HH:MM:SS.mmm.
///
/// # Examples
/// ```
/// use vgen_models::timestamp::format_seconds;
/// assert_eq!(format_seconds(90.0), "00:01:30.000");
/// assert_eq!(format_seconds(3661.5), "01:01:01.500");
/// ```
pub fn format_seconds(total_secs: f64) -> String {
    let hours = (total_secs / 3600.0).floor() as u32;
    let mins = ((total_secs % 3600.0) / 60.0).floor() as u32;
    let secs = total_secs % 60.0;
    format!("{:02}:{:02}:{:06.3}", hours, mins, secs)
}
