use super::BatteryRecord;
use crate::error::ParseError;
use crate::normalize;

/// Parse the `pmset -g batt` summary, e.g. `85%; discharging; 4:31 remaining`.
///
/// Fields are positional: percentage, state then remaining time.
pub fn parse_pmset(stdout: &str) -> Result<BatteryRecord, ParseError> {
    let tokens: Vec<&str> = stdout.split(';').map(str::trim).collect();
    Ok(normalize::battery_from_pmset(&tokens))
}
