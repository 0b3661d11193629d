use super::BatteryRecord;
use crate::error::ParseError;
use crate::normalize;
use std::collections::HashMap;
use tracing::debug;

/// Parse `upower -i <device>` output made of `key: value` lines.
///
/// Only the first colon splits a line so that values such as `1:30` survive.
/// When a key is repeated the last line wins.
pub fn parse_upower(stdout: &str) -> Result<BatteryRecord, ParseError> {
    let fields: HashMap<&str, &str> = stdout
        .split('\n')
        .filter_map(|line| line.split_once(':'))
        .map(|(key, val)| (key.trim(), val.trim()))
        .collect();
    debug!("upower fields {:?}", fields);
    Ok(normalize::battery_from_upower(&fields))
}
