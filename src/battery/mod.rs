//! Battery status parsers for linux (`upower`), mac os (`pmset`) and windows (`WMIC`).
//!
//! All the parsers are built on every platform so that the one matching the
//! running OS can be picked by the [`crate::catalog::Platform`] at startup.
mod linux_parse;
mod osx_parse;
mod windows_parse;

pub use linux_parse::parse_upower;
pub use osx_parse::parse_pmset;
pub use windows_parse::parse_wmic;

use crate::error::ParseError;
use serde::Serialize;

/// Canonical battery record served to clients.
///
/// The three fields are always serialized, as `null` when the platform tool
/// did not report them.
#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BatteryRecord {
    /// Remaining charge, as printed by the tool (e.g. `"85%"` or `"85"`)
    pub percentage: Option<String>,
    /// `charging`/`discharging`, or the raw state text of textual tools
    pub state: Option<String>,
    /// Remaining time on battery, as printed by the tool
    pub time_to_empty: Option<String>,
}

/// Parser used on platforms without a battery command.
pub fn parse_unsupported(_stdout: &str) -> Result<BatteryRecord, ParseError> {
    Ok(BatteryRecord::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    mod should {
        use super::*;
        use anyhow::Result;

        #[test]
        fn serialize_all_three_fields() -> Result<()> {
            let record = BatteryRecord {
                percentage: Some("85%".into()),
                ..Default::default()
            };
            assert_eq!(
                serde_json::to_value(&record)?,
                serde_json::json!({"percentage": "85%", "state": null, "timeToEmpty": null})
            );
            Ok(())
        }

        #[test]
        fn return_empty_record_when_unsupported() -> Result<()> {
            assert_eq!(parse_unsupported("whatever")?, BatteryRecord::default());
            Ok(())
        }
    }
}
