//! Map platform native battery fields onto the canonical [`BatteryRecord`].
//!
//! Wifi fields are served under their `iwlist` names, see [`wifi_identity`].
use crate::battery::BatteryRecord;
use crate::wifiscan::WifiScanResult;
use std::collections::HashMap;

/// `Win32_Battery.BatteryStatus` codes we report.
const WMIC_CHARGING_STATES: [(&str, &str); 2] = [("1", "discharging"), ("2", "charging")];

/// Build a record from `upower` keys.
pub fn battery_from_upower(fields: &HashMap<&str, &str>) -> BatteryRecord {
    let get = |key: &str| fields.get(key).map(|v| v.to_string());
    BatteryRecord {
        percentage: get("percentage"),
        state: get("state"),
        time_to_empty: get("time to empty"),
    }
}

/// Build a record from the positional `pmset` tokens.
pub fn battery_from_pmset(tokens: &[&str]) -> BatteryRecord {
    let get = |pos: usize| tokens.get(pos).map(|v| v.to_string());
    BatteryRecord {
        percentage: get(0),
        state: get(1),
        time_to_empty: get(2),
    }
}

/// Build a record from `Win32_Battery` columns, translating `BatteryStatus` codes.
pub fn battery_from_wmic(fields: &HashMap<&str, String>) -> BatteryRecord {
    BatteryRecord {
        percentage: fields.get("EstimatedChargeRemaining").cloned(),
        state: fields
            .get("BatteryStatus")
            .and_then(|code| wmic_charging_state(code))
            .map(str::to_owned),
        time_to_empty: fields.get("TimeOnBattery").cloned(),
    }
}

fn wmic_charging_state(code: &str) -> Option<&'static str> {
    WMIC_CHARGING_STATES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, state)| *state)
}

/// Networks keep their raw `iwlist` keys: clients interpret them directly.
pub fn wifi_identity(networks: WifiScanResult) -> WifiScanResult {
    networks
}
