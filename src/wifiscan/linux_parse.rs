use super::{WifiNetwork, WifiScanResult};
use crate::error::ParseError;
use crate::normalize;
use std::mem;
use tracing::debug;

const CELL_PREFIX: &str = "Cell";
const CELL_SEPARATOR: char = '-';
const ADDRESS_PREFIX: &str = "Address";
const QUALITY_PREFIX: &str = "Quality";
const SIGNAL_PREFIX: &str = "Signal level";
const EXTRA_PREFIX: &str = "Extra";

type FieldHandler = fn(&str, &mut WifiNetwork) -> Result<(), ParseError>;

/// Specific field line formats, first matching prefix wins.
/// Anything else is a plain `key: value` line.
const FIELD_RULES: [(&str, FieldHandler); 3] = [
    (ADDRESS_PREFIX, parse_address as FieldHandler),
    (QUALITY_PREFIX, parse_quality as FieldHandler),
    (EXTRA_PREFIX, parse_extra as FieldHandler),
];

enum ScanState {
    OutsideCell,
    InsideCell { cell: String, network: WifiNetwork },
}

/// Parse `iwlist <iface> scanning` output into networks keyed by cell.
///
/// ```
/// use lib::wifiscan::parse_iwlist;
/// let scan = parse_iwlist("Cell 01 - Address: DC:0B:1A:47:BA:07\n  Channel:6\n").unwrap();
/// let network = scan.get("Cell 01").unwrap();
/// assert_eq!(network.get("Address"), Some("DC:0B:1A:47:BA:07"));
/// assert_eq!(network.get("Channel"), Some("6"));
/// ```
pub fn parse_iwlist(stdout: &str) -> Result<WifiScanResult, ParseError> {
    let mut networks = WifiScanResult::new();
    let mut state = ScanState::OutsideCell;

    for line in stdout.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
        if line.starts_with(CELL_PREFIX) {
            // The first field of a cell shares its boundary line
            let (id, first_field) = line
                .split_once(CELL_SEPARATOR)
                .ok_or_else(|| ParseError::MissingCellSeparator(line.to_owned()))?;
            if let ScanState::InsideCell { cell, network } =
                mem::replace(&mut state, ScanState::OutsideCell)
            {
                networks.insert(cell, network);
            }
            let mut network = WifiNetwork::new();
            parse_field_line(first_field, &mut network)?;
            state = ScanState::InsideCell {
                cell: id.trim().to_owned(),
                network,
            };
        } else if let ScanState::InsideCell { network, .. } = &mut state {
            parse_field_line(line, network)?;
        } else {
            debug!("Ignoring line outside of any cell: '{}'", line);
        }
    }
    if let ScanState::InsideCell { cell, network } = state {
        networks.insert(cell, network);
    }
    Ok(normalize::wifi_identity(networks))
}

fn parse_field_line(line: &str, network: &mut WifiNetwork) -> Result<(), ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(());
    }
    let handler = FIELD_RULES
        .iter()
        .find(|(prefix, _)| line.starts_with(*prefix))
        .map_or(parse_key_value as FieldHandler, |(_, handler)| *handler);
    handler(line, network)
}

fn set(network: &mut WifiNetwork, key: &str, value: &str) {
    network.insert(key, value);
}

/// `Address: DC:0B:1A:47:BA:07`
fn parse_address(line: &str, network: &mut WifiNetwork) -> Result<(), ParseError> {
    if let Some((_, mac)) = line.split_once(':') {
        set(network, ADDRESS_PREFIX, mac.trim());
    }
    Ok(())
}

/// `Quality=41/70  Signal level=-69 dBm`
fn parse_quality(line: &str, network: &mut WifiNetwork) -> Result<(), ParseError> {
    let mut segments = line.split(SIGNAL_PREFIX);
    let quality = segments.next().unwrap_or_default();
    set(network, QUALITY_PREFIX, value_after_equal(quality)?);
    if let Some(signal) = segments.next() {
        set(network, SIGNAL_PREFIX, value_after_equal(signal)?);
    }
    Ok(())
}

fn value_after_equal(segment: &str) -> Result<&str, ParseError> {
    segment
        .split('=')
        .nth(1)
        .map(str::trim)
        .ok_or_else(|| ParseError::MalformedQuality(segment.trim().to_owned()))
}

/// `Extra: Last beacon: 1020ms ago`, the `Extra` part is dropped.
fn parse_extra(line: &str, network: &mut WifiNetwork) -> Result<(), ParseError> {
    let parts: Vec<&str> = line.split(':').collect();
    if parts.len() > 2 {
        set(network, parts[1].trim(), parts[2].trim());
    } else {
        debug!("Ignoring extra line '{}'", line);
    }
    Ok(())
}

fn parse_key_value(line: &str, network: &mut WifiNetwork) -> Result<(), ParseError> {
    match line.split_once(':') {
        Some((key, value)) => set(network, key.trim(), value.trim()),
        None => debug!("Ignoring line without key: '{}'", line),
    }
    Ok(())
}
