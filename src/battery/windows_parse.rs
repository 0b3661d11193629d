use super::BatteryRecord;
use crate::error::ParseError;
use crate::normalize;
use std::collections::HashMap;
use tracing::debug;

/// Parse `WMIC Path Win32_Battery` output: a header line whose token offsets
/// give the column boundaries of the following data line.
///
/// Less than two non empty lines yields an empty record.
/// Never fails, the `Result` is shared with the other battery parsers.
pub fn parse_wmic(stdout: &str) -> Result<BatteryRecord, ParseError> {
    let mut lines = stdout.lines().map(str::trim).filter(|l| !l.is_empty());
    let (header, data) = match (lines.next(), lines.next()) {
        (Some(header), Some(data)) => (header, data),
        _ => {
            debug!("WMIC output without data line");
            return Ok(BatteryRecord::default());
        }
    };

    let columns = column_offsets(header);
    let data: Vec<char> = data.chars().collect();
    let mut fields = HashMap::new();
    for (i, (name, start)) in columns.iter().enumerate() {
        // Last column runs to the end of the data line
        let end = columns.get(i + 1).map_or(data.len(), |(_, next)| *next);
        fields.insert(*name, slice_chars(&data, *start, end).trim().to_owned());
    }
    debug!("WMIC fields {:?}", fields);
    Ok(normalize::battery_from_wmic(&fields))
}

/// Return each header token with its starting character offset.
///
/// A token is searched from one character past the previous match, so a
/// repeated name gets its own column instead of the earlier one.
fn column_offsets(header: &str) -> Vec<(&str, usize)> {
    let mut columns = Vec::new();
    let mut search_from = 0;
    for name in header.split_whitespace() {
        // Matches never pass a token's own position, so each token is found
        let Some(pos) = header[search_from..].find(name).map(|p| p + search_from) else {
            break;
        };
        columns.push((name, header[..pos].chars().count()));
        search_from = pos + header[pos..].chars().next().map_or(1, char::len_utf8);
    }
    columns
}

fn slice_chars(chars: &[char], start: usize, end: usize) -> String {
    let end = end.min(chars.len());
    if start >= end {
        return String::new();
    }
    chars[start..end].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    mod should {
        use super::*;
        use anyhow::Result;
        use test_log::test;

        const HEADER: &str = "Name  BatteryStatus  EstimatedChargeRemaining  TimeOnBattery";

        fn data_row(name: &str, status: &str, charge: &str, time: &str) -> String {
            format!("{:<6}{:<15}{:<26}{}", name, status, charge, time)
        }

        #[test]
        fn slice_fields_at_header_offsets() -> Result<()> {
            let res = format!("{}\r\r\n{}\r\r\n\r\r\n", HEADER, data_row("DELL", "2", "87", "5400"));
            assert_eq!(
                parse_wmic(&res)?,
                BatteryRecord {
                    percentage: Some("87".into()),
                    state: Some("charging".into()),
                    time_to_empty: Some("5400".into()),
                }
            );
            Ok(())
        }

        #[test]
        fn tolerate_values_filling_their_column() -> Result<()> {
            let res = format!(
                "{}\n{}\n",
                HEADER,
                data_row("DELL", "1", "100", "")
            );
            let record = parse_wmic(&res)?;
            assert_eq!(record.percentage, Some("100".into()));
            assert_eq!(record.state, Some("discharging".into()));
            assert_eq!(record.time_to_empty, Some("".into()));
            Ok(())
        }

        #[test]
        fn follow_header_column_order() -> Result<()> {
            let header = "TimeOnBattery  EstimatedChargeRemaining  BatteryStatus  Name";
            let data = format!("{:<15}{:<26}{:<15}{}", "120", "42", "1", "DELL");
            let res = format!("{}\n{}", header, data);
            assert_eq!(
                parse_wmic(&res)?,
                BatteryRecord {
                    percentage: Some("42".into()),
                    state: Some("discharging".into()),
                    time_to_empty: Some("120".into()),
                }
            );

            // Same data row under the original header lands in other columns
            let res = format!("{}\n{}", HEADER, data);
            assert_ne!(parse_wmic(&res)?.percentage, Some("42".into()));
            Ok(())
        }

        #[test]
        fn return_empty_record_with_less_than_two_lines() -> Result<()> {
            assert_eq!(parse_wmic("")?, BatteryRecord::default());
            assert_eq!(parse_wmic(HEADER)?, BatteryRecord::default());
            assert_eq!(parse_wmic(&format!("\n\n{}\r\n\r\n", HEADER))?, BatteryRecord::default());
            Ok(())
        }

        #[test]
        fn leave_unknown_status_code_unset() -> Result<()> {
            let res = format!("{}\n{}", HEADER, data_row("DELL", "6", "87", "5400"));
            assert_eq!(parse_wmic(&res)?.state, None);
            Ok(())
        }

        #[test]
        fn give_repeated_names_their_own_column() {
            assert_eq!(column_offsets("Name  Name"), [("Name", 0), ("Name", 6)]);
        }

        #[test]
        fn locate_every_header_token() {
            for header in [
                HEADER,
                "Name  Name  Name",
                "BatteryStatus  Status  Status",
                "aa a aaa a",
                "Désignation\tÉtat  État",
            ] {
                assert_eq!(
                    column_offsets(header).len(),
                    header.split_whitespace().count(),
                    "{}",
                    header
                );
            }
        }

        #[test]
        fn match_name_inside_a_later_header_token() {
            // "Status" is first found inside "BatteryStatus", past the scan pointer
            assert_eq!(
                column_offsets("BatteryStatus  Status"),
                [("BatteryStatus", 0), ("Status", 7)]
            );
        }

        #[test]
        fn count_offsets_in_characters() -> Result<()> {
            let res = "Désignation  EstimatedChargeRemaining\nÉnergie      64";
            assert_eq!(parse_wmic(res)?.percentage, Some("64".into()));
            Ok(())
        }
    }
}
