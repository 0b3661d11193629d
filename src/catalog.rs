//! Select, once at startup, the diagnostic commands and parsers of the running platform.
use crate::battery::{self, BatteryRecord};
use crate::error::ParseError;
use crate::wifiscan::{self, WifiScanResult};
use std::fmt;

/// Battery text to record converter
pub type BatteryParser = fn(&str) -> Result<BatteryRecord, ParseError>;
/// Wifi scan text to networks converter
pub type WifiParser = fn(&str) -> Result<WifiScanResult, ParseError>;

/// Operating systems with a known output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    #[allow(missing_docs)]
    Linux,
    #[allow(missing_docs)]
    MacOs,
    #[allow(missing_docs)]
    Windows,
    /// Anything else: no command is run and records stay empty
    Other,
}

impl Platform {
    /// Platform this binary is running on
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS identifier (`std::env::consts::OS` or node style names) to a platform
    pub fn from_os(os: &str) -> Self {
        match os {
            "linux" => Platform::Linux,
            "macos" | "darwin" => Platform::MacOs,
            "windows" | "win32" => Platform::Windows,
            _ => Platform::Other,
        }
    }

    /// Parser matching this platform's battery command
    pub fn battery_parser(self) -> BatteryParser {
        match self {
            Platform::Linux => battery::parse_upower,
            Platform::MacOs => battery::parse_pmset,
            Platform::Windows => battery::parse_wmic,
            Platform::Other => battery::parse_unsupported,
        }
    }

    /// Parser matching this platform's wifi command
    pub fn wifi_parser(self) -> WifiParser {
        match self {
            Platform::Linux => wifiscan::parse_iwlist,
            _ => wifiscan::parse_unsupported,
        }
    }
}

/// Commands and parsers of one platform.
///
/// An empty command means the platform has no way to report that status.
#[derive(Clone)]
pub struct CommandCatalog {
    /// platform the catalog was resolved for
    pub platform: Platform,
    /// shell command printing battery status
    pub battery_command: String,
    /// parser for `battery_command` output
    pub battery_parser: BatteryParser,
    /// shell command printing visible wifi networks
    pub wifi_command: String,
    /// parser for `wifi_command` output
    pub wifi_parser: WifiParser,
}

impl fmt::Debug for CommandCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandCatalog")
            .field("platform", &self.platform)
            .field("battery_command", &self.battery_command)
            .field("wifi_command", &self.wifi_command)
            .finish()
    }
}

impl CommandCatalog {
    /// Resolve commands for `platform`.
    ///
    /// `interface` is the wifi interface scanned on linux and `battery_device`
    /// the UPower device name (e.g. `battery_BAT0`).
    pub fn new(platform: Platform, interface: &str, battery_device: &str) -> Self {
        let (battery_command, wifi_command) = match platform {
            Platform::Linux => (
                format!(
                    "upower -i {} | grep -E \"state|time to empty|to full|percentage\"",
                    shell_words::quote(&format!("/org/freedesktop/UPower/devices/{battery_device}"))
                ),
                format!(
                    "iwlist {} scanning | egrep \"Cell |Address|Channel|Frequency|Encryption|Quality|Signal level|Last beacon|Mode|Group Cipher|Pairwise Ciphers|Authentication Suites|ESSID\"",
                    shell_words::quote(interface)
                ),
            ),
            Platform::MacOs => (
                r#"pmset -g batt | egrep "([0-9]+\%).*" -o"#.to_owned(),
                String::new(),
            ),
            Platform::Windows => ("WMIC Path Win32_Battery".to_owned(), String::new()),
            Platform::Other => (String::new(), String::new()),
        };
        CommandCatalog {
            platform,
            battery_command,
            battery_parser: platform.battery_parser(),
            wifi_command,
            wifi_parser: platform.wifi_parser(),
        }
    }
}
