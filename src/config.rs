//! This module olds struct and helpers for parameters and configuration
use ::structopt::clap::AppSettings;
use anyhow::{bail, Context, Result};
use directories_next::ProjectDirs;
use figment::{
    providers::{Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::PathBuf;
use tracing::debug;

// Courtesy of structopt_flags crate
/// `-v`/`-q` flags selecting the log level
#[derive(structopt::StructOpt, Debug, Clone, PartialEq, Eq)]
pub struct QuietVerbose {
    /// Increase the output's verbosity level
    ///
    /// Pass many times to increase verbosity level, up to 2.
    #[structopt(
        name = "quietverbose",
        long = "verbose",
        short = "v",
        parse(from_occurrences),
        conflicts_with = "quietquiet",
        global = true
    )]
    verbosity_level: u8,

    /// Decrease the output's verbosity level.
    ///
    /// Used once, only warnings and errors are logged.
    /// Used three times, will silent the log completely
    #[structopt(
        name = "quietquiet",
        long = "quiet",
        short = "q",
        parse(from_occurrences),
        conflicts_with = "quietverbose",
        global = true
    )]
    quiet_level: u8,
}

impl Default for QuietVerbose {
    fn default() -> Self {
        QuietVerbose {
            verbosity_level: 0,
            quiet_level: 0,
        }
    }
}

impl Serialize for QuietVerbose {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.get_level_filter())
    }
}

fn de_from_str<'de, D>(deserializer: D) -> Result<QuietVerbose, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let (verbosity_level, quiet_level) = match s.to_ascii_lowercase().as_ref() {
        "off" => (0, 3),
        "error" => (0, 2),
        "warn" => (0, 1),
        "info" => (0, 0),
        "debug" => (1, 0),
        _ => (2, 0),
    };
    Ok(QuietVerbose {
        verbosity_level,
        quiet_level,
    })
}

impl QuietVerbose {
    /// `true` when neither `-v` nor `-q` was given, so the level is left to
    /// the configuration file.
    pub fn is_unset(&self) -> bool {
        self.verbosity_level == 0 && self.quiet_level == 0
    }

    /// Level directive for [`tracing_subscriber::EnvFilter`], `info` without flags.
    pub fn get_level_filter(&self) -> &'static str {
        let quiet = self.quiet_level.min(3) as i8;
        let verbose = self.verbosity_level.min(2) as i8;
        match verbose - quiet {
            i8::MIN..=-3 => "off",
            -2 => "error",
            -1 => "warn",
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[derive(structopt::StructOpt, Serialize, Deserialize, Debug)]
/// Serve battery and wifi status as JSON
///
/// Battery status is read with upower (linux), pmset (mac os) or WMIC (windows),
/// visible wifi networks with iwlist (linux only).
#[structopt(global_settings(&[AppSettings::ColoredHelp, AppSettings::ColorAuto]))]
pub struct Args {
    /// HTTP port to listen on
    #[serde(skip_serializing_if = "Option::is_none")]
    #[structopt(short, long, env)]
    pub port: Option<u16>,

    /// wifi interface name scanned by iwlist
    #[serde(skip_serializing_if = "Option::is_none")]
    #[structopt(short, long, env)]
    pub interface_name: Option<String>,

    /// UPower battery device name
    #[serde(skip_serializing_if = "Option::is_none")]
    #[structopt(short, long, env)]
    pub battery_device: Option<String>,

    /// directory served for any other path (the demo page lives in `public/`)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[structopt(short, long, env, parse(from_os_str))]
    pub static_dir: Option<PathBuf>,

    /// TOML configuration file
    ///
    /// Defaults to `config.toml` in the OS specific configuration directory.
    #[serde(skip)]
    #[structopt(short, long, env = "POWERWIFI_CONFIG", parse(from_os_str))]
    pub config: Option<PathBuf>,

    /// log level, from `-v`/`-q` or `verbose = "debug"` in the config file
    #[structopt(flatten)]
    #[serde(
        default,
        deserialize_with = "de_from_str",
        skip_serializing_if = "QuietVerbose::is_unset"
    )]
    pub verbose: QuietVerbose,
}

impl Default for Args {
    fn default() -> Args {
        let res = Args {
            port: Some(8080),
            interface_name: Some("wlan0".into()),
            battery_device: Some("battery_BAT0".into()),
            static_dir: Some(PathBuf::from(".")),
            config: None,
            verbose: QuietVerbose::default(),
        };
        debug!("Args::default : {:#?}", res);
        res
    }
}

/// Validated application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// HTTP port
    pub port: u16,
    /// wifi interface scanned on linux
    pub interface_name: String,
    /// UPower device (e.g. `battery_BAT0`)
    pub battery_device: String,
    /// root of the static files
    pub static_dir: PathBuf,
}

impl Args {
    /// Check that every setting is defined once defaults, file and command
    /// line have been merged.
    pub fn validate(self) -> Result<AppConfig> {
        let port = self.port.context("HTTP port is not defined")?;
        let interface_name = self
            .interface_name
            .context("wifi interface_name is not defined")?;
        if interface_name.trim().is_empty() {
            bail!("wifi interface_name shall not be empty");
        }
        let battery_device = self
            .battery_device
            .context("battery_device is not defined")?;
        let static_dir = self.static_dir.context("static_dir is not defined")?;
        Ok(AppConfig {
            port,
            interface_name,
            battery_device,
            static_dir,
        })
    }
}

/// `config.toml` in the OS specific configuration directory
pub fn default_config_file() -> Option<PathBuf> {
    ProjectDirs::from("net", "powerwifi", "powerwifi-status")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Merge configuration: defaults → config file → command line `args`.
///
/// A missing config file is not an error.
pub fn merge_config(args: Args) -> Result<Args> {
    let mut figment = Figment::from(Serialized::defaults(Args::default()));
    if let Some(file) = args.config.clone().or_else(default_config_file) {
        debug!("Reading configuration from {:?}", file);
        figment = figment.merge(Toml::file(file));
    }
    let res: Args = figment
        .merge(Serialized::defaults(args))
        .extract()
        .context("Merging configuration")?;
    debug!("Merge config and parameters : {:#?}", res);
    Ok(res)
}
