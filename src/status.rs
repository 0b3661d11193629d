//! Run the platform commands and turn their output into records.
//!
//! Every call spawns its own process and parses into fresh values, nothing is
//! shared or cached between requests.
use crate::battery::BatteryRecord;
use crate::catalog::CommandCatalog;
use crate::command::CommandRunner;
use crate::error::{Cause, CommandError, ParseError, StatusError};
use crate::wifiscan::WifiScanResult;
use std::sync::Arc;
use tracing::{debug, error};

/// Battery and wifi status provider.
pub struct StatusService {
    catalog: CommandCatalog,
    runner: Arc<dyn CommandRunner>,
}

impl StatusService {
    /// Create a service running `catalog` commands with `runner`
    pub fn new(catalog: CommandCatalog, runner: Arc<dyn CommandRunner>) -> Self {
        Self { catalog, runner }
    }

    /// Current battery record
    pub async fn battery(&self) -> Result<BatteryRecord, StatusError> {
        self.collect(&self.catalog.battery_command, self.catalog.battery_parser)
            .await
            .map_err(|cause| {
                error!("Battery status failed: {}", cause);
                StatusError::Battery(cause)
            })
    }

    /// Currently visible wifi networks
    pub async fn wifi(&self) -> Result<WifiScanResult, StatusError> {
        self.collect(&self.catalog.wifi_command, self.catalog.wifi_parser)
            .await
            .map_err(|cause| {
                error!("Wifi status failed: {}", cause);
                StatusError::Wifi(cause)
            })
    }

    async fn collect<T>(
        &self,
        command: &str,
        parser: fn(&str) -> Result<T, ParseError>,
    ) -> Result<T, Cause> {
        let stdout = self.stdout_of(command).await?;
        Ok(parser(&stdout)?)
    }

    async fn stdout_of(&self, command: &str) -> Result<String, CommandError> {
        if command.is_empty() {
            debug!("No command available on {:?}", self.catalog.platform);
            return Ok(String::new());
        }
        debug!("Running command {}", command);
        let runner = Arc::clone(&self.runner);
        let command = command.to_owned();
        tokio::task::spawn_blocking(move || runner.run(&command)).await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    mod should {
        use super::*;
        use crate::catalog::Platform;
        use crate::command::MockCommandRunner;
        use crate::error::{BATTERY_ERROR_MESSAGE, WIFI_ERROR_MESSAGE};
        use anyhow::Result;

        fn service(platform: Platform, runner: MockCommandRunner) -> StatusService {
            StatusService::new(
                CommandCatalog::new(platform, "wlan0", "battery_BAT0"),
                Arc::new(runner),
            )
        }

        #[test_log::test(tokio::test)]
        async fn parse_battery_command_output() -> Result<()> {
            let mut mock = MockCommandRunner::new();
            mock.expect_run()
                .withf(|cmd| cmd.starts_with("upower -i"))
                .times(1)
                .returning(|_| Ok("state: charging\npercentage: 64%\n".into()));

            let record = service(Platform::Linux, mock).battery().await?;
            assert_eq!(record.state, Some("charging".into()));
            assert_eq!(record.percentage, Some("64%".into()));
            assert_eq!(record.time_to_empty, None);
            Ok(())
        }

        #[test_log::test(tokio::test)]
        async fn parse_wifi_command_output() -> Result<()> {
            let mut mock = MockCommandRunner::new();
            mock.expect_run()
                .withf(|cmd| cmd.starts_with("iwlist wlan0 scanning"))
                .times(1)
                .returning(|_| Ok("Cell 01 - Address: DC:0B:1A:47:BA:07\n".into()));

            let scan = service(Platform::Linux, mock).wifi().await?;
            assert_eq!(scan.cells().collect::<Vec<_>>(), ["Cell 01"]);
            Ok(())
        }

        #[test_log::test(tokio::test)]
        async fn report_command_failure_with_fixed_message() {
            let mut mock = MockCommandRunner::new();
            mock.expect_run().times(1).returning(|cmd| {
                Err(CommandError::ExitStatus {
                    command: cmd.to_owned(),
                    code: Some(1),
                    stderr: String::new(),
                })
            });

            let err = service(Platform::Windows, mock).battery().await.unwrap_err();
            assert_eq!(err.to_string(), BATTERY_ERROR_MESSAGE);
            assert!(matches!(err, StatusError::Battery(Cause::Command(_))));
        }

        #[test_log::test(tokio::test)]
        async fn report_garbled_scan_with_fixed_message() {
            let mut mock = MockCommandRunner::new();
            mock.expect_run()
                .times(1)
                .returning(|_| Ok("Cell 01 - Channel:6\n Quality 41/70\n".into()));

            let err = service(Platform::Linux, mock).wifi().await.unwrap_err();
            assert_eq!(err.to_string(), WIFI_ERROR_MESSAGE);
            assert!(matches!(err, StatusError::Wifi(Cause::Parse(_))));
        }

        #[test_log::test(tokio::test)]
        async fn not_run_anything_without_command() -> Result<()> {
            let mut mock = MockCommandRunner::new();
            mock.expect_run().never();

            let status = service(Platform::MacOs, mock);
            assert!(status.wifi().await?.is_empty());

            let mut mock = MockCommandRunner::new();
            mock.expect_run().never();
            let status = service(Platform::Other, mock);
            assert_eq!(status.battery().await?, BatteryRecord::default());
            assert!(status.wifi().await?.is_empty());
            Ok(())
        }
    }
}
