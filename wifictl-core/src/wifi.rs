//! Wi-Fi 控制适配器
//!
//! 把 enable / scan / status / connect 四个操作翻译为 nmcli 调用，
//! 并把文本输出解析为结构化结果。任何外部命令的失败都被折叠为
//! false 或空结果，只记录日志，不向调用方抛出。

use crate::backends::nmcli::parsing::{
    first_active_connection, listing_mentions, parse_access_points, radio_enabled, radio_matches,
};
use crate::backends::nmcli::{
    ACTIVE_CONNECTIONS, AP_LIST, RADIO_STATUS, RESCAN, connect_args, radio_toggle_args, to_args,
};
use crate::traits::{CommandRunner, ConnectResult, NetworkRecord, StatusRecord};
use std::sync::Arc;

pub struct WifiControl {
    runner: Arc<dyn CommandRunner>,
}

impl WifiControl {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// 执行查询命令；失败时记录警告并返回空文本
    async fn query(&self, args: Vec<String>) -> String {
        match self.runner.run(args).await {
            Ok(out) => out,
            Err(e) => {
                tracing::warn!(error = %e, "nmcli query failed, treating output as empty");
                String::new()
            }
        }
    }

    /// 切换无线电开关，然后重新查询状态确认是否达到目标状态
    pub async fn enable(&self, enable: bool) -> bool {
        tracing::info!(enable, "Setting Wi-Fi radio");

        // 部分 nmcli 版本成功时没有任何输出，所以只看随后的状态查询
        if let Err(e) = self.runner.run(radio_toggle_args(enable)).await {
            tracing::warn!(error = %e, "Radio toggle command failed");
        }

        let status = self.query(to_args(RADIO_STATUS)).await;
        let ok = radio_matches(&status, enable);
        if !ok {
            tracing::warn!(enable, status = %status.trim(), "Radio state does not match request");
        }
        ok
    }

    /// 触发重新扫描并列出附近的接入点
    pub async fn scan(&self) -> Vec<NetworkRecord> {
        if let Err(e) = self.runner.run(to_args(RESCAN)).await {
            tracing::debug!(error = %e, "Rescan request failed, listing cached results");
        }

        let listing = self.query(to_args(AP_LIST)).await;
        let networks = parse_access_points(&listing);
        tracing::debug!(count = networks.len(), "Scan complete");
        networks
    }

    pub async fn status(&self) -> StatusRecord {
        let radio = self.query(to_args(RADIO_STATUS)).await;
        let active = self.query(to_args(ACTIVE_CONNECTIONS)).await;
        StatusRecord {
            enabled: radio_enabled(&radio),
            ssid: first_active_connection(&active),
        }
    }

    /// 连接到指定网络。`password` 为空时按开放网络连接。
    ///
    /// Success is judged by whether the active connection listing mentions
    /// `ssid` afterwards, not by the connect command's own output.
    pub async fn connect(&self, ssid: &str, password: &str) -> ConnectResult {
        if ssid.is_empty() {
            tracing::warn!("Rejecting connect request with empty SSID");
            return ConnectResult {
                ok: false,
                ssid: ssid.to_string(),
            };
        }

        tracing::info!(ssid = %ssid, open = password.is_empty(), "Connecting to network");
        match self.runner.run_merged(connect_args(ssid, password)).await {
            Ok(out) => tracing::debug!(ssid = %ssid, output = %out.trim(), "Connect command finished"),
            Err(e) => tracing::warn!(ssid = %ssid, error = %e, "Connect command failed"),
        }

        let active = self.query(to_args(ACTIVE_CONNECTIONS)).await;
        let ok = listing_mentions(&active, ssid);
        if ok {
            tracing::info!(ssid = %ssid, "Connection active");
        } else {
            tracing::warn!(ssid = %ssid, "Network not found among active connections");
        }

        ConnectResult {
            ok,
            ssid: ssid.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::traits::MockCommandRunner;

    fn is(expected: &'static [&'static str]) -> impl Fn(&Vec<String>) -> bool + Send + 'static {
        move |args: &Vec<String>| args.iter().map(String::as_str).eq(expected.iter().copied())
    }

    fn missing_tool() -> Error {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "nmcli: not found",
        ))
    }

    fn control(mock: MockCommandRunner) -> WifiControl {
        WifiControl::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn enable_true_reports_enabled_radio() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run()
            .withf(is(&["radio", "wifi", "on"]))
            .times(1)
            .returning(|_| Ok(String::new()));
        mock.expect_run()
            .withf(is(RADIO_STATUS))
            .times(1)
            .returning(|_| Ok("enabled\n".into()));

        assert!(control(mock).enable(true).await);
    }

    #[tokio::test]
    async fn enable_false_requires_disabled_text() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run()
            .withf(is(&["radio", "wifi", "off"]))
            .times(1)
            .returning(|_| Ok(String::new()));
        mock.expect_run()
            .withf(is(RADIO_STATUS))
            .times(1)
            .returning(|_| Ok("enabled\n".into()));

        assert!(!control(mock).enable(false).await);
    }

    #[tokio::test]
    async fn enable_ignores_toggle_failure_and_trusts_status() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run()
            .withf(is(&["radio", "wifi", "off"]))
            .times(1)
            .returning(|_| Err(Error::CommandFailed("exit status 8".into())));
        mock.expect_run()
            .withf(is(RADIO_STATUS))
            .times(1)
            .returning(|_| Ok("disabled\n".into()));

        assert!(control(mock).enable(false).await);
    }

    #[tokio::test]
    async fn enable_with_missing_tool_is_false() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run().times(2).returning(|_| Err(missing_tool()));

        assert!(!control(mock).enable(true).await);
    }

    #[tokio::test]
    async fn scan_rescans_then_parses_listing() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run()
            .withf(is(RESCAN))
            .times(1)
            .returning(|_| Ok(String::new()));
        mock.expect_run()
            .withf(is(AP_LIST))
            .times(1)
            .returning(|_| Ok("HomeWiFi:WPA2:87\nCafeGuest::54\n".into()));

        let networks = control(mock).scan().await;
        assert_eq!(networks.len(), 2);
        assert_eq!(networks[0].ssid, "HomeWiFi");
        assert_eq!(networks[0].security, "WPA2");
        assert_eq!(networks[0].signal, "87");
        assert_eq!(networks[1].security, "");
    }

    #[tokio::test]
    async fn scan_lists_even_when_rescan_fails() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run()
            .withf(is(RESCAN))
            .times(1)
            .returning(|_| Err(Error::CommandFailed("Scanning not allowed".into())));
        mock.expect_run()
            .withf(is(AP_LIST))
            .times(1)
            .returning(|_| Ok("Office:WPA2:40\n".into()));

        assert_eq!(control(mock).scan().await.len(), 1);
    }

    #[tokio::test]
    async fn scan_without_tool_is_empty() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run().times(2).returning(|_| Err(missing_tool()));

        assert!(control(mock).scan().await.is_empty());
    }

    #[tokio::test]
    async fn status_combines_radio_and_active_connection() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run()
            .withf(is(RADIO_STATUS))
            .times(1)
            .returning(|_| Ok("enabled\n".into()));
        mock.expect_run()
            .withf(is(ACTIVE_CONNECTIONS))
            .times(1)
            .returning(|_| Ok("HomeWiFi:wlan0\n".into()));

        let status = control(mock).status().await;
        assert_eq!(
            status,
            StatusRecord {
                enabled: true,
                ssid: "HomeWiFi".into()
            }
        );
    }

    #[tokio::test]
    async fn status_without_active_connection_has_empty_ssid() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run()
            .withf(is(RADIO_STATUS))
            .times(1)
            .returning(|_| Ok("disabled\n".into()));
        mock.expect_run()
            .withf(is(ACTIVE_CONNECTIONS))
            .times(1)
            .returning(|_| Ok(String::new()));

        let status = control(mock).status().await;
        assert!(!status.enabled);
        assert_eq!(status.ssid, "");
    }

    #[tokio::test]
    async fn connect_with_empty_ssid_spawns_nothing() {
        // 没有设置任何期望：任何调用都会让 mock panic
        let mock = MockCommandRunner::new();

        let result = control(mock).connect("", "").await;
        assert_eq!(
            result,
            ConnectResult {
                ok: false,
                ssid: String::new()
            }
        );
    }

    #[tokio::test]
    async fn connect_succeeds_when_listing_mentions_ssid() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run_merged()
            .withf(is(&["device", "wifi", "connect", "TestNet", "password", "secret"]))
            .times(1)
            .returning(|_| Ok("Device 'wlan0' successfully activated.\n".into()));
        mock.expect_run()
            .withf(is(ACTIVE_CONNECTIONS))
            .times(1)
            .returning(|_| Ok("TestNet:wlan0\n".into()));

        let result = control(mock).connect("TestNet", "secret").await;
        assert_eq!(
            result,
            ConnectResult {
                ok: true,
                ssid: "TestNet".into()
            }
        );
    }

    #[tokio::test]
    async fn connect_fails_when_listing_lacks_ssid() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run_merged()
            .withf(is(&["device", "wifi", "connect", "TestNet", "password", "secret"]))
            .times(1)
            .returning(|_| Ok("Error: Secrets were required, but not provided.\n".into()));
        mock.expect_run()
            .withf(is(ACTIVE_CONNECTIONS))
            .times(1)
            .returning(|_| Ok("Wired connection 1:eth0\n".into()));

        let result = control(mock).connect("TestNet", "secret").await;
        assert!(!result.ok);
        assert_eq!(result.ssid, "TestNet");
    }

    #[tokio::test]
    async fn connect_open_network_omits_password() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run_merged()
            .withf(is(&["device", "wifi", "connect", "CafeGuest"]))
            .times(1)
            .returning(|_| Ok(String::new()));
        mock.expect_run()
            .withf(is(ACTIVE_CONNECTIONS))
            .times(1)
            .returning(|_| Ok("CafeGuest:wlan0\n".into()));

        assert!(control(mock).connect("CafeGuest", "").await.ok);
    }

    #[tokio::test]
    async fn connect_matches_ssid_anywhere_in_listing() {
        // 子串匹配：SSID 恰好等于设备名时同样判定为成功
        let mut mock = MockCommandRunner::new();
        mock.expect_run_merged()
            .times(1)
            .returning(|_| Err(missing_tool()));
        mock.expect_run()
            .withf(is(ACTIVE_CONNECTIONS))
            .times(1)
            .returning(|_| Ok("Wired connection 1:eth0\n".into()));

        assert!(control(mock).connect("eth0", "").await.ok);
    }
}
