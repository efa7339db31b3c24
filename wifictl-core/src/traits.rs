use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// 在这里定义共享的记录类型，以及所有后端都要实现的 trait。

/// A single access point from a scan listing.
/// 三个字段都按 nmcli 输出的原始文本保留，不做数值转换。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkRecord {
    pub ssid: String,
    pub security: String, // "WPA2", "WPA1 WPA2", 开放网络为空
    pub signal: String,   // 信号强度，0到100
}

/// 无线电开关状态以及当前活动连接的名称（无连接时为空）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub enabled: bool,
    pub ssid: String,
}

/// `connect` 的结果，`ssid` 原样回显请求中的值。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectResult {
    pub ok: bool,
    pub ssid: String,
}

/// 外部网络管理工具的调用接口。
///
/// Every external process goes through this trait, so the adapter never
/// touches `tokio::process` directly and tests can script the tool's output.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs the tool with `args` and returns its stdout.
    async fn run(&self, args: Vec<String>) -> crate::Result<String>;

    /// Runs the tool with `args` and returns stdout followed by stderr.
    async fn run_merged(&self, args: Vec<String>) -> crate::Result<String>;
}
