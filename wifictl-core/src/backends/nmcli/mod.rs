// 通过调用nmcli命令行工具实现的后端，适用于使用NetworkManager管理网络连接的Linux系统

pub mod parsing;

use crate::Result;
use crate::traits::CommandRunner;
use async_trait::async_trait;
use tokio::process::Command;

/// `nmcli -t -f WIFI general`
pub const RADIO_STATUS: &[&str] = &["-t", "-f", "WIFI", "general"];
/// `nmcli device wifi rescan`
pub const RESCAN: &[&str] = &["device", "wifi", "rescan"];
/// `nmcli -t -f SSID,SECURITY,SIGNAL device wifi list`
pub const AP_LIST: &[&str] = &["-t", "-f", "SSID,SECURITY,SIGNAL", "device", "wifi", "list"];
/// `nmcli -t -f NAME,DEVICE connection show --active`
pub const ACTIVE_CONNECTIONS: &[&str] = &["-t", "-f", "NAME,DEVICE", "connection", "show", "--active"];

pub fn to_args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

/// `nmcli radio wifi on|off`
pub fn radio_toggle_args(enable: bool) -> Vec<String> {
    to_args(&["radio", "wifi", if enable { "on" } else { "off" }])
}

/// `nmcli device wifi connect <ssid> [password <password>]`
///
/// SSID 和密码作为独立的 argv 元素传递，不经过 shell，因此引号等字符不会被解释。
pub fn connect_args(ssid: &str, password: &str) -> Vec<String> {
    let mut args = to_args(&["device", "wifi", "connect", ssid]);
    if !password.is_empty() {
        args.push("password".to_string());
        args.push(password.to_string());
    }
    args
}

/// Renders an argument list for logs with any password value masked.
pub(crate) fn redact(args: &[String]) -> String {
    let mut out = Vec::with_capacity(args.len());
    let mut mask_next = false;
    for arg in args {
        if mask_next {
            out.push("********");
            mask_next = false;
            continue;
        }
        mask_next = arg == "password";
        out.push(arg.as_str());
    }
    out.join(" ")
}

#[derive(Debug, Clone)]
pub struct NmcliRunner {
    program: String,
}

impl NmcliRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn exec(&self, args: Vec<String>, merge_stderr: bool) -> Result<String> {
        tracing::debug!(program = %self.program, args = %redact(&args), "Spawning command");

        // 固定 C locale，保证 "enabled"/"disabled" 等字符串不被翻译
        let output = Command::new(&self.program)
            .args(&args)
            .env("LC_ALL", "C")
            .output()
            .await?;

        if !output.status.success() {
            // 非零退出不视为错误，调用方通过输出文本自行判断
            tracing::debug!(
                program = %self.program,
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "Command exited unsuccessfully"
            );
        }

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        if merge_stderr {
            text.push_str(&String::from_utf8_lossy(&output.stderr));
        }
        Ok(text)
    }
}

#[async_trait]
impl CommandRunner for NmcliRunner {
    async fn run(&self, args: Vec<String>) -> Result<String> {
        self.exec(args, false).await
    }

    async fn run_merged(&self, args: Vec<String>) -> Result<String> {
        self.exec(args, true).await
    }
}
