//! The `wifi_control` method channel.
//!
//! A call carries a method name and a map of named arguments. Argument
//! extraction is permissive: a missing key, a value of the wrong type or a
//! non-object argument map all fall back to `false` / `""`. Unknown method
//! names get an explicit [`MethodResponse::NotImplemented`].

use crate::wifi::WifiControl;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::sync::Mutex;

/// 通道的固定名称
pub const CHANNEL_NAME: &str = "wifi_control";

/// 通道支持的方法
pub const METHODS: &[&str] = &["enable", "scan", "status", "connect"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
pub enum MethodResponse {
    Success(Value),
    NotImplemented,
}

fn bool_arg(arguments: &Value, key: &str) -> bool {
    arguments.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn string_arg(arguments: &Value, key: &str) -> String {
    arguments
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

pub struct WifiChannel {
    control: WifiControl,
    // 同一时间只处理一个调用，保证各调用的 nmcli 命令不会交错
    busy: Mutex<()>,
}

impl WifiChannel {
    pub fn new(control: WifiControl) -> Self {
        Self {
            control,
            busy: Mutex::new(()),
        }
    }

    pub fn name(&self) -> &'static str {
        CHANNEL_NAME
    }

    /// 分发一次方法调用。并发到达的调用按获取锁的顺序逐个执行。
    pub async fn handle(&self, call: MethodCall) -> MethodResponse {
        let _guard = self.busy.lock().await;
        tracing::debug!(method = %call.method, "Handling method call");
        let args = &call.arguments;

        match call.method.as_str() {
            "enable" => {
                let ok = self.control.enable(bool_arg(args, "enable")).await;
                MethodResponse::Success(Value::Bool(ok))
            }
            "scan" => {
                let networks = self.control.scan().await;
                MethodResponse::Success(json!(networks))
            }
            "status" => {
                let status = self.control.status().await;
                MethodResponse::Success(json!(status))
            }
            "connect" => {
                let ssid = string_arg(args, "ssid");
                let password = string_arg(args, "password");
                let result = self.control.connect(&ssid, &password).await;
                MethodResponse::Success(json!(result))
            }
            other => {
                tracing::warn!(method = %other, "Method not implemented");
                MethodResponse::NotImplemented
            }
        }
    }
}
