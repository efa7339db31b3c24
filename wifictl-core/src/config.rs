use crate::{Error, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::str::FromStr;

/// 编译时嵌入的默认配置
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../configs/wifictl.toml");

/// 指定外部配置文件路径的环境变量
pub const CONFIG_ENV_VAR: &str = "WIFICTL_CONFIG";

/// 顶层应用配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub wifi: WifiConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WifiConfig {
    /// NetworkManager 命令行工具的路径
    #[serde(default = "default_nmcli_path")]
    pub nmcli_path: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

/// 用于解析 TOML 的临时结构
#[derive(Deserialize)]
struct AppConfigFile {
    #[serde(default)]
    wifi: WifiConfig,
    #[serde(default)]
    server: ServerConfigToml,
}

#[derive(Deserialize)]
struct ServerConfigToml {
    #[serde(default = "default_bind_addr")]
    bind_addr: String,
}

fn default_nmcli_path() -> String {
    "nmcli".to_string()
}

fn default_bind_addr() -> String {
    "127.0.0.1:8787".to_string()
}

impl Default for WifiConfig {
    fn default() -> Self {
        Self {
            nmcli_path: default_nmcli_path(),
        }
    }
}

impl Default for ServerConfigToml {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

impl TryFrom<ServerConfigToml> for ServerConfig {
    type Error = Error;

    fn try_from(t: ServerConfigToml) -> Result<Self> {
        let bind_addr = SocketAddr::from_str(&t.bind_addr).map_err(|e| {
            Error::InvalidConfig(format!("bind_addr '{}': {}", t.bind_addr, e))
        })?;
        Ok(ServerConfig { bind_addr })
    }
}

/// 从 TOML 字符串加载应用配置
pub fn load_config_from_toml_str(s: &str) -> Result<AppConfig> {
    let parsed: AppConfigFile = toml::from_str(s)?;
    Ok(AppConfig {
        wifi: parsed.wifi,
        server: ServerConfig::try_from(parsed.server)?,
    })
}

/// 加载配置：优先读取 `WIFICTL_CONFIG` 指向的文件，否则使用嵌入的默认配置
pub fn load_config() -> Result<AppConfig> {
    match std::env::var(CONFIG_ENV_VAR) {
        Ok(path) => {
            tracing::info!(path = %path, "Loading config file");
            let content = std::fs::read_to_string(&path)?;
            load_config_from_toml_str(&content)
        }
        Err(_) => load_config_from_toml_str(DEFAULT_CONFIG_TOML),
    }
}
