use crate::traits::CommandRunner;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

/// A simulated NetworkManager for development machines and tests.
///
/// It answers the same nmcli argument vectors the real tool accepts and
/// prints the same terse text, so everything above the runner behaves as
/// it would on a board.
#[derive(Debug)]
pub struct MockBackend {
    state: Mutex<MockState>,
}

#[derive(Debug)]
struct MockState {
    radio_enabled: bool,
    active: Option<String>,
    access_points: Vec<MockAccessPoint>,
}

#[derive(Debug, Clone)]
struct MockAccessPoint {
    ssid: &'static str,
    security: &'static str,
    signal: u8,
    password: Option<&'static str>,
}

const DEVICE: &str = "wlan0";

impl MockBackend {
    pub fn new() -> Self {
        // 固定的假网络列表，Open 网络没有密码
        let access_points = vec![
            MockAccessPoint {
                ssid: "MyHomeWiFi",
                security: "WPA3",
                signal: 95,
                password: Some("homepass"),
            },
            MockAccessPoint {
                ssid: "CafeGuest",
                security: "",
                signal: 78,
                password: None,
            },
            MockAccessPoint {
                ssid: "Neighbor's Network",
                security: "WPA2",
                signal: 55,
                password: Some("neighbor"),
            },
            MockAccessPoint {
                ssid: "Lab:5G",
                security: "WPA1 WPA2",
                signal: 42,
                password: Some("labpass"),
            },
        ];

        Self {
            state: Mutex::new(MockState {
                radio_enabled: true,
                active: None,
                access_points,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn handle(&self, args: &[String]) -> Result<String> {
        let argv: Vec<&str> = args.iter().map(String::as_str).collect();
        let mut state = self.state();

        match argv.as_slice() {
            ["radio", "wifi", switch @ ("on" | "off")] => {
                state.radio_enabled = *switch == "on";
                if !state.radio_enabled {
                    state.active = None;
                }
                tracing::debug!("👻 [MockBackend] Radio switched {}", switch);
                Ok(String::new())
            }
            ["-t", "-f", "WIFI", "general"] => Ok(if state.radio_enabled {
                "enabled\n".to_string()
            } else {
                "disabled\n".to_string()
            }),
            ["device", "wifi", "rescan"] => {
                if state.radio_enabled {
                    Ok(String::new())
                } else {
                    Err(Error::CommandFailed(
                        "Error: Scanning not allowed while unavailable.".into(),
                    ))
                }
            }
            ["-t", "-f", "SSID,SECURITY,SIGNAL", "device", "wifi", "list"] => {
                if !state.radio_enabled {
                    return Ok(String::new());
                }
                Ok(state
                    .access_points
                    .iter()
                    .map(|ap| format!("{}:{}:{}\n", ap.ssid, ap.security, ap.signal))
                    .collect())
            }
            ["-t", "-f", "NAME,DEVICE", "connection", "show", "--active"] => Ok(state
                .active
                .as_ref()
                .map(|name| format!("{}:{}\n", name, DEVICE))
                .unwrap_or_default()),
            ["device", "wifi", "connect", ssid, rest @ ..] => {
                let password = match rest {
                    [] => None,
                    ["password", password] => Some(*password),
                    _ => return Err(unsupported(args)),
                };
                Ok(Self::connect(&mut state, ssid, password))
            }
            _ => Err(unsupported(args)),
        }
    }

    fn connect(state: &mut MockState, ssid: &str, password: Option<&str>) -> String {
        if !state.radio_enabled {
            return "Error: Wi-Fi radio is disabled.\n".to_string();
        }
        let Some(ap) = state.access_points.iter().find(|ap| ap.ssid == ssid).cloned() else {
            tracing::debug!("👻 [MockBackend] No network with SSID '{}'", ssid);
            return format!("Error: No network with SSID '{}' found.\n", ssid);
        };

        if ap.password.is_some() && ap.password != password {
            tracing::debug!("👻 [MockBackend] Wrong secrets for '{}'", ssid);
            return "Error: Connection activation failed: Secrets were required, but not provided.\n"
                .to_string();
        }

        state.active = Some(ap.ssid.to_string());
        tracing::debug!("👻 [MockBackend] Connected to '{}'", ssid);
        format!("Device '{}' successfully activated.\n", DEVICE)
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn unsupported(args: &[String]) -> Error {
    Error::CommandFailed(format!("unsupported nmcli invocation: {}", args.join(" ")))
}

#[async_trait]
impl CommandRunner for MockBackend {
    async fn run(&self, args: Vec<String>) -> Result<String> {
        self.handle(&args)
    }

    async fn run_merged(&self, args: Vec<String>) -> Result<String> {
        self.handle(&args)
    }
}
