use crate::traits::NetworkRecord;

/// nmcli 终端模式 (`-t`) 的字段分隔符
pub const FIELD_SEPARATOR: char = ':';

/// 解析 `nmcli -t -f SSID,SECURITY,SIGNAL device wifi list` 的输出
/// 每个非空行产生一条记录，重复或格式异常的行原样保留
pub fn parse_access_points(output: &str) -> Vec<NetworkRecord> {
    output
        .lines()
        .filter(|line| !line.is_empty())
        .map(parse_access_point_line)
        .collect()
}

/// Splits one listing line into SSID, security and signal.
///
/// The last two fields are taken from the right, so an SSID containing the
/// separator keeps it. A line with a single separator yields only the SSID.
pub fn parse_access_point_line(line: &str) -> NetworkRecord {
    let mut fields = line.rsplitn(3, FIELD_SEPARATOR);
    let last = fields.next().unwrap_or_default();
    let (ssid, security, signal) = match (fields.next(), fields.next()) {
        (Some(security), Some(ssid)) => (ssid, security, last),
        (Some(ssid), None) => (ssid, "", ""),
        _ => (last, "", ""),
    };

    NetworkRecord {
        ssid: ssid.to_string(),
        security: security.to_string(),
        signal: signal.to_string(),
    }
}

/// `nmcli -t -f WIFI general` 的输出中是否包含 "enabled"
pub fn radio_enabled(status: &str) -> bool {
    status.contains("enabled")
}

/// 检查无线电状态文本是否与期望的开关状态一致
pub fn radio_matches(status: &str, enable: bool) -> bool {
    if enable {
        status.contains("enabled")
    } else {
        status.contains("disabled")
    }
}

/// 活动连接列表第一行的 NAME 字段；没有活动连接时为空字符串
pub fn first_active_connection(output: &str) -> String {
    output
        .lines()
        .find(|line| !line.is_empty())
        .map(|line| {
            line.split_once(FIELD_SEPARATOR)
                .map_or(line, |(name, _)| name)
                .to_string()
        })
        .unwrap_or_default()
}

/// 活动连接列表的原始文本中是否出现 `ssid`。
/// 这是子串匹配，不区分字段，例如设备名恰好包含该文本时也会命中。
pub fn listing_mentions(output: &str, ssid: &str) -> bool {
    output.contains(ssid)
}
