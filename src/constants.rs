// src/constants.rs

use std::time::Duration;

pub const DEFAULT_CONTROL_PORT: u16 = 21;
pub const DEFAULT_RECONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(200);
pub const DEFAULT_ACCEPT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Line terminator for commands on the control channel.
pub const EOL: &str = "\r\n";
pub const PATH_SEPARATOR: &str = "/";

/// Depth value meaning "unset" on a node, or "unbounded" as a traversal limit.
pub const DEFAULT_DEPTH: i32 = -1;

pub const DEFAULT_USER: &str = "anonymous";
pub const DEFAULT_PASSWORD: &str = "anonymous";

pub const HOSTNAME_REGEX: &str =
    r"^(([A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9-]{0,61}[A-Za-z0-9])\.)*([A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9-]{0,61}[A-Za-z0-9])$";
pub const IP_HOSTNAME_MAX_LENGTH: usize = 253;
