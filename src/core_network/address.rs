use crate::core_error::{FtpClientError, FtpResult};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Picks the IPv4 address advertised in PORT.
///
/// A configured address wins. Otherwise the local address of the control
/// connection is used, which is the interface the server can already reach.
pub fn resolve_active_ipv4(
    configured: Option<Ipv4Addr>,
    control_local: Option<SocketAddr>,
) -> FtpResult<Ipv4Addr> {
    if let Some(ip) = configured {
        return Ok(ip);
    }
    match control_local.map(|addr| addr.ip()) {
        Some(IpAddr::V4(ip)) if !ip.is_unspecified() => Ok(ip),
        Some(IpAddr::V6(ip)) => ip.to_ipv4_mapped().ok_or_else(|| {
            FtpClientError::DataChannelFailure(format!(
                "No IPv4 address available for active mode (control is {})",
                ip
            ))
        }),
        _ => Err(FtpClientError::DataChannelFailure(
            "No IPv4 address available for active mode".to_string(),
        )),
    }
}
