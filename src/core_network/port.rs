use std::net::Ipv4Addr;

/// Builds the PORT argument `a,b,c,d,p1,p2` for a local listening endpoint.
pub fn format_port_argument(ip: Ipv4Addr, port: u16) -> String {
    let [a, b, c, d] = ip.octets();
    format!("{},{},{},{},{},{}", a, b, c, d, port / 256, port % 256)
}
