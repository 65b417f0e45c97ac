//! Shared networking constants and helpers used by client and server.

/// Default bind address of the server.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
/// Default TCP port for the request channel (client <-> server).
pub const DEFAULT_PORT: u16 = 10000;
/// Upper bound on a single newline-delimited JSON frame, in bytes.
pub const MAX_FRAME_BYTES: usize = 64 * 1024;

/// Helper to format an address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}

/// Server address used by the client when none is given.
pub fn default_server_addr() -> String {
    addr(DEFAULT_BIND_ADDRESS, DEFAULT_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_server_addr_joins_host_and_port() {
        assert_eq!(default_server_addr(), "127.0.0.1:10000");
        assert_eq!(addr("::1", 7), "::1:7");
    }
}
