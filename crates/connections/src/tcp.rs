//! TCP reachability probe used as a connect operation.

use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::debug;

/// Connects to the first reachable address `address` resolves to.
///
/// Every resolved address gets its own `timeout`. The error of the last
/// address tried is returned when none accepts the connection.
pub fn connect(address: &str, timeout: Duration) -> io::Result<TcpStream> {
    let mut last_error = None;
    for socket_addr in address.to_socket_addrs()? {
        match TcpStream::connect_timeout(&socket_addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(error) => {
                debug!("tcp connect to {} failed: {}", socket_addr, error);
                last_error = Some(error);
            }
        }
    }
    Err(last_error.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, format!("{address} did not resolve to any address"))
    }))
}
