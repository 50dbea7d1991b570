// file: src/launcher/port.rs
// description: detect whether something already listens on the backend port

use crate::error::{OpsError, Result};
use std::io::ErrorKind;
use std::net::{Ipv4Addr, SocketAddr, TcpListener, TcpStream};
use std::time::Duration;
use tracing::debug;

const CONNECT_TIMEOUT: Duration = Duration::from_millis(300);

/// A port counts as taken if a loopback connect succeeds or binding the
/// wildcard address fails with `AddrInUse`.
pub fn port_in_use(port: u16) -> std::io::Result<bool> {
    let loopback = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
    if TcpStream::connect_timeout(&loopback, CONNECT_TIMEOUT).is_ok() {
        debug!("Listener answered on {}", loopback);
        return Ok(true);
    }

    match TcpListener::bind((Ipv4Addr::UNSPECIFIED, port)) {
        Ok(_) => Ok(false),
        Err(e) if e.kind() == ErrorKind::AddrInUse => Ok(true),
        Err(e) => Err(e),
    }
}

pub fn ensure_port_free(port: u16) -> Result<()> {
    if port_in_use(port)? {
        return Err(OpsError::PortInUse(port));
    }
    Ok(())
}
