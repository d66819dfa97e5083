//! Outbound peer connections
//!
//! Only the dial half lives here: the panel's connect button hands over an
//! address string and the host checks whether a transport can be opened to
//! it. Whatever rides on top of an open socket lives outside this module.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::config::PeerConfig;

/// Append the default peer port when the address carries none.
fn normalize_address(address: &str, default_port: u16) -> String {
    if address.parse::<SocketAddr>().is_ok() {
        return address.to_string();
    }
    if let Ok(ip) = address.parse::<IpAddr>() {
        return match ip {
            IpAddr::V6(_) => format!("[{ip}]:{default_port}"),
            IpAddr::V4(_) => format!("{ip}:{default_port}"),
        };
    }
    // hostnames, with or without an explicit port
    let has_port = address
        .rsplit_once(':')
        .is_some_and(|(_, tail)| tail.parse::<u16>().is_ok());
    if has_port {
        address.to_string()
    } else {
        format!("{address}:{default_port}")
    }
}

/// Dial a peer address handed over from the panel, logging the outcome.
///
/// The panel forwards whatever is in the field, so an empty or junk address
/// lands here; it is logged and dropped rather than dialed.
pub async fn connect(address: &str, config: &PeerConfig) {
    let address = address.trim();
    if address.is_empty() {
        warn!("peer connect requested with empty address");
        return;
    }

    let target = normalize_address(address, config.default_port);
    info!(peer = %target, "dialing peer");

    match timeout(
        Duration::from_secs(config.connect_timeout_secs),
        TcpStream::connect(&target),
    )
    .await
    {
        Ok(Ok(_stream)) => {
            info!(peer = %target, "peer reachable");
        }
        Ok(Err(e)) => {
            warn!(peer = %target, error = %e, "peer dial failed");
        }
        Err(_) => {
            warn!(
                peer = %target,
                secs = config.connect_timeout_secs,
                "peer dial timed out"
            );
        }
    }
}
