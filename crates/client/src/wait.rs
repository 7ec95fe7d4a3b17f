use crate::config::PollConfig;
use crate::{ClientError, ClientResult};
use std::net::{TcpStream, ToSocketAddrs};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Blocks until `host:port` accepts TCP connections.
///
/// The pause between attempts starts at `config.delay` and is multiplied by
/// `config.backoff` after every failure. Fails with [`ClientError::WaitForPort`]
/// once `config.timeout` has passed.
#[instrument(name = "graphmill.wait_for_port", skip(config), err)]
pub fn wait_for_port(host: &str, port: u16, config: PollConfig) -> ClientResult<()> {
    let started = Instant::now();
    let mut delay = config.delay;
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        let remaining = config.timeout.saturating_sub(started.elapsed());
        match connect(host, port, remaining) {
            Ok(()) => {
                debug!(attempt, "port is accepting connections");
                return Ok(());
            }
            Err(e) => debug!(attempt, error = %e, "port not ready"),
        }

        if started.elapsed() + delay > config.timeout {
            warn!(attempt, "gave up waiting for port");
            return Err(ClientError::WaitForPort {
                host: host.to_string(),
                port,
            });
        }
        thread::sleep(delay);
        delay = next_delay(delay, &config);
    }
}

/// The pause after `delay`, grown by `config.backoff` and capped at `config.timeout`.
fn next_delay(delay: Duration, config: &PollConfig) -> Duration {
    let factor = config.backoff.max(1.0);
    Duration::try_from_secs_f64(delay.as_secs_f64() * factor)
        .map(|grown| grown.min(config.timeout))
        .unwrap_or(config.timeout)
}

fn connect(host: &str, port: u16, timeout: Duration) -> std::io::Result<()> {
    let timeout = timeout.max(Duration::from_millis(1));
    let mut last_error = None;
    for address in (host, port).to_socket_addrs()? {
        match TcpStream::connect_timeout(&address, timeout) {
            Ok(_) => return Ok(()),
            Err(e) => last_error = Some(e),
        }
    }
    Err(last_error.unwrap_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "host resolved to no addresses")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn test_open_port_returns_immediately() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        wait_for_port("127.0.0.1", port, PollConfig::default()).unwrap();
    }

    #[test]
    fn test_backoff_is_capped_at_timeout() {
        let config = PollConfig {
            delay: Duration::from_millis(10),
            timeout: Duration::from_secs(1),
            backoff: 2.0,
        };
        assert_eq!(next_delay(Duration::from_millis(10), &config), Duration::from_millis(20));
        assert_eq!(next_delay(Duration::from_millis(900), &config), Duration::from_secs(1));

        let runaway = PollConfig {
            backoff: f64::INFINITY,
            ..config
        };
        assert_eq!(next_delay(Duration::from_millis(10), &runaway), Duration::from_secs(1));

        let huge = PollConfig {
            backoff: f64::MAX,
            ..config
        };
        assert_eq!(next_delay(Duration::MAX, &huge), Duration::from_secs(1));

        let shrinking = PollConfig {
            backoff: 0.5,
            ..config
        };
        assert_eq!(next_delay(Duration::from_millis(10), &shrinking), Duration::from_millis(10));
    }

    #[test]
    fn test_closed_port_times_out() {
        // bind and drop to get a port nothing listens on
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let config = PollConfig {
            delay: Duration::from_millis(5),
            timeout: Duration::from_millis(50),
            backoff: 2.0,
        };
        let started = Instant::now();
        let err = wait_for_port("127.0.0.1", port, config).unwrap_err();
        assert!(matches!(err, ClientError::WaitForPort { port: p, .. } if p == port));
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
