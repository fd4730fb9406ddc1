//! Blocking TCP transport, one request/response exchange per connection.

use std::io::Write;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::error::FeedError;

/// One TCP connection to the feed server.
///
/// A session carries exactly one logical exchange: the operation that
/// drives it consumes the session, and the socket is released when the
/// session (or the reader built from it) is dropped. Callers open a fresh
/// session per request; connection failures are recoverable by retrying
/// with a new session.
#[derive(Debug)]
pub struct Session {
    stream: TcpStream,
}

impl Session {
    /// Connect to `host:port`, bounded by `timeout`.
    ///
    /// Resolution, socket and connect failures (timeout included) surface
    /// as [`FeedError::Connection`]. The transport never retries; retry
    /// policy belongs to the caller.
    pub fn connect(host: &str, port: u16, timeout: Duration) -> Result<Self, FeedError> {
        let addr: SocketAddr = (host, port)
            .to_socket_addrs()
            .map_err(|e| FeedError::Connection(e.to_string()))?
            .next()
            .ok_or_else(|| FeedError::Connection(format!("no address for {host}:{port}")))?;
        let stream = TcpStream::connect_timeout(&addr, timeout)
            .map_err(|e| FeedError::Connection(e.to_string()))?;
        Ok(Self { stream })
    }

    /// Write one raw request frame.
    pub fn send_request(&mut self, request: &[u8]) -> Result<(), FeedError> {
        self.stream.write_all(request)?;
        self.stream.flush()?;
        Ok(())
    }

    /// Hand the underlying stream to whoever reads the response.
    pub(crate) fn into_stream(self) -> TcpStream {
        self.stream
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn connect_refused_is_reported() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err =
            Session::connect("127.0.0.1", addr.port(), Duration::from_millis(200)).unwrap_err();
        assert!(matches!(err, FeedError::Connection(_)));
    }

    #[test]
    fn unresolvable_host_is_reported() {
        let err = Session::connect("no.such.host.invalid", 1, Duration::from_millis(200))
            .unwrap_err();
        assert!(matches!(err, FeedError::Connection(_)));
    }
}
