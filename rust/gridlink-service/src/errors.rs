use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// A line that could not be turned into updates. The line is skipped and
/// the connection keeps going.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("line is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("malformed update: {0}")]
    Json(#[from] serde_json::Error),
    #[error("matrix cell [{row}][{col}] = {value} does not fit an i32")]
    CellOutOfRange { row: usize, col: usize, value: f64 },
    #[error("line of at least {len} bytes exceeds the {limit}-byte limit")]
    LineTooLong { len: usize, limit: usize },
}

/// Socket failure on an accepted or pending connection. Ends that
/// connection only.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("accept failed: {0}")]
    Accept(#[source] io::Error),
    #[error("read from {peer} failed: {source}")]
    Read {
        peer: SocketAddr,
        #[source]
        source: io::Error,
    },
}

/// The listener could not be set up. Fatal for the server.
#[derive(Error, Debug)]
#[error("failed to bind {addr}: {source}")]
pub struct StartupError {
    pub addr: SocketAddr,
    #[source]
    pub source: io::Error,
}
