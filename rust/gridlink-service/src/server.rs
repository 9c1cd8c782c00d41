use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use gridlink_core::DispatchQueue;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::errors::{StartupError, TransportError};
use crate::protocol::{submit_bytes, LineBuffer};

const READ_CHUNK: usize = 4096;
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Line-protocol listener serving one client at a time. Decoded updates go
/// to the shared [`DispatchQueue`]; nothing else is touched from the
/// network task.
pub struct ProtocolServer {
    listener: TcpListener,
    queue: Arc<DispatchQueue>,
}

impl ProtocolServer {
    pub async fn bind(addr: SocketAddr, queue: Arc<DispatchQueue>) -> Result<Self, StartupError> {
        let listener = TcpListener::bind(addr).await.map_err(|source| StartupError { addr, source })?;
        Ok(Self { listener, queue })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Run the accept loop on a background task.
    pub fn spawn(self) -> ServerHandle {
        let local_addr = self.listener.local_addr().ok();
        let (tx, rx) = watch::channel(false);
        let task = tokio::spawn(accept_loop(self.listener, self.queue, rx));
        ServerHandle { local_addr, shutdown_tx: tx, task: Mutex::new(Some(task)) }
    }
}

/// Owner of the background task. Dropping it without calling
/// [`ServerHandle::shutdown`] also stops the loop, but nothing waits for it.
pub struct ServerHandle {
    local_addr: Option<SocketAddr>,
    shutdown_tx: watch::Sender<bool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl ServerHandle {
    pub fn local_addr(&self) -> Option<SocketAddr> { self.local_addr }

    /// Stop reading, close the client, close the listener, then wait for
    /// the task to end. Safe to call repeatedly or concurrently; later calls
    /// wait for the first one to finish.
    pub async fn shutdown(&self) {
        self.shutdown_tx.send_replace(true);
        let mut task = self.task.lock().await;
        if let Some(handle) = task.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "protocol server task ended abnormally");
            }
            info!("protocol server stopped");
        }
    }
}

enum ClientEnd {
    Disconnected,
    Shutdown,
}

async fn accept_loop(listener: TcpListener, queue: Arc<DispatchQueue>, mut shutdown: watch::Receiver<bool>) {
    info!(addr = ?listener.local_addr().ok(), "waiting for connection");
    loop {
        if *shutdown.borrow() {
            break;
        }
        let accepted = tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            res = listener.accept() => res,
        };
        match accepted {
            Ok((stream, peer)) => {
                info!(%peer, "client connected");
                if let ClientEnd::Shutdown = serve_client(stream, peer, &queue, &mut shutdown).await {
                    break;
                }
            }
            Err(e) => {
                warn!(error = %TransportError::Accept(e), "accept failed");
                tokio::time::sleep(ACCEPT_BACKOFF).await;
            }
        }
    }
    drop(listener);
    debug!("listener closed");
}

async fn serve_client(
    mut stream: TcpStream,
    peer: SocketAddr,
    queue: &DispatchQueue,
    shutdown: &mut watch::Receiver<bool>,
) -> ClientEnd {
    let mut lines = LineBuffer::new();
    let mut chunk = [0u8; READ_CHUNK];

    let end = loop {
        let read = tokio::select! {
            biased;
            _ = shutdown.changed() => break ClientEnd::Shutdown,
            r = stream.read(&mut chunk) => r,
        };
        match read {
            Ok(0) => {
                info!(%peer, "client disconnected");
                break ClientEnd::Disconnected;
            }
            Ok(n) => {
                lines.push(&chunk[..n]);
                while let Some(line) = lines.next_line() {
                    match line.and_then(|line| submit_bytes(queue, &line)) {
                        Ok(queued) => debug!(%peer, queued, "line accepted"),
                        Err(e) => warn!(%peer, error = %e, "dropping malformed update"),
                    }
                }
            }
            Err(source) => {
                warn!(error = %TransportError::Read { peer, source }, "treating read failure as disconnect");
                break ClientEnd::Disconnected;
            }
        }
    };

    if lines.pending() > 0 {
        debug!(%peer, bytes = lines.pending(), "discarding unterminated line");
    }
    let _ = stream.shutdown().await;
    debug!(%peer, "client connection closed");
    end
}
