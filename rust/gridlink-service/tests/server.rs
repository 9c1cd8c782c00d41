use std::sync::Arc;
use std::time::Duration;

use gridlink_core::{Cell, DispatchEntry, DispatchQueue};
use gridlink_service::{ProtocolServer, ServerHandle};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout, Instant};

async fn start() -> (Arc<DispatchQueue>, ServerHandle) {
    let queue = Arc::new(DispatchQueue::new());
    let server = ProtocolServer::bind("127.0.0.1:0".parse().unwrap(), Arc::clone(&queue))
        .await
        .expect("bind");
    (queue, server.spawn())
}

async fn wait_for_len(queue: &DispatchQueue, n: usize) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while queue.len() < n {
        assert!(Instant::now() < deadline, "timed out waiting for {n} entries, have {}", queue.len());
        sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn fragmented_lines_reach_the_queue() {
    let (queue, handle) = start().await;
    let addr = handle.local_addr().unwrap();
    let mut client = TcpStream::connect(addr).await.unwrap();

    client.write_all(b"{\"agentPos").await.unwrap();
    client.flush().await.unwrap();
    sleep(Duration::from_millis(20)).await;
    client.write_all(b"ition\":[2,3]}\n{not json\n{\"matrix\":[[-10,1]]}\n").await.unwrap();
    wait_for_len(&queue, 2).await;

    let entries: Vec<_> = queue.drain().into_iter().collect();
    assert_eq!(entries, vec![
        DispatchEntry::AgentMove(Cell::new(2, 3)),
        DispatchEntry::GridReplace(vec![vec![-10, 1]]),
    ]);
    handle.shutdown().await;
}

#[tokio::test]
async fn next_client_is_served_after_the_first_disconnects() {
    let (queue, handle) = start().await;
    let addr = handle.local_addr().unwrap();

    let mut first = TcpStream::connect(addr).await.unwrap();
    first.write_all(b"{\"agentPosition\":[0,1]}\n").await.unwrap();
    wait_for_len(&queue, 1).await;

    // queued behind the active client
    let mut second = TcpStream::connect(addr).await.unwrap();
    second.write_all(b"{\"agentPosition\":[0,2]}\n").await.unwrap();
    sleep(Duration::from_millis(100)).await;
    assert_eq!(queue.len(), 1, "second client must wait for the first");

    drop(first);
    wait_for_len(&queue, 2).await;
    let entries: Vec<_> = queue.drain().into_iter().collect();
    assert_eq!(entries[1], DispatchEntry::AgentMove(Cell::new(0, 2)));

    drop(second);
    handle.shutdown().await;
}

#[tokio::test]
async fn shutdown_with_idle_client_does_not_hang_and_is_idempotent() {
    let (_queue, handle) = start().await;
    let addr = handle.local_addr().unwrap();
    let _client = TcpStream::connect(addr).await.unwrap();
    sleep(Duration::from_millis(50)).await;

    timeout(Duration::from_secs(5), handle.shutdown()).await.expect("first shutdown");
    timeout(Duration::from_secs(5), handle.shutdown()).await.expect("second shutdown");

    // listener is gone
    assert!(TcpStream::connect(addr).await.is_err());
}

#[tokio::test]
async fn concurrent_shutdowns_both_complete() {
    let (_queue, handle) = start().await;
    let handle = Arc::new(handle);
    let a = tokio::spawn({
        let h = Arc::clone(&handle);
        async move { h.shutdown().await }
    });
    let b = tokio::spawn({
        let h = Arc::clone(&handle);
        async move { h.shutdown().await }
    });
    timeout(Duration::from_secs(5), async {
        a.await.unwrap();
        b.await.unwrap();
    })
    .await
    .expect("shutdowns finished");
}

#[tokio::test]
async fn bind_on_busy_port_is_a_startup_error() {
    let (_queue, handle) = start().await;
    let addr = handle.local_addr().unwrap();
    let err = ProtocolServer::bind(addr, Arc::new(DispatchQueue::new())).await.err().expect("port in use");
    assert_eq!(err.addr, addr);
    handle.shutdown().await;
}
