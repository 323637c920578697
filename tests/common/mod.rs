//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use auth_converter::{AppConfig, HttpServer};

/// Marker body returned when the upstream saw no Authorization header.
pub const NO_AUTHORIZATION: &str = "<none>";

/// Start a mock upstream that answers every request with the Authorization
/// values it received, one per line.
pub async fn start_echo_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let head = read_head(&mut socket).await;
                        let values: Vec<&str> = head
                            .lines()
                            .filter_map(|line| line.split_once(':'))
                            .filter(|(name, _)| name.eq_ignore_ascii_case("authorization"))
                            .map(|(_, value)| value.trim())
                            .collect();
                        let body = if values.is_empty() {
                            NO_AUTHORIZATION.to_string()
                        } else {
                            values.join("\n")
                        };

                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn read_head(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// A running proxy; dropping the handle's sender stops it.
pub struct RunningProxy {
    pub addr: SocketAddr,
    _shutdown: oneshot::Sender<()>,
}

/// Start the converting proxy in front of `upstream`.
pub async fn start_proxy(mut config: AppConfig, upstream: SocketAddr) -> RunningProxy {
    config.upstream.address = upstream.to_string();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();

    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let _ = server
            .run(listener, async {
                let _ = rx.await;
            })
            .await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    RunningProxy {
        addr,
        _shutdown: tx,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
