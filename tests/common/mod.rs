//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use path_relay::config::RelayConfig;
use path_relay::lifecycle::Shutdown;
use path_relay::server::UserdataServer;

/// Start the userdata backend on the given address.
pub async fn start_backend(addr: SocketAddr) -> Shutdown {
    let mut config = RelayConfig::default();
    config.listener.bind_address = addr.to_string();

    let server = UserdataServer::new(config);
    let listener = TcpListener::bind(addr).await.unwrap();
    let shutdown = Shutdown::new();
    let handle = shutdown.handle();

    tokio::spawn(async move {
        let _ = server.run(listener, handle).await;
    });

    shutdown
}

/// Start a mock normalizing reverse proxy in the background.
///
/// Like the proxies this relay exists to survive, it percent-decodes one
/// encoding layer of the separator in the request target (`%2F` becomes
/// `/`, `%252F` becomes `%2F`) before forwarding to the backend. Handles
/// one request per connection and pins the forwarded request to
/// `Connection: close` so each exchange stays self-contained.
pub async fn start_normalizing_proxy(addr: SocketAddr, backend: SocketAddr) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((client, _)) => {
                    tokio::spawn(async move {
                        let _ = relay_once(client, backend).await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

async fn relay_once(mut client: TcpStream, backend: SocketAddr) -> std::io::Result<()> {
    let request = read_request(&mut client).await?;
    let normalized = normalize_request(&request);

    let mut upstream = TcpStream::connect(backend).await?;
    upstream.write_all(&normalized).await?;

    let mut response = Vec::new();
    upstream.read_to_end(&mut response).await?;
    client.write_all(&response).await?;
    client.shutdown().await
}

/// Read one full request (headers plus Content-Length body).
async fn read_request(stream: &mut TcpStream) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(body_start) = headers_end(&buf) {
            let head = String::from_utf8_lossy(&buf[..body_start]);
            let expected = content_length(&head).unwrap_or(0);
            if buf.len() >= body_start + expected {
                break;
            }
        }
    }
    Ok(buf)
}

fn headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map(|i| i + 4)
}

fn content_length(head: &str) -> Option<usize> {
    head.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if name.eq_ignore_ascii_case("content-length") {
            value.trim().parse().ok()
        } else {
            None
        }
    })
}

fn normalize_request(raw: &[u8]) -> Vec<u8> {
    let Some(body_start) = headers_end(raw) else {
        return raw.to_vec();
    };
    let head = String::from_utf8_lossy(&raw[..body_start - 4]).to_string();
    let body = &raw[body_start..];

    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.splitn(3, ' ');
    let method = parts.next().unwrap_or_default();
    let target = parts.next().unwrap_or_default();
    let version = parts.next().unwrap_or_default();

    let collapsed = target
        .replace("%2F", "/")
        .replace("%2f", "/")
        .replace("%252F", "%2F")
        .replace("%252f", "%2f");

    let mut rebuilt = format!("{method} {collapsed} {version}\r\n");
    for line in lines {
        let is_connection = line
            .split(':')
            .next()
            .map(|n| n.eq_ignore_ascii_case("connection"))
            .unwrap_or(false);
        if is_connection {
            continue;
        }
        rebuilt.push_str(line);
        rebuilt.push_str("\r\n");
    }
    rebuilt.push_str("Connection: close\r\n\r\n");

    let mut out = rebuilt.into_bytes();
    out.extend_from_slice(body);
    out
}
