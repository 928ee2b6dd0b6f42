// SPDX-License-Identifier: MIT

//! Shared test helpers: a scripted location provider driven by the test,
//! and a minimal canned-response HTTP server (no mock-server dependency).

use ciclomapa::error::{AppError, Result};
use ciclomapa::location::{LocationProvider, PositionStream, WatchOptions};
use ciclomapa::models::Coordinate;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// Location provider whose fixes are pushed by the test through a channel.
/// The watch stream can be taken once per provider.
#[allow(dead_code)]
pub struct ScriptedProvider {
    initial: Coordinate,
    rx: Mutex<Option<mpsc::Receiver<Coordinate>>>,
}

#[allow(dead_code)]
impl ScriptedProvider {
    pub fn new(initial: Coordinate) -> (Self, mpsc::Sender<Coordinate>) {
        let (tx, rx) = mpsc::channel(16);
        (
            Self {
                initial,
                rx: Mutex::new(Some(rx)),
            },
            tx,
        )
    }
}

impl LocationProvider for ScriptedProvider {
    async fn current_position(&self) -> Result<Coordinate> {
        Ok(self.initial)
    }

    fn watch(&self, _options: WatchOptions) -> Result<PositionStream> {
        let rx = self
            .rx
            .lock()
            .expect("provider lock poisoned")
            .take()
            .ok_or_else(|| AppError::Location("stream already taken".to_string()))?;
        Ok(PositionStream::new(rx))
    }
}

/// Canned-response HTTP server: answers one queued (status, body) pair per
/// connection, in order, and counts connections.
#[allow(dead_code)]
pub struct StubServer {
    pub base_url: String,
    pub hits: Arc<AtomicUsize>,
}

#[allow(dead_code)]
pub async fn spawn_stub_server(responses: Vec<(u16, String)>) -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub server");
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let hits = Arc::new(AtomicUsize::new(0));

    let task_hits = hits.clone();
    tokio::spawn(async move {
        let mut responses = responses.into_iter();
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            task_hits.fetch_add(1, Ordering::SeqCst);
            let (status, body) = responses.next().unwrap_or((404, "{}".to_string()));

            read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason(status),
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    StubServer { base_url, hits }
}

/// Read a full HTTP/1.1 request (head plus content-length body).
async fn read_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let mut body_start = None;

    loop {
        if body_start.is_none() {
            if let Some(pos) = find_subslice(&buf, b"\r\n\r\n") {
                body_start = Some(pos + 4);
            }
        }
        if let Some(start) = body_start {
            let head = String::from_utf8_lossy(&buf[..start]);
            let content_length = head
                .lines()
                .find_map(|line| {
                    let lower = line.to_ascii_lowercase();
                    lower.strip_prefix("content-length:")?.trim().parse().ok()
                })
                .unwrap_or(0usize);
            if buf.len() - start >= content_length {
                return;
            }
        }

        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
