// Loopback HTTP stub used by fetch and pipeline tests.

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

type Queue = VecDeque<(u16, String)>;

/// Serves canned `(status, body)` responses in order, per request target.
/// The `"*"` route answers any target without a route of its own; an
/// exhausted queue answers 404.
pub struct StubServer {
    addr: std::net::SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl StubServer {
    pub async fn start(responses: Vec<(u16, String)>) -> Self {
        Self::start_routes(vec![("*", responses)]).await
    }

    pub async fn start_routes(routes: Vec<(&str, Vec<(u16, String)>)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let routes: Arc<Mutex<HashMap<String, Queue>>> = Arc::new(Mutex::new(
            routes
                .into_iter()
                .map(|(target, queue)| (target.to_string(), queue.into_iter().collect()))
                .collect(),
        ));

        let counter = hits.clone();
        tokio::spawn(async move {
            loop {
                let Ok((mut sock, _)) = listener.accept().await else {
                    return;
                };
                let routes = routes.clone();
                let counter = counter.clone();
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        match sock.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => buf.extend_from_slice(&chunk[..n]),
                        }
                    }
                    let request = String::from_utf8_lossy(&buf);
                    let target = request
                        .split_whitespace()
                        .nth(1)
                        .unwrap_or("/")
                        .to_string();

                    let (status, body) = {
                        let mut routes = routes.lock().unwrap();
                        let key = if routes.contains_key(&target) {
                            target
                        } else {
                            "*".to_string()
                        };
                        routes
                            .get_mut(&key)
                            .and_then(|q| q.pop_front())
                            .unwrap_or((404, String::new()))
                    };
                    counter.fetch_add(1, Ordering::SeqCst);

                    let response = format!(
                        "HTTP/1.1 {} Stub\r\nContent-Length: {}\r\nContent-Type: text/html\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = sock.write_all(response.as_bytes()).await;
                    let _ = sock.shutdown().await;
                });
            }
        });

        Self { addr, hits }
    }

    pub fn url(&self, target: &str) -> String {
        format!("http://{}{}", self.addr, target)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}
