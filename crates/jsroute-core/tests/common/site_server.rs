//! Minimal HTTP/1.1 server serving a fixed set of routes for integration tests.
//!
//! Unknown paths get 404. Every request's path and Referer header are
//! recorded so tests can assert on crawl order and headers.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenRequest {
    pub path: String,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Clone)]
pub struct Site {
    /// Base URL, e.g. "http://127.0.0.1:12345/".
    pub base: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl Site {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path.trim_start_matches('/'))
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. `routes` maps a request path
/// (query ignored) to (content type, body). Runs until the process exits.
pub fn start(routes: &[(&str, &str, &[u8])]) -> Site {
    let routes: HashMap<String, (String, Vec<u8>)> = routes
        .iter()
        .map(|(p, ct, b)| (p.to_string(), (ct.to_string(), b.to_vec())))
        .collect();
    let routes = Arc::new(routes);
    let seen = Arc::new(Mutex::new(Vec::new()));

    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let seen_srv = Arc::clone(&seen);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let seen = Arc::clone(&seen_srv);
            thread::spawn(move || handle(stream, &routes, &seen));
        }
    });
    Site {
        base: format!("http://127.0.0.1:{}/", port),
        seen,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &HashMap<String, (String, Vec<u8>)>,
    seen: &Mutex<Vec<SeenRequest>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let req = parse_request(request);
    let path = req.path.split('?').next().unwrap_or("/").to_string();
    seen.lock().unwrap().push(req);

    match routes.get(&path) {
        Some((content_type, body)) => {
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                content_type,
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(body);
        }
        None => {
            let _ = stream.write_all(
                b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            );
        }
    }
}

fn parse_request(request: &str) -> SeenRequest {
    let mut lines = request.lines();
    let path = lines
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    let mut referer = None;
    let mut user_agent = None;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            if name.eq_ignore_ascii_case("referer") {
                referer = Some(value.trim().to_string());
            } else if name.eq_ignore_ascii_case("user-agent") {
                user_agent = Some(value.trim().to_string());
            }
        }
    }
    SeenRequest {
        path,
        referer,
        user_agent,
    }
}
