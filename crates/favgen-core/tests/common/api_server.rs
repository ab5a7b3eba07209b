//! Minimal HTTP/1.1 server standing in for the favicon API in integration tests.
//!
//! `POST /api/favicon` answers with a canned reply and records the request
//! body. `GET` serves files registered by path; anything else is a 404.
//! Every response closes the connection.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Path the API endpoint is served on.
pub const API_PATH: &str = "/api/favicon";

/// Canned answer for the API POST.
#[derive(Debug, Clone)]
pub struct ApiReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiReply {
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self {
            status,
            body: serde_json::to_vec(body).unwrap(),
        }
    }
}

pub struct ApiServer {
    /// e.g. "http://127.0.0.1:12345"
    pub base_url: String,
    posted: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl ApiServer {
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, API_PATH)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Bodies of every POST received so far.
    pub fn posted(&self) -> Vec<Vec<u8>> {
        self.posted.lock().unwrap().clone()
    }
}

/// Starts the server in a background thread. `reply` receives the base URL so
/// the canned JSON can point back at files served here. The server runs until
/// the process exits.
pub fn start(
    files: Vec<(&str, Vec<u8>)>,
    reply: impl FnOnce(&str) -> ApiReply,
) -> ApiServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let base_url = format!("http://127.0.0.1:{}", port);

    let files: Arc<HashMap<String, Vec<u8>>> = Arc::new(
        files
            .into_iter()
            .map(|(path, body)| (path.to_string(), body))
            .collect(),
    );
    let reply = Arc::new(reply(&base_url));
    let posted = Arc::new(Mutex::new(Vec::new()));

    let recorder = Arc::clone(&posted);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let files = Arc::clone(&files);
            let reply = Arc::clone(&reply);
            let recorder = Arc::clone(&recorder);
            thread::spawn(move || handle(stream, &files, &reply, &recorder));
        }
    });

    ApiServer { base_url, posted }
}

fn handle(
    mut stream: TcpStream,
    files: &HashMap<String, Vec<u8>>,
    reply: &ApiReply,
    posted: &Mutex<Vec<Vec<u8>>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let Some(request) = read_request(&mut stream) else {
        return;
    };

    match (request.method.as_str(), request.path.as_str()) {
        ("POST", API_PATH) => {
            posted.lock().unwrap().push(request.body);
            respond(&mut stream, reply.status, "application/json", &reply.body);
        }
        ("GET", path) => match files.get(path) {
            Some(body) => respond(&mut stream, 200, "application/octet-stream", body),
            None => respond(&mut stream, 404, "text/plain", b"not found"),
        },
        _ => respond(&mut stream, 405, "text/plain", b""),
    }
}

struct Request {
    method: String,
    path: String,
    body: Vec<u8>,
}

/// Reads the head, answers `Expect: 100-continue`, then reads `Content-Length` bytes.
fn read_request(stream: &mut TcpStream) -> Option<Request> {
    let mut data = Vec::new();
    let mut buf = [0u8; 8192];
    let head_end = loop {
        if let Some(pos) = find(&data, b"\r\n\r\n") {
            break pos + 4;
        }
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buf[..n]);
    };

    let head = std::str::from_utf8(&data[..head_end]).ok()?;
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_ascii_uppercase();
    let path = request_line.next()?.to_string();

    let mut content_length = 0usize;
    let mut expect_continue = false;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().unwrap_or(0);
            } else if name.eq_ignore_ascii_case("expect")
                && value.eq_ignore_ascii_case("100-continue")
            {
                expect_continue = true;
            }
        }
    }
    if expect_continue {
        let _ = stream.write_all(b"HTTP/1.1 100 Continue\r\n\r\n");
    }

    let mut body = data[head_end..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&buf[..n]);
    }
    body.truncate(content_length);

    Some(Request { method, path, body })
}

fn respond(stream: &mut TcpStream, status: u16, content_type: &str, body: &[u8]) {
    let reason = match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "Unknown",
    };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason,
        content_type,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
