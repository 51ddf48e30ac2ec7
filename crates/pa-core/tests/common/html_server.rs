//! Minimal HTTP/1.1 server that serves one canned HTML page for integration tests.
//!
//! Every GET gets the same status and body. Optionally redirects `/` to
//! `/landing` first, or stalls before answering to trigger client timeouts.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HtmlServerOptions {
    /// Status line sent for the page, e.g. "200 OK" or "404 Not Found".
    pub status: &'static str,
    /// If true, `/` answers 301 to `/landing`, which serves the page.
    pub redirect_root: bool,
    /// Sleep this long before writing any response.
    pub delay: Option<Duration>,
}

impl Default for HtmlServerOptions {
    fn default() -> Self {
        Self {
            status: "200 OK",
            redirect_root: false,
            delay: None,
        }
    }
}

/// Starts a server in a background thread serving `html` with 200 OK.
/// Returns the base URL (e.g. "http://127.0.0.1:12345"). Runs until the process exits.
pub fn start(html: &str) -> String {
    start_with_options(html, HtmlServerOptions::default())
}

/// Like `start` but allows customizing status, redirects, and delay.
pub fn start_with_options(html: &str, opts: HtmlServerOptions) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(html.as_bytes().to_vec());
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let opts = opts.clone();
            thread::spawn(move || handle(stream, &body, &opts));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: std::net::TcpStream, body: &[u8], opts: &HtmlServerOptions) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let mut request_line = request.lines().next().unwrap_or("").split_whitespace();
    let method = request_line.next().unwrap_or("");
    let path = request_line.next().unwrap_or("/");

    if let Some(delay) = opts.delay {
        thread::sleep(delay);
    }

    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(
            b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        return;
    }

    if opts.redirect_root && path == "/" {
        let _ = stream.write_all(
            b"HTTP/1.1 301 Moved Permanently\r\nLocation: /landing\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        return;
    }

    let head = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        opts.status,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}
