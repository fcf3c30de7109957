use std::io::{ErrorKind, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// How long the server waits for a connection it expects before giving up.
const ACCEPT_DEADLINE: Duration = Duration::from_secs(5);

/// Answers a fixed number of connections with canned responses and keeps the
/// raw request heads it received. A connection that never arrives ends the
/// server after `ACCEPT_DEADLINE`, so the test fails on its request count
/// instead of hanging.
pub struct TestHttpServer {
    pub url: String,
    requests: Arc<Mutex<Vec<String>>>,
    handle: Option<thread::JoinHandle<()>>,
}

pub struct CannedResponse {
    pub status: &'static str,
    pub headers: Vec<&'static str>,
    pub body: &'static str,
    /// Time the server sits on the request before answering.
    pub delay: Duration,
}

impl CannedResponse {
    pub fn ok(headers: Vec<&'static str>, body: &'static str) -> Self {
        Self { status: "200 OK", headers, body, delay: Duration::ZERO }
    }

    pub fn status(status: &'static str, body: &'static str) -> Self {
        Self { status, headers: vec![], body, delay: Duration::ZERO }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl TestHttpServer {
    pub fn spawn(responses: Vec<CannedResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test HTTP server");
        listener.set_nonblocking(true).expect("Failed to make listener non-blocking");
        let addr = listener.local_addr().expect("Failed to get local addr");
        let url = format!("http://{addr}/test");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        let handle = thread::spawn(move || {
            for canned in responses {
                let Some(mut stream) = accept_before(&listener, Instant::now() + ACCEPT_DEADLINE) else {
                    return;
                };
                recorded.lock().unwrap().push(read_request_head(&mut stream));
                thread::sleep(canned.delay);

                let mut response = format!("HTTP/1.1 {}\r\n", canned.status);
                for header in &canned.headers {
                    response.push_str(header);
                    response.push_str("\r\n");
                }
                response.push_str(&format!(
                    "Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    canned.body.len(),
                    canned.body
                ));
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self { url, requests, handle: Some(handle) }
    }

    /// Waits until every canned response was served (or its connection never
    /// came) and returns the request heads.
    pub fn finish(mut self) -> Vec<String> {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        let requests = self.requests.lock().unwrap().clone();
        requests
    }
}

fn accept_before(listener: &TcpListener, deadline: Instant) -> Option<TcpStream> {
    loop {
        match listener.accept() {
            Ok((stream, _)) => {
                stream.set_nonblocking(false).ok()?;
                stream.set_read_timeout(Some(ACCEPT_DEADLINE)).ok()?;
                return Some(stream);
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock && Instant::now() < deadline => {
                thread::sleep(Duration::from_millis(10));
            }
            Err(_) => return None,
        }
    }
}

fn read_request_head(stream: &mut impl Read) -> String {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
    String::from_utf8_lossy(&head).into_owned()
}

/// The value of `name` in a raw request head, matched case-insensitively.
pub fn request_header<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    head.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case(name))
        .map(|(_, value)| value.trim())
}

impl Drop for TestHttpServer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
