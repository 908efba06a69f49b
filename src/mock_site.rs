//! A tiny HTTP/1.1 server standing in for the league site in tests.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// One request as the site saw it.
#[derive(Debug, Clone)]
pub(crate) struct Request {
    /// Path and query, e.g. `/index.php?mode=standings`.
    pub(crate) target: String,
    pub(crate) body: String,
}

impl Request {
    /// A query string parameter.
    pub(crate) fn param(&self, key: &str) -> Option<&str> {
        let (_, query) = self.target.split_once('?')?;
        lookup(query, key)
    }

    /// A field of the url-encoded form body.
    pub(crate) fn form(&self, key: &str) -> Option<&str> {
        lookup(&self.body, key)
    }
}

fn lookup<'a>(pairs: &'a str, key: &str) -> Option<&'a str> {
    pairs
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

pub(crate) struct MockSite {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl MockSite {
    /// Serve every connection on its own thread, answering with `handler`'s
    /// status and body.
    pub(crate) fn start<F>(handler: F) -> Self
    where
        F: Fn(&Request) -> (u16, String) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler = Arc::new(handler);

        let log = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let log = Arc::clone(&log);
                let handler = Arc::clone(&handler);
                thread::spawn(move || serve(stream, &log, handler.as_ref()));
            }
        });

        Self { addr, requests }
    }

    pub(crate) fn base_url(&self) -> String {
        format!("http://{}/leagues/xbshl", self.addr)
    }

    pub(crate) fn login_url(&self) -> String {
        format!("http://{}/login.php?do=login", self.addr)
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

fn serve<F>(mut stream: TcpStream, log: &Mutex<Vec<Request>>, handler: &F)
where
    F: Fn(&Request) -> (u16, String),
{
    let Some(request) = read_request(&mut stream) else {
        return;
    };
    log.lock().unwrap().push(request.clone());

    let (status, body) = handler(&request);
    let response = format!(
        "HTTP/1.1 {status} Mock\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn read_request(stream: &mut TcpStream) -> Option<Request> {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&data[..header_end]).into_owned();
    let length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while data.len() < header_end + length {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
    }

    let target = head.lines().next()?.split_whitespace().nth(1)?.to_string();
    let body = String::from_utf8_lossy(&data[header_end..]).into_owned();
    Some(Request { target, body })
}
