//! Canned local HTTP servers standing in for OSRM.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

fn read_request_line(stream: &TcpStream) -> String {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
    let mut request_line = String::new();
    reader.read_line(&mut request_line).expect("read request line");
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header).unwrap_or(0) == 0 || header == "\r\n" {
            break;
        }
    }
    request_line.trim_end().to_owned()
}

/// A one-shot server answering the first request with `status` and `body`.
///
/// Returns the base URL and a channel yielding the request line it saw.
pub fn serve_once(status: &'static str, body: &'static str) -> (String, Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local port");
    let addr = listener.local_addr().expect("local address");
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let request_line = read_request_line(&stream);
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream
            .write_all(response.as_bytes())
            .expect("write response");
        // Callers that ignore the request line drop the receiver early.
        tx.send(request_line).ok();
    });
    (format!("http://{addr}"), rx)
}

/// A server that reads one request and holds the connection open for `hold`
/// without answering.
#[allow(dead_code, reason = "only the behaviour suite exercises timeouts")]
pub fn serve_silently(hold: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local port");
    let addr = listener.local_addr().expect("local address");
    thread::spawn(move || {
        let Ok((stream, _)) = listener.accept() else {
            return;
        };
        let _request_line = read_request_line(&stream);
        thread::sleep(hold);
        drop(stream);
    });
    format!("http://{addr}")
}

/// A base URL on a local port nothing listens on.
#[allow(dead_code, reason = "only the behaviour suite exercises refused connections")]
pub fn closed_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local port");
    let addr = listener.local_addr().expect("local address");
    drop(listener);
    format!("http://{addr}")
}
