//! One-shot HTTP server on the loopback interface for the fetch tests.

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

pub(crate) struct TestServer {
    address: SocketAddr,
    requests: Receiver<String>,
}

impl TestServer {
    /// Answers exactly one request with `status` (e.g. `"200 OK"`) and a JSON `body`.
    pub(crate) fn respond(status: &str, body: &str) -> TestServer {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let (sender, requests) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            // Headers end with an empty line
            loop {
                let mut header = String::new();
                if reader.read_line(&mut header).unwrap() == 0 || header == "\r\n" {
                    break;
                }
            }

            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            sender.send(request_line.trim_end().to_string()).ok();
        });

        TestServer { address, requests }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("http://{}/{path}", self.address)
    }

    /// The request line the server received, e.g. `GET /astros.json HTTP/1.1`.
    pub(crate) fn request_line(&self) -> String {
        self.requests.recv_timeout(Duration::from_secs(5)).unwrap()
    }
}
