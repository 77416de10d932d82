//! One-shot HTTP responder for exercising the blocking clients.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// Answers the first connection with `status` and `body`.
///
/// Returns the base URL and a handle yielding the raw request (head and body).
pub fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test listener");
    let url = format!("http://{}", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("No client connected");
        let mut reader = BufReader::new(stream);
        let mut request = String::new();
        let mut content_length = 0;

        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 {
                break;
            }
            if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().unwrap();
            }
            let end_of_head = line == "\r\n";
            request.push_str(&line);
            if end_of_head {
                break;
            }
        }

        let mut payload = vec![0; content_length];
        reader.read_exact(&mut payload).unwrap();
        request.push_str(&String::from_utf8_lossy(&payload));

        reader.get_mut().write_all(response.as_bytes()).unwrap();
        request
    });

    (url, handle)
}
