// Shared fixtures for the integration tests: an in-process HTTP listener
// that records every request, and a populated exam directory.

#![allow(dead_code)]

use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Minimal HTTP/1.1 server: answers each request with the status and
/// body returned by `respond` for the request path.
pub struct TestServer {
    pub url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl TestServer {
    pub fn start<F>(respond: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> (u16, String) + Send + 'static,
    {
        Self::spawn(respond, 0)
    }

    /// Like `start`, but every response announces `missing` more body
    /// bytes than it sends before closing the connection.
    pub fn start_truncated<F>(respond: F, missing: usize) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> (u16, String) + Send + 'static,
    {
        Self::spawn(respond, missing)
    }

    fn spawn<F>(respond: F, missing: usize) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> (u16, String) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let url = format!("http://{}", listener.local_addr()?);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let Ok(recorded) = read_request(&stream) else { continue };
                let (status, body) = respond(&recorded.path);
                seen.lock().unwrap().push(recorded);
                let mut stream = stream;
                let _ = write!(
                    stream,
                    "HTTP/1.1 {} X\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len() + missing,
                    body
                );
                let _ = stream.flush();
            }
        });
        Ok(TestServer { url, requests })
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

fn read_request(stream: &TcpStream) -> anyhow::Result<Recorded> {
    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let path = line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("bad request line: {line}"))?
        .to_string();

    let mut content_length = None;
    let mut chunked = false;
    let mut content_type = String::new();
    loop {
        let mut header = String::new();
        reader.read_line(&mut header)?;
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            let value = value.trim();
            match name.to_ascii_lowercase().as_str() {
                "content-length" => content_length = Some(value.parse::<usize>()?),
                "transfer-encoding" => chunked = value.eq_ignore_ascii_case("chunked"),
                "content-type" => content_type = value.to_string(),
                _ => {}
            }
        }
    }

    let mut body = Vec::new();
    if let Some(len) = content_length {
        body.resize(len, 0);
        reader.read_exact(&mut body)?;
    } else if chunked {
        loop {
            let mut size = String::new();
            reader.read_line(&mut size)?;
            let size = usize::from_str_radix(size.trim(), 16)?;
            let mut chunk = vec![0; size + 2];
            reader.read_exact(&mut chunk)?;
            if size == 0 {
                break;
            }
            body.extend_from_slice(&chunk[..size]);
        }
    }
    Ok(Recorded {
        path,
        content_type,
        body,
    })
}

/// Exam with one permutation: the metadata of the reference scenario,
/// both test PDFs, `solutions` as solutions.csv and permutation 0's PDFs.
pub fn write_exam(dir: &Path, solutions: &str) {
    fs::write(
        dir.join("metadata.csv"),
        "Titol;Exam A\nGenDate;1000\nNumPermutations;1\nTemps;90m\n",
    )
    .unwrap();
    fs::write(dir.join("alln.pdf"), b"%PDF-test-n").unwrap();
    fs::write(dir.join("alls.pdf"), b"%PDF-test-s").unwrap();
    fs::write(dir.join("solutions.csv"), solutions).unwrap();
    fs::write(dir.join("0000n.pdf"), b"%PDF-perm-n").unwrap();
    fs::write(dir.join("0000s.pdf"), b"%PDF-perm-s").unwrap();
}
