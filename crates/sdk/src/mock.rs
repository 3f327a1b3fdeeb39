//! Scripted in-memory transport for tests.
//!
//! Replies are served in the order they were queued; every request is
//! recorded, including the content of uploaded files.

use crate::transport::{Body, Request, Response, Transport, TransportError, TransportErrorKind};
use reqwest::{Method, StatusCode};
use std::collections::VecDeque;
use std::io::{self, Cursor, Read};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub timeout: Duration,
    pub upload: Option<RecordedUpload>,
}

impl RecordedRequest {
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

enum Reply {
    Complete { status: u16, body: Vec<u8> },
    /// Body yields `prefix` and then fails mid-stream
    Broken { status: u16, prefix: Vec<u8> },
    Fail(TransportError),
}

#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) -> &Self {
        self.push_raw(status, body.to_string())
    }

    pub fn push_raw(&self, status: u16, body: impl Into<Vec<u8>>) -> &Self {
        self.enqueue(Reply::Complete {
            status,
            body: body.into(),
        })
    }

    pub fn push_broken_body(&self, status: u16, prefix: impl Into<Vec<u8>>) -> &Self {
        self.enqueue(Reply::Broken {
            status,
            prefix: prefix.into(),
        })
    }

    pub fn push_transport_error(&self, kind: TransportErrorKind, message: &str) -> &Self {
        self.enqueue(Reply::Fail(TransportError::new(kind, message)))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn enqueue(&self, reply: Reply) -> &Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }
}

impl Transport for MockTransport {
    fn send(&self, request: Request) -> Result<Response, TransportError> {
        let upload = match request.body {
            Body::Empty => None,
            Body::File(mut part) => {
                let mut content = Vec::new();
                part.file
                    .read_to_end(&mut content)
                    .map_err(|e| TransportError::new(TransportErrorKind::Other, e.to_string()))?;
                Some(RecordedUpload {
                    field: part.field.to_string(),
                    file_name: part.file_name,
                    mime: part.mime,
                    content,
                })
            }
        };
        self.requests.lock().unwrap().push(RecordedRequest {
            method: request.method,
            url: request.url,
            query: request.query,
            timeout: request.timeout,
            upload,
        });

        let reply = self.replies.lock().unwrap().pop_front().unwrap_or_else(|| {
            Reply::Fail(TransportError::new(
                TransportErrorKind::Other,
                "no scripted reply left",
            ))
        });
        match reply {
            Reply::Complete { status, body } => Ok(Response {
                status: status_code(status),
                body: Box::new(Cursor::new(body)),
            }),
            Reply::Broken { status, prefix } => Ok(Response {
                status: status_code(status),
                body: Box::new(BrokenBody {
                    prefix: Cursor::new(prefix),
                }),
            }),
            Reply::Fail(e) => Err(e),
        }
    }
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

struct BrokenBody {
    prefix: Cursor<Vec<u8>>,
}

impl Read for BrokenBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.prefix.read(buf)? {
            0 => Err(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "connection reset by peer",
            )),
            n => Ok(n),
        }
    }
}
