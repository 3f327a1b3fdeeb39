//! The seam between the client core and the network.
//!
//! [`Client`](crate::Client) builds a [`Request`], hands it to a [`Transport`]
//! and interprets the [`Response`]. Nothing else in the workspace talks HTTP.

use log::debug;
use reqwest::blocking::multipart;
use reqwest::{Method, StatusCode};
use std::error::Error as _;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::time::Duration;

/// One outbound call
#[derive(Debug)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Body,
    pub timeout: Duration,
}

#[derive(Debug)]
pub enum Body {
    Empty,
    /// Single-part multipart upload
    File(FilePart),
}

/// An opened local file, streamed into the request as one multipart part
#[derive(Debug)]
pub struct FilePart {
    pub field: &'static str,
    pub file_name: String,
    pub mime: String,
    pub file: File,
    pub len: u64,
}

/// Status plus a body that is read lazily, so downloads can stream
pub struct Response {
    pub status: StatusCode,
    pub body: Box<dyn Read + Send>,
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Other,
}

/// Failure before a response status was received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TransportError {}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        let kind = if e.is_timeout() {
            TransportErrorKind::Timeout
        } else if e.is_connect() {
            TransportErrorKind::Connect
        } else {
            TransportErrorKind::Other
        };

        // reqwest keeps the useful part (refused, dns, ...) in the source chain
        let mut message = e.to_string();
        let mut source = e.source();
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !message.contains(&cause_text) {
                message.push_str(": ");
                message.push_str(&cause_text);
            }
            source = cause.source();
        }
        Self { kind, message }
    }
}

/// Sends requests. Implementations never inspect the status code.
pub trait Transport {
    fn send(&self, request: Request) -> Result<Response, TransportError>;
}

/// Transport backed by one reused blocking reqwest client (keep-alive)
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("permastore-sdk/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: Request) -> Result<Response, TransportError> {
        debug!(
            "{} {} (timeout {:?})",
            request.method, request.url, request.timeout
        );

        let mut builder = self
            .client
            .request(request.method, &request.url)
            .timeout(request.timeout);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Body::File(part) = request.body {
            let mime = part.mime.clone();
            let file_part = multipart::Part::reader_with_length(part.file, part.len)
                .file_name(part.file_name)
                .mime_str(&mime)?;
            builder = builder.multipart(multipart::Form::new().part(part.field, file_part));
        }

        let response = builder.send()?;
        Ok(Response {
            status: response.status(),
            body: Box::new(response),
        })
    }
}
