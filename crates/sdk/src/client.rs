//! Client core: one method per node capability, all routed through
//! [`Client::send`] so response interpretation lives in one place.

use crate::config::ClientConfig;
use crate::constants::{
    DOWNLOAD_CHUNK_SIZE, DOWNLOAD_ENDPOINT, ERROR_EXCERPT_CHARS, FALLBACK_MIME, FILES_ENDPOINT,
    FILE_INFO_ENDPOINT, HEALTH_ENDPOINT, METRICS_ENDPOINT, RESOURCE_ENDPOINTS, ROOT_ENDPOINT,
    SEARCH_ENDPOINT, STATUS_ENDPOINT, UPLOAD_ENDPOINT, UPLOAD_FIELD, ZK_PROOF_ENDPOINT,
};
use crate::error::{ClientError, Result};
use crate::mime::guess_mime;
use crate::transport::{
    Body, FilePart, HttpTransport, Request, Response, Transport, TransportError,
    TransportErrorKind,
};
use common::file_utils::validate_save_name;
use common::{
    ErrorBody, FileMetadata, HealthReport, NodeStatus, RootMessage, SearchHit, UploadResult,
    ZkProof,
};
use log::{debug, warn};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Upper bound on how much of an error body is read
const MAX_ERROR_BODY: u64 = 64 * 1024;

/// Client for a single node
pub struct Client<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl Client<HttpTransport> {
    /// Create a client talking HTTP to `config.base_url()`
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new().map_err(|e| ClientError::Network {
            url: config.base_url().to_string(),
            message: format!("Failed to initialise HTTP client: {}", e),
        })?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Welcome message from `/`
    pub fn root_message(&self) -> Result<RootMessage> {
        self.get_json(ROOT_ENDPOINT, Vec::new())
    }

    /// Operational status of the node
    pub fn status(&self) -> Result<NodeStatus> {
        self.get_json(STATUS_ENDPOINT, Vec::new())
    }

    /// Component health. A degraded node is still an `Ok` report.
    pub fn health(&self) -> Result<HealthReport> {
        self.get_json(HEALTH_ENDPOINT, Vec::new())
    }

    /// Upload a local file as a single multipart part.
    ///
    /// The path is checked before anything is sent. The file is streamed
    /// into the request body and the call uses the longer upload timeout.
    pub fn upload(&self, path: &Path) -> Result<UploadResult> {
        let local_file_error = |reason: String| ClientError::LocalFile {
            path: path.to_path_buf(),
            reason,
        };

        let metadata = fs::metadata(path)
            .map_err(|e| local_file_error(format!("not found or unreadable: {}", e)))?;
        if !metadata.is_file() {
            return Err(local_file_error("not a regular file".to_string()));
        }
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| local_file_error("path has no file name".to_string()))?;

        let mime = guess_mime(path).unwrap_or_else(|| {
            warn!(
                "Could not guess MIME type for {}. Sending as {}",
                file_name, FALLBACK_MIME
            );
            FALLBACK_MIME
        });

        let file = File::open(path).map_err(|e| local_file_error(format!("cannot open: {}", e)))?;
        let part = FilePart {
            field: UPLOAD_FIELD,
            file_name,
            mime: mime.to_string(),
            file,
            len: metadata.len(),
        };

        let response = self.send(
            Method::POST,
            UPLOAD_ENDPOINT,
            Vec::new(),
            Body::File(part),
            Some(self.config.upload_timeout()),
        )?;
        self.decode(UPLOAD_ENDPOINT, response)
    }

    /// Download a stored file into `save_dir`, named `save_name` or the hash.
    ///
    /// The directory is created if needed. The body is written in bounded
    /// chunks; on any failure after the file was created it is removed.
    pub fn download(
        &self,
        hash: &str,
        save_dir: &Path,
        save_name: Option<&str>,
    ) -> Result<PathBuf> {
        let save_name = save_name.unwrap_or(hash);
        validate_save_name(save_name)
            .map_err(|e| ClientError::invalid_argument(format!("{}: '{}'", e, save_name)))?;

        let endpoint = resource_endpoint(DOWNLOAD_ENDPOINT, hash)?;

        fs::create_dir_all(save_dir).map_err(|source| ClientError::LocalIo {
            path: save_dir.to_path_buf(),
            source,
        })?;
        let target = save_dir.join(save_name);

        let response = self.send(Method::GET, &endpoint, Vec::new(), Body::Empty, None)?;
        let file = File::create(&target).map_err(|source| ClientError::LocalIo {
            path: target.clone(),
            source,
        })?;
        self.save_body(response.body, file, &endpoint, target)
    }

    /// Copy a download body into `sink`, the file just created at `target`.
    /// On a read or write failure the partial file is removed.
    fn save_body(
        &self,
        body: impl Read,
        sink: impl Write,
        endpoint: &str,
        target: PathBuf,
    ) -> Result<PathBuf> {
        match copy_chunks(body, sink) {
            Ok(written) => {
                debug!("Saved {} bytes to {}", written, target.display());
                Ok(target)
            }
            Err(StreamError::Read(e)) => {
                remove_partial(&target);
                let url = self.config.url_for(endpoint);
                Err(ClientError::Network {
                    message: format!("Download from {} interrupted: {}", url, e),
                    url,
                })
            }
            Err(StreamError::Write(source)) => {
                remove_partial(&target);
                Err(ClientError::LocalIo {
                    path: target,
                    source,
                })
            }
        }
    }

    /// Stored file metadata, most recent first
    pub fn list_files(&self, limit: Option<i64>) -> Result<Vec<FileMetadata>> {
        let mut query = Vec::new();
        if let Some(limit) = limit {
            query.push(("limit".to_string(), positive_limit(limit)?.to_string()));
        }
        self.get_json(FILES_ENDPOINT, query)
    }

    /// Metadata for one stored file
    pub fn file_info(&self, hash: &str) -> Result<FileMetadata> {
        self.get_json(&resource_endpoint(FILE_INFO_ENDPOINT, hash)?, Vec::new())
    }

    /// Files matching `query`, by descending relevance
    pub fn search(&self, query: &str, limit: i64) -> Result<Vec<SearchHit>> {
        let limit = positive_limit(limit)?;
        let query = vec![
            ("query".to_string(), query.to_string()),
            ("limit".to_string(), limit.to_string()),
        ];
        self.get_json(SEARCH_ENDPOINT, query)
    }

    /// Zero-knowledge proof of storage for a file
    pub fn zk_proof(&self, hash: &str) -> Result<ZkProof> {
        self.get_json(&resource_endpoint(ZK_PROOF_ENDPOINT, hash)?, Vec::new())
    }

    /// Performance metrics, when the node exposes them
    pub fn metrics(&self) -> Result<serde_json::Map<String, serde_json::Value>> {
        self.get_json(METRICS_ENDPOINT, Vec::new())
    }

    fn get_json<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: Vec<(String, String)>,
    ) -> Result<R> {
        let response = self.send(Method::GET, endpoint, query, Body::Empty, None)?;
        self.decode(endpoint, response)
    }

    /// Send a request and let only 2xx responses through
    fn send(
        &self,
        method: Method,
        endpoint: &str,
        query: Vec<(String, String)>,
        body: Body,
        timeout: Option<Duration>,
    ) -> Result<Response> {
        let url = self.config.url_for(endpoint);
        let request = Request {
            method,
            url: url.clone(),
            query,
            body,
            timeout: timeout.unwrap_or_else(|| self.config.timeout()),
        };

        let response = self
            .transport
            .send(request)
            .map_err(|e| network_error(&url, e))?;
        if response.status.is_success() {
            Ok(response)
        } else {
            Err(interpret_failure(endpoint, response))
        }
    }

    fn decode<R: DeserializeOwned>(&self, endpoint: &str, response: Response) -> Result<R> {
        serde_json::from_reader(response.body).map_err(|e| {
            if e.is_io() {
                let url = self.config.url_for(endpoint);
                ClientError::Network {
                    message: format!("Failed reading response from {}: {}", url, e),
                    url,
                }
            } else {
                ClientError::Decode {
                    endpoint: endpoint.to_string(),
                    source: e,
                }
            }
        })
    }
}

fn positive_limit(limit: i64) -> Result<i64> {
    if limit < 1 {
        return Err(ClientError::invalid_argument(format!(
            "Limit must be a positive integer, got {}",
            limit
        )));
    }
    Ok(limit)
}

fn network_error(url: &str, e: TransportError) -> ClientError {
    let message = match e.kind {
        TransportErrorKind::Timeout => format!("Request timed out connecting to {}: {}", url, e),
        TransportErrorKind::Connect => format!("Connection error connecting to {}: {}", url, e),
        TransportErrorKind::Other => format!("Network request error for {}: {}", url, e),
    };
    ClientError::Network {
        url: url.to_string(),
        message,
    }
}

/// Turn a non-2xx response into exactly one failure kind
fn interpret_failure(endpoint: &str, response: Response) -> ClientError {
    let status = response.status;
    let mut raw = Vec::new();
    // An unreadable error body is treated as empty
    let _ = response.body.take(MAX_ERROR_BODY).read_to_end(&mut raw);
    let detail = error_detail(status, &raw);

    if status == StatusCode::NOT_FOUND {
        if let Some(id) = resource_id(endpoint) {
            return ClientError::NotFound { id: id.to_string() };
        }
        return ClientError::Api {
            status: status.as_u16(),
            detail: detail.unwrap_or_else(|| "Resource not found".to_string()),
        };
    }
    if status == StatusCode::NOT_IMPLEMENTED && is_zkp_endpoint(endpoint) {
        return ClientError::ZkpDisabled;
    }
    ClientError::Api {
        status: status.as_u16(),
        detail: detail.unwrap_or_else(|| format!("Server returned status {}", status.as_u16())),
    }
}

/// Best-effort detail: the JSON `detail` field, else a raw-body excerpt.
/// `None` means the body was JSON without a usable detail.
fn error_detail(status: StatusCode, raw: &[u8]) -> Option<String> {
    match serde_json::from_slice::<ErrorBody>(raw) {
        Ok(body) => body.detail_text(),
        Err(_) => {
            let text = String::from_utf8_lossy(raw);
            if text.is_empty() {
                Some(format!(
                    "No detail provided (Status: {})",
                    status.as_u16()
                ))
            } else {
                Some(text.chars().take(ERROR_EXCERPT_CHARS).collect())
            }
        }
    }
}

/// Path of one stored resource. The identifier must be a single path
/// segment; it is percent-encoded when the URL is built.
fn resource_endpoint(kind: &str, id: &str) -> Result<String> {
    if id.is_empty() || id.contains('/') {
        return Err(ClientError::invalid_argument(format!(
            "Invalid content hash: '{}'",
            id
        )));
    }
    Ok(format!("{}/{}", kind, id))
}

/// Identifier of `/download/{id}`, `/file-info/{id}` or `/zk-proof/{id}`
fn resource_id(endpoint: &str) -> Option<&str> {
    let mut parts = endpoint.trim_start_matches('/').split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(kind), Some(id), None) if RESOURCE_ENDPOINTS.contains(&kind) && !id.is_empty() => {
            Some(id)
        }
        _ => None,
    }
}

fn is_zkp_endpoint(endpoint: &str) -> bool {
    let endpoint = endpoint.to_ascii_lowercase();
    endpoint.contains("zkp") || endpoint.contains("zk-proof")
}

enum StreamError {
    Read(io::Error),
    Write(io::Error),
}

fn copy_chunks(mut body: impl Read, mut sink: impl Write) -> std::result::Result<u64, StreamError> {
    let mut chunk = vec![0u8; DOWNLOAD_CHUNK_SIZE];
    let mut written = 0u64;
    loop {
        let read = match body.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(StreamError::Read(e)),
        };
        sink.write_all(&chunk[..read]).map_err(StreamError::Write)?;
        written += read as u64;
    }
    sink.flush().map_err(StreamError::Write)?;
    Ok(written)
}

fn remove_partial(target: &Path) {
    if let Err(e) = fs::remove_file(target) {
        if e.kind() != io::ErrorKind::NotFound {
            warn!("Failed to remove partial file {}: {}", target.display(), e);
        }
    }
}
