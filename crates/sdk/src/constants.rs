/// Default node URL
pub const DEFAULT_NODE_URL: &str = "http://localhost:5000";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Upper bound for any configured timeout in seconds (one day)
pub const MAX_TIMEOUT_SECS: u64 = 24 * 60 * 60;

/// Lower bound for the upload timeout in seconds
pub const MIN_UPLOAD_TIMEOUT_SECS: u64 = 120;

/// Chunk size used when streaming a download to disk
pub const DOWNLOAD_CHUNK_SIZE: usize = 1024 * 1024;

/// Longest raw-body excerpt kept as error detail
pub const ERROR_EXCERPT_CHARS: usize = 200;

/// Default number of search results
pub const DEFAULT_SEARCH_LIMIT: i64 = 10;

/// Multipart field carrying the uploaded file
pub const UPLOAD_FIELD: &str = "file";

/// Fallback MIME type for unrecognised file names
pub const FALLBACK_MIME: &str = "application/octet-stream";

pub const ROOT_ENDPOINT: &str = "/";
pub const STATUS_ENDPOINT: &str = "/status";
pub const HEALTH_ENDPOINT: &str = "/health";
pub const UPLOAD_ENDPOINT: &str = "/upload";
pub const DOWNLOAD_ENDPOINT: &str = "/download";
pub const FILES_ENDPOINT: &str = "/files";
pub const FILE_INFO_ENDPOINT: &str = "/file-info";
pub const SEARCH_ENDPOINT: &str = "/search";
pub const ZK_PROOF_ENDPOINT: &str = "/zk-proof";
pub const METRICS_ENDPOINT: &str = "/metrics";

/// Endpoints whose single trailing path segment names a stored resource
pub const RESOURCE_ENDPOINTS: [&str; 3] = ["download", "file-info", "zk-proof"];
