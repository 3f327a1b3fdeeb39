/// Environment variable holding the node URL
pub const NODE_URL_ENV: &str = "PERMASTOREIT_URL";

/// Default glob pattern for bulk uploads
pub const DEFAULT_BULK_PATTERN: &str = "*";

/// Default pause between bulk uploads, in seconds
pub const DEFAULT_BULK_DELAY: &str = "0.1";

/// Characters of a hash shown in tables
pub const HASH_COLUMN_WIDTH: usize = 18;

/// Format for timestamps shown in tables
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
