//! Constants for the download module (timeouts, concurrency bounds).

/// Default HTTP connect timeout for image requests (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout for image requests (5 minutes).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Minimum allowed concurrency value.
pub const MIN_CONCURRENCY: usize = 1;

/// Maximum allowed concurrency value.
pub const MAX_CONCURRENCY: usize = 100;

/// Default number of images fetched at once within a chapter.
pub const DEFAULT_CONCURRENCY: usize = 10;
