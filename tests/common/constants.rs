//! Shared constants for end-to-end tests
//!
//! When test data changes (catalog ids, store rows, etc.), update only this file.

// ============================================================================
// Seeded In-Memory Catalog
// ============================================================================

/// Album id of "Blue Train" in the seeded catalog
pub const ALBUM_1_ID: &str = "1";

/// Album id of "Jeru" in the seeded catalog
pub const ALBUM_2_ID: &str = "2";

pub const ALBUM_2_TITLE: &str = "Jeru";

pub const ALBUM_2_ARTIST: &str = "Gerry Mulligan";

pub const SEEDED_ALBUMS_COUNT: usize = 3;

// ============================================================================
// Relational Store Rows
// ============================================================================

/// (id, title, artist, price) rows written into the test search database
pub const STORE_ALBUMS: &[(i64, &str, &str, f64)] = &[
    (1, "Blue Train", "John Coltrane", 56.99),
    (2, "Giant Steps", "John Coltrane", 63.99),
    (3, "Jeru", "Gerry Mulligan", 17.99),
    (4, "Sarah Vaughan", "Sarah Vaughan", 34.98),
];

// ============================================================================
// Tracks File
// ============================================================================

pub const TRACKS_CSV: &str = "1,23,test\n2,23,test\n";

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;

/// Search timeout configured on test servers (milliseconds)
pub const SEARCH_TIMEOUT_MS: u64 = 300;
