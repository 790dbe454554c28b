//! System-wide constants for the OpenRelay ledger.

/// Default maximum number of (wallet, amount) pairs in one settlement batch.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 500;

/// Hard ceiling on any configured batch size.
pub const MAX_BATCH_SIZE_LIMIT: usize = 10_000;

/// Domain separator for the notification stream digest chain.
pub const STREAM_DIGEST_DOMAIN: &[u8] = b"openrelay:notification_stream:v1:";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "OpenRelay";
