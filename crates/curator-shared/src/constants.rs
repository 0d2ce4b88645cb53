//! Application-wide constants

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Personalized lists live for 24 hours after their last write.
pub const DEFAULT_SESSION_TTL_SECONDS: u64 = 86_400;
pub const DEFAULT_SESSION_KEY_PREFIX: &str = "personalized_list:";
pub const DEFAULT_SWEEP_INTERVAL_SECONDS: u64 = 3_600;
pub const MAX_SELECTED_APPS: usize = 200;

pub const DEFAULT_ICON_TIMEOUT_MS: u64 = 3_000;
pub const DEFAULT_MAX_ICON_BYTES: usize = 512 * 1024;

pub const SHARE_PATH_SEGMENT: &str = "personalized-list";
pub const DEFAULT_EMBED_WIDTH: u32 = 400;
pub const DEFAULT_EMBED_HEIGHT: u32 = 600;
pub const DEFAULT_QR_MIN_SIZE: u32 = 256;
