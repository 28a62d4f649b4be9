//! Shared constants and defaults

pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Upstream endpoints
pub const KLAVIYO_BASE_URL: &str = "https://a.klaviyo.com";
pub const KLAVIYO_API_REVISION: &str = "2024-10-15";
pub const PINTEREST_BASE_URL: &str = "https://api.pinterest.com/v5";
pub const RAILZ_BASE_URL: &str = "https://api.railz.ai/v2";
pub const RAILZ_AUTH_URL: &str = "https://auth.railz.ai/getAccess";

// Supported connector types
pub const CONNECTOR_KLAVIYO: &str = "klaviyo";
pub const CONNECTOR_PINTEREST: &str = "pinterest";
pub const CONNECTOR_RAILZ: &str = "railz";
