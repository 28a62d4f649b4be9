use chrono::{DateTime, Duration, Utc};

pub const BEARER_PREFIX: &str = "Bearer ";

/// A fetched token together with the window it may be used in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    pub obtained_at: DateTime<Utc>,
    pub lifetime: Duration,
}

impl Token {
    pub fn new(value: String, obtained_at: DateTime<Utc>, lifetime: Duration) -> Self {
        Self { value, obtained_at, lifetime }
    }

    /// Saturates at the latest representable instant.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.obtained_at
            .checked_add_signed(self.lifetime)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Valid while `now - obtained_at < lifetime`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now - self.obtained_at < self.lifetime
    }

    pub fn bearer(&self) -> String {
        format!("{}{}", BEARER_PREFIX, self.value)
    }
}
