use std::time::Duration;

use crate::error::{ChallengeError, ChallengeResult};

pub const DEFAULT_TTL: u32 = 120;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Tunables for [`Dns01`](crate::challenge::Dns01).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// TTL placed on created records. `None` leaves it to the provider.
    pub ttl: Option<u32>,
    /// How the zone apex is spelled when the challenge name equals the
    /// zone name.
    pub apex: String,
    /// Upper bound on every collaborator call.
    pub timeout: Option<Duration>,
    /// Wrap values in literal double quotes before comparing and
    /// creating, for providers that store TXT data quoted.
    pub quote_values: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ttl: Some(DEFAULT_TTL),
            apex: "@".to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            quote_values: false,
        }
    }
}

impl Settings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn ttl(mut self, ttl: Option<u32>) -> Self {
        self.ttl = ttl;
        self
    }

    #[must_use]
    pub fn apex(mut self, apex: &str) -> Self {
        self.apex = apex.to_string();
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn quote_values(mut self, quote: bool) -> Self {
        self.quote_values = quote;
        self
    }

    /// Load settings from `ZONECUT_*` environment variables, falling
    /// back to the defaults for unset ones.
    pub fn from_env() -> ChallengeResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Settings::from_env`], reading variables through `lookup`.
    ///
    /// - `ZONECUT_TTL`: seconds, `0` for the provider default
    /// - `ZONECUT_APEX`: apex spelling
    /// - `ZONECUT_TIMEOUT_SECS`: seconds, `0` disables the timeout
    /// - `ZONECUT_QUOTE_VALUES`: `true`/`false`/`1`/`0`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ChallengeResult<Self> {
        let mut settings = Self::default();

        if let Some(raw) = lookup("ZONECUT_TTL") {
            let ttl = parse_u64("ZONECUT_TTL", &raw)?;
            settings.ttl = match ttl {
                0 => None,
                n => Some(u32::try_from(n).map_err(|_| invalid("ZONECUT_TTL", &raw))?),
            };
        }
        if let Some(raw) = lookup("ZONECUT_APEX") {
            settings.apex = raw;
        }
        if let Some(raw) = lookup("ZONECUT_TIMEOUT_SECS") {
            settings.timeout = match parse_u64("ZONECUT_TIMEOUT_SECS", &raw)? {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            };
        }
        if let Some(raw) = lookup("ZONECUT_QUOTE_VALUES") {
            settings.quote_values = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(invalid("ZONECUT_QUOTE_VALUES", &raw)),
            };
        }

        Ok(settings)
    }

    /// The value as it is stored by the provider.
    #[must_use]
    pub fn encode_value(&self, value: &str) -> String {
        if self.quote_values {
            format!("\"{value}\"")
        } else {
            value.to_string()
        }
    }
}

fn parse_u64(key: &str, raw: &str) -> ChallengeResult<u64> {
    raw.trim().parse().map_err(|_| invalid(key, raw))
}

fn invalid(key: &str, raw: &str) -> ChallengeError {
    ChallengeError::InvalidSetting {
        key: key.to_string(),
        value: raw.to_string(),
    }
}
