use std::time::Duration;

pub type ChallengeResult<T> = Result<T, ChallengeError>;

pub type StoreResult<T> = Result<T, StoreError>;

/// What is wrong with a name rejected by [`DnsName::parse`].
///
/// [`DnsName::parse`]: crate::name::DnsName::parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameDefect {
    Empty,
    EmptyLabel,
    LabelTooLong(usize),
    NameTooLong(usize),
    IllegalCharacter(char),
    LoneWildcard,
}

impl std::fmt::Display for NameDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "name is empty"),
            Self::EmptyLabel => write!(f, "name contains an empty label"),
            Self::LabelTooLong(len) => {
                write!(f, "label is {len} octets long (max 63)")
            }
            Self::NameTooLong(len) => {
                write!(f, "name is {len} octets long (max 253)")
            }
            Self::IllegalCharacter(c) => {
                write!(f, "illegal character {c:?}")
            }
            Self::LoneWildcard => write!(f, "a bare wildcard has no challenge name"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChallengeError {
    #[error("invalid DNS name '{name}': {defect}")]
    InvalidName { name: String, defect: NameDefect },

    #[error("no eligible zone found for '{fqdn}'")]
    ZoneNotFound { fqdn: String },

    #[error("'{fqdn}' is not under zone '{zone}'")]
    NotUnderZone { fqdn: String, zone: String },

    #[error("record store failed for '{fqdn}'{}: {source}", zone_suffix(.zone.as_deref()))]
    Store {
        fqdn: String,
        zone: Option<String>,
        #[source]
        source: StoreError,
    },

    #[error("invalid setting {key}={value:?}")]
    InvalidSetting { key: String, value: String },
}

fn zone_suffix(zone: Option<&str>) -> String {
    zone.map(|z| format!(" (zone '{z}')")).unwrap_or_default()
}

impl ChallengeError {
    /// Whether retrying the same call can succeed.
    ///
    /// Name and zone resolution failures are deterministic, so only
    /// transient collaborator failures qualify. The crate itself never
    /// retries.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Store {
                source: StoreError::Timeout(_) | StoreError::Transport(_) | StoreError::Io(_),
                ..
            }
        )
    }
}

/// Failure reported by a [`ZoneInventory`] or [`RecordStore`].
///
/// [`ZoneInventory`]: crate::dns::ZoneInventory
/// [`RecordStore`]: crate::dns::RecordStore
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("rejected by provider: {0}")]
    Rejected(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub fn transport(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Transport(err.into())
    }
}
