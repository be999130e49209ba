pub mod cloudflare;
pub mod memory;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::record::{Record, RecordType};
use crate::zone::Zone;

/// Lists the zones an account can manage.
///
/// Implementations resolve pagination themselves and return the whole
/// inventory. The result is used for a single operation and never
/// cached.
#[async_trait]
pub trait ZoneInventory: Send + Sync {
    async fn list_zones(&self) -> StoreResult<Vec<Zone>>;
}

/// Record operations within a zone.
///
/// `name` is relative to `zone`, rendered with the caller's apex
/// spelling. Calls for different names, or the same name, may arrive
/// concurrently.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Records of type `kind` at `name`.
    async fn list_records(
        &self,
        zone: &Zone,
        name: &str,
        kind: &RecordType,
    ) -> StoreResult<Vec<Record>>;

    /// Create `record` and return it as stored, with the provider's
    /// record id filled in when there is one.
    async fn create_record(&self, zone: &Zone, record: &Record) -> StoreResult<Record>;

    /// Delete `record`. Returns [`StoreError::NotFound`] if the
    /// provider reports it gone.
    ///
    /// [`StoreError::NotFound`]: crate::error::StoreError::NotFound
    async fn delete_record(&self, zone: &Zone, record: &Record) -> StoreResult<()>;
}

/// Turn a zone-relative record name back into an absolute one.
///
/// Example: `("_acme-challenge", example.com)` ->
/// `"_acme-challenge.example.com"`
///
/// An empty or `@` name is the zone apex.
#[must_use]
pub fn absolute_name(zone: &Zone, name: &str) -> String {
    if name.is_empty() || name == "@" {
        zone.name.to_string()
    } else {
        format!("{}.{}", name.to_ascii_lowercase(), zone.name)
    }
}
