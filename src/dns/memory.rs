use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::dns::{self, RecordStore, ZoneInventory};
use crate::error::{ChallengeResult, StoreError, StoreResult};
use crate::name::DnsName;
use crate::record::{Record, RecordType};
use crate::zone::Zone;

/// Zones and records held in process memory.
///
/// Serves as both [`ZoneInventory`] and [`RecordStore`]. Useful for
/// tests and dry runs; safe to share between tasks.
///
/// # Example
///
/// ```rust
/// use zonecut::dns::memory::MemoryProvider;
///
/// let provider = MemoryProvider::new();
/// provider.add_zone("example.com", true).unwrap();
/// provider.add_zone("dev.example.com", false).unwrap();
/// assert_eq!(provider.zone_names(), ["example.com", "dev.example.com"]);
/// ```
#[derive(Debug, Default)]
pub struct MemoryProvider {
    state: Mutex<State>,
    next_id: AtomicU64,
}

#[derive(Debug, Default)]
struct State {
    zones: Vec<Zone>,
    records: HashMap<DnsName, Vec<Record>>,
}

impl MemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a zone. Registering the same name twice keeps both
    /// inventory entries, as some providers do.
    pub fn add_zone(&self, name: &str, eligible: bool) -> ChallengeResult<()> {
        let zone = Zone::new(name, eligible)?;
        let mut state = self.lock_or_recover();
        state.records.entry(zone.name.clone()).or_default();
        state.zones.push(zone);
        Ok(())
    }

    /// Flip eligibility of every inventory entry named `name`.
    pub fn set_eligible(&self, name: &str, eligible: bool) -> ChallengeResult<()> {
        let name = DnsName::parse(name)?;
        let mut state = self.lock_or_recover();
        for zone in state.zones.iter_mut().filter(|z| z.name == name) {
            zone.eligible = eligible;
        }
        Ok(())
    }

    /// Drop a zone and all its records.
    pub fn remove_zone(&self, name: &str) -> ChallengeResult<()> {
        let name = DnsName::parse(name)?;
        let mut state = self.lock_or_recover();
        state.zones.retain(|z| z.name != name);
        state.records.remove(&name);
        Ok(())
    }

    #[must_use]
    pub fn zone_names(&self) -> Vec<String> {
        self.lock_or_recover()
            .zones
            .iter()
            .map(|z| z.name.to_string())
            .collect()
    }

    /// Snapshot of the records in `zone`.
    pub fn records(&self, zone: &str) -> ChallengeResult<Vec<Record>> {
        let name = DnsName::parse(zone)?;
        Ok(self
            .lock_or_recover()
            .records
            .get(&name)
            .cloned()
            .unwrap_or_default())
    }

    /// Seed a record without going through [`RecordStore`].
    pub fn insert_record(&self, zone: &str, record: Record) -> ChallengeResult<()> {
        let name = DnsName::parse(zone)?;
        let record = self.assign_id(record);
        self.lock_or_recover()
            .records
            .entry(name)
            .or_default()
            .push(record);
        Ok(())
    }

    fn assign_id(&self, mut record: Record) -> Record {
        if record.id.is_none() {
            let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
            record.id = Some(format!("rec-{n}"));
        }
        record
    }

    // A panic while holding the lock cannot leave State half-updated:
    // every mutation is a single push/retain/remove.
    fn lock_or_recover(&self) -> MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Records may be stored under a zone-relative or an absolute name;
/// both sides are compared in absolute form.
fn same_name(zone: &Zone, a: &str, b: &str) -> bool {
    match (absolute(zone, a), absolute(zone, b)) {
        (Some(a), Some(b)) => a == b,
        _ => a.eq_ignore_ascii_case(b),
    }
}

fn absolute(zone: &Zone, name: &str) -> Option<DnsName> {
    match DnsName::parse(name) {
        Ok(parsed) if name.ends_with('.') || parsed.ends_with(&zone.name) => Some(parsed),
        _ => DnsName::parse(&dns::absolute_name(zone, name)).ok(),
    }
}

#[async_trait]
impl ZoneInventory for MemoryProvider {
    async fn list_zones(&self) -> StoreResult<Vec<Zone>> {
        Ok(self.lock_or_recover().zones.clone())
    }
}

#[async_trait]
impl RecordStore for MemoryProvider {
    async fn list_records(
        &self,
        zone: &Zone,
        name: &str,
        kind: &RecordType,
    ) -> StoreResult<Vec<Record>> {
        let state = self.lock_or_recover();
        let records = state
            .records
            .get(&zone.name)
            .ok_or_else(|| StoreError::NotFound(format!("zone {}", zone.name)))?;
        Ok(records
            .iter()
            .filter(|r| &r.kind == kind && same_name(zone, &r.name, name))
            .cloned()
            .collect())
    }

    async fn create_record(&self, zone: &Zone, record: &Record) -> StoreResult<Record> {
        let record = self.assign_id(record.clone());
        let mut state = self.lock_or_recover();
        let records = state
            .records
            .get_mut(&zone.name)
            .ok_or_else(|| StoreError::NotFound(format!("zone {}", zone.name)))?;
        debug!(zone = %zone.name, name = %record.name, "memory: record created");
        records.push(record.clone());
        Ok(record)
    }

    async fn delete_record(&self, zone: &Zone, record: &Record) -> StoreResult<()> {
        let mut state = self.lock_or_recover();
        let records = state
            .records
            .get_mut(&zone.name)
            .ok_or_else(|| StoreError::NotFound(format!("zone {}", zone.name)))?;

        let position = match &record.id {
            Some(id) => records.iter().position(|r| r.id.as_ref() == Some(id)),
            None => records.iter().position(|r| {
                r.kind == record.kind
                    && same_name(zone, &r.name, &record.name)
                    && r.value == record.value
            }),
        };
        let Some(index) = position else {
            return Err(StoreError::NotFound(format!(
                "record {} in zone {}",
                record.name, zone.name
            )));
        };
        records.remove(index);
        debug!(zone = %zone.name, name = %record.name, "memory: record deleted");
        Ok(())
    }
}
