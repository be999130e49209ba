use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::dns::{RecordStore, ZoneInventory};
use crate::error::{ChallengeError, ChallengeResult, StoreError, StoreResult};
use crate::name::DnsName;
use crate::reconcile::{self, Action, DeleteAction};
use crate::record::{Record, RecordType};
use crate::relative::{self, Match};
use crate::settings::Settings;

/// Publishes and removes DNS-01 challenge records.
///
/// Every call fetches the zone inventory afresh and resolves the
/// challenge name against it; nothing is cached between calls. Cheap
/// to clone, so one instance can serve concurrent validations.
///
/// # Example
///
/// ```rust
/// use zonecut::{Dns01, MemoryProvider};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> zonecut::error::ChallengeResult<()> {
/// let provider = MemoryProvider::new();
/// provider.add_zone("example.com", true)?;
///
/// let dns01 = Dns01::with_provider(provider);
/// let handle = dns01.present("_acme-challenge.www.example.com", "token").await?;
/// assert_eq!(handle.matched.zone.name.to_string(), "example.com");
/// assert_eq!(handle.matched.relative.to_string(), "_acme-challenge.www");
///
/// dns01.clean_up("_acme-challenge.www.example.com", "token").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Dns01 {
    zones: Arc<dyn ZoneInventory>,
    store: Arc<dyn RecordStore>,
    settings: Settings,
}

/// What [`Dns01::present`] did, kept by the caller for the matching
/// [`Dns01::clean_up_handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeHandle {
    pub matched: Match,
    /// The record as the store reported it, including its id if the
    /// store assigns one.
    pub record: Record,
    /// False if the value was already published.
    pub created: bool,
}

impl Dns01 {
    #[must_use]
    pub fn new(zones: impl ZoneInventory + 'static, store: impl RecordStore + 'static) -> Self {
        Self::from_parts(Arc::new(zones), Arc::new(store))
    }

    /// Use one provider as both inventory and record store.
    #[must_use]
    pub fn with_provider<P>(provider: P) -> Self
    where
        P: ZoneInventory + RecordStore + 'static,
    {
        let provider = Arc::new(provider);
        Self::from_parts(provider.clone(), provider)
    }

    #[must_use]
    pub fn from_parts(zones: Arc<dyn ZoneInventory>, store: Arc<dyn RecordStore>) -> Self {
        Self {
            zones,
            store,
            settings: Settings::default(),
        }
    }

    #[must_use]
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub const fn current_settings(&self) -> &Settings {
        &self.settings
    }

    fn ctx(&self) -> Ctx<'_> {
        Ctx {
            zones: self.zones.as_ref(),
            store: self.store.as_ref(),
            settings: &self.settings,
        }
    }

    /// Resolve `fqdn` to its zone and relative name without touching
    /// any record.
    pub async fn resolve(&self, fqdn: &str) -> ChallengeResult<Match> {
        let target = DnsName::parse(fqdn)?;
        self.ctx().resolve(&target).await
    }

    /// Make sure a TXT record with `value` exists at `fqdn`.
    ///
    /// Idempotent: presenting a value that is already there is a no-op.
    /// Other values at the same name are kept.
    pub async fn present(&self, fqdn: &str, value: &str) -> ChallengeResult<ChallengeHandle> {
        self.ctx().present(fqdn, value).await
    }

    /// Remove the TXT record with `value` at `fqdn`, returning how many
    /// records were deleted.
    ///
    /// Succeeds with `0` when the value is already gone. Fails if `fqdn`
    /// no longer resolves to a zone.
    pub async fn clean_up(&self, fqdn: &str, value: &str) -> ChallengeResult<usize> {
        self.ctx().clean_up(fqdn, value).await
    }

    /// Undo a [`Dns01::present`].
    ///
    /// The zone is resolved again. When it is still the zone the record
    /// was created in and the store gave the record an id, that record
    /// is deleted directly; otherwise this falls back to a value-scoped
    /// [`Dns01::clean_up`].
    pub async fn clean_up_handle(&self, handle: &ChallengeHandle) -> ChallengeResult<usize> {
        let ctx = self.ctx();
        let m = ctx.resolve(&handle.matched.target).await?;
        if m.zone.name == handle.matched.zone.name && handle.record.id.is_some() {
            return ctx.delete(&m, std::slice::from_ref(&handle.record)).await;
        }
        ctx.clean_up_matched(&m, &handle.record.value).await
    }
}

/// [`Dns01::present`] with default [`Settings`].
pub async fn present(
    fqdn: &str,
    value: &str,
    zones: &dyn ZoneInventory,
    store: &dyn RecordStore,
) -> ChallengeResult<ChallengeHandle> {
    let settings = Settings::default();
    Ctx {
        zones,
        store,
        settings: &settings,
    }
    .present(fqdn, value)
    .await
}

/// [`Dns01::clean_up`] with default [`Settings`].
pub async fn clean_up(
    fqdn: &str,
    value: &str,
    zones: &dyn ZoneInventory,
    store: &dyn RecordStore,
) -> ChallengeResult<usize> {
    let settings = Settings::default();
    Ctx {
        zones,
        store,
        settings: &settings,
    }
    .clean_up(fqdn, value)
    .await
}

struct Ctx<'a> {
    zones: &'a dyn ZoneInventory,
    store: &'a dyn RecordStore,
    settings: &'a Settings,
}

impl Ctx<'_> {
    async fn resolve(&self, target: &DnsName) -> ChallengeResult<Match> {
        let zones = bounded(self.settings.timeout, self.zones.list_zones())
            .await
            .map_err(|source| ChallengeError::Store {
                fqdn: target.to_string(),
                zone: None,
                source,
            })?;
        let m = relative::resolve(target, &zones)?;
        debug!(
            fqdn = %target,
            zone = %m.zone.name,
            name = %m.relative,
            "resolved challenge zone"
        );
        Ok(m)
    }

    async fn present(&self, fqdn: &str, value: &str) -> ChallengeResult<ChallengeHandle> {
        let target = DnsName::parse(fqdn)?;
        let m = self.resolve(&target).await?;
        let name = m.relative.render(&self.settings.apex);
        let value = self.settings.encode_value(value);

        let existing = self.list(&m, &name).await?;
        let (record, created) = match reconcile::reconcile(&m, &value, &existing) {
            Action::AlreadyPresent(record) => {
                debug!(fqdn = %m.target, zone = %m.zone.name, "challenge value already present");
                (record, false)
            }
            action => {
                let wanted = Record::txt(&name, &value, self.settings.ttl);
                let record = bounded(
                    self.settings.timeout,
                    self.store.create_record(&m.zone, &wanted),
                )
                .await
                .map_err(|source| store_error(&m, source))?;
                let additional = action == Action::CreateAdditional;
                info!(
                    fqdn = %m.target,
                    zone = %m.zone.name,
                    name = %name,
                    additional,
                    "TXT record created"
                );
                (record, true)
            }
        };

        Ok(ChallengeHandle {
            matched: m,
            record,
            created,
        })
    }

    async fn clean_up(&self, fqdn: &str, value: &str) -> ChallengeResult<usize> {
        let target = DnsName::parse(fqdn)?;
        let m = self.resolve(&target).await?;
        self.clean_up_matched(&m, &self.settings.encode_value(value))
            .await
    }

    /// `value` is already encoded.
    async fn clean_up_matched(&self, m: &Match, value: &str) -> ChallengeResult<usize> {
        let name = m.relative.render(&self.settings.apex);
        let existing = self.list(m, &name).await?;
        match reconcile::reconcile_delete(m, value, &existing) {
            DeleteAction::NothingToDelete => {
                debug!(fqdn = %m.target, zone = %m.zone.name, "challenge value already absent");
                Ok(0)
            }
            DeleteAction::Delete(records) => self.delete(m, &records).await,
        }
    }

    async fn list(&self, m: &Match, name: &str) -> ChallengeResult<Vec<Record>> {
        bounded(
            self.settings.timeout,
            self.store.list_records(&m.zone, name, &RecordType::Txt),
        )
        .await
        .map_err(|source| store_error(m, source))
    }

    async fn delete(&self, m: &Match, records: &[Record]) -> ChallengeResult<usize> {
        let mut deleted = 0;
        for record in records {
            match bounded(self.settings.timeout, self.store.delete_record(&m.zone, record)).await {
                Ok(()) => {
                    info!(fqdn = %m.target, zone = %m.zone.name, name = %record.name, "TXT record deleted");
                    deleted += 1;
                }
                Err(StoreError::NotFound(what)) => {
                    debug!(fqdn = %m.target, %what, "record vanished before delete");
                }
                Err(source) => return Err(store_error(m, source)),
            }
        }
        Ok(deleted)
    }
}

fn store_error(m: &Match, source: StoreError) -> ChallengeError {
    ChallengeError::Store {
        fqdn: m.target.to_string(),
        zone: Some(m.zone.name.to_string()),
        source,
    }
}

async fn bounded<T: Send>(
    limit: Option<Duration>,
    call: impl Future<Output = StoreResult<T>> + Send,
) -> StoreResult<T> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .map_err(|_| StoreError::Timeout(limit))?,
        None => call.await,
    }
}
