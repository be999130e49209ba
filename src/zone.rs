use crate::error::{ChallengeError, ChallengeResult};
use crate::name::DnsName;

/// A zone from an account's inventory.
///
/// `eligible` folds together whatever the provider means by "usable":
/// active, correctly delegated, not pending deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub name: DnsName,
    pub eligible: bool,
    /// Provider-specific zone identifier, when the provider addresses
    /// zones by id rather than by name.
    pub id: Option<String>,
}

impl Zone {
    pub fn new(name: &str, eligible: bool) -> ChallengeResult<Self> {
        Ok(Self {
            name: DnsName::parse(name)?,
            eligible,
            id: None,
        })
    }

    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }
}

/// Find the most specific eligible zone containing `target`.
///
/// Zones match label-wise, so `notexample.com` is never served by
/// `example.com`. Ineligible zones are skipped even when they would be
/// the longest match. Among equally specific candidates the first in
/// input order wins. A target equal to a zone's name matches that zone.
pub fn find_zone<'a>(target: &DnsName, zones: &'a [Zone]) -> ChallengeResult<&'a Zone> {
    let mut best: Option<&Zone> = None;
    for zone in zones {
        if !zone.eligible || !target.ends_with(&zone.name) {
            continue;
        }
        if best.is_none_or(|b| zone.name.label_count() > b.name.label_count()) {
            best = Some(zone);
        }
    }

    best.ok_or_else(|| ChallengeError::ZoneNotFound {
        fqdn: target.to_string(),
    })
}
