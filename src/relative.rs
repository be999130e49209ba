use std::fmt;

use crate::error::{ChallengeError, ChallengeResult};
use crate::name::DnsName;
use crate::zone::{self, Zone};

/// A record name expressed relative to its owning zone.
///
/// An empty label list is the zone apex.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelativeName {
    labels: Vec<String>,
}

impl RelativeName {
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn is_apex(&self) -> bool {
        self.labels.is_empty()
    }

    /// Provider-facing form. Vendors disagree on how the apex is
    /// spelled (`@`, empty string), so the caller passes it in.
    #[must_use]
    pub fn render(&self, apex: &str) -> String {
        if self.is_apex() {
            apex.to_string()
        } else {
            self.labels.join(".")
        }
    }
}

impl fmt::Display for RelativeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render("@"))
    }
}

/// Compute the labels of `target` below `zone`.
///
/// Does not trust the caller to have picked the zone with
/// [`zone::find_zone`]: a zone that is not a label-wise suffix of
/// `target` is an error.
pub fn relative_name(target: &DnsName, zone: &Zone) -> ChallengeResult<RelativeName> {
    target
        .strip_suffix(&zone.name)
        .map(|labels| RelativeName {
            labels: labels.to_vec(),
        })
        .ok_or_else(|| ChallengeError::NotUnderZone {
            fqdn: target.to_string(),
            zone: zone.name.to_string(),
        })
}

/// A resolved challenge target: the zone to operate on and the record
/// name within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub target: DnsName,
    pub zone: Zone,
    pub relative: RelativeName,
}

impl Match {
    /// Whether `name`, as reported by a provider, designates this
    /// match's target.
    ///
    /// Providers report names either absolute (`_acme-challenge.example.com`,
    /// with or without the trailing dot) or relative to the zone
    /// (`_acme-challenge`, `@` or an empty string for the apex). Both
    /// forms are accepted.
    #[must_use]
    pub fn names(&self, name: &str) -> bool {
        if name.is_empty() || name == "@" {
            return self.relative.is_apex();
        }
        let Ok(parsed) = DnsName::parse(name) else {
            return false;
        };
        if parsed == self.target {
            return true;
        }
        parsed.labels() == self.relative.labels()
    }
}

/// Find the zone for `target` and its name relative to that zone.
pub fn resolve(target: &DnsName, zones: &[Zone]) -> ChallengeResult<Match> {
    let zone = zone::find_zone(target, zones)?;
    let relative = relative_name(target, zone)?;
    Ok(Match {
        target: target.clone(),
        zone: zone.clone(),
        relative,
    })
}
