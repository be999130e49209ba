use std::fmt;
use std::str::FromStr;

use crate::error::{ChallengeError, ChallengeResult, NameDefect};

/// Label prepended to an identifier to form its DNS-01 challenge name.
pub const CHALLENGE_LABEL: &str = "_acme-challenge";

const MAX_LABEL_LEN: usize = 63;
const MAX_NAME_LEN: usize = 253;

/// A normalized, case-folded DNS name.
///
/// Parsing accepts names with or without the root-terminating dot, so
/// `example.com` and `Example.COM.` compare equal. [`fmt::Display`]
/// renders the name without the trailing dot; [`DnsName::fqdn`] renders
/// it with one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DnsName {
    labels: Vec<String>,
}

impl DnsName {
    /// Normalize `input` into a [`DnsName`].
    ///
    /// Labels are ASCII lower-cased. A single trailing dot is accepted;
    /// any other empty label (leading dot, `..`) is rejected, as are
    /// whitespace, control and non-ASCII characters. Internationalized
    /// names must arrive in their punycode (`xn--`) form. Underscore
    /// labels such as `_acme-challenge` are fine.
    pub fn parse(input: &str) -> ChallengeResult<Self> {
        let invalid = |defect| ChallengeError::InvalidName {
            name: input.to_string(),
            defect,
        };

        let body = input.strip_suffix('.').unwrap_or(input);
        if body.is_empty() {
            return Err(invalid(NameDefect::Empty));
        }
        if body.len() > MAX_NAME_LEN {
            return Err(invalid(NameDefect::NameTooLong(body.len())));
        }
        if let Some(c) = body
            .chars()
            .find(|c| !c.is_ascii() || c.is_ascii_whitespace() || c.is_ascii_control())
        {
            return Err(invalid(NameDefect::IllegalCharacter(c)));
        }

        let mut labels = Vec::new();
        for label in body.split('.') {
            if label.is_empty() {
                return Err(invalid(NameDefect::EmptyLabel));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(invalid(NameDefect::LabelTooLong(label.len())));
            }
            labels.push(label.to_ascii_lowercase());
        }

        Ok(Self { labels })
    }

    /// Labels in most-specific-first order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Label-wise suffix test: `a.example.com` ends with `example.com`,
    /// `notexample.com` does not. A name ends with itself.
    #[must_use]
    pub fn ends_with(&self, suffix: &Self) -> bool {
        self.labels.ends_with(&suffix.labels)
    }

    /// The labels left after removing `suffix`, or `None` if `suffix`
    /// is not a label-wise suffix of this name.
    #[must_use]
    pub fn strip_suffix(&self, suffix: &Self) -> Option<&[String]> {
        if !self.ends_with(suffix) {
            return None;
        }
        Some(&self.labels[..self.labels.len() - suffix.labels.len()])
    }

    /// Prepend `label` to this name.
    pub fn child(&self, label: &str) -> ChallengeResult<Self> {
        Self::parse(&format!("{label}.{self}"))
    }

    /// The name with its root-terminating dot.
    #[must_use]
    pub fn fqdn(&self) -> String {
        format!("{self}.")
    }
}

impl fmt::Display for DnsName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.labels.join("."))
    }
}

impl FromStr for DnsName {
    type Err = ChallengeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Build the DNS-01 challenge name for an ACME identifier.
///
/// Example: `"*.example.com"` -> `_acme-challenge.example.com.`
///
/// A leading wildcard label is dropped, since the wildcard and the base
/// domain share one challenge name. Names already starting with
/// `_acme-challenge` are returned as-is. A lone `*` is rejected.
pub fn challenge_fqdn(domain: &str) -> ChallengeResult<DnsName> {
    let mut name = DnsName::parse(domain)?;
    if name.labels[0] == CHALLENGE_LABEL {
        return Ok(name);
    }
    if name.labels[0] == "*" {
        if name.labels.len() == 1 {
            return Err(ChallengeError::InvalidName {
                name: domain.to_string(),
                defect: NameDefect::LoneWildcard,
            });
        }
        name.labels.remove(0);
    }
    name.child(CHALLENGE_LABEL)
}
