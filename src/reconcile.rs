//! Decide what to do with the TXT records at a challenge name.
//!
//! Several challenge values can legitimately coexist at one name: the
//! wildcard and the base domain of a certificate share
//! `_acme-challenge.<domain>`, and ACME validates them concurrently.
//! Decisions are therefore always scoped to an exact value; records
//! carrying other values are left alone.

use crate::record::Record;
use crate::relative::Match;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No TXT record exists at the name.
    Create,
    /// Other values exist at the name; add ours next to them.
    CreateAdditional,
    /// The value is already published.
    AlreadyPresent(Record),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteAction {
    /// Delete exactly these records (duplicates of the value included).
    Delete(Vec<Record>),
    /// The value is already gone. Not an error.
    NothingToDelete,
}

/// Plan publication of `desired` at `m`'s target given the records the
/// store currently reports.
#[must_use]
pub fn reconcile(m: &Match, desired: &str, existing: &[Record]) -> Action {
    let mut slot = existing.iter().filter(|r| r.is_challenge_slot(m)).peekable();
    if slot.peek().is_none() {
        return Action::Create;
    }
    slot.find(|r| r.value == desired)
        .map_or(Action::CreateAdditional, |r| Action::AlreadyPresent(r.clone()))
}

/// Plan removal of `desired` at `m`'s target.
#[must_use]
pub fn reconcile_delete(m: &Match, desired: &str, existing: &[Record]) -> DeleteAction {
    let doomed: Vec<Record> = existing
        .iter()
        .filter(|r| r.is_challenge(m, desired))
        .cloned()
        .collect();
    if doomed.is_empty() {
        DeleteAction::NothingToDelete
    } else {
        DeleteAction::Delete(doomed)
    }
}
