//! Zone resolution and TXT record reconciliation for ACME DNS-01
//! challenges.
//!
//! Every DNS-01 integration has to answer the same question: given
//! the zones an account manages and a challenge name such as
//! `_acme-challenge.foo.bar.example.com.`, which zone does the record
//! go in, and what is its name inside that zone? Zonecut answers it
//! once, handling nested zones, trailing dots, case and inactive
//! zones, and then publishes or removes the TXT record without
//! disturbing other values at the same name.
//!
//! # Overview
//!
//! The pure building blocks:
//!
//! - [`DnsName`] normalizes names (case, trailing dot, label limits)
//! - [`find_zone`] picks the most specific eligible [`Zone`]
//! - [`relative_name`] strips the zone from the target
//! - [`reconcile`](reconcile::reconcile) and
//!   [`reconcile_delete`](reconcile::reconcile_delete) decide what to
//!   do with the records already at the name
//!
//! The provider side is two narrow traits, [`ZoneInventory`] and
//! [`RecordStore`]. [`Dns01`] ties everything together; each call
//! lists zones, resolves the target, lists records and creates or
//! deletes exactly one value.
//!
//! # Examples
//!
//! ## Resolving a challenge name
//!
//! ```rust
//! use zonecut::{DnsName, Zone, find_zone, relative_name};
//!
//! let zones = vec![
//!     Zone::new("example.com", true).unwrap(),
//!     Zone::new("sub.example.com", true).unwrap(),
//!     Zone::new("dev.sub.example.com", false).unwrap(),
//! ];
//! let target = DnsName::parse("_acme-challenge.dev.sub.example.com.").unwrap();
//!
//! // The inactive dev.sub.example.com zone is skipped.
//! let zone = find_zone(&target, &zones).unwrap();
//! assert_eq!(zone.name.to_string(), "sub.example.com");
//!
//! let name = relative_name(&target, zone).unwrap();
//! assert_eq!(name.render("@"), "_acme-challenge.dev");
//! ```
//!
//! ## Presenting and cleaning up
//!
//! ```rust
//! use zonecut::{Dns01, MemoryProvider, Settings, challenge_fqdn};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> zonecut::error::ChallengeResult<()> {
//! let provider = MemoryProvider::new();
//! provider.add_zone("example.com", true)?;
//!
//! let dns01 = Dns01::with_provider(provider)
//!     .settings(Settings::new().ttl(Some(60)));
//!
//! // Wildcard and base domain share one challenge name.
//! let fqdn = challenge_fqdn("*.example.com")?.fqdn();
//! dns01.present(&fqdn, "value-for-wildcard").await?;
//! dns01.present(&fqdn, "value-for-base").await?;
//!
//! // Only the named value is removed.
//! assert_eq!(dns01.clean_up(&fqdn, "value-for-wildcard").await?, 1);
//! assert_eq!(dns01.clean_up(&fqdn, "value-for-wildcard").await?, 0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Cloudflare
//!
//! Requires `CF_API_TOKEN` with `Zone > Zone > Read` and
//! `Zone > DNS > Edit` permissions, and `curl` on `PATH`.
//!
//! ```rust,no_run
//! use zonecut::{Cloudflare, Dns01};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let dns01 = Dns01::with_provider(Cloudflare::from_env()?);
//! let handle = dns01
//!     .present("_acme-challenge.www.example.com", "token")
//!     .await?;
//! dns01.clean_up_handle(&handle).await?;
//! # Ok(())
//! # }
//! ```
//!
//! The `zonecut` binary wraps this for use as a certbot hook:
//!
//! ```sh
//! certbot certonly --manual --preferred-challenges dns \
//!     --manual-auth-hook "zonecut present" \
//!     --manual-cleanup-hook "zonecut cleanup" \
//!     -d example.com -d '*.example.com'
//! ```
//!
//! [`ZoneInventory`]: dns::ZoneInventory
//! [`RecordStore`]: dns::RecordStore

// Allow noisy pedantic lints that don't add value for a
// small library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod challenge;
pub mod cli;
pub mod cmd;
pub mod dns;
pub mod error;
pub mod name;
pub mod reconcile;
pub mod record;
pub mod relative;
pub mod settings;
pub mod zone;

pub use challenge::{ChallengeHandle, Dns01, clean_up, present};
pub use dns::cloudflare::Cloudflare;
pub use dns::memory::MemoryProvider;
pub use name::{DnsName, challenge_fqdn};
pub use record::{Record, RecordType};
pub use relative::{Match, RelativeName, relative_name, resolve};
pub use settings::Settings;
pub use zone::{Zone, find_zone};
