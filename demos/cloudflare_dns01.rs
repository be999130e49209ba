//! Publish and remove a DNS-01 challenge on Cloudflare.
//!
//! Requires `CF_API_TOKEN` environment variable set with a token
//! that has `Zone > Zone > Read` and `Zone > DNS > Edit` permissions.
//!
//! ```sh
//! cargo run --example cloudflare_dns01 -- www.example.com some-token
//! ```

use zonecut::{Cloudflare, Dns01, Settings, challenge_fqdn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let domain = args.next().unwrap_or_else(|| "www.example.com".into());
    let value = args.next().unwrap_or_else(|| "demo-challenge-value".into());

    let dns01 = Dns01::with_provider(Cloudflare::from_env()?)
        .settings(Settings::new().ttl(Some(60)));

    let fqdn = challenge_fqdn(&domain)?.fqdn();
    let handle = dns01.present(&fqdn, &value).await?;
    println!(
        "{} in zone {} (created: {})",
        handle.matched.relative, handle.matched.zone.name, handle.created
    );

    let deleted = dns01.clean_up_handle(&handle).await?;
    println!("deleted {deleted} record(s)");
    Ok(())
}
