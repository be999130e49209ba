use clap::{Args, Parser, Subcommand};

use crate::challenge::Dns01;
use crate::dns::cloudflare::Cloudflare;
use crate::error::ChallengeResult;
use crate::name::{self, DnsName};
use crate::settings::Settings;

/// Publish and remove ACME DNS-01 challenge records on Cloudflare.
///
/// `domain` and `value` default to `CERTBOT_DOMAIN` and
/// `CERTBOT_VALIDATION`, so the binary can be passed directly as
/// certbot's `--manual-auth-hook` / `--manual-cleanup-hook` (with the
/// matching subcommand).
#[derive(Debug, Parser)]
#[command(name = "zonecut")]
#[command(about = "ACME DNS-01 challenge records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the challenge TXT record
    Present(ChallengeArgs),

    /// Remove the challenge TXT record
    Cleanup(ChallengeArgs),

    /// Show which zone and record name a domain resolves to
    Resolve {
        #[command(flatten)]
        target: TargetArgs,
    },
}

#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Domain being validated (wildcards allowed)
    #[arg(env = "CERTBOT_DOMAIN")]
    pub domain: String,

    /// Treat `domain` as the exact record name instead of prefixing
    /// `_acme-challenge`
    #[arg(long)]
    pub fqdn: bool,
}

#[derive(Debug, Args)]
pub struct ChallengeArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Challenge value (the key authorization digest)
    #[arg(env = "CERTBOT_VALIDATION")]
    pub value: String,
}

impl TargetArgs {
    /// The record name the command operates on.
    pub fn record_name(&self) -> ChallengeResult<DnsName> {
        if self.fqdn {
            DnsName::parse(&self.domain)
        } else {
            name::challenge_fqdn(&self.domain)
        }
    }
}

/// Execute a parsed command against Cloudflare, with settings from
/// `ZONECUT_*` environment variables.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    Cloudflare::check_prerequisites().await?;
    let settings = Settings::from_env()?;
    let cloudflare = Cloudflare::from_env()?;
    let dns01 = Dns01::with_provider(cloudflare).settings(settings);

    match cli.command {
        Command::Present(args) => {
            let target = args.target.record_name()?;
            let handle = dns01.present(&target.fqdn(), &args.value).await?;
            if handle.created {
                eprintln!("TXT record created: {target}");
            } else {
                eprintln!("TXT record already present: {target}");
            }
        }
        Command::Cleanup(args) => {
            let target = args.target.record_name()?;
            let deleted = dns01.clean_up(&target.fqdn(), &args.value).await?;
            eprintln!("TXT records deleted for {target}: {deleted}");
        }
        Command::Resolve { target } => {
            let m = dns01.resolve(&target.record_name()?.fqdn()).await?;
            println!("zone: {}", m.zone.name);
            println!("name: {}", m.relative.render(&dns01.current_settings().apex));
        }
    }

    Ok(())
}
