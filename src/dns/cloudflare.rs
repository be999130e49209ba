use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cmd;
use crate::dns::{self, RecordStore, ZoneInventory};
use crate::error::{StoreError, StoreResult};
use crate::record::{Record, RecordType};
use crate::zone::Zone;

const CF_API: &str = "https://api.cloudflare.com/client/v4";
const ZONES_PER_PAGE: u32 = 50;
const RECORDS_PER_PAGE: u32 = 100;
/// "Record does not exist."
const CF_RECORD_NOT_FOUND: i64 = 81044;
/// Cloudflare reads a TTL of 1 as "automatic".
const CF_AUTO_TTL: u32 = 1;

/// Cloudflare zones and DNS records via the v4 API, using curl.
///
/// Requires `CF_API_TOKEN` environment variable set with a token
/// that has `Zone > Zone > Read` and `Zone > DNS > Edit` permissions.
/// Zones are eligible when their status is `active`.
pub struct Cloudflare {
    token: String,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    #[serde(default)]
    errors: Vec<ApiMessage>,
    result: Option<T>,
    result_info: Option<ResultInfo>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct ResultInfo {
    total_pages: u32,
}

#[derive(Debug, Deserialize)]
struct CfZone {
    id: String,
    name: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct CfRecord {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: String,
    content: String,
    ttl: Option<u32>,
}

impl From<CfRecord> for Record {
    fn from(r: CfRecord) -> Self {
        Self {
            id: Some(r.id),
            name: r.name,
            kind: RecordType::from(r.kind),
            value: r.content,
            ttl: r.ttl,
        }
    }
}

impl Cloudflare {
    #[must_use]
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
            api_base: CF_API.to_string(),
        }
    }

    pub fn from_env() -> StoreResult<Self> {
        let token = std::env::var("CF_API_TOKEN").map_err(|_| {
            StoreError::Rejected(
                "CF_API_TOKEN not set. Create a token at: \
                 https://dash.cloudflare.com/profile/api-tokens"
                    .into(),
            )
        })?;
        Ok(Self::new(&token))
    }

    /// Point at a different API root, e.g. a local mock.
    #[must_use]
    pub fn api_base(mut self, base: &str) -> Self {
        self.api_base = base.trim_end_matches('/').to_string();
        self
    }

    /// Check that curl is available.
    pub async fn check_prerequisites() -> StoreResult<()> {
        if cmd::command_exists("curl").await {
            Ok(())
        } else {
            Err(StoreError::transport("curl not found on PATH"))
        }
    }

    // Headers go through stdin so the token never shows up in the
    // process list.
    async fn api_request(&self, method: &str, path: &str, body: Option<&str>) -> StoreResult<String> {
        let url = format!("{}{path}", self.api_base);
        let headers = format!(
            "Authorization: Bearer {}\nContent-Type: application/json\n",
            self.token
        );
        let mut args = vec!["-s", "-X", method, "-H", "@-"];
        if let Some(b) = body {
            args.push("-d");
            args.push(b);
        }
        args.push(&url);

        debug!(method, path, "cloudflare request");
        cmd::run_with_stdin("curl", &args, headers.as_bytes()).await
    }

    async fn zone_id(&self, zone: &Zone) -> StoreResult<String> {
        if let Some(id) = &zone.id {
            return Ok(id.clone());
        }
        let path = format!("/zones?name={}", zone.name);
        let response = self.api_request("GET", &path, None).await?;
        let (zones, _) = parse_zone_page(&response)?;
        zones
            .into_iter()
            .find(|z| z.name == zone.name)
            .and_then(|z| z.id)
            .ok_or_else(|| StoreError::NotFound(format!("zone '{}'", zone.name)))
    }
}

fn open_envelope<T: DeserializeOwned>(body: &str) -> StoreResult<(T, Option<ResultInfo>)> {
    let envelope: Envelope<T> = serde_json::from_str(body)?;
    if !envelope.success {
        let detail = envelope
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.code, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        if envelope.errors.iter().any(|e| e.code == CF_RECORD_NOT_FOUND) {
            return Err(StoreError::NotFound(detail));
        }
        return Err(StoreError::Rejected(detail));
    }
    let result = envelope
        .result
        .ok_or_else(|| StoreError::Rejected("response has no result".into()))?;
    Ok((result, envelope.result_info))
}

/// Parse one page of `GET /zones` into zones and the total page
/// count.
///
/// Zones whose names do not parse are skipped with a warning rather
/// than failing the whole inventory.
pub fn parse_zone_page(body: &str) -> StoreResult<(Vec<Zone>, u32)> {
    let (raw, info): (Vec<CfZone>, _) = open_envelope(body)?;
    let total_pages = info.map_or(1, |i| i.total_pages);

    let mut zones = Vec::with_capacity(raw.len());
    for cf in raw {
        match Zone::new(&cf.name, cf.status == "active") {
            Ok(zone) => zones.push(zone.with_id(&cf.id)),
            Err(e) => warn!(zone = %cf.name, error = %e, "skipping unusable zone"),
        }
    }
    Ok((zones, total_pages))
}

/// Parse `GET /zones/{id}/dns_records`. Names come back absolute.
pub fn parse_records(body: &str) -> StoreResult<Vec<Record>> {
    let (raw, _): (Vec<CfRecord>, _) = open_envelope(body)?;
    Ok(raw.into_iter().map(Record::from).collect())
}

/// Parse the single record returned by `POST /zones/{id}/dns_records`.
pub fn parse_created_record(body: &str) -> StoreResult<Record> {
    let (raw, _): (CfRecord, _) = open_envelope(body)?;
    Ok(raw.into())
}

#[async_trait]
impl ZoneInventory for Cloudflare {
    async fn list_zones(&self) -> StoreResult<Vec<Zone>> {
        let mut zones = Vec::new();
        let mut page = 1;
        loop {
            let path = format!("/zones?page={page}&per_page={ZONES_PER_PAGE}");
            let response = self.api_request("GET", &path, None).await?;
            let (batch, total_pages) = parse_zone_page(&response)?;
            zones.extend(batch);
            if page >= total_pages {
                break;
            }
            page += 1;
        }
        debug!(count = zones.len(), "cloudflare zones listed");
        Ok(zones)
    }
}

#[async_trait]
impl RecordStore for Cloudflare {
    async fn list_records(
        &self,
        zone: &Zone,
        name: &str,
        kind: &RecordType,
    ) -> StoreResult<Vec<Record>> {
        let zone_id = self.zone_id(zone).await?;
        let path = format!(
            "/zones/{zone_id}/dns_records?type={kind}&name={}&per_page={RECORDS_PER_PAGE}",
            dns::absolute_name(zone, name)
        );
        let response = self.api_request("GET", &path, None).await?;
        parse_records(&response)
    }

    async fn create_record(&self, zone: &Zone, record: &Record) -> StoreResult<Record> {
        let zone_id = self.zone_id(zone).await?;
        let body = serde_json::json!({
            "type": record.kind.to_string(),
            "name": dns::absolute_name(zone, &record.name),
            "content": record.value,
            "ttl": record.ttl.unwrap_or(CF_AUTO_TTL),
        })
        .to_string();
        let path = format!("/zones/{zone_id}/dns_records");
        let response = self.api_request("POST", &path, Some(&body)).await?;
        parse_created_record(&response)
    }

    async fn delete_record(&self, zone: &Zone, record: &Record) -> StoreResult<()> {
        let zone_id = self.zone_id(zone).await?;
        let record_id = match &record.id {
            Some(id) => id.clone(),
            None => self
                .list_records(zone, &record.name, &record.kind)
                .await?
                .into_iter()
                .find(|r| r.value == record.value)
                .and_then(|r| r.id)
                .ok_or_else(|| StoreError::NotFound(format!("record {}", record.name)))?,
        };
        let path = format!("/zones/{zone_id}/dns_records/{record_id}");
        let response = self.api_request("DELETE", &path, None).await?;
        open_envelope::<serde_json::Value>(&response)?;
        Ok(())
    }
}
