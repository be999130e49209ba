use zonecut::Cloudflare;
use zonecut::dns::cloudflare::{parse_created_record, parse_records, parse_zone_page};
use zonecut::error::StoreError;
use zonecut::record::RecordType;

#[test]
fn parse_zone_page_maps_status_to_eligibility() {
    let body = r#"{
        "success": true,
        "errors": [],
        "result": [
            {"id": "z1", "name": "example.com", "status": "active"},
            {"id": "z2", "name": "sub.example.com", "status": "pending"},
            {"id": "z3", "name": "Example.ORG", "status": "active"}
        ],
        "result_info": {"page": 1, "per_page": 50, "total_pages": 3, "count": 3}
    }"#;
    let (zones, total_pages) = parse_zone_page(body).unwrap();

    assert_eq!(total_pages, 3);
    assert_eq!(zones.len(), 3);
    assert_eq!(zones[0].id.as_deref(), Some("z1"));
    assert!(zones[0].eligible);
    assert!(!zones[1].eligible);
    assert_eq!(zones[2].name.to_string(), "example.org");
}

#[test]
fn parse_zone_page_without_result_info_is_single_page() {
    let body = r#"{"success": true, "result": []}"#;
    let (zones, total_pages) = parse_zone_page(body).unwrap();
    assert!(zones.is_empty());
    assert_eq!(total_pages, 1);
}

#[test]
fn parse_zone_page_skips_malformed_names() {
    let body = r#"{
        "success": true,
        "result": [
            {"id": "z1", "name": "bad..example.com", "status": "active"},
            {"id": "z2", "name": "example.com", "status": "active"}
        ]
    }"#;
    let (zones, _) = parse_zone_page(body).unwrap();
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0].id.as_deref(), Some("z2"));
}

#[test]
fn failed_response_is_rejected() {
    let body = r#"{
        "success": false,
        "errors": [{"code": 9109, "message": "Invalid access token"}],
        "result": null
    }"#;
    match parse_zone_page(body) {
        Err(StoreError::Rejected(detail)) => {
            assert_eq!(detail, "9109: Invalid access token");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn missing_record_is_not_found() {
    let body = r#"{
        "success": false,
        "errors": [{"code": 81044, "message": "Record does not exist."}]
    }"#;
    assert!(matches!(parse_records(body), Err(StoreError::NotFound(_))));
}

#[test]
fn garbage_is_json_error() {
    assert!(matches!(parse_records("<html>"), Err(StoreError::Json(_))));
}

#[test]
fn parse_records_keeps_ids_and_absolute_names() {
    let body = r#"{
        "success": true,
        "result": [
            {
                "id": "r1",
                "name": "_acme-challenge.www.example.com",
                "type": "TXT",
                "content": "token",
                "ttl": 120
            }
        ]
    }"#;
    let records = parse_records(body).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id.as_deref(), Some("r1"));
    assert_eq!(records[0].name, "_acme-challenge.www.example.com");
    assert_eq!(records[0].kind, RecordType::Txt);
    assert_eq!(records[0].value, "token");
    assert_eq!(records[0].ttl, Some(120));
}

#[test]
fn parse_created_record_reads_single_result() {
    let body = r#"{
        "success": true,
        "result": {
            "id": "r9",
            "name": "_acme-challenge.example.com",
            "type": "TXT",
            "content": "\"quoted\"",
            "ttl": 1
        }
    }"#;
    let record = parse_created_record(body).unwrap();
    assert_eq!(record.id.as_deref(), Some("r9"));
    assert_eq!(record.value, "\"quoted\"");
}

#[test]
fn new_provider_has_no_env_dependency() {
    let _cloudflare = Cloudflare::new("token").api_base("http://localhost:8080/client/v4/");
}
