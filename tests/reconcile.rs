use zonecut::name::DnsName;
use zonecut::reconcile::{Action, DeleteAction, reconcile, reconcile_delete};
use zonecut::record::{Record, RecordType};
use zonecut::relative::{Match, resolve};
use zonecut::zone::Zone;

fn challenge_match() -> Match {
    let zones = vec![Zone::new("example.com", true).unwrap()];
    resolve(
        &DnsName::parse("_acme-challenge.www.example.com").unwrap(),
        &zones,
    )
    .unwrap()
}

fn txt(name: &str, value: &str) -> Record {
    Record::txt(name, value, Some(120))
}

#[test]
fn creates_when_name_is_empty() {
    let m = challenge_match();
    assert_eq!(reconcile(&m, "v1", &[]), Action::Create);
}

#[test]
fn existing_value_is_already_present() {
    let m = challenge_match();
    let existing = vec![txt("_acme-challenge.www", "v1")];
    assert_eq!(
        reconcile(&m, "v1", &existing),
        Action::AlreadyPresent(existing[0].clone())
    );
}

#[test]
fn other_value_triggers_additional_create() {
    let m = challenge_match();
    let existing = vec![txt("_acme-challenge.www", "v1")];
    assert_eq!(reconcile(&m, "v2", &existing), Action::CreateAdditional);
}

#[test]
fn absolute_record_names_count() {
    let m = challenge_match();
    let existing = vec![txt("_acme-challenge.www.example.com.", "v1")];
    assert!(matches!(
        reconcile(&m, "v1", &existing),
        Action::AlreadyPresent(_)
    ));
}

#[test]
fn records_at_other_names_are_ignored() {
    let m = challenge_match();
    let existing = vec![txt("_acme-challenge", "v1"), txt("www", "v1")];
    assert_eq!(reconcile(&m, "v1", &existing), Action::Create);
}

#[test]
fn non_txt_records_are_ignored() {
    let m = challenge_match();
    let mut cname = txt("_acme-challenge.www", "v1");
    cname.kind = RecordType::Other("CNAME".into());
    assert_eq!(reconcile(&m, "v1", &[cname]), Action::Create);
}

#[test]
fn value_comparison_is_exact() {
    let m = challenge_match();
    let existing = vec![txt("_acme-challenge.www", "\"v1\"")];
    assert_eq!(reconcile(&m, "v1", &existing), Action::CreateAdditional);
    assert!(matches!(
        reconcile(&m, "\"v1\"", &existing),
        Action::AlreadyPresent(_)
    ));
}

#[test]
fn delete_targets_only_matching_value() {
    let m = challenge_match();
    let existing = vec![
        txt("_acme-challenge.www", "v1"),
        txt("_acme-challenge.www", "v2"),
    ];
    assert_eq!(
        reconcile_delete(&m, "v1", &existing),
        DeleteAction::Delete(vec![existing[0].clone()])
    );
}

#[test]
fn delete_includes_duplicates_of_value() {
    let m = challenge_match();
    let existing = vec![
        txt("_acme-challenge.www", "v1"),
        txt("_acme-challenge.www.example.com", "v1"),
    ];
    match reconcile_delete(&m, "v1", &existing) {
        DeleteAction::Delete(records) => assert_eq!(records.len(), 2),
        DeleteAction::NothingToDelete => panic!("expected records to delete"),
    }
}

#[test]
fn delete_of_absent_value_is_nothing() {
    let m = challenge_match();
    let existing = vec![txt("_acme-challenge.www", "v2")];
    assert_eq!(
        reconcile_delete(&m, "v1", &existing),
        DeleteAction::NothingToDelete
    );
    assert_eq!(reconcile_delete(&m, "v1", &[]), DeleteAction::NothingToDelete);
}

#[test]
fn delete_never_touches_other_names() {
    let m = challenge_match();
    let existing = vec![txt("_acme-challenge", "v1")];
    assert_eq!(
        reconcile_delete(&m, "v1", &existing),
        DeleteAction::NothingToDelete
    );
}

#[test]
fn record_type_parses_case_insensitively() {
    assert_eq!("txt".parse::<RecordType>().unwrap(), RecordType::Txt);
    assert_eq!(
        "cname".parse::<RecordType>().unwrap(),
        RecordType::Other("CNAME".into())
    );
    assert_eq!(RecordType::Txt.to_string(), "TXT");
}

#[test]
fn record_serializes_type_as_string() {
    let json = serde_json::to_value(txt("_acme-challenge", "v1")).unwrap();
    assert_eq!(json["type"], "TXT");
    assert_eq!(json["ttl"], 120);
    assert!(json.get("id").is_none());
}
