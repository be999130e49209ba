use zonecut::error::ChallengeError;
use zonecut::name::DnsName;
use zonecut::relative::{relative_name, resolve};
use zonecut::zone::Zone;

fn name(s: &str) -> DnsName {
    DnsName::parse(s).unwrap()
}

fn zone(s: &str) -> Zone {
    Zone::new(s, true).unwrap()
}

#[test]
fn strips_zone_labels() {
    let rel = relative_name(&name("_acme-challenge.a.b.example.com."), &zone("example.com")).unwrap();
    assert_eq!(rel.labels(), ["_acme-challenge", "a", "b"]);
    assert_eq!(rel.render("@"), "_acme-challenge.a.b");
}

#[test]
fn apex_renders_with_caller_convention() {
    let rel = relative_name(&name("example.com"), &zone("example.com.")).unwrap();
    assert!(rel.is_apex());
    assert_eq!(rel.render("@"), "@");
    assert_eq!(rel.render(""), "");
    assert_eq!(rel.to_string(), "@");
}

#[test]
fn rejects_zone_not_above_target() {
    let err = relative_name(&name("_acme-challenge.example.com"), &zone("other.com")).unwrap_err();
    match err {
        ChallengeError::NotUnderZone { fqdn, zone } => {
            assert_eq!(fqdn, "_acme-challenge.example.com");
            assert_eq!(zone, "other.com");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn rejects_string_suffix_zone() {
    let err = relative_name(&name("www.notexample.com"), &zone("example.com")).unwrap_err();
    assert!(matches!(err, ChallengeError::NotUnderZone { .. }));
}

#[test]
fn rejects_zone_longer_than_target() {
    let err = relative_name(&name("example.com"), &zone("www.example.com")).unwrap_err();
    assert!(matches!(err, ChallengeError::NotUnderZone { .. }));
}

#[test]
fn relative_plus_zone_gives_back_target() {
    let cases = [
        ("_acme-challenge.example.com.", "example.com"),
        ("_acme-challenge.www.example.com", "example.com."),
        ("_acme-challenge.a.b.c.example.co.uk", "b.c.example.co.uk"),
        ("_acme-challenge.sub.example.com", "sub.example.com"),
        ("_ACME-CHALLENGE.Example.org", "example.ORG"),
    ];
    for (fqdn, zone_name) in cases {
        let target = name(fqdn);
        let z = zone(zone_name);
        let rel = relative_name(&target, &z).unwrap();
        let rebuilt = name(&format!("{}.{}", rel.render("@"), z.name));
        assert_eq!(rebuilt, target, "{fqdn} under {zone_name}");
    }
}

#[test]
fn resolve_combines_zone_and_relative_name() {
    let zones = vec![zone("example.com"), zone("sub.example.com")];
    let m = resolve(&name("_acme-challenge.www.sub.example.com"), &zones).unwrap();
    assert_eq!(m.zone.name.to_string(), "sub.example.com");
    assert_eq!(m.relative.render("@"), "_acme-challenge.www");
    assert_eq!(m.target.to_string(), "_acme-challenge.www.sub.example.com");
}

#[test]
fn resolve_apex_has_zero_labels() {
    let zones = vec![zone("example.com")];
    let m = resolve(&name("example.com."), &zones).unwrap();
    assert!(m.relative.labels().is_empty());
}

#[test]
fn match_recognizes_absolute_and_relative_names() {
    let zones = vec![zone("example.com")];
    let m = resolve(&name("_acme-challenge.www.example.com"), &zones).unwrap();
    assert!(m.names("_acme-challenge.www"));
    assert!(m.names("_ACME-challenge.WWW"));
    assert!(m.names("_acme-challenge.www.example.com"));
    assert!(m.names("_acme-challenge.www.example.com."));
    assert!(!m.names("_acme-challenge"));
    assert!(!m.names("@"));
    assert!(!m.names("www.example.com"));
    assert!(!m.names("bad..name"));
}

#[test]
fn match_at_apex_accepts_apex_spellings() {
    let zones = vec![zone("example.com")];
    let m = resolve(&name("example.com"), &zones).unwrap();
    assert!(m.names("@"));
    assert!(m.names(""));
    assert!(m.names("example.com."));
}
