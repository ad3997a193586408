use initext::{ConfigEvent, ConfigSet, Error, IniDocument};

fn set_from(text: &str) -> ConfigSet {
    let doc = IniDocument::from_str(text).unwrap();
    ConfigSet::from_document(&doc)
}

#[test]
fn test_placeholder_inside_literal_text() {
    let set = set_from("[s]\nb = X\nkey = \"a${b}c\"\n");
    // the quotes belong to the INI layer; the stored value is a${b}c
    assert_eq!(set.get("s").unwrap().get("key"), Some("a${b}c"));
    assert_eq!(set.get_expanded("s", "key").unwrap(), "aXc");
}

#[test]
fn test_expanding_plain_value_is_identity() {
    let set = set_from("[s]\nb = X\n");
    assert_eq!(set.get_expanded("s", "b").unwrap(), "X");
}

#[test]
fn test_cross_section_reference() {
    let set = set_from("[foo]\nkey = 42\n[bar]\nuses = ${foo|key}!\n");
    assert_eq!(set.get_expanded("bar", "uses").unwrap(), "42!");
}

#[test]
fn test_missing_section_in_reference() {
    let set = set_from("[bar]\nuses = ${foo|key}\n");
    assert!(matches!(
        set.get_expanded("bar", "uses"),
        Err(Error::ConfigNotFound { .. })
    ));
}

#[test]
fn test_missing_key_in_referenced_section() {
    let set = set_from("[foo]\nother = 1\n[bar]\nuses = ${foo|key}\n");
    assert!(matches!(
        set.get_expanded("bar", "uses"),
        Err(Error::KeyNotFound { .. })
    ));
}

#[test]
fn test_self_reference_raises() {
    let set = set_from("[s]\nitself = ${itself}\n");
    assert!(matches!(
        set.get_expanded("s", "itself"),
        Err(Error::SelfReferenceCycle { .. })
    ));
}

#[test]
fn test_nested_references_resolve_through_passes() {
    let set = set_from("[s]\na = 1\nb = ${a}2\nc = ${b}3\n");
    assert_eq!(set.get_expanded("s", "c").unwrap(), "123");
}

#[test]
fn test_repeated_placeholder_replaced_everywhere() {
    let set = set_from("[s]\nsep = -\nrow = a${sep}b${sep}c\n");
    assert_eq!(set.get_expanded("s", "row").unwrap(), "a-b-c");
}

#[test]
fn test_two_way_cycle_terminates_with_error() {
    let set = set_from("[s]\na = ${b}\nb = ${a}\n");
    assert!(matches!(
        set.get_expanded("s", "a"),
        Err(Error::SelfReferenceCycle { .. })
    ));
}

#[test]
fn test_failed_batch_leaves_unresolved_value_intact() {
    let mut set = set_from("[s]\ngood = ${a}\na = 1\nbad = ${missing}\n");
    assert!(set.expand_all().is_err());
    // the failing key is untouched
    assert_eq!(set.get("s").unwrap().get("bad"), Some("${missing}"));
    // keys expanded before the failure keep their resolved values
    assert_eq!(set.get("s").unwrap().get("good"), Some("1"));
}

#[test]
fn test_batch_expansion_covers_every_config() {
    let mut set = set_from(
        "[defaults]\nroot = /srv\n[web]\nstatic = ${defaults|root}/static\n[worker]\nspool = ${defaults|root}/spool\n",
    );
    set.expand_all().unwrap();
    assert_eq!(set.get("web").unwrap().get("static"), Some("/srv/static"));
    assert_eq!(set.get("worker").unwrap().get("spool"), Some("/srv/spool"));
}

#[test]
fn test_get_expanded_does_not_mutate() {
    let set = set_from("[s]\na = 1\nb = ${a}\n");
    assert_eq!(set.get_expanded("s", "b").unwrap(), "1");
    assert_eq!(set.get("s").unwrap().get("b"), Some("${a}"));
}

#[test]
fn test_expansion_of_unknown_config() {
    let set = ConfigSet::new();
    assert!(matches!(
        set.get_expanded("nowhere", "key"),
        Err(Error::ConfigNotFound { .. })
    ));
}

#[test]
fn test_expansion_of_unknown_key() {
    let set = set_from("[s]\na = 1\n");
    assert!(matches!(
        set.get_expanded("s", "nope"),
        Err(Error::KeyNotFound { .. })
    ));
}

#[test]
fn test_expand_records_write_back_event() {
    let mut set = set_from("[s]\na = 1\nb = ${a}\n");
    set.expand("s", "b").unwrap();
    let events = set.get_mut("s").unwrap().drain_events();
    assert_eq!(
        events,
        vec![ConfigEvent::KeySet {
            key: "b".to_string(),
            value: "1".to_string(),
        }]
    );
}

#[test]
fn test_round_trip_through_document_after_expansion() {
    let doc = IniDocument::from_str(
        "[paths]\nroot = /opt/app ; install prefix\nbin = ${root}/bin\n",
    )
    .unwrap();

    let mut set = ConfigSet::from_document(&doc);
    set.expand_all().unwrap();

    let mut doc = doc;
    set.apply_to_document(&mut doc);
    let section = doc.section("paths").unwrap();
    assert_eq!(section.get("bin"), Some("/opt/app/bin"));
    // the comment on root survives reconciliation
    assert_eq!(section.item(0).unwrap().comment(), Some("install prefix"));

    let reloaded = IniDocument::from_str(&doc.to_string()).unwrap();
    assert_eq!(
        reloaded.section("paths").unwrap().get("bin"),
        Some("/opt/app/bin")
    );
}

#[test]
fn test_manual_tree_without_document() {
    let mut set = ConfigSet::new();
    let base = set.add("base");
    base.set("greeting", "hello");
    base.set("message", "${greeting} world");
    assert_eq!(set.get_expanded("base", "message").unwrap(), "hello world");
}
