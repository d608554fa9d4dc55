use proptest::prelude::*;

use super::{AddressError, Mailbox, SourceAddress, SourceLocal, split_address};

#[test]
fn splits_basic_address() {
    let (user, domain) = split_address("bob@example.com").expect("valid address");
    assert_eq!(user, "bob");
    assert_eq!(domain, "example.com");
}

#[test]
fn rejects_missing_and_repeated_separator() {
    assert!(matches!(
        split_address("bob.example.com"),
        Err(AddressError::InvalidAddress { .. })
    ));
    assert!(matches!(
        split_address("a@@b"),
        Err(AddressError::InvalidAddress { .. })
    ));
    assert!(matches!(
        split_address("a@b@c"),
        Err(AddressError::InvalidAddress { .. })
    ));
}

#[test]
fn rejects_empty_sides() {
    assert!(matches!(
        split_address("@example.com"),
        Err(AddressError::EmptyUser { .. })
    ));
    assert!(matches!(
        split_address("bob@"),
        Err(AddressError::EmptyDomain { .. })
    ));
    assert!(split_address("@").is_err());
}

#[test]
fn splitter_keeps_wildcard_literal() {
    let (user, _) = split_address("*@example.com").expect("valid address");
    assert_eq!(user, "*");

    let dest = Mailbox::parse("*@example.com").expect("valid address");
    assert_eq!(dest.user, "*");
}

#[test]
fn source_parse_maps_wildcard_to_catchall() {
    let src = SourceAddress::parse("*@example.com").expect("valid source");
    assert_eq!(src.local, SourceLocal::Catchall);
    assert_eq!(src.local.as_column(), None);
    assert_eq!(src.to_string(), "*@example.com");

    let src = SourceAddress::parse("info@example.com").expect("valid source");
    assert_eq!(src.local.as_column(), Some("info"));
    assert!(!src.local.is_catchall());
}

#[test]
fn local_constructor_maps_wildcard_to_catchall() {
    let src = SourceAddress::local("*", "example.com");
    assert_eq!(src, SourceAddress::catchall("example.com"));
    assert_eq!(src, SourceAddress::parse("*@example.com").expect("valid source"));

    let src = SourceAddress::local("info", "example.com");
    assert_eq!(src.local, SourceLocal::Local("info".into()));
}

#[test]
fn column_round_trip() {
    assert_eq!(SourceLocal::from_column(None), SourceLocal::Catchall);
    assert_eq!(
        SourceLocal::from_column(Some("info".into())),
        SourceLocal::Local("info".into())
    );
    assert_eq!(SourceLocal::Catchall.key(), "*");
}

proptest! {
    #[test]
    fn rejoin_reproduces_input(user in "[a-z0-9._+-]{1,20}", domain in "[a-z0-9.-]{1,30}") {
        let address = format!("{user}@{domain}");
        let (u, d) = split_address(&address).unwrap();
        prop_assert_eq!(format!("{u}@{d}"), address);
    }

    #[test]
    fn inputs_without_single_separator_fail(s in "[^@]{0,30}(@[^@]{0,10}@[^@]{0,10})?") {
        prop_assert!(split_address(&s).is_err());
    }
}
