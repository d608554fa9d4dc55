use super::*;
use crate::address::{Mailbox, SourceAddress, SourceLocal};
use crate::password::PasswordHash;
use crate::store::{Directory, NewAccount, NewAlias};

fn seeded() -> Directory {
    let dir = Directory::open_in_memory().expect("in-memory store");
    for name in ["example.com", "example.org", "other.net"] {
        dir.create_domain(name).expect("domain");
    }
    dir
}

fn add_alias(dir: &Directory, src: &str, dest: &str) {
    let alias = NewAlias::new(
        SourceAddress::parse(src).expect("source"),
        Mailbox::parse(dest).expect("destination"),
    );
    dir.create_alias(&alias).expect("alias");
}

#[test]
fn find_all_domains_filters_by_substring() {
    let dir = seeded();
    let names = |filter: &str| -> Vec<String> {
        dir.find_all_domains(filter)
            .expect("list")
            .into_iter()
            .map(|d| d.name)
            .collect()
    };
    assert_eq!(names(""), ["example.com", "example.org", "other.net"]);
    assert_eq!(names("example"), ["example.com", "example.org"]);
    assert_eq!(names(".net"), ["other.net"]);
    assert!(names("EXAMPLE").is_empty());
    // pas de jokers LIKE
    assert!(names("%").is_empty());
}

#[test]
fn find_domain_exact_match() {
    let dir = seeded();
    assert_eq!(dir.find_domain("example.com").expect("find").name, "example.com");
    assert!(dir.find_domain("example").expect_err("partial").is_not_found());
}

#[test]
fn find_all_accounts_is_scoped_to_domain() {
    let dir = seeded();
    let hash = PasswordHash::raw("{SHA512-CRYPT}$6$salt$digest");
    for address in ["bob@example.com", "alice@example.com", "bob@example.org"] {
        let mailbox = Mailbox::parse(address).expect("mailbox");
        dir.create_account(&NewAccount::new(mailbox, hash.clone()))
            .expect("account");
    }
    let accounts = dir.find_all_accounts("example.com").expect("list");
    let users: Vec<_> = accounts.iter().map(|a| a.username.as_str()).collect();
    assert_eq!(users, ["bob", "alice"]);
    assert!(accounts.iter().all(|a| a.domain == "example.com"));
}

#[test]
fn find_all_aliases_orders_catchall_first() {
    let dir = seeded();
    add_alias(&dir, "info@example.com", "b@other.net");
    add_alias(&dir, "info@example.com", "a@other.net");
    add_alias(&dir, "*@example.com", "z@other.net");
    add_alias(&dir, "abuse@example.com", "a@other.net");

    let rows = dir.find_all_aliases("example.com").expect("list");
    let keys: Vec<_> = rows
        .iter()
        .map(|a| format!("{} -> {}", a.source, a.destination))
        .collect();
    assert_eq!(keys, [
        "* -> z@other.net",
        "abuse -> a@other.net",
        "info -> a@other.net",
        "info -> b@other.net",
    ]);
}

#[test]
fn catchall_and_literal_groups_stay_apart() {
    let dir = seeded();
    add_alias(&dir, "*@example.com", "catch@other.com");
    add_alias(&dir, "info@example.com", "team@other.com");

    let groups = group_aliases(
        "example.com",
        &dir.find_all_aliases("example.com").expect("list"),
    );
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].key(), "*");
    assert_eq!(groups[0].source, SourceLocal::Catchall);
    assert_eq!(groups[0].destinations.len(), 1);
    assert_eq!(groups[1].key(), "info");
    assert_eq!(groups[1].destinations.len(), 1);
}

#[test]
fn same_destination_under_catchall_and_literal() {
    let dir = seeded();
    add_alias(&dir, "*@example.com", "team@other.com");
    add_alias(&dir, "team@example.com", "team@other.com");

    let groups = group_aliases(
        "example.com",
        &dir.find_all_aliases("example.com").expect("list"),
    );
    let keys: Vec<_> = groups.iter().map(AliasGroup::key).collect();
    assert_eq!(keys, ["*", "team"]);
}

#[test]
fn flags_are_per_destination() {
    let mut dir = seeded();
    add_alias(&dir, "info@example.com", "a@other.net");
    add_alias(&dir, "info@example.com", "b@other.net");
    add_alias(&dir, "*@example.com", "catch@other.net");

    let mut row = dir
        .find_aliases(&SourceAddress::parse("info@example.com").expect("source"))
        .expect("find")
        .remove(1);
    row.blacklisted = true;
    dir.update_alias(&row).expect("update");
    dir.modify_aliases(
        &SourceAddress::catchall("example.com"),
        &crate::store::AliasChange {
            enabled: Some(false),
            blacklisted: None,
        },
    )
    .expect("disable catchall");

    let report = dir.show_domain("example.com").expect("report");
    let rendered = report
        .aliases
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(rendered, @r"
    *@example.com -> catch@other.net [disabled]
    info@example.com -> a@other.net [enabled], b@other.net [enabled, blacklisted]
    ");
}

#[test]
fn show_domain_collects_everything() {
    let dir = seeded();
    let hash = PasswordHash::raw("{SHA512-CRYPT}$6$salt$digest");
    dir.create_account(&NewAccount::new(
        Mailbox::parse("bob@example.com").expect("mailbox"),
        hash,
    ))
    .expect("account");
    add_alias(&dir, "*@example.com", "bob@example.com");

    let report = dir.show_domain("example.com").expect("report");
    assert_eq!(report.domain.name, "example.com");
    assert_eq!(report.accounts.len(), 1);
    assert_eq!(report.aliases.len(), 1);
    assert_eq!(report.aliases[0].domain, "example.com");

    let empty = dir.show_domain("other.net").expect("report");
    assert!(empty.accounts.is_empty());
    assert!(empty.aliases.is_empty());

    assert!(dir.show_domain("missing.org").expect_err("unknown").is_not_found());
}

#[test]
fn group_aliases_handles_unsorted_rows() {
    use crate::store::Alias;

    let row = |id, source: SourceLocal, dest: &str| Alias {
        id,
        source,
        source_domain: "example.com".into(),
        destination: Mailbox::parse(dest).expect("destination"),
        enabled: true,
        blacklisted: false,
    };
    let rows = vec![
        row(1, SourceLocal::Local("zed".into()), "a@x.org"),
        row(2, SourceLocal::Catchall, "b@x.org"),
        row(3, SourceLocal::Local("zed".into()), "c@x.org"),
    ];
    let groups = group_aliases("example.com", &rows);
    assert_eq!(groups.len(), 2);
    assert!(groups[0].source.is_catchall());
    let ids: Vec<_> = groups[1].destinations.iter().map(|d| d.id).collect();
    assert_eq!(ids, [1, 3]);
}
