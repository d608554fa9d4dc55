use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Env {
    dir: TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("vmail-cli").expect("binary");
        cmd.env_remove("RUST_LOG")
            .env("VMAIL_DB", self.dir.path().join("vmail.sqlite"));
        cmd
    }

    fn run(&self, args: &[&str]) {
        self.cmd().args(args).assert().success();
    }
}

const HASH: &str = "{SHA512-CRYPT}$6$saltsalt$digest";

#[test]
fn create_and_show_domain() {
    let env = Env::new();
    env.cmd()
        .args(["create", "domain", "example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("domain example.com created"));
    env.run(&["create", "mailbox", "bob@example.com", "--password-hash", HASH]);
    env.run(&[
        "create",
        "alias",
        "*@example.com",
        "catch@other.com",
        "bob@example.com",
    ]);
    env.run(&["create", "alias", "info@example.com", "team@other.com"]);

    env.cmd()
        .args(["show", "example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bob@example.com"))
        .stdout(predicate::str::contains(
            "*@example.com -> bob@example.com [enabled], catch@other.com [enabled]",
        ))
        .stdout(predicate::str::contains(
            "info@example.com -> team@other.com [enabled]",
        ));
}

#[test]
fn domains_filter() {
    let env = Env::new();
    env.run(&["create", "domain", "example.com"]);
    env.run(&["create", "domain", "other.net"]);
    env.cmd()
        .args(["domains", "example"])
        .assert()
        .success()
        .stdout("example.com\n");
}

#[test]
fn duplicate_domain_fails() {
    let env = Env::new();
    env.run(&["create", "domain", "example.com"]);
    env.cmd()
        .args(["create", "domain", "example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn invalid_hash_is_rejected_unless_raw() {
    let env = Env::new();
    env.run(&["create", "domain", "example.com"]);
    env.cmd()
        .args(["create", "mailbox", "bob@example.com", "--password-hash", "{PLAIN}x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("{SHA512-CRYPT}$6$"));
    env.run(&[
        "create",
        "mailbox",
        "bob@example.com",
        "--password-hash",
        "{PLAIN}x",
        "--raw-password-hash",
    ]);
}

#[test]
fn short_password_is_rejected() {
    let env = Env::new();
    env.run(&["create", "domain", "example.com"]);
    env.cmd()
        .args(["create", "mailbox", "bob@example.com", "--password", "short"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("too short"));
}

#[test]
fn invalid_address_is_rejected() {
    let env = Env::new();
    env.cmd()
        .args(["delete", "mailbox", "bob.example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid email address"));
}

#[test]
fn delete_domain_reports_cascade() {
    let env = Env::new();
    env.run(&["create", "domain", "example.com"]);
    env.run(&["create", "mailbox", "bob@example.com", "--password-hash", HASH]);
    env.run(&["create", "alias", "info@example.com", "bob@example.com"]);
    env.cmd()
        .args(["delete", "domain", "example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(1 mailboxes, 1 aliases)"));
    env.cmd()
        .args(["show", "example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn modify_and_delete_alias() {
    let env = Env::new();
    env.run(&["create", "domain", "example.com"]);
    env.run(&["create", "alias", "info@example.com", "a@other.com", "b@other.com"]);
    env.cmd()
        .args(["modify", "info@example.com", "--disable", "--blacklist"])
        .assert()
        .success()
        .stdout(predicate::str::contains("successfully updated 2 aliases"));
    env.cmd()
        .args(["show", "example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "a@other.com [disabled, blacklisted], b@other.com [disabled, blacklisted]",
        ));

    env.run(&["delete", "alias", "info@example.com", "a@other.com"]);
    env.run(&["delete", "alias", "info@example.com"]);
    env.cmd()
        .args(["delete", "alias", "info@example.com"])
        .assert()
        .failure();
}

#[test]
fn modify_without_flags_fails() {
    let env = Env::new();
    env.run(&["create", "domain", "example.com"]);
    env.cmd()
        .args(["modify", "info@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to modify"));
}
