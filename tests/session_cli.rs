mod support;

use predicates::str::contains;
use support::TestStore;

#[test]
fn login_then_status_then_logout() {
    let store = TestStore::new();

    store
        .cmd()
        .args(["login", "--username", "casey", "--password", "abcdef1!"])
        .assert()
        .success()
        .stdout(contains("Logged in"))
        .stdout(contains("stub"));

    store
        .cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(contains("logged in as casey"));

    store.cmd().arg("logout").assert().success();

    store
        .cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(contains("logged out"));
}

#[test]
fn login_rejects_password_without_digit_or_special() {
    let store = TestStore::new();
    store
        .cmd()
        .args(["login", "--username", "casey", "--password", "abcdefgh"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("Password must contain at least 8 characters"));
}

#[test]
fn login_rejects_out_of_range_usernames() {
    let store = TestStore::new();
    store
        .cmd()
        .args(["login", "--username", "ab", "--password", "abcdef1!"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("Username must be at least 3 characters"));

    let long = "u".repeat(21);
    store
        .cmd()
        .args(["login", "--username", &long, "--password", "abcdef1!"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("Username must be at most 20 characters"));
}

#[test]
fn password_is_never_persisted() {
    let store = TestStore::new();
    store.login();

    let session = store.session_raw();
    assert!(session.contains("casey"));
    assert!(!session.contains("abcdef1!"));
}

#[test]
fn session_survives_separate_invocations() {
    let store = TestStore::new();
    store.add("Buy milk", "Buy milk from the store today");
    store.login();
    let id = store.first_id();

    // A later invocation still has the session and may delete.
    store.cmd().args(["delete", &id]).assert().success();
}
