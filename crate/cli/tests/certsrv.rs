use assert_cmd::Command;
use predicates::prelude::*;

const PROG_NAME: &str = "certsrv";

#[test]
fn test_name_lookup() {
    Command::cargo_bin(PROG_NAME)
        .unwrap()
        .args(["name", "ca-response", "CR_DISP_UNDER_SUBMISSION"])
        .assert()
        .success()
        .stdout("5\n");
}

#[test]
fn test_unknown_name_fails() {
    Command::cargo_bin(PROG_NAME)
        .unwrap()
        .args(["name", "request-disposition", "Approved"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "ERROR: Unknown symbol in CertificateRequest.Disposition: Approved",
        ));
}

#[test]
fn test_unrecognized_value_succeeds() {
    Command::cargo_bin(PROG_NAME)
        .unwrap()
        .args(["value", "request-type", "999"])
        .assert()
        .success()
        .stdout("Unrecognized(999)\n");
}

#[test]
fn test_json_from_env() {
    Command::cargo_bin(PROG_NAME)
        .unwrap()
        .env("CERTSRV_JSON", "true")
        .args(["flags", "compose", "PKCS10", "RPC"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""value":131328"#))
        .stdout(predicate::str::contains(r#""flags":"PKCS10 | RPC""#));
}

#[test]
fn test_invalid_domain_is_rejected() {
    Command::cargo_bin(PROG_NAME)
        .unwrap()
        .args(["list", "crl"])
        .assert()
        .failure();
}
