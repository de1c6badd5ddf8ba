use serde_json::Value;

use super::run_cli;
use crate::{
    actions::{Domain, list::ListAction, lookup::NameAction},
    error::CliError,
};

#[test]
fn test_name() {
    assert_eq!("3\n", run_cli(&["name", "ca-response", "Issued"]).unwrap());
    assert_eq!(
        "31\n",
        run_cli(&["name", "request-disposition", "DB_DISP_DENIED"]).unwrap()
    );
    assert_eq!(
        "524288\n",
        run_cli(&["name", "request-type", "CRLs"]).unwrap()
    );
}

#[test]
fn test_unknown_name() {
    let err = run_cli(&["name", "ca-response", "Approved"]).unwrap_err();
    assert!(matches!(err, CliError::Code(_)));
    assert_eq!(
        "Unknown symbol in CAResponse.Disposition: Approved",
        err.to_string()
    );
}

#[test]
fn test_value() {
    assert_eq!("Issued\n", run_cli(&["value", "ca-response", "3"]).unwrap());
    assert_eq!(
        "Revoked\n",
        run_cli(&["value", "request-disposition", "0x15"]).unwrap()
    );
    assert_eq!(
        "Revoked\n",
        run_cli(&["value", "ca-response", "6"]).unwrap()
    );
}

#[test]
fn test_unrecognized_value_is_not_an_error() {
    for domain in ["ca-response", "request-disposition", "request-type"] {
        assert_eq!(
            "Unrecognized(999)\n",
            run_cli(&["value", domain, "999"]).unwrap()
        );
    }
    assert_eq!(
        "Unrecognized(4294967295)\n",
        run_cli(&["value", "ca-response", "-1"]).unwrap()
    );
}

#[test]
fn test_invalid_value() {
    let err = run_cli(&["value", "ca-response", "three"]).unwrap_err();
    assert!(matches!(err, CliError::InvalidValue(_)));
    assert!(err.to_string().starts_with("Invalid value: three"));
}

#[test]
fn test_json_output() {
    let output = run_cli(&["--json", "value", "request-disposition", "20"]).unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["domain"], "CertificateRequest.Disposition");
    assert_eq!(value["name"], "Issued");
    assert_eq!(value["windows_name"], "DB_DISP_ISSUED");
    assert_eq!(value["recognized"], true);

    let output = run_cli(&["--json", "value", "ca-response", "999"]).unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["recognized"], false);
    assert!(value["name"].is_null());
    assert_eq!(value["value"], 999);

    let output = run_cli(&["--json", "name", "ca-response", "IssuedOutOfBand"]).unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["value"], 4);
    assert_eq!(value["windows_name"], "CR_DISP_ISSUED_OUT_OF_BAND");
}

#[test]
fn test_list() {
    let output = run_cli(&["list", "request-disposition"]).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(10, lines.len());
    assert!(lines[0].starts_with("Active"));
    assert!(lines[0].ends_with(" 8"));
    assert!(lines[9].contains("DB_DISP_DENIED"));

    let mut out = Vec::new();
    ListAction::new(Domain::CaResponse).run(true, &mut out).unwrap();
    let value: Value = serde_json::from_slice(&out).unwrap();
    let members = value.as_array().unwrap();
    assert_eq!(7, members.len());
    assert_eq!(members[3]["name"], "Issued");
    assert_eq!(members[3]["value"], 3);
}

#[test]
fn test_actions_in_process() {
    let mut out = Vec::new();
    NameAction::new(Domain::RequestType, "CR_IN_PKCS7".to_owned())
        .run(false, &mut out)
        .unwrap();
    assert_eq!(b"768\n".as_slice(), out.as_slice());
}
