use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

fn cli_exe() -> &'static str {
    env!("CARGO_BIN_EXE_xmlvalid")
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("xmlvalid-core")
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn validate(xml: &str, extra: &[&str]) -> std::process::Output {
    Command::new(cli_exe())
        .args(["validate", "--schema"])
        .arg(fixture("order.xsd"))
        .arg("--xml")
        .arg(fixture(xml))
        .args(extra)
        .output()
        .expect("run validate command")
}

#[test]
fn validate_command_reports_ok() {
    let output = validate("order-valid.xml", &[]);
    assert!(
        output.status.success(),
        "validate command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("OK"));
}

#[test]
fn validate_command_reports_ok_for_documents() {
    let output = validate("order-valid.xml", &["--document"]);
    assert!(
        output.status.success(),
        "validate --document failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn invalid_file_exits_with_failure() {
    let output = validate("order-invalid.xml", &[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Xml is not valid because of the following error(s): "));
    assert!(stderr.contains("(Line:"));
}

#[test]
fn malformed_file_is_reported() {
    let output = validate("order-malformed.xml", &[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Xml is not well-formed: "));
}

#[test]
fn malformed_file_is_reported_for_documents() {
    let output = validate("order-malformed.xml", &["--document"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Xml is not well-formed: "), "stderr: {stderr}");
    assert!(!stderr.contains("failed to parse"));
}

#[test]
fn trailing_content_is_not_well_formed() {
    for extra in [&[][..], &["--document"][..]] {
        let output = validate("order-trailing.xml", extra);
        assert!(!output.status.success(), "accepted with {extra:?}");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("Xml is not well-formed: "),
            "{extra:?} stderr: {stderr}"
        );
    }
}

#[test]
fn config_file_overrides_templates() {
    let mut config = tempfile::NamedTempFile::new().expect("temp config");
    writeln!(config, "[messages]\nxmlInvalid = \"Order rejected\"").expect("write config");

    let config_path = config.path().to_str().expect("utf-8 path").to_string();
    let output = validate("order-invalid.xml", &["--config", &config_path]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Order rejected"));
}

#[test]
fn missing_schema_is_an_error() {
    let output = Command::new(cli_exe())
        .args(["validate", "--schema"])
        .arg(fixture("absent.xsd"))
        .arg("--xml")
        .arg(fixture("order-valid.xml"))
        .output()
        .expect("run validate command");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"));
}
