//! Integration tests for the docfill binary

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo_bin;
use docfill_testkit::{DocxBuilder, read_entry, temp_dir_in_workspace};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Command running in `dir` with a clean environment
fn docfill(dir: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("DOCFILL_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper: the three default template files under `root/templates`
fn write_default_templates(root: &Path) {
    let templates = root.join("templates");
    fs::create_dir_all(&templates).unwrap();

    let one = DocxBuilder::new()
        .styled_paragraph("Title", "Engagement letter for {client_name}")
        .paragraph("Registered office: {registered_address}")
        .runs(&["Audit fee: {{", "audit_fee", "}}"])
        .blank()
        .paragraph("Dated {{{report_date}}}")
        .paragraph("Entity type: {entity_type/'Deposit taking','Non-deposit taking'}")
        .build();
    let two = DocxBuilder::new().paragraph("Plain {{amount}}").build();
    let three = DocxBuilder::new().paragraph("Nothing to fill").build();

    fs::write(templates.join("template1.docx"), one).unwrap();
    fs::write(templates.join("template2.docx"), two).unwrap();
    fs::write(templates.join("template3.docx"), three).unwrap();
}

fn only_file_in(dir: &Path) -> std::path::PathBuf {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1, "expected one file in {}", dir.display());
    entries.remove(0)
}

#[test]
fn test_cli_help_flag() {
    let temp = temp_dir_in_workspace();
    docfill(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("generate"));
}

#[test]
fn test_list_default_registry() {
    let temp = temp_dir_in_workspace();
    docfill(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. NBFC less than 500 crores"))
        .stdout(predicate::str::contains("3. NBFC more than 1000 crores"));
}

#[test]
fn test_list_json_uses_config() {
    let temp = temp_dir_in_workspace();
    fs::write(
        temp.path().join("docfill.toml"),
        "[[templates.entries]]\nname = \"Custom\"\nfile_name = \"custom.docx\"\n",
    )
    .unwrap();

    let output = docfill(temp.path()).args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["count"], 1);
    assert_eq!(json["templates"][0]["name"], "Custom");
    assert_eq!(json["templates"][0]["file_name"], "custom.docx");
}

#[test]
fn test_invalid_config_fails() {
    let temp = temp_dir_in_workspace();
    fs::write(temp.path().join("docfill.toml"), "[form]\ndecimal_places = 9\n").unwrap();

    docfill(temp.path())
        .arg("list")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("CONFIG_INVALID_VALUE"));
}

#[test]
fn test_formats_json() {
    let temp = temp_dir_in_workspace();
    let output = docfill(temp.path()).args(["formats", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["date_formats"].as_array().unwrap().len(), 7);
    assert_eq!(json["default_date_format"], "January 27, 2026 (Full)");
    assert_eq!(json["decimal_options"], serde_json::json!([0, 1, 2, 3, 4, 5]));
}

#[test]
fn test_fields_lists_kinds() {
    let temp = temp_dir_in_workspace();
    write_default_templates(temp.path());

    let output = docfill(temp.path())
        .args(["fields", "1", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["template"]["name"], "NBFC less than 500 crores");
    let fields = json["fields"].as_array().unwrap();
    let kinds: Vec<(&str, &str)> = fields
        .iter()
        .map(|f| (f["name"].as_str().unwrap(), f["kind"].as_str().unwrap()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("report_date", "date"),
            ("audit_fee", "number"),
            ("client_name", "text"),
            ("registered_address", "text"),
            ("entity_type", "text_dropdown"),
        ]
    );
    assert_eq!(fields[3]["long_text"], true);
    assert_eq!(fields[3]["word_count"], 0);
    assert_eq!(fields[3]["word_limit"], 50);
    assert!(fields[2]["word_limit"].is_null());
    assert_eq!(fields[4]["default_value"], "Deposit taking");
}

#[test]
fn test_fields_missing_template_file() {
    let temp = temp_dir_in_workspace();
    docfill(temp.path())
        .args(["fields", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("FETCH_FAILED"));
}

#[test]
fn test_fields_unknown_template() {
    let temp = temp_dir_in_workspace();
    docfill(temp.path())
        .args(["fields", "annual report"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TEMPLATE_NOT_FOUND"));
}

#[test]
fn test_generate_reports_missing_fields() {
    let temp = temp_dir_in_workspace();
    write_default_templates(temp.path());

    docfill(temp.path())
        .args(["generate", "1", "--set", "client_name=Acme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Missing: report_date, audit_fee, registered_address",
        ));
    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_generate_writes_report() {
    let temp = temp_dir_in_workspace();
    write_default_templates(temp.path());
    fs::write(
        temp.path().join("values.toml"),
        "client_name = \"Acme & Sons\"\nregistered_address = \"12 Harbour Road\"\naudit_fee = 150000\nreport_date = 2026-01-27\n",
    )
    .unwrap();

    docfill(temp.path())
        .args([
            "generate",
            "template1",
            "--values",
            "values.toml",
            "--set",
            "entity_type=Non-deposit taking",
            "--date-format",
            "report_date=DD/MM/YYYY",
            "--decimals",
            "2",
            "--output",
            "out",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated"));

    let report = only_file_in(&temp.path().join("out"));
    let file_name = report.file_name().unwrap().to_str().unwrap().to_string();
    assert!(file_name.starts_with("Engagement_Report_NBFC_less_than_500_crores_"));
    assert!(file_name.ends_with(".docx"));

    let bytes = fs::read(&report).unwrap();
    let body = read_entry(&bytes, "word/document.xml").unwrap();
    assert!(body.contains("Engagement letter for Acme &amp; Sons"));
    assert!(body.contains("Audit fee: 150000.00"));
    assert!(body.contains("Dated 27/01/2026"));
    assert!(body.contains("Entity type: Non-deposit taking"));
    assert!(body.contains("<w:p/>"));
    assert!(body.contains(r#"<w:pStyle w:val="Title"/>"#));
}

#[test]
fn test_generate_warns_about_truncated_values() {
    let temp = temp_dir_in_workspace();
    write_default_templates(temp.path());
    fs::write(
        temp.path().join("docfill.toml"),
        "[form]\nword_limit = 2\n",
    )
    .unwrap();

    docfill(temp.path())
        .args([
            "generate",
            "1",
            "-s",
            "client_name=Acme",
            "-s",
            "registered_address=12 Harbour Road",
            "-s",
            "audit_fee=1",
            "-s",
            "report_date=2026-01-27",
            "-o",
            "out",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("! 'registered_address' limited to 2 words"));

    let bytes = fs::read(only_file_in(&temp.path().join("out"))).unwrap();
    let body = read_entry(&bytes, "word/document.xml").unwrap();
    assert!(body.contains("Registered office: 12 Harbour"));
    assert!(!body.contains("Harbour Road"));
}

#[test]
fn test_generate_json_output_and_config_prefix() {
    let temp = temp_dir_in_workspace();
    write_default_templates(temp.path());
    fs::write(
        temp.path().join("docfill.toml"),
        "[output]\nprefix = \"Report\"\ndir = \"reports\"\n",
    )
    .unwrap();

    let output = docfill(temp.path())
        .args(["generate", "2", "-s", "amount=7.5", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let file_name = json["file_name"].as_str().unwrap();
    assert!(file_name.starts_with("Report_NBFC_500_to_1000_crores_"));
    assert_eq!(json["replacements"]["amount"], "8");
    assert!(temp.path().join("reports").join(file_name).exists());
}

#[test]
fn test_generate_rejects_bad_decimals() {
    let temp = temp_dir_in_workspace();
    write_default_templates(temp.path());

    docfill(temp.path())
        .args(["generate", "2", "-s", "amount=1", "--decimals", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("INVALID_DECIMAL_PLACES"));
}

#[test]
fn test_generate_from_http_source() {
    let temp = temp_dir_in_workspace();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/nbfc/template3.docx")
        .with_status(200)
        .with_body(DocxBuilder::new().paragraph("Prepared for {client}").build())
        .create();
    fs::write(
        temp.path().join("docfill.toml"),
        format!("[templates]\nsource = \"{}/nbfc\"\n", server.url()),
    )
    .unwrap();

    docfill(temp.path())
        .args(["generate", "3", "-s", "client=Acme", "-o", "out"])
        .assert()
        .success();
    mock.assert();

    let bytes = fs::read(only_file_in(&temp.path().join("out"))).unwrap();
    let body = read_entry(&bytes, "word/document.xml").unwrap();
    assert!(body.contains("Prepared for Acme"));
}
