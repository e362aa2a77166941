//! Directory runs: result documents paired with a sources tree, through the
//! library entry point and through the `testdoc` binary.

mod common;

use assert_cmd::Command;
use common::{invoice_project, write_file, INVOICE_SUITE};
use serde_json::Value;
use std::fs;
use tempfile::TempDir;
use testdoc::{run_directories, DiagnosticKind, Pipeline, TestStatus};

#[test]
fn test_run_directories_parses_statuses_and_messages() {
    let temp_dir = TempDir::new().unwrap();
    let (sources, reports) = invoice_project(temp_dir.path());

    let report = run_directories(&Pipeline::default(), &sources, &reports).unwrap();

    assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);
    let table = report.table("createInvoice").unwrap();
    assert_eq!(table.case_count, 2);
    assert_eq!(table.cases[1].status, TestStatus::Error);
    assert_eq!(
        table.cases[1].error_message.as_deref(),
        Some("java.lang.IllegalStateException: boom")
    );
    assert!((table.cases[0].duration_seconds - 0.12).abs() < f64::EPSILON);
}

#[test]
fn test_suite_without_source_is_excluded_with_diagnostic() {
    let temp_dir = TempDir::new().unwrap();
    let (sources, reports) = invoice_project(temp_dir.path());
    write_file(
        &reports,
        "TEST-com.example.auth.AuthServiceTest.xml",
        r#"<testsuite name="com.example.auth.AuthServiceTest" tests="1">
  <testcase name="login_whenValid_shouldPass" classname="com.example.auth.AuthServiceTest"/>
</testsuite>"#,
    );

    let report = run_directories(&Pipeline::default(), &sources, &reports).unwrap();

    assert_eq!(report.summary.counts.total, 3);
    assert_eq!(report.diagnostics.len(), 1);
    let diagnostic = &report.diagnostics[0];
    assert_eq!(diagnostic.kind, DiagnosticKind::MissingCounterpart);
    assert_eq!(
        diagnostic.subject.as_deref(),
        Some("com.example.auth.AuthServiceTest")
    );
}

#[test]
fn test_malformed_document_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let (sources, reports) = invoice_project(temp_dir.path());
    write_file(&reports, "TEST-broken.xml", "<testsuite name=\"Broken\"><testcase");

    let report = run_directories(&Pipeline::default(), &sources, &reports).unwrap();

    assert_eq!(report.tables.len(), 2);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].kind, DiagnosticKind::ResultParse);
}

#[test]
fn test_nested_class_documents_share_one_source() {
    let temp_dir = TempDir::new().unwrap();
    let sources = temp_dir.path().join("src/test/java");
    let reports = temp_dir.path().join("target/surefire-reports");
    write_file(
        &sources,
        "com/example/billing/LockServiceTest.java",
        r#"package com.example.billing;

class LockServiceTest {
    @Test
    void lock_whenFree_shouldLock() {
        assertTrue(service.lock(id));
    }

    @Nested
    class WhenLocked {
        @Test
        void lock_whenHeld_shouldRefuse() {
            assertFalse(service.lock(id));
        }
    }
}
"#,
    );
    write_file(
        &reports,
        "TEST-com.example.billing.LockServiceTest.xml",
        r#"<testsuite name="com.example.billing.LockServiceTest" tests="1">
  <testcase name="lock_whenFree_shouldLock" classname="com.example.billing.LockServiceTest"/>
</testsuite>"#,
    );
    write_file(
        &reports,
        "TEST-com.example.billing.LockServiceTest$WhenLocked.xml",
        r#"<testsuite name="com.example.billing.LockServiceTest$WhenLocked" tests="1" failures="1">
  <testcase name="lock_whenHeld_shouldRefuse" classname="com.example.billing.LockServiceTest$WhenLocked">
    <failure message="expected false">AssertionFailedError: expected false</failure>
  </testcase>
</testsuite>"#,
    );

    let report = run_directories(&Pipeline::default(), &sources, &reports).unwrap();

    assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);
    assert_eq!(report.summary.counts.total, 2);
    let table = report.table("lock").unwrap();
    assert_eq!(table.case_count, 2);
    let statuses: Vec<_> = table.cases.iter().map(|c| c.status).collect();
    assert_eq!(statuses, vec![TestStatus::Pass, TestStatus::Fail]);
    assert!(table.cases.iter().all(|c| c.reported));
}

#[test]
fn test_source_without_result_document_still_runs() {
    let temp_dir = TempDir::new().unwrap();
    let (sources, reports) = invoice_project(temp_dir.path());
    write_file(
        &sources,
        "com/example/user/UserServiceTest.java",
        r#"package com.example.user;

class UserServiceTest {
    @Test
    void findUser_whenIdExists_shouldReturnUser() {
        assertThat(service.findUser(1L)).isNotNull();
    }
}
"#,
    );
    write_file(
        &sources,
        "com/example/user/UserFixtures.java",
        "class UserFixtures { static User user() { return new User(); } }",
    );

    let report = run_directories(&Pipeline::default(), &sources, &reports).unwrap();

    assert_eq!(report.summary.counts.total, 4);
    let table = report.table("findUser").unwrap();
    assert_eq!(table.case_count, 1);
    assert_eq!(table.cases[0].status, TestStatus::Pass);
    assert!(!table.cases[0].reported);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].kind, DiagnosticKind::CorrelationGap);
    assert_eq!(
        report.diagnostics[0].subject.as_deref(),
        Some("com.example.user.UserServiceTest")
    );
}

#[test]
fn test_missing_reports_directory_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = run_directories(
        &Pipeline::default(),
        temp_dir.path(),
        &temp_dir.path().join("absent"),
    );
    assert!(result.is_err());
}

#[test]
fn test_cli_writes_json_report() {
    let temp_dir = TempDir::new().unwrap();
    let (sources, reports) = invoice_project(temp_dir.path());
    let output_path = temp_dir.path().join("out/report.json");

    Command::cargo_bin("testdoc")
        .unwrap()
        .current_dir(temp_dir.path())
        .arg("--sources")
        .arg(&sources)
        .arg("--reports")
        .arg(&reports)
        .arg("--output")
        .arg(&output_path)
        .assert()
        .success();

    let json: Value = serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(json["summary"]["methods"], 2);
    assert_eq!(json["summary"]["counts"]["total"], 3);
    assert_eq!(json["tables"][0]["method"], "createInvoice");
    assert_eq!(json["tables"][0]["cases"][0]["id"], "UTCID01");
    assert_eq!(json["modules"][0]["module"], "InvoiceService");
    assert_eq!(json["diagnostics"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_cli_method_filter_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let (sources, reports) = invoice_project(temp_dir.path());

    let output = Command::cargo_bin("testdoc")
        .unwrap()
        .current_dir(temp_dir.path())
        .env("TESTDOC_SOURCES", &sources)
        .env("TESTDOC_REPORTS", &reports)
        .args(["--method", "cancelInvoice"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let tables = json["tables"].as_array().unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0]["method"], "cancelInvoice");
    assert_eq!(json["summary"]["counts"]["total"], 1);
}

#[test]
fn test_cli_rejects_invalid_config() {
    let temp_dir = TempDir::new().unwrap();
    let (sources, reports) = invoice_project(temp_dir.path());
    let config = write_file(
        temp_dir.path(),
        "bad.toml",
        "[extraction]\nmax_properties = 0\n",
    );

    Command::cargo_bin("testdoc")
        .unwrap()
        .current_dir(temp_dir.path())
        .arg("--sources")
        .arg(&sources)
        .arg("--reports")
        .arg(&reports)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure();
}

#[test]
fn test_suite_name_resolves_by_package_path() {
    let temp_dir = TempDir::new().unwrap();
    let (sources, _) = invoice_project(temp_dir.path());
    let index = testdoc::pipeline::SourceIndex::build(&sources, "java");
    let resolved = index.resolve(INVOICE_SUITE).unwrap();
    assert!(resolved.ends_with("com/example/billing/InvoiceServiceTest.java"));
}
