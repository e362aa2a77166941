// Test utility module for testdoc integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use testdoc::{TestResult, TestStatus};

pub const INVOICE_SUITE: &str = "com.example.billing.InvoiceServiceTest";

/// Test source covering a valid request, a null email and a boundary amount.
pub const INVOICE_SOURCE: &str = r#"package com.example.billing;

import org.junit.jupiter.api.Test;

class InvoiceServiceTest {

    @Test
    void createInvoice_whenValidRequest_shouldCreateSuccessfully() {
        request.setAmount(100);
        Invoice result = service.create(request);
        assertThat(result).isNotNull();
    }

    @Test
    void createInvoice_whenEmailNull_shouldThrowValidationException() {
        request.setEmail(null);
        assertThatThrownBy(() -> service.create(request))
            .isInstanceOf(ValidationException.class);
    }

    @Test
    public void cancelInvoice_whenAlreadyPaid_shouldReject() {
        request.setStatus(InvoiceStatus.PAID);
        // Status 409
        assertFalse(service.cancel(invoice));
    }
}
"#;

pub fn result(name: &str, status: TestStatus) -> TestResult {
    TestResult {
        name: name.to_string(),
        class_name: Some(INVOICE_SUITE.to_string()),
        status,
        duration_seconds: 0.05,
        error_message: None,
        error_type: None,
    }
}

/// Write `contents` under `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

/// Surefire-style result document for the invoice suite.
pub fn invoice_report_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuite name="{INVOICE_SUITE}" tests="3" failures="0" errors="1" skipped="0" time="0.42">
  <testcase name="createInvoice_whenValidRequest_shouldCreateSuccessfully" classname="{INVOICE_SUITE}" time="0.12"/>
  <testcase name="createInvoice_whenEmailNull_shouldThrowValidationException" classname="{INVOICE_SUITE}" time="0.2">
    <error message="boom" type="java.lang.IllegalStateException">java.lang.IllegalStateException: boom
	at com.example.billing.InvoiceService.create(InvoiceService.java:42)</error>
  </testcase>
  <testcase name="cancelInvoice_whenAlreadyPaid_shouldReject" classname="{INVOICE_SUITE}" time="0.1"/>
</testsuite>
"#
    )
}

/// Lay out a sources tree and a reports directory under `root`.
pub fn invoice_project(root: &Path) -> (PathBuf, PathBuf) {
    let sources = root.join("src/test/java");
    let reports = root.join("target/surefire-reports");
    write_file(
        &sources,
        "com/example/billing/InvoiceServiceTest.java",
        INVOICE_SOURCE,
    );
    write_file(
        &reports,
        &format!("TEST-{INVOICE_SUITE}.xml"),
        &invoice_report_xml(),
    );
    (sources, reports)
}
